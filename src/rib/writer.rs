//! RIB writer: serializes [`Renderer`] calls through a [`Formatter`].
//!
//! Most requests print their name, their fixed arguments and their
//! parameter list. The few with side effects (handle allocation,
//! declarations, the archive search path and archive inlining) are
//! implemented by hand next to the helpers they use.

use std::fs::File;
use std::io::{BufReader, Write};
use std::rc::Rc;

use super::ascii::AsciiFormatter;
use super::binary::BinaryFormatter;
use super::format::Formatter;
use super::search_path::SearchPath;
use super::RibOptions;
use crate::core::{
    ArchiveCallback, ErrorFunc, FilterFunc, HandleCounter, LightHandle, NameRegistry, ObjectHandle,
    ParamList, ParserFactory, ProcFreeFunc, ProcSubdivFunc, Renderer, RibParser, RibSink,
    StandardBasis, TokenDictionary, Type, TypeSpec,
};
use crate::util::{flatten, BasisMatrix, Bound, Color, Error, Matrix, Point, Result};

/// Emit one request: name, whitespace-separated arguments, parameter list.
macro_rules! request {
    ($self:ident, $name:expr $(, $arg:expr)* $(; $params:expr)?) => {{
        $self.formatter.begin_request($name)?;
        $(
            $self.formatter.whitespace()?;
            $self.formatter.print(&$arg)?;
        )*
        $( $self.print_param_list($params)?; )?
        $self.formatter.end_request()
    }};
}

/// Serializes RenderMan requests to a RIB stream.
pub struct RibOut<F: Formatter> {
    formatter: F,
    /// Declare()'d tokens
    token_dict: TokenDictionary,
    filter_funcs: NameRegistry<FilterFunc>,
    error_funcs: NameRegistry<ErrorFunc>,
    proc_subdiv_funcs: NameRegistry<ProcSubdivFunc>,
    light_handles: HandleCounter,
    object_handles: HandleCounter,
    /// Read and insert archives instead of emitting ReadArchive
    interpolate_archives: bool,
    archive_search_path: SearchPath,
    parser_factory: Option<ParserFactory>,
    /// Created on the first inlined archive, reused afterwards
    parser: Option<Rc<dyn RibParser>>,
    finished: bool,
}

impl<W: Write> RibOut<AsciiFormatter<W>> {
    /// ASCII writer on `out`.
    pub fn ascii(out: W, options: RibOptions) -> Self {
        let sink = RibSink::new(out, options.gzip);
        Self::new(AsciiFormatter::new(sink), options)
    }
}

impl<W: Write> RibOut<BinaryFormatter<W>> {
    /// Binary writer on `out`.
    pub fn binary(out: W, options: RibOptions) -> Self {
        let sink = RibSink::new(out, options.gzip);
        Self::new(BinaryFormatter::new(sink), options)
    }
}

impl<F: Formatter> RibOut<F> {
    /// Writer on an already configured formatter.
    ///
    /// `options.binary` and `options.gzip` are properties of the formatter
    /// and its sink and are not consulted here.
    pub fn new(formatter: F, options: RibOptions) -> Self {
        Self {
            formatter,
            token_dict: TokenDictionary::new(),
            filter_funcs: NameRegistry::filters(),
            error_funcs: NameRegistry::error_handlers(),
            proc_subdiv_funcs: NameRegistry::procedurals(),
            light_handles: HandleCounter::default(),
            object_handles: HandleCounter::default(),
            interpolate_archives: options.interpolate_archives,
            archive_search_path: SearchPath::default(),
            parser_factory: options.parser_factory,
            parser: None,
            finished: false,
        }
    }

    /// The active formatter.
    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Current archive search path.
    pub fn archive_search_path(&self) -> &SearchPath {
        &self.archive_search_path
    }

    /// Flush the stream and close any compressor. The sink stays open.
    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        self.formatter.finish()
    }

    fn print_param_list(&mut self, params: ParamList) -> Result<()> {
        for param in params {
            self.formatter.whitespace()?;
            self.formatter.print_param(param)?;
        }
        Ok(())
    }

    fn print_basis(&mut self, basis: &BasisMatrix) -> Result<()> {
        match StandardBasis::recognize(basis) {
            Some(standard) => self.formatter.print_string(standard.name()),
            None => self.formatter.print_float_array(&flatten(basis)),
        }
    }

    fn light_source_general(&mut self, request: &str, name: &str, params: ParamList) -> Result<LightHandle> {
        let handle = LightHandle(self.light_handles.issue()?);
        request!(self, request, name, handle; params)?;
        Ok(handle)
    }

    fn nested_parser(&mut self) -> Result<Rc<dyn RibParser>> {
        if let Some(parser) = &self.parser {
            return Ok(Rc::clone(parser));
        }
        let factory = self
            .parser_factory
            .as_ref()
            .ok_or_else(|| Error::other("no RIB parser available for archive inlining"))?;
        let parser = factory();
        self.parser = Some(Rc::clone(&parser));
        Ok(parser)
    }

    fn emit_procedural(&mut self, data: &[String], bound: &Bound, refine: ProcSubdivFunc) -> Result<()> {
        let name = self.proc_subdiv_funcs.name(refine)?;
        let nargs = match name {
            "DelayedReadArchive" => 1,
            "RunProgram" | "DynamicLoad" => 2,
            _ => data.len(),
        };
        if data.len() < nargs {
            return Err(Error::bad_argument(
                "Procedural",
                format!("{name} takes {nargs} string arguments, got {}", data.len()),
            ));
        }
        request!(self, "Procedural", name, data[..nargs], bound)
    }

    /// Locate and open an archive for inlining.
    fn open_archive(&mut self, name: &str) -> Result<(BufReader<File>, Rc<dyn RibParser>)> {
        let path = self
            .archive_search_path
            .find(name)
            .ok_or_else(|| Error::FileNotFound(name.into()))?;
        tracing::debug!(archive = name, path = %path.display(), "resolved archive");
        let file = File::open(&path)?;
        let parser = self.nested_parser()?;
        Ok((BufReader::new(file), parser))
    }
}

impl<F: Formatter> Drop for RibOut<F> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.formatter.finish() {
                tracing::error!(error = %e, "failed to finish RIB stream");
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
impl<F: Formatter> Renderer for RibOut<F> {
    fn filter_func(&self, name: &str) -> Result<FilterFunc> {
        self.filter_funcs.handle(name)
    }

    fn error_func(&self, name: &str) -> Result<ErrorFunc> {
        self.error_funcs.handle(name)
    }

    fn proc_subdiv_func(&self, name: &str) -> Result<ProcSubdivFunc> {
        self.proc_subdiv_funcs.handle(name)
    }

    fn standard_basis(&self, name: &str) -> Result<&'static BasisMatrix> {
        StandardBasis::from_name(name).map(StandardBasis::matrix)
    }

    fn declaration<'t>(&self, token: &'t str) -> Result<(TypeSpec, &'t str)> {
        self.token_dict.resolve(token)
    }

    fn archive_record(&mut self, kind: &str, text: &str) -> Result<()> {
        self.formatter.archive_record(kind, text)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        tracing::error!("{message}");
        Ok(())
    }

    fn declare(&mut self, name: &str, declaration: &str) -> Result<()> {
        self.token_dict.declare(name, declaration)?;
        request!(self, "Declare", name, declaration)
    }

    fn frame_begin(&mut self, number: i32) -> Result<()> {
        request!(self, "FrameBegin", number)?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn frame_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "FrameEnd")
    }

    fn world_begin(&mut self) -> Result<()> {
        request!(self, "WorldBegin")?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn world_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "WorldEnd")
    }

    fn if_begin(&mut self, condition: &str) -> Result<()> {
        request!(self, "IfBegin", condition)?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn else_if(&mut self, condition: &str) -> Result<()> {
        request!(self, "ElseIf", condition)
    }

    fn else_branch(&mut self) -> Result<()> {
        request!(self, "Else")
    }

    fn if_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "IfEnd")
    }

    fn format(&mut self, xresolution: i32, yresolution: i32, pixel_aspect_ratio: f32) -> Result<()> {
        request!(self, "Format", xresolution, yresolution, pixel_aspect_ratio)
    }

    fn frame_aspect_ratio(&mut self, frame_ratio: f32) -> Result<()> {
        request!(self, "FrameAspectRatio", frame_ratio)
    }

    fn screen_window(&mut self, left: f32, right: f32, bottom: f32, top: f32) -> Result<()> {
        request!(self, "ScreenWindow", left, right, bottom, top)
    }

    fn crop_window(&mut self, xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Result<()> {
        request!(self, "CropWindow", xmin, xmax, ymin, ymax)
    }

    fn projection(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Projection", name; params)
    }

    fn clipping(&mut self, near: f32, far: f32) -> Result<()> {
        request!(self, "Clipping", near, far)
    }

    fn clipping_plane(&mut self, x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Result<()> {
        request!(self, "ClippingPlane", x, y, z, nx, ny, nz)
    }

    fn depth_of_field(&mut self, fstop: f32, focal_length: f32, focal_distance: f32) -> Result<()> {
        request!(self, "DepthOfField", fstop, focal_length, focal_distance)
    }

    fn shutter(&mut self, open_time: f32, close_time: f32) -> Result<()> {
        request!(self, "Shutter", open_time, close_time)
    }

    fn pixel_variance(&mut self, variance: f32) -> Result<()> {
        request!(self, "PixelVariance", variance)
    }

    fn pixel_samples(&mut self, xsamples: f32, ysamples: f32) -> Result<()> {
        request!(self, "PixelSamples", xsamples, ysamples)
    }

    fn pixel_filter(&mut self, function: FilterFunc, xwidth: f32, ywidth: f32) -> Result<()> {
        let function = self.filter_funcs.name(function)?;
        request!(self, "PixelFilter", function, xwidth, ywidth)
    }

    fn exposure(&mut self, gain: f32, gamma: f32) -> Result<()> {
        request!(self, "Exposure", gain, gamma)
    }

    fn imager(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Imager", name; params)
    }

    fn quantize(&mut self, ty: &str, one: i32, min: i32, max: i32, dither_amplitude: f32) -> Result<()> {
        request!(self, "Quantize", ty, one, min, max, dither_amplitude)
    }

    fn display(&mut self, name: &str, ty: &str, mode: &str, params: ParamList) -> Result<()> {
        request!(self, "Display", name, ty, mode; params)
    }

    fn hider(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Hider", name; params)
    }

    fn color_samples(&mut self, n_rgb: &[f32], rgb_n: &[f32]) -> Result<()> {
        request!(self, "ColorSamples", n_rgb, rgb_n)
    }

    fn relative_detail(&mut self, relative_detail: f32) -> Result<()> {
        request!(self, "RelativeDetail", relative_detail)
    }

    fn option(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Option", name; params)?;
        if name == "searchpath" {
            for param in params {
                if param.name != "archive" || param.spec != TypeSpec::uniform(Type::String) {
                    continue;
                }
                if let Some(path) = param.first_string() {
                    self.archive_search_path = self.archive_search_path.expand(path);
                    tracing::debug!(path, "archive search path updated");
                }
            }
        }
        Ok(())
    }

    fn attribute_begin(&mut self) -> Result<()> {
        request!(self, "AttributeBegin")?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn attribute_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "AttributeEnd")
    }

    fn color(&mut self, cq: &Color) -> Result<()> {
        request!(self, "Color", cq)
    }

    fn opacity(&mut self, os: &Color) -> Result<()> {
        request!(self, "Opacity", os)
    }

    fn texture_coordinates(
        &mut self,
        s1: f32, t1: f32, s2: f32, t2: f32, s3: f32, t3: f32, s4: f32, t4: f32,
    ) -> Result<()> {
        request!(self, "TextureCoordinates", s1, t1, s2, t2, s3, t3, s4, t4)
    }

    fn light_source(&mut self, name: &str, params: ParamList) -> Result<LightHandle> {
        self.light_source_general("LightSource", name, params)
    }

    fn area_light_source(&mut self, name: &str, params: ParamList) -> Result<LightHandle> {
        self.light_source_general("AreaLightSource", name, params)
    }

    fn illuminate(&mut self, light: LightHandle, on: bool) -> Result<()> {
        request!(self, "Illuminate", light, on)
    }

    fn surface(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Surface", name; params)
    }

    fn displacement(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Displacement", name; params)
    }

    fn atmosphere(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Atmosphere", name; params)
    }

    fn interior(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Interior", name; params)
    }

    fn exterior(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Exterior", name; params)
    }

    fn shader_layer(&mut self, ty: &str, name: &str, layer_name: &str, params: ParamList) -> Result<()> {
        request!(self, "ShaderLayer", ty, name, layer_name; params)
    }

    fn connect_shader_layers(
        &mut self,
        ty: &str,
        layer1: &str,
        variable1: &str,
        layer2: &str,
        variable2: &str,
    ) -> Result<()> {
        request!(self, "ConnectShaderLayers", ty, layer1, variable1, layer2, variable2)
    }

    fn shading_rate(&mut self, size: f32) -> Result<()> {
        request!(self, "ShadingRate", size)
    }

    fn shading_interpolation(&mut self, ty: &str) -> Result<()> {
        request!(self, "ShadingInterpolation", ty)
    }

    fn matte(&mut self, on: bool) -> Result<()> {
        request!(self, "Matte", on)
    }

    fn bound(&mut self, bound: &Bound) -> Result<()> {
        request!(self, "Bound", bound)
    }

    fn detail(&mut self, bound: &Bound) -> Result<()> {
        request!(self, "Detail", bound)
    }

    fn detail_range(&mut self, off_low: f32, on_low: f32, on_high: f32, off_high: f32) -> Result<()> {
        request!(self, "DetailRange", off_low, on_low, on_high, off_high)
    }

    fn geometric_approximation(&mut self, ty: &str, value: f32) -> Result<()> {
        request!(self, "GeometricApproximation", ty, value)
    }

    fn orientation(&mut self, orientation: &str) -> Result<()> {
        request!(self, "Orientation", orientation)
    }

    fn reverse_orientation(&mut self) -> Result<()> {
        request!(self, "ReverseOrientation")
    }

    fn sides(&mut self, nsides: i32) -> Result<()> {
        request!(self, "Sides", nsides)
    }

    fn attribute(&mut self, name: &str, params: ParamList) -> Result<()> {
        request!(self, "Attribute", name; params)
    }

    fn identity(&mut self) -> Result<()> {
        request!(self, "Identity")
    }

    fn transform(&mut self, transform: &Matrix) -> Result<()> {
        request!(self, "Transform", transform)
    }

    fn concat_transform(&mut self, transform: &Matrix) -> Result<()> {
        request!(self, "ConcatTransform", transform)
    }

    fn perspective(&mut self, fov: f32) -> Result<()> {
        request!(self, "Perspective", fov)
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> Result<()> {
        request!(self, "Translate", dx, dy, dz)
    }

    fn rotate(&mut self, angle: f32, dx: f32, dy: f32, dz: f32) -> Result<()> {
        request!(self, "Rotate", angle, dx, dy, dz)
    }

    fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> Result<()> {
        request!(self, "Scale", sx, sy, sz)
    }

    fn skew(&mut self, angle: f32, dx1: f32, dy1: f32, dz1: f32, dx2: f32, dy2: f32, dz2: f32) -> Result<()> {
        request!(self, "Skew", angle, dx1, dy1, dz1, dx2, dy2, dz2)
    }

    fn coordinate_system(&mut self, space: &str) -> Result<()> {
        request!(self, "CoordinateSystem", space)
    }

    fn coord_sys_transform(&mut self, space: &str) -> Result<()> {
        request!(self, "CoordSysTransform", space)
    }

    fn transform_begin(&mut self) -> Result<()> {
        request!(self, "TransformBegin")?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn transform_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "TransformEnd")
    }

    fn resource(&mut self, handle: &str, ty: &str, params: ParamList) -> Result<()> {
        request!(self, "Resource", handle, ty; params)
    }

    fn resource_begin(&mut self) -> Result<()> {
        request!(self, "ResourceBegin")?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn resource_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "ResourceEnd")
    }

    fn polygon(&mut self, params: ParamList) -> Result<()> {
        request!(self, "Polygon"; params)
    }

    fn general_polygon(&mut self, nverts: &[i32], params: ParamList) -> Result<()> {
        request!(self, "GeneralPolygon", nverts; params)
    }

    fn points_polygons(&mut self, nverts: &[i32], verts: &[i32], params: ParamList) -> Result<()> {
        request!(self, "PointsPolygons", nverts, verts; params)
    }

    fn points_general_polygons(
        &mut self,
        nloops: &[i32],
        nverts: &[i32],
        verts: &[i32],
        params: ParamList,
    ) -> Result<()> {
        request!(self, "PointsGeneralPolygons", nloops, nverts, verts; params)
    }

    fn basis(&mut self, ubasis: &BasisMatrix, ustep: i32, vbasis: &BasisMatrix, vstep: i32) -> Result<()> {
        self.formatter.begin_request("Basis")?;
        self.formatter.whitespace()?;
        self.print_basis(ubasis)?;
        self.formatter.whitespace()?;
        self.formatter.print_int(ustep)?;
        self.formatter.whitespace()?;
        self.print_basis(vbasis)?;
        self.formatter.whitespace()?;
        self.formatter.print_int(vstep)?;
        self.formatter.end_request()
    }

    fn patch(&mut self, ty: &str, params: ParamList) -> Result<()> {
        request!(self, "Patch", ty; params)
    }

    fn patch_mesh(&mut self, ty: &str, nu: i32, uwrap: &str, nv: i32, vwrap: &str, params: ParamList) -> Result<()> {
        request!(self, "PatchMesh", ty, nu, uwrap, nv, vwrap; params)
    }

    fn nu_patch(
        &mut self,
        nu: i32, uorder: i32, uknot: &[f32], umin: f32, umax: f32,
        nv: i32, vorder: i32, vknot: &[f32], vmin: f32, vmax: f32,
        params: ParamList,
    ) -> Result<()> {
        request!(self, "NuPatch", nu, uorder, uknot, umin, umax, nv, vorder, vknot, vmin, vmax; params)
    }

    fn trim_curve(
        &mut self,
        ncurves: &[i32], order: &[i32], knot: &[f32], min: &[f32], max: &[f32],
        n: &[i32], u: &[f32], v: &[f32], w: &[f32],
    ) -> Result<()> {
        request!(self, "TrimCurve", ncurves, order, knot, min, max, n, u, v, w)
    }

    fn subdivision_mesh(
        &mut self,
        scheme: &str,
        nvertices: &[i32],
        vertices: &[i32],
        tags: &[String],
        nargs: &[i32],
        intargs: &[i32],
        floatargs: &[f32],
        params: ParamList,
    ) -> Result<()> {
        request!(self, "SubdivisionMesh", scheme, nvertices, vertices, tags, nargs, intargs, floatargs; params)
    }

    fn sphere(&mut self, radius: f32, zmin: f32, zmax: f32, theta_max: f32, params: ParamList) -> Result<()> {
        request!(self, "Sphere", radius, zmin, zmax, theta_max; params)
    }

    fn cone(&mut self, height: f32, radius: f32, theta_max: f32, params: ParamList) -> Result<()> {
        request!(self, "Cone", height, radius, theta_max; params)
    }

    fn cylinder(&mut self, radius: f32, zmin: f32, zmax: f32, theta_max: f32, params: ParamList) -> Result<()> {
        request!(self, "Cylinder", radius, zmin, zmax, theta_max; params)
    }

    fn hyperboloid(&mut self, point1: &Point, point2: &Point, theta_max: f32, params: ParamList) -> Result<()> {
        request!(self, "Hyperboloid", point1, point2, theta_max; params)
    }

    fn paraboloid(&mut self, rmax: f32, zmin: f32, zmax: f32, theta_max: f32, params: ParamList) -> Result<()> {
        request!(self, "Paraboloid", rmax, zmin, zmax, theta_max; params)
    }

    fn disk(&mut self, height: f32, radius: f32, theta_max: f32, params: ParamList) -> Result<()> {
        request!(self, "Disk", height, radius, theta_max; params)
    }

    fn torus(
        &mut self,
        major_radius: f32,
        minor_radius: f32,
        phi_min: f32,
        phi_max: f32,
        theta_max: f32,
        params: ParamList,
    ) -> Result<()> {
        request!(self, "Torus", major_radius, minor_radius, phi_min, phi_max, theta_max; params)
    }

    fn points(&mut self, params: ParamList) -> Result<()> {
        request!(self, "Points"; params)
    }

    fn curves(&mut self, ty: &str, nvertices: &[i32], wrap: &str, params: ParamList) -> Result<()> {
        request!(self, "Curves", ty, nvertices, wrap; params)
    }

    fn blobby(&mut self, nleaf: i32, code: &[i32], floats: &[f32], strings: &[String], params: ParamList) -> Result<()> {
        request!(self, "Blobby", nleaf, code, floats, strings; params)
    }

    fn procedural(
        &mut self,
        data: Vec<String>,
        bound: &Bound,
        refine: ProcSubdivFunc,
        free: Option<ProcFreeFunc>,
    ) -> Result<()> {
        let result = self.emit_procedural(&data, bound, refine);
        // The free routine owns the data from here on, whatever happened above.
        match free {
            Some(free) => free(data),
            None => drop(data),
        }
        result
    }

    fn geometry(&mut self, ty: &str, params: ParamList) -> Result<()> {
        request!(self, "Geometry", ty; params)
    }

    fn solid_begin(&mut self, ty: &str) -> Result<()> {
        request!(self, "SolidBegin", ty)?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn solid_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "SolidEnd")
    }

    fn object_begin(&mut self) -> Result<ObjectHandle> {
        let handle = ObjectHandle(self.object_handles.issue()?);
        request!(self, "ObjectBegin", handle)?;
        self.formatter.increase_indent();
        Ok(handle)
    }

    fn object_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "ObjectEnd")
    }

    fn object_instance(&mut self, handle: ObjectHandle) -> Result<()> {
        request!(self, "ObjectInstance", handle)
    }

    fn motion_begin(&mut self, times: &[f32]) -> Result<()> {
        request!(self, "MotionBegin", times)?;
        self.formatter.increase_indent();
        Ok(())
    }

    fn motion_end(&mut self) -> Result<()> {
        self.formatter.decrease_indent();
        request!(self, "MotionEnd")
    }

    fn make_texture(
        &mut self,
        image_file: &str,
        texture_file: &str,
        swrap: &str,
        twrap: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamList,
    ) -> Result<()> {
        let filter = self.filter_funcs.name(filter)?;
        request!(self, "MakeTexture", image_file, texture_file, swrap, twrap, filter, swidth, twidth; params)
    }

    fn make_lat_long_environment(
        &mut self,
        image_file: &str,
        refl_file: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamList,
    ) -> Result<()> {
        let filter = self.filter_funcs.name(filter)?;
        request!(self, "MakeLatLongEnvironment", image_file, refl_file, filter, swidth, twidth; params)
    }

    fn make_cube_face_environment(
        &mut self,
        px: &str, nx: &str, py: &str, ny: &str, pz: &str, nz: &str,
        refl_file: &str,
        fov: f32,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamList,
    ) -> Result<()> {
        let filter = self.filter_funcs.name(filter)?;
        request!(
            self, "MakeCubeFaceEnvironment",
            px, nx, py, ny, pz, nz, refl_file, fov, filter, swidth, twidth; params
        )
    }

    fn make_shadow(&mut self, pic_file: &str, shadow_file: &str, params: ParamList) -> Result<()> {
        request!(self, "MakeShadow", pic_file, shadow_file; params)
    }

    fn make_occlusion(&mut self, pic_files: &[String], shadow_file: &str, params: ParamList) -> Result<()> {
        request!(self, "MakeOcclusion", pic_files, shadow_file; params)
    }

    fn error_handler(&mut self, handler: ErrorFunc) -> Result<()> {
        let handler = self.error_funcs.name(handler)?;
        request!(self, "ErrorHandler", handler)
    }

    /// Inline the archive when enabled and resolvable, otherwise write the
    /// request. Errors raised once the nested parser is running propagate
    /// as-is; any `*Begin` it already replayed stays open, so the indent
    /// remains raised for whatever the caller writes next.
    fn read_archive(&mut self, name: &str, _callback: Option<ArchiveCallback>, params: ParamList) -> Result<()> {
        if self.interpolate_archives {
            match self.open_archive(name) {
                Ok((mut input, parser)) => {
                    tracing::debug!(archive = name, "inlining archive");
                    parser.parse_stream(&mut input, name, self)?;
                    tracing::debug!(archive = name, "finished inlining archive");
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!(archive = name, error = %e, "could not ReadArchive file \"{name}\"");
                }
            }
        }
        request!(self, "ReadArchive", name; params)
    }
}
