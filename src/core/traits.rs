//! The RenderMan request surface and the parser seam.
//!
//! [`Renderer`] has one method per RI procedure. Anything that consumes a
//! scene description implements it; a [`RibParser`] drives one from a byte
//! stream, which is how archives get inlined back through a writer.

use std::io::BufRead;
use std::rc::Rc;

use super::handle::{LightHandle, ObjectHandle};
use super::param::{Param, TypeSpec};
use super::registry::{ErrorFunc, FilterFunc, ProcSubdivFunc};
use crate::util::{BasisMatrix, Bound, Color, Matrix, Point, Result};

/// Trailing parameter list of a request.
pub type ParamList<'p> = &'p [Param];

/// Called for archive records met while reading an archive.
pub type ArchiveCallback<'c> = &'c mut dyn FnMut(&str, &str);

/// Takes ownership of a procedural's data once the request is done with it.
pub type ProcFreeFunc = Box<dyn FnOnce(Vec<String>)>;

/// Replays a RIB stream as calls on a [`Renderer`].
///
/// Takes `&self` so one parser instance can be re-entered while it is
/// already parsing (an archive that reads another archive).
pub trait RibParser {
    /// Parse `input` to the end, issuing each request on `renderer`.
    fn parse_stream(
        &self,
        input: &mut dyn BufRead,
        stream_name: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<()>;
}

/// Creates the nested parser used for archive inlining.
pub type ParserFactory = Box<dyn Fn() -> Rc<dyn RibParser>>;

/// The RenderMan Interface request set.
#[allow(clippy::too_many_arguments)]
pub trait Renderer {
    // === Services used by parsers ===

    /// Handle of a standard pixel filter.
    fn filter_func(&self, name: &str) -> Result<FilterFunc>;
    /// Handle of a standard error handler.
    fn error_func(&self, name: &str) -> Result<ErrorFunc>;
    /// Handle of a standard procedural subdivision routine.
    fn proc_subdiv_func(&self, name: &str) -> Result<ProcSubdivFunc>;
    /// Canonical matrix of a named basis.
    fn standard_basis(&self, name: &str) -> Result<&'static BasisMatrix>;
    /// Type and bare name of a parameter token, inline or declared.
    fn declaration<'t>(&self, token: &'t str) -> Result<(TypeSpec, &'t str)>;

    // === Stream control ===

    fn archive_record(&mut self, kind: &str, text: &str) -> Result<()>;
    fn error(&mut self, message: &str) -> Result<()>;
    fn declare(&mut self, name: &str, declaration: &str) -> Result<()>;
    fn frame_begin(&mut self, number: i32) -> Result<()>;
    fn frame_end(&mut self) -> Result<()>;
    fn world_begin(&mut self) -> Result<()>;
    fn world_end(&mut self) -> Result<()>;
    fn if_begin(&mut self, condition: &str) -> Result<()>;
    fn else_if(&mut self, condition: &str) -> Result<()>;
    fn else_branch(&mut self) -> Result<()>;
    fn if_end(&mut self) -> Result<()>;

    // === Camera and options ===

    fn format(&mut self, xresolution: i32, yresolution: i32, pixel_aspect_ratio: f32) -> Result<()>;
    fn frame_aspect_ratio(&mut self, frame_ratio: f32) -> Result<()>;
    fn screen_window(&mut self, left: f32, right: f32, bottom: f32, top: f32) -> Result<()>;
    fn crop_window(&mut self, xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Result<()>;
    fn projection(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn clipping(&mut self, near: f32, far: f32) -> Result<()>;
    fn clipping_plane(&mut self, x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Result<()>;
    fn depth_of_field(&mut self, fstop: f32, focal_length: f32, focal_distance: f32) -> Result<()>;
    fn shutter(&mut self, open_time: f32, close_time: f32) -> Result<()>;
    fn pixel_variance(&mut self, variance: f32) -> Result<()>;
    fn pixel_samples(&mut self, xsamples: f32, ysamples: f32) -> Result<()>;
    fn pixel_filter(&mut self, function: FilterFunc, xwidth: f32, ywidth: f32) -> Result<()>;
    fn exposure(&mut self, gain: f32, gamma: f32) -> Result<()>;
    fn imager(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn quantize(&mut self, ty: &str, one: i32, min: i32, max: i32, dither_amplitude: f32) -> Result<()>;
    fn display(&mut self, name: &str, ty: &str, mode: &str, params: ParamList) -> Result<()>;
    fn hider(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn color_samples(&mut self, n_rgb: &[f32], rgb_n: &[f32]) -> Result<()>;
    fn relative_detail(&mut self, relative_detail: f32) -> Result<()>;
    fn option(&mut self, name: &str, params: ParamList) -> Result<()>;

    // === Attributes and shading ===

    fn attribute_begin(&mut self) -> Result<()>;
    fn attribute_end(&mut self) -> Result<()>;
    fn color(&mut self, cq: &Color) -> Result<()>;
    fn opacity(&mut self, os: &Color) -> Result<()>;
    fn texture_coordinates(
        &mut self,
        s1: f32, t1: f32, s2: f32, t2: f32, s3: f32, t3: f32, s4: f32, t4: f32,
    ) -> Result<()>;
    fn light_source(&mut self, name: &str, params: ParamList) -> Result<LightHandle>;
    fn area_light_source(&mut self, name: &str, params: ParamList) -> Result<LightHandle>;
    fn illuminate(&mut self, light: LightHandle, on: bool) -> Result<()>;
    fn surface(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn displacement(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn atmosphere(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn interior(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn exterior(&mut self, name: &str, params: ParamList) -> Result<()>;
    fn shader_layer(&mut self, ty: &str, name: &str, layer_name: &str, params: ParamList) -> Result<()>;
    fn connect_shader_layers(
        &mut self,
        ty: &str,
        layer1: &str,
        variable1: &str,
        layer2: &str,
        variable2: &str,
    ) -> Result<()>;
    fn shading_rate(&mut self, size: f32) -> Result<()>;
    fn shading_interpolation(&mut self, ty: &str) -> Result<()>;
    fn matte(&mut self, on: bool) -> Result<()>;
    fn bound(&mut self, bound: &Bound) -> Result<()>;
    fn detail(&mut self, bound: &Bound) -> Result<()>;
    fn detail_range(&mut self, off_low: f32, on_low: f32, on_high: f32, off_high: f32) -> Result<()>;
    fn geometric_approximation(&mut self, ty: &str, value: f32) -> Result<()>;
    fn orientation(&mut self, orientation: &str) -> Result<()>;
    fn reverse_orientation(&mut self) -> Result<()>;
    fn sides(&mut self, nsides: i32) -> Result<()>;
    fn attribute(&mut self, name: &str, params: ParamList) -> Result<()>;

    // === Transformations ===

    fn identity(&mut self) -> Result<()>;
    fn transform(&mut self, transform: &Matrix) -> Result<()>;
    fn concat_transform(&mut self, transform: &Matrix) -> Result<()>;
    fn perspective(&mut self, fov: f32) -> Result<()>;
    fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> Result<()>;
    fn rotate(&mut self, angle: f32, dx: f32, dy: f32, dz: f32) -> Result<()>;
    fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> Result<()>;
    fn skew(&mut self, angle: f32, dx1: f32, dy1: f32, dz1: f32, dx2: f32, dy2: f32, dz2: f32) -> Result<()>;
    fn coordinate_system(&mut self, space: &str) -> Result<()>;
    fn coord_sys_transform(&mut self, space: &str) -> Result<()>;
    fn transform_begin(&mut self) -> Result<()>;
    fn transform_end(&mut self) -> Result<()>;

    // === Resources ===

    fn resource(&mut self, handle: &str, ty: &str, params: ParamList) -> Result<()>;
    fn resource_begin(&mut self) -> Result<()>;
    fn resource_end(&mut self) -> Result<()>;

    // === Geometry ===

    fn polygon(&mut self, params: ParamList) -> Result<()>;
    fn general_polygon(&mut self, nverts: &[i32], params: ParamList) -> Result<()>;
    fn points_polygons(&mut self, nverts: &[i32], verts: &[i32], params: ParamList) -> Result<()>;
    fn points_general_polygons(
        &mut self,
        nloops: &[i32],
        nverts: &[i32],
        verts: &[i32],
        params: ParamList,
    ) -> Result<()>;
    fn basis(&mut self, ubasis: &BasisMatrix, ustep: i32, vbasis: &BasisMatrix, vstep: i32) -> Result<()>;
    fn patch(&mut self, ty: &str, params: ParamList) -> Result<()>;
    fn patch_mesh(&mut self, ty: &str, nu: i32, uwrap: &str, nv: i32, vwrap: &str, params: ParamList) -> Result<()>;
    fn nu_patch(
        &mut self,
        nu: i32, uorder: i32, uknot: &[f32], umin: f32, umax: f32,
        nv: i32, vorder: i32, vknot: &[f32], vmin: f32, vmax: f32,
        params: ParamList,
    ) -> Result<()>;
    fn trim_curve(
        &mut self,
        ncurves: &[i32], order: &[i32], knot: &[f32], min: &[f32], max: &[f32],
        n: &[i32], u: &[f32], v: &[f32], w: &[f32],
    ) -> Result<()>;
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
    ) -> Result<()>;
    fn sphere(&mut self, radius: f32, zmin: f32, zmax: f32, theta_max: f32, params: ParamList) -> Result<()>;
    fn cone(&mut self, height: f32, radius: f32, theta_max: f32, params: ParamList) -> Result<()>;
    fn cylinder(&mut self, radius: f32, zmin: f32, zmax: f32, theta_max: f32, params: ParamList) -> Result<()>;
    fn hyperboloid(&mut self, point1: &Point, point2: &Point, theta_max: f32, params: ParamList) -> Result<()>;
    fn paraboloid(&mut self, rmax: f32, zmin: f32, zmax: f32, theta_max: f32, params: ParamList) -> Result<()>;
    fn disk(&mut self, height: f32, radius: f32, theta_max: f32, params: ParamList) -> Result<()>;
    fn torus(
        &mut self,
        major_radius: f32,
        minor_radius: f32,
        phi_min: f32,
        phi_max: f32,
        theta_max: f32,
        params: ParamList,
    ) -> Result<()>;
    fn points(&mut self, params: ParamList) -> Result<()>;
    fn curves(&mut self, ty: &str, nvertices: &[i32], wrap: &str, params: ParamList) -> Result<()>;
    fn blobby(&mut self, nleaf: i32, code: &[i32], floats: &[f32], strings: &[String], params: ParamList) -> Result<()>;
    fn procedural(
        &mut self,
        data: Vec<String>,
        bound: &Bound,
        refine: ProcSubdivFunc,
        free: Option<ProcFreeFunc>,
    ) -> Result<()>;
    fn geometry(&mut self, ty: &str, params: ParamList) -> Result<()>;

    // === Solids, retained objects and motion ===

    fn solid_begin(&mut self, ty: &str) -> Result<()>;
    fn solid_end(&mut self) -> Result<()>;
    fn object_begin(&mut self) -> Result<ObjectHandle>;
    fn object_end(&mut self) -> Result<()>;
    fn object_instance(&mut self, handle: ObjectHandle) -> Result<()>;
    fn motion_begin(&mut self, times: &[f32]) -> Result<()>;
    fn motion_end(&mut self) -> Result<()>;

    // === Texture baking ===

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
    ) -> Result<()>;
    fn make_lat_long_environment(
        &mut self,
        image_file: &str,
        refl_file: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamList,
    ) -> Result<()>;
    fn make_cube_face_environment(
        &mut self,
        px: &str, nx: &str, py: &str, ny: &str, pz: &str, nz: &str,
        refl_file: &str,
        fov: f32,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamList,
    ) -> Result<()>;
    fn make_shadow(&mut self, pic_file: &str, shadow_file: &str, params: ParamList) -> Result<()>;
    fn make_occlusion(&mut self, pic_files: &[String], shadow_file: &str, params: ParamList) -> Result<()>;

    // === Errors and archives ===

    fn error_handler(&mut self, handler: ErrorFunc) -> Result<()>;
    fn read_archive(&mut self, name: &str, callback: Option<ArchiveCallback>, params: ParamList) -> Result<()>;
}
