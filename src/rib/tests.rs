use super::*;
use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;

use crate::core::{
    Class, ErrorFunc, FilterFunc, LightHandle, ObjectHandle, Param, ParamValue, ProcFreeFunc,
    RegistryHandle, Renderer, StandardBasis, Type, TypeSpec, BEZIER_BASIS, B_SPLINE_BASIS,
    CATMULL_ROM_BASIS,
};
use crate::util::{Error, Result, IDENTITY};

type AsciiOut<'a> = RibOut<AsciiFormatter<&'a mut Vec<u8>>>;

/// Run `f` against an ASCII writer and return the text it produced.
fn ascii(f: impl FnOnce(&mut AsciiOut) -> Result<()>) -> Result<String> {
    let mut buf = Vec::new();
    let mut ri = RibOut::ascii(&mut buf, RibOptions::new());
    f(&mut ri)?;
    ri.finish()?;
    Ok(String::from_utf8(buf).unwrap())
}

fn float_bytes(v: f32) -> [u8; 5] {
    let b = v.to_bits().to_be_bytes();
    [0o244, b[0], b[1], b[2], b[3]]
}

#[test]
fn test_sphere_ascii() -> Result<()> {
    let out = ascii(|ri| ri.sphere(1.0, -1.0, 1.0, 360.0, &[]))?;
    assert_eq!(out, "Sphere 1 -1 1 360\n");
    Ok(())
}

#[test]
fn test_param_list() -> Result<()> {
    let params = [
        Param::float("Kd", vec![0.5]),
        Param::string("texturename", "grid.tex"),
        Param::integer("nsamples", vec![4, 8]),
    ];
    let out = ascii(|ri| ri.surface("plastic", &params))?;
    assert_eq!(
        out,
        "Surface \"plastic\" \"uniform float Kd\" [0.5] \"uniform string texturename\" [\"grid.tex\"] \
         \"uniform integer nsamples\" [4 8]\n"
    );
    Ok(())
}

#[test]
fn test_sphere_binary() -> Result<()> {
    let mut buf = Vec::new();
    {
        let mut ri = RibOut::binary(&mut buf, RibOptions::new().binary(true));
        ri.sphere(1.0, -1.0, 1.0, 360.0, &[])?;
        ri.finish()?;
    }

    let mut expected = vec![0o314, 0, 0o226];
    expected.extend_from_slice(b"Sphere");
    expected.extend_from_slice(&[0o246, 0]);
    for v in [1.0, -1.0, 1.0, 360.0] {
        expected.extend_from_slice(&float_bytes(v));
    }
    assert_eq!(buf, expected);
    Ok(())
}

#[test]
fn test_binary_defines_each_request_once() -> Result<()> {
    let mut buf = Vec::new();
    {
        let mut ri = RibOut::binary(&mut buf, RibOptions::new());
        for _ in 0..3 {
            ri.sphere(1.0, -1.0, 1.0, 360.0, &[])?;
        }
        assert_eq!(ri.formatter().request_code("Sphere"), Some(0));
    }
    // define (2 + 7) then three uses (2 + 4 floats of 5 bytes)
    assert_eq!(buf.len(), 9 + 3 * 22);
    assert_eq!(&buf[9..11], &[0o246, 0]);
    assert_eq!(&buf[31..33], &[0o246, 0]);
    Ok(())
}

#[test]
fn test_nesting_indentation() -> Result<()> {
    let out = ascii(|ri| {
        ri.frame_begin(1)?;
        ri.world_begin()?;
        ri.attribute_begin()?;
        ri.transform_begin()?;
        ri.translate(0.0, 0.0, 5.0)?;
        ri.transform_end()?;
        ri.sphere(1.0, -1.0, 1.0, 360.0, &[])?;
        ri.attribute_end()?;
        ri.world_end()?;
        ri.frame_end()
    })?;
    assert_eq!(
        out,
        "FrameBegin 1\n\
         \x20   WorldBegin\n\
         \x20       AttributeBegin\n\
         \x20           TransformBegin\n\
         \x20               Translate 0 0 5\n\
         \x20           TransformEnd\n\
         \x20           Sphere 1 -1 1 360\n\
         \x20       AttributeEnd\n\
         \x20   WorldEnd\n\
         FrameEnd\n"
    );
    Ok(())
}

#[test]
fn test_light_and_object_handles() -> Result<()> {
    let mut handles = Vec::new();
    let out = ascii(|ri| {
        handles.push(ri.light_source("pointlight", &[Param::float("intensity", vec![2.0])])?);
        handles.push(ri.light_source("distantlight", &[])?);
        handles.push(ri.area_light_source("arealight", &[])?);
        ri.illuminate(LightHandle(1), false)?;
        let object = ri.object_begin()?;
        assert_eq!(object, ObjectHandle(1));
        ri.sphere(1.0, -1.0, 1.0, 360.0, &[])?;
        ri.object_end()?;
        ri.object_instance(object)?;
        assert_eq!(ri.object_begin()?, ObjectHandle(2));
        ri.object_end()
    })?;
    assert_eq!(handles, vec![LightHandle(1), LightHandle(2), LightHandle(3)]);
    assert_eq!(
        out,
        "LightSource \"pointlight\" 1 \"uniform float intensity\" [2]\n\
         LightSource \"distantlight\" 2\n\
         AreaLightSource \"arealight\" 3\n\
         Illuminate 1 0\n\
         ObjectBegin 1\n\
         \x20   Sphere 1 -1 1 360\n\
         ObjectEnd\n\
         ObjectInstance 1\n\
         ObjectBegin 2\n\
         ObjectEnd\n"
    );
    Ok(())
}

#[test]
fn test_basis_names() -> Result<()> {
    let copied = CATMULL_ROM_BASIS;
    let out = ascii(|ri| ri.basis(&BEZIER_BASIS, 3, &copied, 1))?;
    assert_eq!(out, "Basis \"bezier\" 3 \"catmull-rom\" 1\n");
    Ok(())
}

#[test]
fn test_basis_custom_matrix() -> Result<()> {
    let custom = [[0.25f32; 4]; 4];
    let out = ascii(|ri| {
        let power = ri.standard_basis("power")?;
        ri.basis(&custom, 2, power, 4)
    })?;
    let floats = vec!["0.25"; 16].join(" ");
    assert_eq!(out, format!("Basis [{floats}] 2 \"power\" 4\n"));
    Ok(())
}

#[test]
fn test_standard_basis_lookup() -> Result<()> {
    let mut buf = Vec::new();
    let ri = RibOut::ascii(&mut buf, RibOptions::new());
    let basis = ri.standard_basis("b-spline")?;
    assert!(std::ptr::eq(basis, &B_SPLINE_BASIS));
    assert_eq!(StandardBasis::recognize(basis), Some(StandardBasis::BSpline));
    assert!(matches!(ri.standard_basis("nurbs"), Err(Error::BadToken(n)) if n == "nurbs"));
    Ok(())
}

#[test]
fn test_filter_and_error_handler_names() -> Result<()> {
    let out = ascii(|ri| {
        let gaussian = ri.filter_func("gaussian")?;
        ri.pixel_filter(gaussian, 2.0, 2.0)?;
        let print = ri.error_func("print")?;
        ri.error_handler(print)?;
        let disk = ri.filter_func("disk")?;
        ri.make_texture("in.tif", "out.tex", "periodic", "clamp", disk, 1.0, 1.0, &[])
    })?;
    assert_eq!(
        out,
        "PixelFilter \"gaussian\" 2 2\n\
         ErrorHandler \"print\"\n\
         MakeTexture \"in.tif\" \"out.tex\" \"periodic\" \"clamp\" \"disk\" 1 1\n"
    );
    Ok(())
}

#[test]
fn test_unknown_names_and_handles() -> Result<()> {
    let out = ascii(|ri| {
        assert!(matches!(ri.filter_func("lanczos"), Err(Error::BadToken(_))));
        assert!(matches!(ri.error_func("panic"), Err(Error::BadToken(_))));
        assert!(matches!(ri.proc_subdiv_func("Fork"), Err(Error::BadToken(_))));

        let bogus = NonZeroU32::new(99).unwrap();
        let result = ri.pixel_filter(FilterFunc::from_raw(bogus), 1.0, 1.0);
        assert!(matches!(result, Err(Error::BadHandle(99))));
        let result = ri.error_handler(ErrorFunc::from_raw(bogus));
        assert!(matches!(result, Err(Error::BadHandle(99))));
        Ok(())
    })?;
    // Nothing is emitted for a rejected request.
    assert_eq!(out, "");
    Ok(())
}

#[test]
fn test_procedural_truncates_and_frees() -> Result<()> {
    let freed: Rc<RefCell<Option<Vec<String>>>> = Rc::default();
    let sink = Rc::clone(&freed);
    let free: ProcFreeFunc = Box::new(move |data| *sink.borrow_mut() = Some(data));

    let out = ascii(|ri| {
        let refine = ri.proc_subdiv_func("DelayedReadArchive")?;
        let data = vec!["tree.rib".to_string(), "ignored".to_string()];
        ri.procedural(data, &[-1.0, 1.0, -1.0, 1.0, 0.0, 2.0], refine, Some(free))
    })?;

    assert_eq!(out, "Procedural \"DelayedReadArchive\" [\"tree.rib\"] [-1 1 -1 1 0 2]\n");
    assert_eq!(freed.borrow().as_deref(), Some(&["tree.rib".to_string(), "ignored".to_string()][..]));
    Ok(())
}

#[test]
fn test_procedural_missing_arguments() -> Result<()> {
    let freed = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&freed);
    let free: ProcFreeFunc = Box::new(move |_| *flag.borrow_mut() = true);

    let out = ascii(|ri| {
        let refine = ri.proc_subdiv_func("RunProgram")?;
        let result = ri.procedural(
            vec!["prog".to_string()],
            &[0.0; 6],
            refine,
            Some(free),
        );
        assert!(matches!(result, Err(Error::BadArgument { request: "Procedural", .. })));
        Ok(())
    })?;

    assert_eq!(out, "");
    assert!(*freed.borrow(), "free routine must run even when the request fails");
    Ok(())
}

#[test]
fn test_procedural_two_arguments() -> Result<()> {
    let out = ascii(|ri| {
        let refine = ri.proc_subdiv_func("DynamicLoad")?;
        let data = vec!["grass.so".to_string(), "density 4".to_string()];
        ri.procedural(data, &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0], refine, None)
    })?;
    assert_eq!(out, "Procedural \"DynamicLoad\" [\"grass.so\" \"density 4\"] [0 1 0 1 0 1]\n");
    Ok(())
}

#[test]
fn test_option_searchpath() -> Result<()> {
    let mut buf = Vec::new();
    let mut ri = RibOut::ascii(&mut buf, RibOptions::new());

    ri.option("searchpath", &[Param::string("archive", "/a:/b")])?;
    ri.option("searchpath", &[Param::string("archive", "&:/c")])?;
    // Only string-typed "archive" entries count.
    ri.option("searchpath", &[Param::float("archive", vec![1.0])])?;
    // ... and only plain uniform, single-valued strings.
    let varying = TypeSpec::new(Class::Varying, Type::String, 1);
    let value = ParamValue::String(vec!["/v".into()]);
    ri.option("searchpath", &[Param::new(varying, "archive", value)])?;
    let pair = TypeSpec::new(Class::Uniform, Type::String, 2);
    let both = vec!["/x".to_string(), "/y".to_string()];
    ri.option("searchpath", &[Param::new(pair, "archive", ParamValue::String(both))])?;
    ri.option("searchpath", &[Param::string("shader", "/shaders")])?;
    ri.option("limits", &[Param::string("archive", "/ignored")])?;

    let dirs: Vec<_> = ri.archive_search_path().dirs().iter().map(|p| p.to_str().unwrap().to_string()).collect();
    assert_eq!(dirs, vec!["/a", "/b", "/c"]);
    ri.finish()?;

    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("Option \"searchpath\" \"uniform string archive\" [\"/a:/b\"]\n"));
    assert_eq!(text.lines().count(), 7);
    Ok(())
}

#[test]
fn test_declare() -> Result<()> {
    let out = ascii(|ri| {
        ri.declare("roughness2", "varying float")?;
        let (spec, name) = ri.declaration("roughness2")?;
        assert_eq!(spec, TypeSpec::new(Class::Varying, Type::Float, 1));
        assert_eq!(name, "roughness2");

        let (spec, name) = ri.declaration("vertex point[2] Pref")?;
        assert_eq!(spec, TypeSpec::new(Class::Vertex, Type::Point, 2));
        assert_eq!(name, "Pref");

        assert!(matches!(ri.declare("broken", "sideways float"), Err(Error::BadDeclaration(_))));
        assert!(matches!(ri.declaration("undeclared"), Err(Error::BadDeclaration(_))));
        Ok(())
    })?;
    assert_eq!(out, "Declare \"roughness2\" \"varying float\"\n");
    Ok(())
}

#[test]
fn test_qualified_param_names() -> Result<()> {
    let params = [Param::new(
        TypeSpec::new(Class::Vertex, Type::Point, 1),
        "P",
        ParamValue::Float(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]),
    )];
    let out = ascii(|ri| ri.polygon(&params))?;
    assert_eq!(out, "Polygon \"vertex point P\" [0 0 0 1 0 0 1 1 0]\n");
    Ok(())
}

#[test]
fn test_archive_records() -> Result<()> {
    let out = ascii(|ri| {
        ri.archive_record("structure", "##RenderMan RIB\n")?;
        ri.world_begin()?;
        ri.archive_record("comment", " lights")?;
        ri.world_end()
    })?;
    assert_eq!(out, "##RenderMan RIB\nWorldBegin\n    # lights\nWorldEnd\n");
    Ok(())
}

#[test]
fn test_fixed_size_arguments() -> Result<()> {
    let out = ascii(|ri| {
        ri.color(&[1.0, 0.5, 0.0])?;
        ri.matte(true)?;
        ri.concat_transform(&IDENTITY)?;
        ri.bound(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0])?;
        ri.hyperboloid(&[1.0, 0.0, -1.0], &[1.0, 0.0, 1.0], 360.0, &[])
    })?;
    assert_eq!(
        out,
        "Color 1 0.5 0\n\
         Matte 1\n\
         ConcatTransform [1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1]\n\
         Bound [0 1 0 1 0 1]\n\
         Hyperboloid 1 0 -1 1 0 1 360\n"
    );
    Ok(())
}

#[test]
fn test_subdivision_mesh() -> Result<()> {
    let params = [Param::new(
        TypeSpec::new(Class::Vertex, Type::Point, 1),
        "P",
        ParamValue::Float(vec![0.0; 12]),
    )];
    let out = ascii(|ri| {
        ri.subdivision_mesh(
            "catmull-clark",
            &[4],
            &[0, 1, 2, 3],
            &["crease".to_string()],
            &[2, 1],
            &[0, 1],
            &[2.5],
            &params,
        )
    })?;
    assert_eq!(
        out,
        "SubdivisionMesh \"catmull-clark\" [4] [0 1 2 3] [\"crease\"] [2 1] [0 1] [2.5] \
         \"vertex point P\" [0 0 0 0 0 0 0 0 0 0 0 0]\n"
    );
    Ok(())
}

#[test]
fn test_read_archive_literal() -> Result<()> {
    let out = ascii(|ri| ri.read_archive("props.rib", None, &[]))?;
    assert_eq!(out, "ReadArchive \"props.rib\"\n");
    Ok(())
}

#[test]
fn test_read_archive_missing_falls_back() -> Result<()> {
    let mut buf = Vec::new();
    {
        let options = RibOptions::new().interpolate_archives(true);
        let mut ri = RibOut::ascii(&mut buf, options);
        ri.read_archive("/definitely/not/here.rib", None, &[])?;
    }
    assert_eq!(String::from_utf8(buf).unwrap(), "ReadArchive \"/definitely/not/here.rib\"\n");
    Ok(())
}

#[test]
fn test_error_writes_nothing() -> Result<()> {
    let out = ascii(|ri| ri.error("something went wrong"))?;
    assert_eq!(out, "");
    Ok(())
}

#[test]
fn test_create_rib_out_picks_encoding() -> Result<()> {
    let mut text = Vec::new();
    {
        let mut ri = create_rib_out(&mut text, RibOptions::new());
        ri.world_begin()?;
    }
    assert_eq!(text, b"WorldBegin\n");

    let mut bin = Vec::new();
    {
        let mut ri = create_rib_out(&mut bin, RibOptions::new().binary(true));
        ri.world_begin()?;
    }
    assert_eq!(bin[0], 0o314);
    assert_eq!(&bin[bin.len() - 2..], &[0o246, 0]);
    Ok(())
}

#[cfg(feature = "gzip")]
#[test]
fn test_gzip_finished_on_drop() -> Result<()> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut buf = Vec::new();
    {
        let mut ri = create_rib_out(&mut buf, RibOptions::new().gzip(true));
        ri.world_begin()?;
        ri.sphere(1.0, -1.0, 1.0, 360.0, &[])?;
        ri.world_end()?;
    }
    assert_eq!(&buf[..2], &[0x1f, 0x8b]);

    let mut text = String::new();
    GzDecoder::new(&buf[..]).read_to_string(&mut text)?;
    assert_eq!(text, "WorldBegin\n    Sphere 1 -1 1 360\nWorldEnd\n");
    Ok(())
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "unbalanced End request")]
fn test_unbalanced_end_asserts() {
    let mut buf = Vec::new();
    let mut ri = RibOut::ascii(&mut buf, RibOptions::new());
    let _ = ri.attribute_end();
}

#[cfg(not(debug_assertions))]
#[test]
fn test_unbalanced_end_saturates() -> Result<()> {
    let out = ascii(|ri| {
        ri.attribute_end()?;
        assert_eq!(ri.formatter().indent(), 0);
        ri.sphere(1.0, -1.0, 1.0, 360.0, &[])
    })?;
    assert_eq!(out, "AttributeEnd\nSphere 1 -1 1 360\n");
    Ok(())
}

#[cfg(not(feature = "gzip"))]
#[test]
fn test_gzip_unavailable_writes_plain() -> Result<()> {
    let mut buf = Vec::new();
    {
        let mut ri = RibOut::ascii(&mut buf, RibOptions::new().gzip(true));
        ri.world_begin()?;
        ri.world_end()?;
        ri.finish()?;
    }
    assert_ne!(&buf[..2], &[0x1f, 0x8b]);
    assert_eq!(String::from_utf8(buf).unwrap(), "WorldBegin\nWorldEnd\n");
    Ok(())
}
