//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::BufRead;
use std::rc::Rc;

use ribout::core::{Renderer, RibParser};
use ribout::util::{Error, Result};

/// Install a test-writer subscriber once so `tracing` output shows up on failure.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("ribout=debug"))
        .with_test_writer()
        .try_init();
}

/// Line-oriented parser for the small ASCII subset these tests write.
///
/// Understands `#` comments, `AttributeBegin`/`AttributeEnd`,
/// `WorldBegin`/`WorldEnd`, `Sphere r zmin zmax thetamax`,
/// `Translate dx dy dz` and `ReadArchive "name"`.
pub struct LineParser;

impl LineParser {
    /// Factory closure for `RibOptions::with_parser` that counts instances.
    pub fn counting(created: Rc<Cell<usize>>) -> impl Fn() -> LineParser + 'static {
        move || {
            created.set(created.get() + 1);
            LineParser
        }
    }
}

fn floats<const N: usize>(args: &[&str], line: &str) -> Result<[f32; N]> {
    if args.len() != N {
        return Err(Error::other(format!("expected {N} numbers: {line}")));
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| Error::other(format!("bad number {arg}: {line}")))?;
    }
    Ok(out)
}

impl RibParser for LineParser {
    fn parse_stream(
        &self,
        input: &mut dyn BufRead,
        stream_name: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                renderer.archive_record("comment", comment)?;
                continue;
            }
            let words: Vec<&str> = trimmed.split_whitespace().collect();
            match words[0] {
                "AttributeBegin" => renderer.attribute_begin()?,
                "AttributeEnd" => renderer.attribute_end()?,
                "WorldBegin" => renderer.world_begin()?,
                "WorldEnd" => renderer.world_end()?,
                "Sphere" => {
                    let [r, zmin, zmax, theta] = floats::<4>(&words[1..], trimmed)?;
                    renderer.sphere(r, zmin, zmax, theta, &[])?;
                }
                "Translate" => {
                    let [x, y, z] = floats::<3>(&words[1..], trimmed)?;
                    renderer.translate(x, y, z)?;
                }
                "ReadArchive" => {
                    let name = trimmed["ReadArchive".len()..].trim().trim_matches('"');
                    renderer.read_archive(name, None, &[])?;
                }
                other => {
                    return Err(Error::other(format!("{stream_name}: unknown request {other}")));
                }
            }
        }
        Ok(())
    }
}
