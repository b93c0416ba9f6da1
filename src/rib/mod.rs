//! RIB stream writer.
//!
//! [`RibOut`] implements [`Renderer`] by serializing every request to a
//! RIB stream, in either encoding:
//!
//! ```text
//! ASCII                              Binary
//! AttributeBegin                     0314 00 "AttributeBegin" 0246 00
//!     Sphere 1 -1 1 360              0314 01 "Sphere" 0246 01 0244 ... x4
//! AttributeEnd                       0314 02 "AttributeEnd" 0246 02
//! ```
//!
//! Either encoding can be gzip compressed. With archive interpolation on,
//! `ReadArchive` requests are replaced by the archive's contents, parsed
//! through a [`RibParser`] supplied by the caller.

mod ascii;
mod binary;
pub mod constants;
mod format;
mod search_path;
mod writer;

pub use ascii::AsciiFormatter;
pub use binary::BinaryFormatter;
pub use format::{Formatter, RibArg};
pub use search_path::SearchPath;
pub use writer::RibOut;

use std::fmt;
use std::io::Write;
use std::rc::Rc;

use crate::core::{ParserFactory, Renderer, RibParser};

/// Output settings for a RIB writer.
#[derive(Default)]
pub struct RibOptions {
    /// Inline `ReadArchive` contents instead of emitting the request.
    pub interpolate_archives: bool,
    /// Binary encoding instead of ASCII.
    pub binary: bool,
    /// Gzip the encoded stream.
    pub gzip: bool,
    pub(crate) parser_factory: Option<ParserFactory>,
}

impl RibOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpolate_archives(mut self, on: bool) -> Self {
        self.interpolate_archives = on;
        self
    }

    pub fn binary(mut self, on: bool) -> Self {
        self.binary = on;
        self
    }

    pub fn gzip(mut self, on: bool) -> Self {
        self.gzip = on;
        self
    }

    /// Parser used to read archives when interpolating. Created on the
    /// first archive and shared by nested ones.
    pub fn with_parser<P>(mut self, factory: impl Fn() -> P + 'static) -> Self
    where
        P: RibParser + 'static,
    {
        self.parser_factory = Some(Box::new(move || Rc::new(factory()) as Rc<dyn RibParser>));
        self
    }

    /// True if an archive parser has been configured.
    pub fn has_parser(&self) -> bool {
        self.parser_factory.is_some()
    }
}

impl fmt::Debug for RibOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RibOptions")
            .field("interpolate_archives", &self.interpolate_archives)
            .field("binary", &self.binary)
            .field("gzip", &self.gzip)
            .field("has_parser", &self.has_parser())
            .finish()
    }
}

/// Create a RIB writer on `out`, picking the encoding from `options`.
///
/// The returned renderer finishes the stream (gzip trailer included) when
/// dropped. `out` itself is never closed; pass `&mut` to keep using it.
pub fn create_rib_out<'a, W: Write + 'a>(out: W, options: RibOptions) -> Box<dyn Renderer + 'a> {
    tracing::debug!(?options, "creating RIB writer");
    if options.binary {
        Box::new(RibOut::binary(out, options))
    } else {
        Box::new(RibOut::ascii(out, options))
    }
}

#[cfg(test)]
mod tests;
