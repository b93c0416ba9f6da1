//! Output sink with optional gzip compression.
//!
//! RIB streams may be gzipped as a whole. The compressor wraps the caller's
//! writer; finishing the sink closes the gzip member and hands the writer
//! back without closing it.

use std::io::{self, Write};

#[cfg(feature = "gzip")]
use flate2::{write::GzEncoder, Compression};

use crate::util::Result;

/// Byte sink used by the formatters.
pub enum RibSink<W: Write> {
    /// Bytes go straight to the caller's writer
    Plain(W),
    /// Bytes are gzip-compressed on the way to the caller's writer
    #[cfg(feature = "gzip")]
    Gzip(GzEncoder<W>),
}

impl<W: Write> RibSink<W> {
    /// Wrap a writer, compressing if requested and available.
    ///
    /// Without gzip support the request is logged and output stays plain.
    pub fn new(out: W, use_gzip: bool) -> Self {
        if !use_gzip {
            return RibSink::Plain(out);
        }
        #[cfg(feature = "gzip")]
        {
            RibSink::Gzip(GzEncoder::new(out, Compression::default()))
        }
        #[cfg(not(feature = "gzip"))]
        {
            tracing::error!("built without gzip support, writing uncompressed RIB");
            RibSink::Plain(out)
        }
    }

    /// True if output is being compressed.
    pub fn is_compressed(&self) -> bool {
        !matches!(self, RibSink::Plain(_))
    }

    /// Flush, terminate any compressed stream and return the writer.
    pub fn finish(self) -> Result<W> {
        match self {
            RibSink::Plain(mut out) => {
                out.flush()?;
                Ok(out)
            }
            #[cfg(feature = "gzip")]
            RibSink::Gzip(encoder) => {
                let mut out = encoder.finish()?;
                out.flush()?;
                Ok(out)
            }
        }
    }

    /// Terminate any compressed stream in place, keeping the sink alive.
    pub fn try_finish(&mut self) -> Result<()> {
        match self {
            RibSink::Plain(out) => out.flush()?,
            #[cfg(feature = "gzip")]
            RibSink::Gzip(encoder) => {
                encoder.try_finish()?;
                encoder.get_mut().flush()?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Write for RibSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            RibSink::Plain(out) => out.write(buf),
            #[cfg(feature = "gzip")]
            RibSink::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            RibSink::Plain(out) => out.write_all(buf),
            #[cfg(feature = "gzip")]
            RibSink::Gzip(encoder) => encoder.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RibSink::Plain(out) => out.flush(),
            #[cfg(feature = "gzip")]
            RibSink::Gzip(encoder) => encoder.flush(),
        }
    }
}
