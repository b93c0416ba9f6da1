//! Binary RIB formatter.
//!
//! Every token is tagged with an opcode; integers and lengths use the
//! fewest big-endian bytes that hold their bit pattern. Request names are
//! sent once as a define-code record and referenced by code afterwards.

use std::collections::HashMap;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::constants::*;
use super::format::Formatter;
use crate::core::RibSink;
use crate::util::{Error, Result};

/// Formats request tokens as binary RIB.
pub struct BinaryFormatter<W: Write> {
    out: RibSink<W>,
    encoded_requests: HashMap<String, u8>,
    next_request_code: usize,
}

impl<W: Write> BinaryFormatter<W> {
    /// Create a formatter writing to `out`.
    pub fn new(out: RibSink<W>) -> Self {
        Self { out, encoded_requests: HashMap::new(), next_request_code: 0 }
    }

    /// Code assigned to a request name, if it has been defined.
    pub fn request_code(&self, name: &str) -> Option<u8> {
        self.encoded_requests.get(name).copied()
    }

    /// Write `value` as `base + (n - 1)` followed by its `n` significant
    /// bytes, most significant first.
    fn encode_u32(&mut self, value: u32, base: u8) -> Result<()> {
        let bytes = value.to_be_bytes();
        let high = significant_bytes(&bytes) - 1;
        self.out.write_u8(base + high as u8)?;
        self.out.write_all(&bytes[3 - high..])?;
        Ok(())
    }

    fn encode_len(&mut self, len: usize, base: u8) -> Result<()> {
        let len = u32::try_from(len)
            .map_err(|_| Error::other(format!("{len} elements exceed the binary RIB length field")))?;
        self.encode_u32(len, base)
    }

    /// Look up or assign the code for a request, defining it on first use.
    fn request_code_for(&mut self, name: &str) -> Result<u8> {
        if let Some(code) = self.request_code(name) {
            return Ok(code);
        }
        let code = u8::try_from(self.next_request_code)
            .map_err(|_| Error::RequestCodeOverflow(name.to_string()))?;
        self.next_request_code += 1;
        self.encoded_requests.insert(name.to_string(), code);
        self.out.write_u8(OP_DEFINE_REQUEST)?;
        self.out.write_u8(code)?;
        self.print_string(name)?;
        Ok(code)
    }
}

/// Number of bytes needed for a big-endian bit pattern, at least 1.
fn significant_bytes(bytes: &[u8; 4]) -> usize {
    match bytes.iter().position(|&b| b != 0) {
        Some(first) => 4 - first,
        None => 1,
    }
}

impl<W: Write> Formatter for BinaryFormatter<W> {
    fn increase_indent(&mut self) {}

    fn decrease_indent(&mut self) {}

    fn indent(&self) -> usize {
        0
    }

    fn whitespace(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_request(&mut self, name: &str) -> Result<()> {
        let code = self.request_code_for(name)?;
        self.out.write_u8(OP_USE_REQUEST)?;
        self.out.write_u8(code)?;
        Ok(())
    }

    fn end_request(&mut self) -> Result<()> {
        Ok(())
    }

    fn archive_record(&mut self, _kind: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    fn print_int(&mut self, value: i32) -> Result<()> {
        self.encode_u32(value as u32, OP_INT)
    }

    fn print_float(&mut self, value: f32) -> Result<()> {
        self.out.write_u8(OP_FLOAT)?;
        self.out.write_u32::<BigEndian>(value.to_bits())?;
        Ok(())
    }

    fn print_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        if bytes.len() <= SHORT_STRING_MAX_LEN {
            self.out.write_u8(OP_SHORT_STRING + bytes.len() as u8)?;
        } else {
            self.encode_len(bytes.len(), OP_LONG_STRING)?;
        }
        self.out.write_all(bytes)?;
        Ok(())
    }

    fn print_int_array(&mut self, values: &[i32]) -> Result<()> {
        self.out.write_u8(OP_ARRAY_BEGIN)?;
        for &v in values {
            self.print_int(v)?;
        }
        self.out.write_u8(OP_ARRAY_END)?;
        Ok(())
    }

    fn print_float_array(&mut self, values: &[f32]) -> Result<()> {
        self.encode_len(values.len(), OP_FLOAT_ARRAY)?;
        for &v in values {
            self.out.write_u32::<BigEndian>(v.to_bits())?;
        }
        Ok(())
    }

    fn print_string_array(&mut self, values: &[String]) -> Result<()> {
        self.out.write_u8(OP_ARRAY_BEGIN)?;
        for v in values {
            self.print_string(v)?;
        }
        self.out.write_u8(OP_ARRAY_END)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.try_finish()
    }
}
