//! ASCII RIB formatter.

use std::io::Write;

use super::constants::{FLOAT_PRECISION, INDENT_STEP};
use super::format::Formatter;
use crate::core::RibSink;
use crate::util::Result;

/// Formats request tokens as human-readable RIB, one request per line.
pub struct AsciiFormatter<W: Write> {
    out: RibSink<W>,
    indent: usize,
    indent_string: String,
}

impl<W: Write> AsciiFormatter<W> {
    /// Create a formatter writing to `out`.
    pub fn new(out: RibSink<W>) -> Self {
        Self { out, indent: 0, indent_string: String::new() }
    }

    fn print_array<T>(
        &mut self,
        values: &[T],
        mut print: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.out.write_all(b"[")?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.whitespace()?;
            }
            print(self, v)?;
        }
        self.out.write_all(b"]")?;
        Ok(())
    }
}

impl<W: Write> Formatter for AsciiFormatter<W> {
    fn increase_indent(&mut self) {
        self.indent += INDENT_STEP;
        self.indent_string = " ".repeat(self.indent);
    }

    fn decrease_indent(&mut self) {
        debug_assert!(self.indent >= INDENT_STEP, "unbalanced End request");
        if self.indent < INDENT_STEP {
            tracing::warn!("End request without matching Begin, indentation left at 0");
        }
        self.indent = self.indent.saturating_sub(INDENT_STEP);
        self.indent_string = " ".repeat(self.indent);
    }

    fn indent(&self) -> usize {
        self.indent
    }

    fn whitespace(&mut self) -> Result<()> {
        self.out.write_all(b" ")?;
        Ok(())
    }

    fn begin_request(&mut self, name: &str) -> Result<()> {
        self.out.write_all(self.indent_string.as_bytes())?;
        self.out.write_all(name.as_bytes())?;
        Ok(())
    }

    fn end_request(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn archive_record(&mut self, kind: &str, text: &str) -> Result<()> {
        if kind == "comment" {
            self.out.write_all(self.indent_string.as_bytes())?;
            self.out.write_all(b"#")?;
            self.out.write_all(text.as_bytes())?;
            self.out.write_all(b"\n")?;
        } else {
            self.out.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    fn print_int(&mut self, value: i32) -> Result<()> {
        write!(self.out, "{value}")?;
        Ok(())
    }

    fn print_float(&mut self, value: f32) -> Result<()> {
        self.out.write_all(format_float(value).as_bytes())?;
        Ok(())
    }

    fn print_string(&mut self, value: &str) -> Result<()> {
        self.out.write_all(&escape_string(value))?;
        Ok(())
    }

    fn print_int_array(&mut self, values: &[i32]) -> Result<()> {
        self.print_array(values, |f, v| f.print_int(*v))
    }

    fn print_float_array(&mut self, values: &[f32]) -> Result<()> {
        self.print_array(values, |f, v| f.print_float(*v))
    }

    fn print_string_array(&mut self, values: &[String]) -> Result<()> {
        self.print_array(values, |f, v| f.print_string(v))
    }

    fn finish(&mut self) -> Result<()> {
        self.out.try_finish()
    }
}

/// Quote a string, escaping anything that isn't printable.
///
/// Bytes outside 32..=176 that have no named escape are written as
/// backslash + three octal digits.
pub(crate) fn escape_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 2);
    out.push(b'"');
    for &c in s.as_bytes() {
        match c {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0c => out.extend_from_slice(b"\\f"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            32..=176 => out.push(c),
            _ => out.extend_from_slice(format!("\\{c:03o}").as_bytes()),
        }
    }
    out.push(b'"');
    out
}

/// Format a float like C's `%.9g`.
pub(crate) fn format_float(value: f32) -> String {
    format_general(f64::from(value), FLOAT_PRECISION)
}

/// `%.<precision>g`: shortest of fixed/scientific, trailing zeros removed.
fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
