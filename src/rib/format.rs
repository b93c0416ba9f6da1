//! The formatter seam between the dispatcher and the wire encodings.

use crate::core::{LightHandle, ObjectHandle, Param, ParamValue};
use crate::util::{flatten, Bound, Color, Matrix, Result};

/// Turns a sequence of request tokens into output bytes.
pub trait Formatter {
    /// Nest subsequent requests one level deeper.
    fn increase_indent(&mut self);
    /// Undo one [`increase_indent`](Self::increase_indent).
    fn decrease_indent(&mut self);
    /// Current nesting depth in columns.
    fn indent(&self) -> usize;

    /// Separator between request tokens.
    fn whitespace(&mut self) -> Result<()>;
    /// Start a request.
    fn begin_request(&mut self, name: &str) -> Result<()>;
    /// Terminate a request.
    fn end_request(&mut self) -> Result<()>;
    /// Comment or verbatim text outside any request.
    fn archive_record(&mut self, kind: &str, text: &str) -> Result<()>;

    fn print_int(&mut self, value: i32) -> Result<()>;
    fn print_float(&mut self, value: f32) -> Result<()>;
    fn print_string(&mut self, value: &str) -> Result<()>;
    fn print_int_array(&mut self, values: &[i32]) -> Result<()>;
    fn print_float_array(&mut self, values: &[f32]) -> Result<()>;
    fn print_string_array(&mut self, values: &[String]) -> Result<()>;

    /// Color or point, as three bare floats.
    fn print_triple(&mut self, value: &[f32; 3]) -> Result<()> {
        self.print_float(value[0])?;
        self.whitespace()?;
        self.print_float(value[1])?;
        self.whitespace()?;
        self.print_float(value[2])
    }

    /// Qualified parameter name followed by its values.
    fn print_param(&mut self, param: &Param) -> Result<()> {
        self.print_string(&param.qualified_name())?;
        self.whitespace()?;
        match &param.value {
            ParamValue::Float(v) => self.print_float_array(v),
            ParamValue::Integer(v) => self.print_int_array(v),
            ParamValue::String(v) => self.print_string_array(v),
        }
    }

    /// Print any value with a fixed wire representation.
    fn print<V: RibArg + ?Sized>(&mut self, value: &V) -> Result<()>
    where
        Self: Sized,
    {
        value.emit(self)
    }

    /// Flush and terminate the output stream (gzip trailer included).
    fn finish(&mut self) -> Result<()>;
}

/// A request argument with a fixed wire representation.
pub trait RibArg {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()>;
}

impl<T: RibArg + ?Sized> RibArg for &T {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        (**self).emit(f)
    }
}

impl RibArg for i32 {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_int(*self)
    }
}

impl RibArg for f32 {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_float(*self)
    }
}

/// RtBoolean travels as an integer.
impl RibArg for bool {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_int(i32::from(*self))
    }
}

impl RibArg for str {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_string(self)
    }
}

impl RibArg for [i32] {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_int_array(self)
    }
}

impl RibArg for [f32] {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_float_array(self)
    }
}

impl RibArg for [String] {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_string_array(self)
    }
}

impl RibArg for Color {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_triple(self)
    }
}

impl RibArg for Bound {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_float_array(self)
    }
}

impl RibArg for Matrix {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_float_array(&flatten(self))
    }
}

impl RibArg for LightHandle {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_int(self.0)
    }
}

impl RibArg for ObjectHandle {
    fn emit<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.print_int(self.0)
    }
}
