//! Light and object handles.

use std::fmt;

use crate::util::{Error, Result};

/// Handle to a light source, issued by `LightSource` / `AreaLightSource`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightHandle(pub(crate) i32);

/// Handle to a retained object, issued by `ObjectBegin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHandle(pub(crate) i32);

impl LightHandle {
    /// Integer written to the stream for this handle.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl ObjectHandle {
    /// Integer written to the stream for this handle.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for LightHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic handle source. The first handle issued is 1, the last
/// `i32::MAX`; handles are never reissued.
#[derive(Clone, Debug, Default)]
pub struct HandleCounter {
    current: i32,
}

impl HandleCounter {
    /// Issue the next handle value.
    #[inline]
    pub fn issue(&mut self) -> Result<i32> {
        self.current = self
            .current
            .checked_add(1)
            .ok_or_else(|| Error::other("handle space exhausted"))?;
        Ok(self.current)
    }

    /// Last value issued, 0 if none.
    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }
}
