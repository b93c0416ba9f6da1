//! Utility types and functions for the RIB writer.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - Fixed-size argument types (colors, points, matrices, bounds) and
//!   glam conversions

mod error;
mod math;

pub use error::*;
pub use math::*;
