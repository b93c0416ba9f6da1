//! # ribout
//!
//! Serializer for the RenderMan Interface Bytestream (RIB).
//!
//! Scene descriptions are issued as calls on the [`Renderer`] trait and
//! written out as ASCII or binary RIB, optionally gzip compressed. Archives
//! referenced with `ReadArchive` can be inlined by replaying them through a
//! caller-supplied [`RibParser`](core::RibParser).
//!
//! ## Modules
//!
//! - [`util`] - Errors and fixed-size argument types
//! - [`core`] - The request surface, parameter model and name registries
//! - [`rib`] - The writer and its two encodings
//!
//! ## Example
//!
//! ```no_run
//! use ribout::prelude::*;
//!
//! # fn main() -> ribout::Result<()> {
//! let file = std::fs::File::create("scene.rib")?;
//! let mut ri = create_rib_out(file, RibOptions::new().gzip(true));
//!
//! ri.world_begin()?;
//! ri.surface("plastic", &[Param::float("Kd", vec![0.8])])?;
//! ri.sphere(1.0, -1.0, 1.0, 360.0, &[])?;
//! ri.world_end()?;
//! # Ok(())
//! # }
//! ```

pub mod util;
pub mod core;
pub mod rib;

// Re-export commonly used types
pub use util::{Error, Result};
pub use crate::core::Renderer;
pub use rib::{create_rib_out, RibOptions, RibOut};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Bound, Color, Error, Matrix, Point, Result, IDENTITY};
    pub use crate::core::{
        Class, LightHandle, ObjectHandle, Param, ParamValue, Renderer, RibParser, Type, TypeSpec,
    };
    pub use crate::rib::{create_rib_out, RibOptions, RibOut};
}
