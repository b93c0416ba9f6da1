//! Core layer - the request surface and the types requests are made of.
//!
//! This module provides:
//! - [`Renderer`] - One method per RenderMan request
//! - [`RibParser`] - Seam for replaying RIB streams into a [`Renderer`]
//! - [`NameRegistry`] - Filter / error handler / procedural name handles
//! - [`StandardBasis`] - Standard spline bases and basis recognition
//! - [`TokenDictionary`] - Declared parameter types
//! - [`Param`] / [`TypeSpec`] - Parameter lists
//! - [`RibSink`] - Output sink with optional gzip

mod basis;
mod compression;
mod dictionary;
mod handle;
mod param;
mod registry;
mod traits;

pub use basis::{
    StandardBasis, BEZIER_BASIS, B_SPLINE_BASIS, CATMULL_ROM_BASIS, HERMITE_BASIS, POWER_BASIS,
};
pub use compression::RibSink;
pub use dictionary::{parse_inline_declaration, parse_type_spec, TokenDictionary};
pub use handle::{HandleCounter, LightHandle, ObjectHandle};
pub use param::{Class, Param, ParamValue, StorageType, Type, TypeSpec};
pub use registry::{
    ErrorFunc, FilterFunc, NameRegistry, ProcSubdivFunc, RegistryHandle,
    ERROR_FUNC_NAMES, FILTER_FUNC_NAMES, PROC_SUBDIV_FUNC_NAMES,
};
pub use traits::{ArchiveCallback, ParamList, ParserFactory, ProcFreeFunc, Renderer, RibParser};
