//! Bidirectional name/handle registries for function-valued arguments.
//!
//! RenderMan passes pixel filters, error handlers and procedural subdivision
//! routines as function values. A serializer only ever needs their standard
//! names, so each function kind is represented by a small opaque handle
//! issued from a closed vocabulary.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU32;

use crate::util::{Error, Result};

/// Standard pixel filter names.
pub const FILTER_FUNC_NAMES: [&str; 8] = [
    "box", "gaussian", "triangle", "mitchell", "catmull-rom", "sinc", "bessel", "disk",
];

/// Standard error handler names.
pub const ERROR_FUNC_NAMES: [&str; 3] = ["ignore", "print", "abort"];

/// Standard procedural subdivision routine names.
pub const PROC_SUBDIV_FUNC_NAMES: [&str; 3] = ["DelayedReadArchive", "RunProgram", "DynamicLoad"];

/// Opaque handle types issued by a [`NameRegistry`].
pub trait RegistryHandle: Copy + Eq + std::hash::Hash + fmt::Debug {
    /// Wrap a raw handle value.
    fn from_raw(raw: NonZeroU32) -> Self;
    /// Raw handle value.
    fn raw(self) -> NonZeroU32;
}

macro_rules! registry_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub struct $name(NonZeroU32);

        impl RegistryHandle for $name {
            #[inline]
            fn from_raw(raw: NonZeroU32) -> Self {
                Self(raw)
            }
            #[inline]
            fn raw(self) -> NonZeroU32 {
                self.0
            }
        }
    };
}

registry_handle!(
    /// Pixel filter function handle.
    FilterFunc
);
registry_handle!(
    /// Error handler function handle.
    ErrorFunc
);
registry_handle!(
    /// Procedural subdivision function handle.
    ProcSubdivFunc
);

/// A bidirectional mapping between a fixed set of names and unique handles.
///
/// Handles are assigned `1..=n` in vocabulary order at construction.
pub struct NameRegistry<H> {
    handle_to_name: HashMap<NonZeroU32, &'static str>,
    name_to_handle: HashMap<&'static str, NonZeroU32>,
    _marker: PhantomData<H>,
}

impl<H: RegistryHandle> NameRegistry<H> {
    /// Build a registry over the given vocabulary.
    pub fn new(names: &[&'static str]) -> Self {
        let mut handle_to_name = HashMap::with_capacity(names.len());
        let mut name_to_handle = HashMap::with_capacity(names.len());
        for (raw, name) in (1u32..).filter_map(NonZeroU32::new).zip(names.iter().copied()) {
            handle_to_name.insert(raw, name);
            name_to_handle.insert(name, raw);
        }
        Self { handle_to_name, name_to_handle, _marker: PhantomData }
    }

    /// Look up the name behind a handle.
    pub fn name(&self, handle: H) -> Result<&'static str> {
        self.handle_to_name
            .get(&handle.raw())
            .copied()
            .ok_or(Error::BadHandle(handle.raw().get()))
    }

    /// Look up the handle for a name.
    pub fn handle(&self, name: &str) -> Result<H> {
        self.name_to_handle
            .get(name)
            .map(|raw| H::from_raw(*raw))
            .ok_or_else(|| Error::BadToken(name.to_string()))
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.handle_to_name.len()
    }

    /// True if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.handle_to_name.is_empty()
    }
}

impl NameRegistry<FilterFunc> {
    /// Registry of the standard pixel filters.
    pub fn filters() -> Self {
        Self::new(&FILTER_FUNC_NAMES)
    }
}

impl NameRegistry<ErrorFunc> {
    /// Registry of the standard error handlers.
    pub fn error_handlers() -> Self {
        Self::new(&ERROR_FUNC_NAMES)
    }
}

impl NameRegistry<ProcSubdivFunc> {
    /// Registry of the standard procedural subdivision routines.
    pub fn procedurals() -> Self {
        Self::new(&PROC_SUBDIV_FUNC_NAMES)
    }
}
