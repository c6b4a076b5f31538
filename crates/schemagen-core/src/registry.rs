//! Schema registry for discovering exported types at runtime.
//!
//! This module provides a global registry of types that is populated by
//! `#[derive(Describe)]` with `#[schema(export)]`, using linkme's
//! distributed slices. Binaries can list and render every exported schema
//! without naming the types.

use crate::describe::{TypeInfo, TypeInfoFn};
use crate::document::Document;
use linkme::distributed_slice;

/// A registration entry for an exported type.
#[derive(Clone, Copy)]
pub struct SchemaRegistration {
    /// Unqualified type name, used for lookup.
    pub name: &'static str,
    /// Resolves the type's descriptor.
    pub type_info: TypeInfoFn,
}

impl SchemaRegistration {
    /// Create a new registration with const construction.
    pub const fn new(name: &'static str, type_info: TypeInfoFn) -> Self {
        Self { name, type_info }
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }

    /// Read the registered type into a fresh document.
    pub fn document(&self) -> Document {
        let mut document = Document::new();
        document.read(&self.type_info());
        document
    }
}

impl std::fmt::Debug for SchemaRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistration")
            .field("name", &self.name)
            .field("type_info", &"<fn>")
            .finish()
    }
}

/// The global distributed slice containing all schema registrations.
///
/// This slice is populated at link time by the derive macro.
#[distributed_slice]
pub static SCHEMA_REGISTRY: [SchemaRegistration];

/// Iterate over all registered schemas.
pub fn iter_schemas() -> impl Iterator<Item = &'static SchemaRegistration> {
    SCHEMA_REGISTRY.iter()
}

/// Find a schema by its type name.
pub fn find_schema(name: &str) -> Option<&'static SchemaRegistration> {
    SCHEMA_REGISTRY.iter().find(|reg| reg.name == name)
}

/// Get the count of registered schemas.
pub fn schema_count() -> usize {
    SCHEMA_REGISTRY.len()
}

/// Get all registered type names.
pub fn schema_names() -> Vec<&'static str> {
    SCHEMA_REGISTRY.iter().map(|reg| reg.name).collect()
}
