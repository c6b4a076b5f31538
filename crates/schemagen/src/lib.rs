//! schemagen: JSON Schema documents from Rust type descriptions.
//!
//! This is the main entry point for user applications. It re-exports the core
//! functionality and the `Describe` derive.
//!
//! ```ignore
//! use schemagen::prelude::*;
//!
//! #[derive(Describe)]
//! struct Item {
//!     #[schema(tag = "value,minLength:1")]
//!     value: String,
//! }
//!
//! println!("{}", Document::for_type::<Item>());
//! ```

pub use schemagen_core as core;
pub use schemagen_macros::Describe;

/// Read `T` into a fresh document with the default meta-schema.
pub fn schema_for<T: core::Describe + ?Sized>() -> core::Document {
    core::Document::for_type::<T>()
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        catalog::Catalog, Describe, Document, Kind, Primitive, Property, Result, SchemaType,
        TypeDescriptor, TypeInfo, DEFAULT_SCHEMA,
    };

    pub use crate::core::registry::{
        find_schema, iter_schemas, schema_count, schema_names, SchemaRegistration,
    };

    pub use crate::schema_for;
    pub use schemagen_macros::Describe;
}
