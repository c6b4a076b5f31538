//! Core types for the schemagen toolchain.
//!
//! This crate turns a type description into a JSON Schema document. It
//! defines the descriptor abstraction the generator walks, the property tree
//! it builds, and the document wrapper that renders the tree to text.
//!
//! ```text
//! TypeDescriptor ──> Property::read ──> Document ──> JSON text
//!   (describe, catalog)   (mapping, tag)
//! ```
//!
//! Descriptors come from two places: the `Describe` trait (implemented by
//! `#[derive(Describe)]` in the `schemagen` crate) and the file-based
//! [`catalog::Catalog`].

pub mod catalog;
pub mod describe;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod kind;
pub mod mapping;
pub mod property;
pub mod registry;
pub mod tag;

pub use describe::{Describe, FieldInfo, TypeInfo};
pub use descriptor::{Field, TypeDescriptor};
pub use document::{Document, DEFAULT_SCHEMA};
pub use error::{ConstraintError, Error, Result};
pub use kind::{Kind, Primitive};
pub use mapping::SchemaType;
pub use property::Property;
pub use tag::TagOptions;

// Re-export linkme for use by the macro-generated code
pub use linkme;
