//! The top-level JSON Schema document.

use crate::describe::Describe;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::property::Property;
use crate::tag::TagOptions;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;

/// Meta-schema URI used when none is set.
pub const DEFAULT_SCHEMA: &str = "http://json-schema.org/schema#";

/// Indentation width used by [`Document::render`].
pub const DEFAULT_INDENT: usize = 4;

/// A JSON Schema document: the `$schema` URI plus the root property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "$schema", skip_serializing_if = "String::is_empty")]
    pub schema: String,

    #[serde(flatten)]
    pub root: Property,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a custom meta-schema URI.
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            root: Property::default(),
        }
    }

    /// Read the schema of a described Rust type into a fresh document.
    pub fn for_type<T: Describe + ?Sized>() -> Self {
        let mut document = Self::new();
        document.read(&T::type_info());
        document
    }

    /// Read a type into the document.
    ///
    /// Fills in the default `$schema` if unset, then populates the root.
    /// The root is not reset first: reading again appends to `required`.
    pub fn read<D: TypeDescriptor>(&mut self, ty: &D) {
        if self.schema.is_empty() {
            self.schema = DEFAULT_SCHEMA.to_string();
        }
        self.root.read(ty, TagOptions::default());
    }

    /// Pretty JSON with the default indentation.
    pub fn render(&self) -> Result<String> {
        self.render_with_indent(DEFAULT_INDENT)
    }

    /// Pretty JSON indented by `indent` spaces per level.
    pub fn render_with_indent(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Single-line JSON.
    pub fn render_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Renders the pretty form, or nothing if rendering fails.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().unwrap_or_default())
    }
}
