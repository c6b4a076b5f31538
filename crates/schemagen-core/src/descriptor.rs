//! The type description capability the generator consumes.

use crate::kind::Kind;
use std::borrow::Cow;

/// A queryable description of one type.
///
/// The generator never inspects Rust types itself. Anything that can answer
/// these four questions can be turned into a schema: derived
/// [`TypeInfo`](crate::TypeInfo) values, a parsed
/// [`Catalog`](crate::catalog::Catalog), or a custom implementation.
pub trait TypeDescriptor: Sized {
    /// Structural category of the type.
    fn kind(&self) -> Kind;

    /// Canonical name, used for special-case format lookups.
    ///
    /// An empty name marks an anonymous type.
    fn qualified_name(&self) -> Cow<'_, str>;

    /// Element of a sequence, value of a mapping or target of a reference.
    fn element_type(&self) -> Option<Self>;

    /// Fields of a record in declaration order. Empty for other kinds.
    fn fields(&self) -> Vec<Field<Self>>;
}

/// One field of a record type.
#[derive(Debug, Clone)]
pub struct Field<D> {
    /// Declared field name.
    pub name: String,
    pub ty: D,
    /// Raw annotation in the `name,flag,key:value` mini-language.
    pub tag: String,
    /// Whether the field's own fields are flattened into the record.
    pub embedded: bool,
}
