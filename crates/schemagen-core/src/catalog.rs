//! File-based type descriptors.
//!
//! A catalog is a JSON document of named type definitions. It lets schemas
//! be generated for types that only exist on paper, and it is what the CLI
//! reads.
//!
//! ```json
//! {
//!   "types": {
//!     "Item": { "kind": "record", "fields": [{ "name": "Value", "type": "string" }] },
//!     "Items": { "kind": "sequence", "element": "Item" }
//!   }
//! }
//! ```
//!
//! A type reference is either a name or an inline definition. Names resolve
//! against the catalog first, then Rust primitive names, then the names the
//! format table knows (`chrono::DateTime`, ...).

use crate::descriptor::{Field, TypeDescriptor};
use crate::error::{Error, Result};
use crate::kind::{Kind, Primitive};
use crate::mapping;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// A set of named type definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub types: IndexMap<String, TypeDef>,
}

/// Reference to a type from a field or container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named(String),
    Inline(Box<TypeDef>),
}

/// Definition of a non-primitive type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    Sequence {
        element: TypeRef,
    },
    Mapping {
        value: TypeRef,
    },
    Record {
        #[serde(default)]
        fields: Vec<FieldDef>,
    },
    Reference {
        target: TypeRef,
    },
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub embedded: bool,
}

/// A type resolved against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogType<'a> {
    catalog: &'a Catalog,
    /// Empty for inline definitions.
    name: &'a str,
    target: Target<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Def(&'a TypeDef),
    Builtin(Kind),
    Missing,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Names of the defined types, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Resolve a name to a type, if it is defined or built in.
    pub fn get<'a>(&'a self, name: &'a str) -> Option<CatalogType<'a>> {
        let ty = self.named(name);
        match ty.target {
            Target::Missing => None,
            _ => Some(ty),
        }
    }

    /// Verify that every reference in the catalog resolves.
    pub fn check(&self) -> Result<()> {
        for (name, def) in &self.types {
            self.check_def(name, def)?;
        }
        Ok(())
    }

    fn check_def(&self, owner: &str, def: &TypeDef) -> Result<()> {
        match def {
            TypeDef::Sequence { element: r }
            | TypeDef::Mapping { value: r }
            | TypeDef::Reference { target: r } => self.check_ref(owner, r),
            TypeDef::Record { fields } => fields
                .iter()
                .try_for_each(|field| self.check_ref(&format!("{owner}.{}", field.name), &field.ty)),
            TypeDef::Opaque => Ok(()),
        }
    }

    fn check_ref(&self, owner: &str, r: &TypeRef) -> Result<()> {
        match r {
            TypeRef::Named(name) if self.get(name).is_none() => Err(Error::UnknownType {
                name: name.clone(),
                referenced_from: owner.to_string(),
            }),
            TypeRef::Named(_) => Ok(()),
            TypeRef::Inline(def) => self.check_def(owner, def),
        }
    }

    fn named<'a>(&'a self, name: &'a str) -> CatalogType<'a> {
        let target = if let Some(def) = self.types.get(name) {
            Target::Def(def)
        } else if let Some(primitive) = Primitive::from_name(name) {
            Target::Builtin(Kind::Primitive(primitive))
        } else if mapping::has_format(name) {
            Target::Builtin(Kind::Unknown)
        } else {
            Target::Missing
        };

        CatalogType {
            catalog: self,
            name,
            target,
        }
    }

    fn resolve<'a>(&'a self, r: &'a TypeRef) -> CatalogType<'a> {
        match r {
            TypeRef::Named(name) => self.named(name),
            TypeRef::Inline(def) => CatalogType {
                catalog: self,
                name: "",
                target: Target::Def(def),
            },
        }
    }
}

impl<'a> CatalogType<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }
}

impl TypeDescriptor for CatalogType<'_> {
    fn kind(&self) -> Kind {
        match self.target {
            Target::Def(TypeDef::Sequence { .. }) => Kind::Sequence,
            Target::Def(TypeDef::Mapping { .. }) => Kind::Mapping,
            Target::Def(TypeDef::Record { .. }) => Kind::Record,
            Target::Def(TypeDef::Reference { .. }) => Kind::Reference,
            Target::Def(TypeDef::Opaque) | Target::Missing => Kind::Unknown,
            Target::Builtin(kind) => kind,
        }
    }

    fn qualified_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name)
    }

    fn element_type(&self) -> Option<Self> {
        match self.target {
            Target::Def(
                TypeDef::Sequence { element: r }
                | TypeDef::Mapping { value: r }
                | TypeDef::Reference { target: r },
            ) => Some(self.catalog.resolve(r)),
            _ => None,
        }
    }

    fn fields(&self) -> Vec<Field<Self>> {
        let Target::Def(TypeDef::Record { fields }) = self.target else {
            return Vec::new();
        };

        fields
            .iter()
            .map(|field| Field {
                name: field.name.clone(),
                ty: self.catalog.resolve(&field.ty),
                tag: field.tag.clone(),
                embedded: field.embedded,
            })
            .collect()
    }
}
