//! Lookup from descriptor kinds and names to JSON Schema types.

use crate::descriptor::TypeDescriptor;
use crate::kind::{Kind, Primitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl SchemaType {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::String => "string",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types matched by canonical name before their kind is considered.
const FORMAT_MAPPING: &[(&str, SchemaType, &str)] = &[
    ("chrono::DateTime", SchemaType::String, "date-time"),
    ("chrono::NaiveDateTime", SchemaType::String, "date-time"),
    ("chrono::NaiveDate", SchemaType::String, "date"),
    ("std::time::SystemTime", SchemaType::String, "date-time"),
];

/// Result of looking a descriptor up in the mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapped {
    pub schema_type: Option<SchemaType>,
    pub format: Option<&'static str>,
    /// The kind that drives further recursion. Name matches report
    /// `Primitive(Str)` so they are never walked into.
    pub kind: Kind,
}

/// Whether `name` is matched by the special-case format table.
pub fn has_format(name: &str) -> bool {
    FORMAT_MAPPING.iter().any(|(n, _, _)| *n == name)
}

/// Schema type for a kind, if the general table knows it.
pub fn kind_mapping(kind: Kind) -> Option<SchemaType> {
    match kind {
        Kind::Primitive(Primitive::Bool) => Some(SchemaType::Boolean),
        Kind::Primitive(p) if p.is_integer() => Some(SchemaType::Integer),
        Kind::Primitive(p) if p.is_float() => Some(SchemaType::Number),
        Kind::Primitive(Primitive::Str | Primitive::Char) => Some(SchemaType::String),
        Kind::Sequence => Some(SchemaType::Array),
        Kind::Record | Kind::Mapping => Some(SchemaType::Object),
        _ => None,
    }
}

/// Look a descriptor up: name table first, then the kind table.
///
/// A miss is not an error; it yields no type and no format but still
/// reports the descriptor's real kind.
pub fn lookup<D: TypeDescriptor>(ty: &D) -> Mapped {
    let name = ty.qualified_name();
    if let Some((_, schema_type, format)) = FORMAT_MAPPING.iter().find(|(n, _, _)| *n == name) {
        return Mapped {
            schema_type: Some(*schema_type),
            format: Some(*format),
            kind: Kind::Primitive(Primitive::Str),
        };
    }

    let kind = ty.kind();
    Mapped {
        schema_type: kind_mapping(kind),
        format: None,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{Describe, TypeInfo};

    fn mapped<T: Describe + ?Sized>() -> Mapped {
        lookup(&T::type_info())
    }

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(mapped::<bool>().schema_type, Some(SchemaType::Boolean));
        assert_eq!(mapped::<i8>().schema_type, Some(SchemaType::Integer));
        assert_eq!(mapped::<u64>().schema_type, Some(SchemaType::Integer));
        assert_eq!(mapped::<usize>().schema_type, Some(SchemaType::Integer));
        assert_eq!(mapped::<f32>().schema_type, Some(SchemaType::Number));
        assert_eq!(mapped::<String>().schema_type, Some(SchemaType::String));
        assert_eq!(mapped::<str>().format, None);
    }

    #[test]
    fn test_container_mapping() {
        let seq = mapped::<Vec<String>>();
        assert_eq!(seq.schema_type, Some(SchemaType::Array));
        assert_eq!(seq.kind, Kind::Sequence);

        let map = mapped::<std::collections::HashMap<String, u8>>();
        assert_eq!(map.schema_type, Some(SchemaType::Object));
        assert_eq!(map.kind, Kind::Mapping);
    }

    #[test]
    fn test_name_table_wins() {
        let time = mapped::<std::time::SystemTime>();
        assert_eq!(time.schema_type, Some(SchemaType::String));
        assert_eq!(time.format, Some("date-time"));
        assert_eq!(time.kind, Kind::Primitive(Primitive::Str));
    }

    #[test]
    fn test_unmapped_keeps_kind() {
        let opt = mapped::<Option<u8>>();
        assert_eq!(opt.schema_type, None);
        assert_eq!(opt.format, None);
        assert_eq!(opt.kind, Kind::Reference);

        let unknown = lookup(&TypeInfo::opaque("my::Handle"));
        assert_eq!(unknown.schema_type, None);
        assert_eq!(unknown.kind, Kind::Unknown);
    }

    #[test]
    fn test_chrono_names() {
        for (name, format) in [
            ("chrono::DateTime", "date-time"),
            ("chrono::NaiveDateTime", "date-time"),
            ("chrono::NaiveDate", "date"),
        ] {
            let mapped = lookup(&TypeInfo::opaque(name));
            assert_eq!(mapped.schema_type, Some(SchemaType::String), "{name}");
            assert_eq!(mapped.format, Some(format), "{name}");
        }
    }

    #[test]
    fn test_has_format() {
        assert!(has_format("chrono::DateTime"));
        assert!(!has_format("chrono::Duration"));
    }
}
