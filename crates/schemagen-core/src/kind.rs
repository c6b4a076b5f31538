//! Structural categories of described types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kinds a descriptor can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    Str,
}

impl Primitive {
    /// Resolve a Rust spelling of a primitive type.
    ///
    /// Accepts the keyword names (`bool`, `u8`, `f64`, ...) plus `str`,
    /// `String` and `string` for text.
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "bool" => Self::Bool,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "char" => Self::Char,
            "str" | "String" | "string" => Self::Str,
            _ => return None,
        };
        Some(primitive)
    }

    /// The keyword spelling, `string` for text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::Str => "string",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// The structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Primitive(Primitive),
    /// Ordered collection; the element type is the descriptor's element.
    Sequence,
    /// Keyed collection; the element type is the value type.
    Mapping,
    /// Named fields in declaration order.
    Record,
    /// Transparent indirection to the element type.
    Reference,
    Unknown,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Primitive(p) => f.write_str(p.name()),
            Kind::Sequence => f.write_str("sequence"),
            Kind::Mapping => f.write_str("mapping"),
            Kind::Record => f.write_str("record"),
            Kind::Reference => f.write_str("reference"),
            Kind::Unknown => f.write_str("unknown"),
        }
    }
}
