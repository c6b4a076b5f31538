//! Compile-time type descriptors.
//!
//! [`Describe`] is implemented for the standard library types here and for
//! user structs by `#[derive(Describe)]`. Element and field types are held
//! as function pointers and only resolved when the generator walks into
//! them, so a type may refer to itself.

use crate::descriptor::{Field, TypeDescriptor};
use crate::kind::{Kind, Primitive};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can describe their own shape.
pub trait Describe {
    fn type_info() -> TypeInfo;
}

/// Resolves a type's descriptor on demand.
pub type TypeInfoFn = fn() -> TypeInfo;

/// Descriptor produced by [`Describe`].
#[derive(Debug, Clone)]
pub struct TypeInfo {
    name: &'static str,
    kind: Kind,
    element: Option<TypeInfoFn>,
    fields: Vec<FieldInfo>,
}

/// A record field as emitted by `#[derive(Describe)]`.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    pub name: &'static str,
    pub tag: &'static str,
    pub embedded: bool,
    pub ty: TypeInfoFn,
}

impl FieldInfo {
    pub const fn new(name: &'static str, tag: &'static str, embedded: bool, ty: TypeInfoFn) -> Self {
        Self {
            name,
            tag,
            embedded,
            ty,
        }
    }
}

impl TypeInfo {
    fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            element: None,
            fields: Vec::new(),
        }
    }

    pub fn primitive(name: &'static str, primitive: Primitive) -> Self {
        Self::new(name, Kind::Primitive(primitive))
    }

    pub fn sequence(name: &'static str, element: TypeInfoFn) -> Self {
        Self {
            element: Some(element),
            ..Self::new(name, Kind::Sequence)
        }
    }

    /// A keyed collection; only the value type is described.
    pub fn mapping(name: &'static str, value: TypeInfoFn) -> Self {
        Self {
            element: Some(value),
            ..Self::new(name, Kind::Mapping)
        }
    }

    pub fn reference(name: &'static str, target: TypeInfoFn) -> Self {
        Self {
            element: Some(target),
            ..Self::new(name, Kind::Reference)
        }
    }

    pub fn record(name: &'static str, fields: Vec<FieldInfo>) -> Self {
        Self {
            fields,
            ..Self::new(name, Kind::Record)
        }
    }

    /// A type with no structure the generator understands.
    pub fn opaque(name: &'static str) -> Self {
        Self::new(name, Kind::Unknown)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_infos(&self) -> &[FieldInfo] {
        &self.fields
    }
}

impl TypeDescriptor for TypeInfo {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn qualified_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name)
    }

    fn element_type(&self) -> Option<Self> {
        self.element.map(|resolve| resolve())
    }

    fn fields(&self) -> Vec<Field<Self>> {
        self.fields
            .iter()
            .map(|field| Field {
                name: field.name.to_string(),
                ty: (field.ty)(),
                tag: field.tag.to_string(),
                embedded: field.embedded,
            })
            .collect()
    }
}

macro_rules! describe_primitive {
    ($($ty:ty => $primitive:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::primitive(stringify!($ty), Primitive::$primitive)
                }
            }
        )*
    };
}

describe_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    str => Str,
    String => Str,
}

macro_rules! describe_sequence {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::sequence(std::any::type_name::<Self>(), T::type_info)
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, BTreeSet);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence(std::any::type_name::<Self>(), T::type_info)
    }
}

impl<T: Describe> Describe for [T] {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence(std::any::type_name::<Self>(), T::type_info)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence(std::any::type_name::<Self>(), T::type_info)
    }
}

impl<K, V: Describe, S> Describe for HashMap<K, V, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::mapping(std::any::type_name::<Self>(), V::type_info)
    }
}

impl<K, V: Describe> Describe for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::mapping(std::any::type_name::<Self>(), V::type_info)
    }
}

impl<K, V: Describe, S> Describe for indexmap::IndexMap<K, V, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::mapping(std::any::type_name::<Self>(), V::type_info)
    }
}

macro_rules! describe_reference {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::reference(std::any::type_name::<Self>(), T::type_info)
                }
            }
        )*
    };
}

describe_reference!(Box, Rc, Arc);

impl<T: Describe> Describe for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::reference(std::any::type_name::<Self>(), T::type_info)
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn type_info() -> TypeInfo {
        TypeInfo::reference(std::any::type_name::<Self>(), T::type_info)
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn type_info() -> TypeInfo {
        TypeInfo::reference(std::any::type_name::<Self>(), T::type_info)
    }
}

impl Describe for std::time::SystemTime {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque("std::time::SystemTime")
    }
}

impl Describe for serde_json::Value {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque("serde_json::Value")
    }
}

impl Describe for () {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque("()")
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque("chrono::DateTime")
    }
}

#[cfg(feature = "chrono")]
impl Describe for chrono::NaiveDateTime {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque("chrono::NaiveDateTime")
    }
}

#[cfg(feature = "chrono")]
impl Describe for chrono::NaiveDate {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque("chrono::NaiveDate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node;

    impl Describe for Node {
        fn type_info() -> TypeInfo {
            TypeInfo::record(
                "tests::Node",
                vec![
                    FieldInfo::new("value", "", false, <u32 as Describe>::type_info),
                    FieldInfo::new("next", ",omitempty", false, <Option<Box<Node>> as Describe>::type_info),
                ],
            )
        }
    }

    #[test]
    fn test_primitive_names() {
        assert_eq!(u8::type_info().qualified_name(), "u8");
        assert_eq!(String::type_info().qualified_name(), "String");
        assert_eq!(str::type_info().kind(), Kind::Primitive(Primitive::Str));
    }

    #[test]
    fn test_sequence_element() {
        let info = Vec::<u16>::type_info();
        assert_eq!(info.kind(), Kind::Sequence);
        let element = info.element_type().unwrap();
        assert_eq!(element.kind(), Kind::Primitive(Primitive::U16));
        assert!(info.fields().is_empty());
    }

    #[test]
    fn test_mapping_value_is_element() {
        let info = BTreeMap::<String, f64>::type_info();
        assert_eq!(info.kind(), Kind::Mapping);
        assert_eq!(
            info.element_type().unwrap().kind(),
            Kind::Primitive(Primitive::F64)
        );
    }

    #[test]
    fn test_references_chain() {
        let info = <&Option<Arc<str>>>::type_info();
        assert_eq!(info.kind(), Kind::Reference);
        let option = info.element_type().unwrap();
        assert_eq!(option.kind(), Kind::Reference);
        let arc = option.element_type().unwrap();
        assert_eq!(arc.kind(), Kind::Reference);
        assert_eq!(
            arc.element_type().unwrap().kind(),
            Kind::Primitive(Primitive::Str)
        );
    }

    #[test]
    fn test_self_referential_record() {
        let node = Node::type_info();
        let fields = node.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].name, "next");
        assert_eq!(fields[1].tag, ",omitempty");

        // Option<Box<Node>> -> Box<Node> -> Node
        let boxed = fields[1].ty.element_type().unwrap();
        let inner = boxed.element_type().unwrap();
        assert_eq!(inner.qualified_name(), "tests::Node");
    }
}
