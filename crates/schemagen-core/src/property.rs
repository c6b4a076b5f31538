//! The schema property tree and the recursive walk that fills it.

use crate::descriptor::TypeDescriptor;
use crate::kind::{Kind, Primitive};
use crate::mapping::{self, SchemaType};
use crate::tag::{self, Constraint, TagOptions};
use indexmap::IndexMap;
use serde::Serialize;

/// Key under which a mapping's value shape is described.
pub const WILDCARD_KEY: &str = ".*";

/// One node of a JSON Schema: the shape of a type or field.
///
/// Unset members are left out of the rendered JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Element shape; only set for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,

    /// Names a conforming instance must carry. Not deduplicated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// `false` for closed records, which renders as absent.
    #[serde(skip_serializing_if = "is_false")]
    pub additional_properties: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Property {
    /// A leaf node with a type and optional format.
    pub fn leaf(schema_type: SchemaType, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// Populate this node from a type descriptor.
    ///
    /// Never fails: unmapped types leave the node untyped and bad
    /// annotations are ignored. Properties are rebuilt for records, but the
    /// required list is appended to, so reading twice duplicates entries.
    pub fn read<D: TypeDescriptor>(&mut self, ty: &D, opts: TagOptions<'_>) {
        Reader::default().read(self, ty, opts);
    }

    /// Apply `minLength`/`maxLength` options; anything else is skipped.
    pub fn apply_opts(&mut self, opts: TagOptions<'_>) {
        for constraint in opts.constraints() {
            match constraint {
                Ok(Constraint::MinLength(n)) => self.min_length = Some(n),
                Ok(Constraint::MaxLength(n)) => self.max_length = Some(n),
                Err(e) => tracing::trace!(options = opts.as_str(), "ignoring annotation: {e}"),
            }
        }
    }
}

/// Walk state: the named types currently being expanded.
#[derive(Default)]
struct Reader {
    open: Vec<String>,
}

impl Reader {
    fn read<D: TypeDescriptor>(&mut self, prop: &mut Property, ty: &D, opts: TagOptions<'_>) {
        let mapped = mapping::lookup(ty);
        if let Some(schema_type) = mapped.schema_type {
            prop.schema_type = Some(schema_type);
        }
        if let Some(format) = mapped.format {
            prop.format = Some(format.to_string());
        }

        if !matches!(mapped.kind, Kind::Sequence | Kind::Record | Kind::Reference) {
            if mapped.kind == Kind::Mapping {
                read_mapping(prop, ty);
            }
            return;
        }

        // Anonymous types are not tracked; a cycle has to pass through a name.
        let name = ty.qualified_name().into_owned();
        if !name.is_empty() && self.open.contains(&name) {
            tracing::warn!(type_name = %name, kind = %mapped.kind, "recursive type reference, leaving it open");
            return;
        }
        self.open.push(name);

        match mapped.kind {
            Kind::Sequence => self.read_sequence(prop, ty),
            Kind::Record => self.read_record(prop, ty),
            _ => {
                if let Some(target) = ty.element_type() {
                    self.read(prop, &target, opts);
                }
            }
        }

        self.open.pop();
    }

    fn read_sequence<D: TypeDescriptor>(&mut self, prop: &mut Property, ty: &D) {
        let Some(element) = ty.element_type() else {
            return;
        };

        let mapped = mapping::lookup(&element);
        if mapped.kind == Kind::Primitive(Primitive::U8) {
            prop.schema_type = Some(SchemaType::String);
        } else if mapped.schema_type.is_some() {
            let mut items = Property::default();
            self.read(&mut items, &element, TagOptions::default());
            prop.items = Some(Box::new(items));
        }
    }

    fn read_record<D: TypeDescriptor>(&mut self, prop: &mut Property, ty: &D) {
        prop.schema_type = Some(SchemaType::Object);
        prop.properties = IndexMap::new();
        prop.additional_properties = false;

        tracing::debug!(record = %ty.qualified_name(), "reading record");

        for field in ty.fields() {
            let (override_name, opts) = tag::parse_tag(&field.tag);
            let name = if override_name.is_empty() {
                field.name.as_str()
            } else {
                override_name
            };
            if name == tag::SKIP {
                continue;
            }

            if field.embedded {
                let mut embedded = Property::default();
                self.read(&mut embedded, &field.ty, opts);
                prop.properties.extend(embedded.properties);
                prop.required.extend(embedded.required);
                continue;
            }

            let mut child = Property::default();
            self.read(&mut child, &field.ty, opts);
            child.apply_opts(opts);
            prop.properties.insert(name.to_string(), child);

            if !opts.contains(tag::OMIT_EMPTY) {
                prop.required.push(name.to_string());
            }
        }
    }
}

fn read_mapping<D: TypeDescriptor>(prop: &mut Property, ty: &D) {
    let mapped = ty.element_type().map(|value| mapping::lookup(&value));
    match mapped.and_then(|m| m.schema_type.map(|t| (t, m.format))) {
        Some((schema_type, format)) => {
            prop.properties = IndexMap::new();
            prop.properties
                .insert(WILDCARD_KEY.to_string(), Property::leaf(schema_type, format));
        }
        None => prop.additional_properties = true,
    }
}
