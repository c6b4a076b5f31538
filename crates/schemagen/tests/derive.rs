use indexmap::IndexMap;
use schemagen::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

#[derive(Describe)]
struct EmbeddedType {
    #[allow(dead_code)]
    zoo: String,
}

#[derive(Describe)]
struct Item {
    #[allow(dead_code)]
    value: String,
}

#[derive(Describe)]
#[schema(export)]
#[allow(dead_code)]
struct ExampleBasic {
    #[schema(tag = "foo")]
    foo: bool,
    #[schema(tag = ",omitempty,minLength:1")]
    bar: String,
    qux: i8,
    baz: Vec<String>,
    #[schema(embed)]
    embedded: EmbeddedType,
    list: Vec<Item>,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Partial {
    a: String,
    #[schema(tag = ",omitempty")]
    b: u32,
}

#[derive(Describe)]
#[allow(dead_code)]
struct WithEmbedded {
    own: bool,
    #[schema(embed)]
    partial: Partial,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Excluded {
    #[schema(tag = "customName")]
    renamed: String,
    #[schema(tag = "-")]
    hidden: String,
    #[schema(skip)]
    also_hidden: u8,
}

#[derive(Describe, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct SerdeDriven {
    user_id: u64,
    #[serde(rename = "display")]
    display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
    #[serde(skip)]
    session: String,
    #[serde(flatten)]
    extra: Partial2,
}

#[derive(Describe, Serialize)]
#[allow(dead_code)]
struct Partial2 {
    region: String,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Containers {
    blob: Vec<u8>,
    scores: [f32; 3],
    lookup: HashMap<String, i64>,
    ordered: IndexMap<String, Item>,
    anything: HashMap<String, serde_json::Value>,
    raw: serde_json::Value,
    boxed: Box<Item>,
    at: std::time::SystemTime,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Wrapper<T> {
    inner: T,
    #[schema(tag = "inners,omitempty")]
    many: Vec<T>,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Borrowed<'a> {
    name: &'a str,
}

#[derive(Describe)]
#[allow(dead_code)]
struct RawIdents {
    r#type: String,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Category {
    name: String,
    #[schema(tag = ",omitempty")]
    children: Vec<Category>,
}

#[derive(Describe)]
struct Empty {}

#[test]
fn test_example_basic() {
    let document = schema_for::<ExampleBasic>();
    assert_eq!(
        document.to_value().unwrap(),
        json!({
            "$schema": DEFAULT_SCHEMA,
            "type": "object",
            "properties": {
                "foo": { "type": "boolean" },
                "bar": { "type": "string", "minLength": 1 },
                "qux": { "type": "integer" },
                "baz": { "type": "array", "items": { "type": "string" } },
                "zoo": { "type": "string" },
                "list": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "value": { "type": "string" } },
                        "required": ["value"]
                    }
                }
            },
            "required": ["foo", "qux", "baz", "zoo", "list"]
        })
    );
}

#[test]
fn test_exported_type_is_registered() {
    let reg = find_schema("ExampleBasic").expect("ExampleBasic should be registered");
    assert_eq!(reg.document(), schema_for::<ExampleBasic>());
    assert!(find_schema("Item").is_none());
}

#[test]
fn test_embedding_keeps_required_split() {
    let document = schema_for::<WithEmbedded>();
    let keys: Vec<_> = document.root.properties.keys().cloned().collect();
    assert_eq!(keys, vec!["own", "a", "b"]);
    assert_eq!(document.root.required, vec!["own", "a"]);
}

#[test]
fn test_override_and_exclusion() {
    let document = schema_for::<Excluded>();
    let props = &document.root.properties;
    assert!(props.contains_key("customName"));
    assert!(!props.contains_key("renamed"));
    assert!(!props.contains_key("hidden"));
    assert!(!props.contains_key("also_hidden"));
    assert_eq!(document.root.required, vec!["customName"]);
}

#[test]
fn test_serde_attributes() {
    let document = schema_for::<SerdeDriven>();
    let keys: Vec<_> = document.root.properties.keys().cloned().collect();
    assert_eq!(keys, vec!["userId", "display", "nickname", "region"]);
    assert_eq!(document.root.required, vec!["userId", "display", "region"]);
    assert_eq!(
        document.root.properties["nickname"].schema_type,
        Some(SchemaType::String)
    );
}

#[test]
fn test_containers() {
    let document = schema_for::<Containers>();
    let value = document.to_value().unwrap();
    let props = &value["properties"];

    assert_eq!(props["blob"], json!({ "type": "string" }));
    assert_eq!(
        props["scores"],
        json!({ "type": "array", "items": { "type": "number" } })
    );
    assert_eq!(
        props["lookup"],
        json!({ "type": "object", "properties": { ".*": { "type": "integer" } } })
    );
    assert_eq!(
        props["ordered"],
        json!({ "type": "object", "properties": { ".*": { "type": "object" } } })
    );
    assert_eq!(
        props["anything"],
        json!({ "type": "object", "additionalProperties": true })
    );
    assert_eq!(props["raw"], json!({}));
    assert_eq!(props["boxed"]["required"], json!(["value"]));
    assert_eq!(
        props["at"],
        json!({ "type": "string", "format": "date-time" })
    );
}

#[test]
fn test_generic_struct() {
    let document = schema_for::<Wrapper<u16>>();
    let props = &document.root.properties;
    assert_eq!(props["inner"], Property::leaf(SchemaType::Integer, None));
    assert_eq!(
        props["inners"].items.as_deref(),
        Some(&Property::leaf(SchemaType::Integer, None))
    );
    assert_eq!(document.root.required, vec!["inner"]);
}

#[test]
fn test_borrowed_and_raw_fields() {
    let borrowed = schema_for::<Borrowed<'static>>();
    assert_eq!(
        borrowed.root.properties["name"],
        Property::leaf(SchemaType::String, None)
    );

    let raw = schema_for::<RawIdents>();
    assert!(raw.root.properties.contains_key("type"));
}

#[test]
fn test_recursive_type_terminates() {
    let document = schema_for::<Category>();
    let children = &document.root.properties["children"];
    let items = children.items.as_deref().unwrap();
    assert_eq!(items.schema_type, Some(SchemaType::Object));
    assert!(items.properties.is_empty());
    assert_eq!(document.root.required, vec!["name"]);
}

#[test]
fn test_empty_struct_render() {
    let rendered = schema_for::<Empty>().render().unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(
        value,
        json!({ "$schema": "http://json-schema.org/schema#", "type": "object" })
    );
}

#[test]
fn test_read_twice_appends() {
    let mut document = Document::new();
    document.read(&Partial::type_info());
    document.read(&Partial::type_info());
    assert_eq!(document.root.required, vec!["a", "a"]);
}

#[cfg(feature = "chrono")]
#[test]
fn test_chrono_formats() {
    #[derive(Describe)]
    #[allow(dead_code)]
    struct Event {
        at: chrono::DateTime<chrono::Utc>,
        local: chrono::NaiveDateTime,
        day: chrono::NaiveDate,
    }

    let document = schema_for::<Event>();
    let props = &document.root.properties;
    assert_eq!(props["at"].format.as_deref(), Some("date-time"));
    assert_eq!(props["local"].format.as_deref(), Some("date-time"));
    assert_eq!(props["day"].format.as_deref(), Some("date"));
}
