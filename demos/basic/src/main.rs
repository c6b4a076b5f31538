use schemagen::prelude::*;
use serde::Serialize;

#[derive(Describe, Serialize)]
struct EmbeddedType {
    zoo: String,
}

#[derive(Describe, Serialize)]
struct Item {
    value: String,
}

#[derive(Describe, Serialize)]
#[schema(export)]
struct ExampleBasic {
    #[schema(tag = "foo")]
    foo: bool,
    #[schema(tag = ",omitempty,minLength:1")]
    bar: String,
    qux: i8,
    baz: Vec<String>,
    #[serde(flatten)]
    embedded: EmbeddedType,
    list: Vec<Item>,
}

#[derive(Describe, Serialize)]
#[schema(export)]
#[serde(rename_all = "camelCase")]
struct AuditEvent {
    event_id: u64,
    occurred_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actor: Option<String>,
    #[schema(tag = "payload,omitempty")]
    payload: Vec<u8>,
}

fn main() {
    println!("Exported schemas: {}", schema_count());
    for reg in iter_schemas() {
        println!();
        println!("{}:", reg.name);
        println!("{}", reg.document());
    }

    let example = ExampleBasic {
        foo: true,
        bar: "bar".to_string(),
        qux: 1,
        baz: vec!["a".to_string()],
        embedded: EmbeddedType {
            zoo: "zoo".to_string(),
        },
        list: vec![Item {
            value: "v".to_string(),
        }],
    };
    let event = AuditEvent {
        event_id: 7,
        occurred_at: chrono::Utc::now(),
        actor: None,
        payload: Vec::new(),
    };

    println!();
    println!("Sample instances:");
    println!("{}", serde_json::to_string(&example).unwrap_or_default());
    println!("{}", serde_json::to_string(&event).unwrap_or_default());
}
