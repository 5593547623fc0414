//! Shared fixtures.

#![allow(dead_code)]

use buddy_binding::{ActionArgs, FieldKind, FieldSpec, IntegrationRef, ResourceBinder, ResourceSchema};
use buddy_core::{INTEGRATION_TOKEN, SdkConfig};
use buddy_host::MemoryHost;
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_VERSION: &str = "9.9.9";

/// A host that numbers integrations `int-1`, `int-2`, ... and actions by
/// registration sequence.
pub fn numbered_host() -> Arc<MemoryHost> {
    Arc::new(MemoryHost::new().with_id_allocator(|token, seq| {
        if token == INTEGRATION_TOKEN {
            format!("int-{}", seq)
        } else {
            seq.to_string()
        }
    }))
}

pub fn binder(host: &Arc<MemoryHost>) -> ResourceBinder {
    ResourceBinder::new(host.clone(), SdkConfig::default().with_version(TEST_VERSION))
}

/// A literal that fits `kind`.
pub fn sample_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::String => json!("sample"),
        FieldKind::Integer => json!(7),
        FieldKind::Boolean => json!(true),
        FieldKind::Enum(values) => json!(values[0]),
        FieldKind::StringList => json!(["sample"]),
        FieldKind::Object => json!({ "key": "value" }),
        FieldKind::ObjectList => json!([{ "key": "A", "value": "1" }]),
        FieldKind::Integration => json!({ "hash_id": "int-1" }),
    }
}

fn with_field(args: ActionArgs, field: &FieldSpec) -> ActionArgs {
    match field.kind {
        FieldKind::Integration => args.integration(field.name, IntegrationRef::hash("int-1")),
        kind => args.set(field.name, sample_value(kind)),
    }
}

/// Every required field of `schema`, and nothing else.
pub fn required_args(schema: &ResourceSchema) -> ActionArgs {
    schema
        .required_fields()
        .fold(ActionArgs::new(), |args, field| with_field(args, field))
}

/// Every required field of `schema` except `missing`.
pub fn required_args_without(schema: &ResourceSchema, missing: &str) -> ActionArgs {
    schema
        .required_fields()
        .filter(|f| f.name != missing)
        .fold(ActionArgs::new(), |args, field| with_field(args, field))
}

/// Every declared field of `schema`, with plain JSON for integrations.
pub fn full_document(schema: &ResourceSchema) -> Value {
    let object: serde_json::Map<String, Value> = schema
        .all_fields()
        .map(|f| (f.name.to_string(), sample_value(f.kind)))
        .collect();
    Value::Object(object)
}
