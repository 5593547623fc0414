//! Field projection: caller fields into a host property bag.
//!
//! ## Modes
//!
//! | Mode | Input | Validation |
//! |------|-------|------------|
//! | `Create` | desired configuration | required fields, declared names, literal kinds |
//! | `Rehydrate` | partial prior state | none |
//!
//! In both modes every declared field lands in the bag (absent ones as
//! `Unset`), integration-typed fields are normalized to `{ hash_id }`, the
//! schema's fixed type tag is injected and computed outputs are marked
//! output-only.

use crate::error::BindingError;
use crate::fields::{FieldInput, FieldMap};
use crate::integration_ref::{IntegrationId, resolve};
use crate::schema::{FieldKind, FieldSpec, ResourceSchema};
use buddy_core::{OutputError, PropertyBag, PropertyValue};
use serde_json::Value;

/// Whether a projection creates a resource or rehydrates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Create,
    Rehydrate,
}

/// Project `input` into a property bag for `schema`.
pub fn project(
    schema: &ResourceSchema,
    mode: ProjectionMode,
    input: &FieldMap,
) -> Result<PropertyBag, BindingError> {
    match mode {
        ProjectionMode::Create => validate(schema, input)?,
        ProjectionMode::Rehydrate => {
            for (name, _) in input.iter().filter(|(name, _)| !schema.has_output(name)) {
                tracing::debug!(
                    resource = schema.name,
                    field = %name,
                    "Dropping undeclared field from prior state"
                );
            }
        }
    }

    let mut bag = PropertyBag::new();
    for field in schema.all_fields() {
        let value = match input.get(field.name) {
            Some(entry) => project_entry(field, entry),
            None => PropertyValue::Unset,
        };
        bag.insert(field.name, value);
    }

    if let Some(tag) = schema.type_tag {
        bag.insert("type", PropertyValue::Value(Value::String(tag.to_string())));
    }

    for name in schema.computed {
        let value = match (mode, input.get(name)) {
            (ProjectionMode::Rehydrate, Some(FieldInput::Literal(value))) => {
                PropertyValue::Value(value.clone())
            }
            (ProjectionMode::Rehydrate, Some(FieldInput::Deferred(output))) => {
                PropertyValue::Deferred(output.clone())
            }
            _ => PropertyValue::Unset,
        };
        bag.insert(*name, value);
    }

    Ok(bag)
}

fn project_entry(field: &FieldSpec, entry: &FieldInput) -> PropertyValue {
    match entry {
        FieldInput::Literal(Value::Null) => PropertyValue::Unset,
        FieldInput::Literal(value) if field.is_integration() => match canonical(value) {
            Some(id) => PropertyValue::Value(id.to_value()),
            None => {
                tracing::debug!(
                    field = field.name,
                    "Dropping integration value without a hash_id"
                );
                PropertyValue::Unset
            }
        },
        FieldInput::Literal(value) => PropertyValue::Value(value.clone()),
        FieldInput::Deferred(output) if field.is_integration() => {
            let name = field.name;
            PropertyValue::Deferred(output.try_map(move |value| match value {
                Value::Null => Ok(Value::Null),
                value => canonical(&value).map(|id| id.to_value()).ok_or_else(|| {
                    OutputError::Decode(format!("{} is not an integration reference", name))
                }),
            }))
        }
        FieldInput::Deferred(output) => PropertyValue::Deferred(output.clone()),
        FieldInput::Integration(reference) => {
            if !field.is_integration() {
                tracing::debug!(field = field.name, "Integration reference on a plain field");
            }
            PropertyValue::Deferred(resolve(reference).map(|id| id.to_value()))
        }
    }
}

/// The `{ hash_id }` part of an integration value, extra keys dropped.
fn canonical(value: &Value) -> Option<IntegrationId> {
    value
        .get("hash_id")
        .and_then(Value::as_str)
        .map(IntegrationId::new)
}

fn validate(schema: &ResourceSchema, input: &FieldMap) -> Result<(), BindingError> {
    for field in schema.required_fields() {
        if !input.contains(field.name) {
            return Err(BindingError::MissingRequiredField {
                resource: schema.name.to_string(),
                field: field.name.to_string(),
            });
        }
    }

    for (name, entry) in input.iter() {
        let Some(field) = schema.field(name) else {
            return Err(BindingError::UnknownField {
                resource: schema.name.to_string(),
                field: name.clone(),
            });
        };

        let reason = match entry {
            FieldInput::Literal(Value::Null) | FieldInput::Deferred(_) => None,
            FieldInput::Literal(value) if !field.kind.accepts(value) => Some(field.kind.describe()),
            FieldInput::Literal(_) => None,
            FieldInput::Integration(_) if field.kind != FieldKind::Integration => {
                Some("integration references are only accepted by integration fields".to_string())
            }
            FieldInput::Integration(_) => None,
        };

        if let Some(reason) = reason {
            return Err(BindingError::InvalidFieldValue {
                resource: schema.name.to_string(),
                field: name.clone(),
                reason,
            });
        }
    }

    Ok(())
}
