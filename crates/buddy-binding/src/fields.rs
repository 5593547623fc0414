//! Caller-supplied field maps.

use crate::integration_ref::IntegrationRef;
use buddy_core::{Input, Output};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One caller-supplied field value.
#[derive(Debug, Clone)]
pub enum FieldInput {
    Literal(Value),
    Deferred(Output<Value>),
    Integration(IntegrationRef),
}

impl FieldInput {
    /// Whether the entry carries no value (a literal `null`).
    pub fn is_null(&self) -> bool {
        matches!(self, FieldInput::Literal(Value::Null))
    }
}

impl From<Input<Value>> for FieldInput {
    fn from(input: Input<Value>) -> Self {
        match input {
            Input::Value(value) => FieldInput::Literal(value),
            Input::Output(output) => FieldInput::Deferred(output),
        }
    }
}

/// Named field values for a resource declaration or a prior-state snapshot.
///
/// ```ignore
/// let args = ActionArgs::new()
///     .set("name", "deploy")
///     .set("trigger_time", TriggerTime::OnEveryExecution)
///     .set("bucket_name", "assets")
///     .integration("integration", &aws);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: BTreeMap<String, FieldInput>,
}

/// Arguments for creating a resource.
pub type ActionArgs = FieldMap;

/// Partial prior state used when attaching to an existing resource.
pub type ActionState = FieldMap;

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a literal value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, FieldInput::Literal(value.into()));
        self
    }

    /// Set a value computed by another resource.
    pub fn set_output(mut self, field: impl Into<String>, value: Output<Value>) -> Self {
        self.insert(field, FieldInput::Deferred(value));
        self
    }

    /// Set an integration reference.
    pub fn integration(mut self, field: impl Into<String>, reference: impl Into<IntegrationRef>) -> Self {
        self.insert(field, FieldInput::Integration(reference.into()));
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldInput) {
        self.entries.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldInput> {
        self.entries.get(field)
    }

    /// Whether the field carries a value. A literal `null` counts as absent.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldInput)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from a JSON object, e.g. a state snapshot read back from the host.
    pub fn from_json(object: Map<String, Value>) -> Self {
        Self {
            entries: object
                .into_iter()
                .map(|(k, v)| (k, FieldInput::Literal(v)))
                .collect(),
        }
    }
}
