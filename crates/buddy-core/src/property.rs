//! Property bags transmitted to the resource host.

use crate::error::OutputError;
use crate::output::{Input, Output};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// One entry of a property bag.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// Not provided. For host-computed fields this marks the field as
    /// output-only.
    Unset,
    /// A literal value known at declaration time.
    Value(Value),
    /// A value that resolves later.
    Deferred(Output<Value>),
}

impl PropertyValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, PropertyValue::Unset)
    }

    /// The literal value, if this entry holds one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropertyValue::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Resolve the entry. `Unset` resolves to `None`.
    pub async fn resolve(&self) -> Result<Option<Value>, OutputError> {
        match self {
            PropertyValue::Unset => Ok(None),
            PropertyValue::Value(value) => Ok(Some(value.clone())),
            PropertyValue::Deferred(output) => output.resolve().await.map(Some),
        }
    }
}

impl From<Input<Value>> for PropertyValue {
    fn from(input: Input<Value>) -> Self {
        match input {
            Input::Value(Value::Null) => PropertyValue::Unset,
            Input::Value(value) => PropertyValue::Value(value),
            Input::Output(output) => PropertyValue::Deferred(output),
        }
    }
}

/// The untyped field map registered with the resource host.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys explicitly marked `Unset`.
    pub fn unset_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_unset())
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Literal string value of a key, if any.
    pub fn literal_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(PropertyValue::as_value)
            .and_then(Value::as_str)
    }

    /// Union of the dependency sets of every deferred entry.
    pub fn dependencies(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .filter_map(|v| match v {
                PropertyValue::Deferred(output) => Some(output.dependencies().iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Resolve every entry into a JSON object, skipping `Unset` entries.
    pub fn resolve(&self) -> Output<Map<String, Value>> {
        let entries: Vec<(String, PropertyValue)> = self
            .entries
            .iter()
            .filter(|(_, v)| !v.is_unset())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Output::new(async move {
            let mut resolved = Map::new();
            for (key, value) in entries {
                if let Some(value) = value.resolve().await? {
                    resolved.insert(key, value);
                }
            }
            Ok::<_, OutputError>(resolved)
        })
        .with_dependencies(self.dependencies())
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
