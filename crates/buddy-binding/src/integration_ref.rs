//! Integration references and their resolution.
//!
//! An action field pointing at an integration may be given either as the
//! bare identifier shape (`{ hash_id }`) or as a live handle to an
//! integration declared in the same program. Only the bare shape ever
//! crosses the host boundary; [`resolve`] projects a live handle down to it
//! without waiting for the handle's hash to be known.

use buddy_core::Output;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The canonical, transmittable form of an integration reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegrationId {
    pub hash_id: String,
}

impl IntegrationId {
    pub fn new(hash_id: impl Into<String>) -> Self {
        Self {
            hash_id: hash_id.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({ "hash_id": self.hash_id })
    }
}

/// A handle to an integration resource whose hash may not be known yet.
#[derive(Debug, Clone)]
pub struct LiveIntegration {
    urn: String,
    hash_id: Output<String>,
}

impl LiveIntegration {
    pub fn new(urn: impl Into<String>, hash_id: Output<String>) -> Self {
        Self {
            urn: urn.into(),
            hash_id,
        }
    }

    pub fn urn(&self) -> &str {
        &self.urn
    }

    pub fn hash_id(&self) -> &Output<String> {
        &self.hash_id
    }
}

/// Reference to an integration held by an action field.
#[derive(Debug, Clone)]
pub enum IntegrationRef {
    /// Already in canonical form.
    Reference(IntegrationId),
    /// A live integration handle.
    Live(LiveIntegration),
}

impl IntegrationRef {
    /// Reference an existing integration by hash.
    pub fn hash(hash_id: impl Into<String>) -> Self {
        IntegrationRef::Reference(IntegrationId::new(hash_id))
    }
}

impl From<IntegrationId> for IntegrationRef {
    fn from(id: IntegrationId) -> Self {
        IntegrationRef::Reference(id)
    }
}

impl From<LiveIntegration> for IntegrationRef {
    fn from(live: LiveIntegration) -> Self {
        IntegrationRef::Live(live)
    }
}

/// Normalize a reference into its canonical `{ hash_id }` form.
///
/// Performs no I/O. For a live handle the result depends on the handle's
/// resource, which is how the host learns to order the two.
pub fn resolve(reference: &IntegrationRef) -> Output<IntegrationId> {
    match reference {
        IntegrationRef::Reference(id) => Output::resolved(id.clone()),
        IntegrationRef::Live(live) => live
            .hash_id
            .map(IntegrationId::new)
            .with_dependency(live.urn.clone()),
    }
}
