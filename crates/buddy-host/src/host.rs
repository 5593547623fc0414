//! The resource host contract.

use crate::error::HostError;
use buddy_core::{Output, PropertyBag};
use serde_json::{Map, Value};

/// The orchestration engine that owns resource lifecycle.
///
/// The SDK only ever declares resources and issues queries; diffing,
/// persistence and remote API calls happen behind this trait.
pub trait ResourceHost: Send + Sync {
    /// Register a resource. Computed fields come back as deferred values.
    ///
    /// `options.id` present means the resource already exists and is being
    /// attached by identity rather than created.
    fn register_resource(
        &self,
        token: &str,
        name: &str,
        props: PropertyBag,
        options: &RegisterOptions,
    ) -> Result<RegisteredResource, HostError>;

    /// Run a query against host state.
    fn invoke(&self, token: &str, args: Value, options: &InvokeOptions) -> Output<Value>;
}

/// Options accompanying a registration.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Identity of an existing resource to attach to.
    pub id: Option<Output<String>>,
    /// Provider protocol version the bag was built for.
    pub version: Option<String>,
    /// Fields whose changes the host must ignore on later updates.
    pub ignore_changes: Vec<String>,
    /// Replacement strategy. `None` leaves the host default.
    pub delete_before_replace: Option<bool>,
}

impl RegisterOptions {
    pub fn is_rehydrate(&self) -> bool {
        self.id.is_some()
    }
}

/// Options accompanying a query.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Provider protocol version.
    pub version: Option<String>,
}

/// Handle returned by the host for a registered resource.
#[derive(Debug, Clone)]
pub struct RegisteredResource {
    /// Unique resource name within the host.
    pub urn: String,
    /// Host-assigned identity.
    pub id: Output<String>,
    /// Every field of the resource as the host sees it, computed ones included.
    pub outputs: Output<Map<String, Value>>,
}
