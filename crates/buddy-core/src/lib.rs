//! # buddy-core
//!
//! Shared types for the Buddy pipeline SDK.
//!
//! - [`Output`] / [`Input`]: deferred values computed by the resource host
//! - [`PropertyBag`]: the untyped field map registered with the host
//! - Closed enumerations used by action fields ([`TriggerTime`], [`Acl`], ...)
//! - [`SdkConfig`]: explicit configuration threaded into the binder

pub mod config;
pub mod enums;
pub mod error;
pub mod output;
pub mod property;

pub use config::{BindingDefaults, LoggingConfig, SDK_VERSION, SdkConfig};
pub use enums::{
    Acl, IntegrationType, IntegrationScope, KubernetesAuth, RunNext, SshAuthentication,
    TriggerCondition, TriggerTime,
};
pub use error::{ConfigError, OutputError, UnknownVariant};
pub use output::{Input, Output, all};
pub use property::{PropertyBag, PropertyValue};

/// Resource token of the integration resource.
pub const INTEGRATION_TOKEN: &str = "buddy:index/integration:Integration";

/// Query token listing the integrations in the host's inventory.
pub const GET_INTEGRATIONS_TOKEN: &str = "buddy:index/getIntegrations:getIntegrations";
