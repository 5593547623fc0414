//! # buddy-host
//!
//! The boundary between the SDK and the orchestration engine that owns
//! resource lifecycle.
//!
//! ```text
//! ResourceBinder ──register_resource──▶ ResourceHost ──▶ remote platform
//!                ──invoke────────────▶      │
//!                                           ▼
//!                              IntegrationInventory (getIntegrations)
//! ```
//!
//! [`MemoryHost`] is an in-process implementation used for local previews
//! and tests.

pub mod error;
pub mod host;
pub mod inventory;
pub mod memory;

pub use error::HostError;
pub use host::{InvokeOptions, RegisterOptions, RegisteredResource, ResourceHost};
pub use inventory::{InMemoryInventory, IntegrationInventory, IntegrationRecord};
pub use memory::{MemoryHost, Registration};
