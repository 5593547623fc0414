//! # buddy-binding
//!
//! Turns typed resource declarations into host registrations.
//!
//! ## Pipeline
//!
//! ```text
//! FieldMap ──▶ projector ──▶ PropertyBag ──▶ ResourceBinder ──▶ ResourceHost
//!    │            │                               │
//!    │            └─ integration_ref::resolve     └─ ignore_changes union,
//!    │               ({ hash_id } projection)        replace strategy,
//!    └─ ResourceSchema (declared fields)              version stamp
//! ```
//!
//! Every resource kind is described by a static [`ResourceSchema`]. The same
//! binder serves all of them; there is no per-kind registration code.

pub mod binder;
pub mod error;
pub mod fields;
pub mod integration_ref;
pub mod projector;
pub mod schema;

pub use binder::{BoundResource, ResourceBinder, ResourceOptions};
pub use error::BindingError;
pub use fields::{ActionArgs, ActionState, FieldInput, FieldMap};
pub use integration_ref::{IntegrationId, IntegrationRef, LiveIntegration, resolve};
pub use projector::{ProjectionMode, project};
pub use schema::{FieldKind, FieldSpec, ResourceSchema};
