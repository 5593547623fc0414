//! # buddy-sdk
//!
//! Buddy pipeline actions and integrations as infrastructure-as-code
//! resources.
//!
//! ```ignore
//! use buddy_sdk::prelude::*;
//!
//! let host = Arc::new(MemoryHost::new());
//! let binder = ResourceBinder::new(host, SdkConfig::default());
//!
//! let aws = Integration::new(
//!     &binder,
//!     "aws",
//!     IntegrationArgs::new("aws", IntegrationType::Amazon)
//!         .credential("access_key", "AKIA...")
//!         .credential("secret_key", "..."),
//!     ResourceOptions::new(),
//! )?;
//!
//! let args = ActionArgs::new()
//!     .set("name", "Upload assets")
//!     .set("project_name", "web")
//!     .set("pipeline_id", 7)
//!     .set("trigger_time", TriggerTime::OnEveryExecution)
//!     .set("bucket_name", "assets")
//!     .integration("integration", &aws);
//! let upload = AmazonS3::new(&binder, "upload", &args, ResourceOptions::new())?;
//! ```
//!
//! ## Crates
//!
//! - `buddy-core`: deferred values, property bags, enums, configuration
//! - `buddy-host`: the resource host boundary and an in-memory host
//! - `buddy-binding`: integration resolution, projection and binding
//! - `buddy-sdk` (this crate): the action catalogue and typed resources

pub mod actions;
pub mod catalog;
pub mod integration;
pub mod logging;

pub use actions::{
    Action, AmazonS3, AwsCodeDeploy, AwsEcs, AwsElasticBeanstalk, AwsLambda, AwsLambdaDeploy,
    Cloudflare, DigitalOcean, DockerPushImage, DockerfileBuild, GkeApplyDeployment, GkeRunHelm,
    GkeRunJob, KubernetesApply, KubernetesRunHelm, Rackspace, Slack, SshCommand,
};
pub use integration::{INTEGRATION, Integration, IntegrationArgs};
pub use logging::{init_logging, try_init_logging};

/// Everything needed to declare resources.
pub mod prelude {
    pub use crate::actions::*;
    pub use crate::integration::{Integration, IntegrationArgs};
    pub use buddy_binding::{
        ActionArgs, ActionState, BindingError, BoundResource, IntegrationId, IntegrationRef,
        ResourceBinder, ResourceOptions,
    };
    pub use buddy_core::{
        Acl, Input, IntegrationScope, IntegrationType, KubernetesAuth, Output, OutputError,
        RunNext, SdkConfig, SshAuthentication, TriggerCondition, TriggerTime,
    };
    pub use buddy_host::{MemoryHost, ResourceHost};
    pub use std::sync::Arc;
}
