//! Typed pipeline action resources.
//!
//! Each type is a thin handle over [`BoundResource`] bound to one schema from
//! [`crate::catalog`]. They all share the same surface:
//!
//! ```ignore
//! let deploy = AmazonS3::new(&binder, "deploy-assets", &args, ResourceOptions::new())?;
//! let existing = AmazonS3::get(&binder, "deploy-assets", "42", None, ResourceOptions::new())?;
//! assert!(AmazonS3::is_instance(&deploy));
//! let url = deploy.html_url();
//! ```

use crate::catalog;
use buddy_binding::{
    ActionArgs, ActionState, BindingError, BoundResource, ResourceBinder, ResourceOptions,
    ResourceSchema,
};
use buddy_core::{Input, Output};
use std::ops::Deref;

macro_rules! action_resources {
    ($($(#[$meta:meta])* $name:ident => $schema:path),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                resource: BoundResource,
            }

            impl $name {
                pub fn schema() -> &'static ResourceSchema {
                    &$schema
                }

                /// Declare a new action.
                pub fn new(
                    binder: &ResourceBinder,
                    name: &str,
                    args: &ActionArgs,
                    options: ResourceOptions,
                ) -> Result<Self, BindingError> {
                    binder
                        .create(Self::schema(), name, args, options)
                        .map(|resource| Self { resource })
                }

                /// Attach to an existing action by id, with optional prior state.
                pub fn get(
                    binder: &ResourceBinder,
                    name: &str,
                    id: impl Into<Input<String>>,
                    state: Option<&ActionState>,
                    options: ResourceOptions,
                ) -> Result<Self, BindingError> {
                    let empty = ActionState::new();
                    binder
                        .rehydrate(Self::schema(), name, id, state.unwrap_or(&empty), options)
                        .map(|resource| Self { resource })
                }

                pub fn is_instance(resource: &BoundResource) -> bool {
                    resource.is(Self::schema().token)
                }

                pub fn into_inner(self) -> BoundResource {
                    self.resource
                }
            }

            impl Deref for $name {
                type Target = BoundResource;

                fn deref(&self) -> &Self::Target {
                    &self.resource
                }
            }

            impl From<$name> for BoundResource {
                fn from(action: $name) -> Self {
                    action.resource
                }
            }
        )+

        /// Wrap a bound resource in its typed handle, by token.
        #[derive(Debug, Clone)]
        pub enum Action {
            $($name($name)),+
        }

        impl Action {
            /// Classify a bound resource. Returns `None` for non-action resources.
            pub fn classify(resource: BoundResource) -> Option<Self> {
                $(
                    if $name::is_instance(&resource) {
                        return Some(Action::$name($name { resource }));
                    }
                )+
                None
            }

            pub fn resource(&self) -> &BoundResource {
                match self {
                    $(Action::$name(action) => &action.resource),+
                }
            }
        }
    };
}

action_resources! {
    /// Upload files to an Amazon S3 bucket.
    AmazonS3 => catalog::AMAZON_S3,
    /// Invoke an AWS Lambda function.
    AwsLambda => catalog::AWS_LAMBDA,
    /// Deploy code to an AWS Lambda function.
    AwsLambdaDeploy => catalog::AWS_LAMBDA_DEPLOY,
    /// Update an Amazon ECS service.
    AwsEcs => catalog::AWS_ECS,
    /// Start an AWS CodeDeploy deployment. Replace-only.
    AwsCodeDeploy => catalog::AWS_CODE_DEPLOY,
    /// Deploy an application version to AWS Elastic Beanstalk.
    AwsElasticBeanstalk => catalog::AWS_ELASTIC_BEANSTALK,
    /// Purge Cloudflare caches.
    Cloudflare => catalog::CLOUDFLARE,
    /// Upload to DigitalOcean Spaces. Replace-only.
    DigitalOcean => catalog::DIGITAL_OCEAN,
    /// Upload to Rackspace Cloud Files. Replace-only.
    Rackspace => catalog::RACKSPACE,
    /// Build a Docker image from a Dockerfile.
    DockerfileBuild => catalog::DOCKERFILE_BUILD,
    /// Push a Docker image to a registry.
    DockerPushImage => catalog::DOCKER_PUSH_IMAGE,
    /// Apply Kubernetes manifests.
    KubernetesApply => catalog::KUBERNETES_APPLY,
    /// Install or upgrade a Helm chart on a Kubernetes cluster.
    KubernetesRunHelm => catalog::KUBERNETES_RUN_HELM,
    /// Apply a deployment on Google Kubernetes Engine. Replace-only.
    GkeApplyDeployment => catalog::GKE_APPLY_DEPLOYMENT,
    /// Run a job on Google Kubernetes Engine.
    GkeRunJob => catalog::GKE_RUN_JOB,
    /// Install or upgrade a Helm chart on Google Kubernetes Engine.
    GkeRunHelm => catalog::GKE_RUN_HELM,
    /// Post a message to Slack.
    Slack => catalog::SLACK,
    /// Run commands over SSH.
    SshCommand => catalog::SSH_COMMAND,
}

impl DockerfileBuild {
    /// Identifier of the built image.
    pub fn docker_image_id(&self) -> Output<String> {
        self.resource.string_output("docker_image_id")
    }
}

impl Slack {
    /// Display name of the target channel.
    pub fn channel_name(&self) -> Output<String> {
        self.resource.string_output("channel_name")
    }
}
