//! Action schema table.
//!
//! One static [`ResourceSchema`] per pipeline action kind. Every action shares
//! the pipeline linkage and scheduling fields in [`ACTION_FIELDS`], reports
//! the host-computed [`ACTION_COMPUTED`] outputs and treats
//! [`ACTION_IMMUTABLE`] as write-once.
//!
//! | Schema | Type tag | Integration fields | Replace-only |
//! |--------|----------|--------------------|--------------|
//! | `AMAZON_S3` | `AMAZON_S3` | integration | |
//! | `AWS_LAMBDA` | `LAMBDA` | integration | |
//! | `AWS_LAMBDA_DEPLOY` | `LAMBDA_DEPLOY` | integration | |
//! | `AWS_ECS` | `AWS_ECS` | integration | |
//! | `AWS_CODE_DEPLOY` | `CODE_DEPLOY` | integration | yes |
//! | `AWS_ELASTIC_BEANSTALK` | `ELASTIC_BEANSTALK` | integration | |
//! | `CLOUDFLARE` | `CLOUDFLARE` | integration | |
//! | `DIGITAL_OCEAN` | `DIGITAL_OCEAN` | integration | yes |
//! | `RACKSPACE` | `RACKSPACE` | integration | yes |
//! | `DOCKERFILE_BUILD` | `DOCKERFILE` | integration (optional) | |
//! | `DOCKER_PUSH_IMAGE` | `DOCKER_PUSH` | integration | |
//! | `KUBERNETES_APPLY` | `KUBERNETES_APPLY` | integration | |
//! | `KUBERNETES_RUN_HELM` | `HELM` | integration, helm_repository_integration | |
//! | `GKE_APPLY_DEPLOYMENT` | `GKE_APPLY_DEPLOYMENT` | integration | yes |
//! | `GKE_RUN_JOB` | `GKE_RUN_JOB` | integration | |
//! | `GKE_RUN_HELM` | `GKE_HELM` | integration, helm_repository_integration | |
//! | `SLACK` | `SLACK` | integration | |
//! | `SSH_COMMAND` | `SSH_COMMAND` | | |

use buddy_binding::{FieldKind, FieldSpec, ResourceSchema};
use buddy_core::{Acl, KubernetesAuth, RunNext, SshAuthentication, TriggerTime};

use FieldKind::{Boolean, Integer, Integration, ObjectList, StringList};

const STRING: FieldKind = FieldKind::String;
const OBJECT: FieldKind = FieldKind::Object;

/// Fields shared by every pipeline action.
pub const ACTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", STRING),
    FieldSpec::required("project_name", STRING),
    FieldSpec::required("pipeline_id", Integer),
    FieldSpec::required("trigger_time", FieldKind::Enum(TriggerTime::VALUES)),
    FieldSpec::optional("after_action_id", Integer),
    FieldSpec::optional("disabled", Boolean),
    FieldSpec::optional("ignore_errors", Boolean),
    FieldSpec::optional("retry_count", Integer),
    FieldSpec::optional("retry_interval", Integer),
    FieldSpec::optional("run_next", FieldKind::Enum(RunNext::VALUES)),
    FieldSpec::optional("run_only_on_first_failure", Boolean),
    FieldSpec::optional("timeout", Integer),
    FieldSpec::optional("trigger_conditions", ObjectList),
];

/// Outputs the host computes for every action.
pub const ACTION_COMPUTED: &[&str] = &["url", "html_url", "action_id"];

/// Pipeline linkage, established at creation and never renegotiated.
pub const ACTION_IMMUTABLE: &[&str] = &["project_name", "pipeline_id"];

const fn action(
    name: &'static str,
    token: &'static str,
    type_tag: &'static str,
    fields: &'static [FieldSpec],
) -> ResourceSchema {
    ResourceSchema {
        name,
        token,
        type_tag: Some(type_tag),
        base_fields: ACTION_FIELDS,
        fields,
        computed: ACTION_COMPUTED,
        immutable: ACTION_IMMUTABLE,
        replace_only: false,
    }
}

const fn replace_only(mut schema: ResourceSchema) -> ResourceSchema {
    schema.replace_only = true;
    schema
}

const fn with_computed(mut schema: ResourceSchema, computed: &'static [&'static str]) -> ResourceSchema {
    schema.computed = computed;
    schema
}

const INPUT_TYPE: FieldKind = FieldKind::Enum(&["SCM_REPOSITORY", "BUILD_ARTIFACTS"]);

const AMAZON_S3_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("bucket_name", STRING),
    FieldSpec::optional("region", STRING),
    FieldSpec::optional("acl", FieldKind::Enum(Acl::VALUES)),
    FieldSpec::optional("cache_control", STRING),
    FieldSpec::optional("content_encoding", STRING),
    FieldSpec::optional("deletion_disabled", Boolean),
    FieldSpec::optional("expires_date", STRING),
    FieldSpec::optional("input_type", INPUT_TYPE),
    FieldSpec::optional("local_path", STRING),
    FieldSpec::optional("remote_path", STRING),
    FieldSpec::optional("reduced_redundancy", Boolean),
    FieldSpec::optional("skip_content_type_detection", Boolean),
    FieldSpec::optional("storage_class", STRING),
];

pub static AMAZON_S3: ResourceSchema = action(
    "AmazonS3",
    "buddy:index/actionAmazonS3:ActionAmazonS3",
    "AMAZON_S3",
    AMAZON_S3_FIELDS,
);

const AWS_LAMBDA_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("function_name", STRING),
    FieldSpec::optional(
        "invocation_type",
        FieldKind::Enum(&["REQUEST_RESPONSE", "EVENT", "DRY_RUN"]),
    ),
    FieldSpec::optional("payload", STRING),
    FieldSpec::optional("qualifier", STRING),
];

pub static AWS_LAMBDA: ResourceSchema = action(
    "AwsLambda",
    "buddy:index/actionAwsLambda:ActionAwsLambda",
    "LAMBDA",
    AWS_LAMBDA_FIELDS,
);

const AWS_LAMBDA_DEPLOY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("function_name", STRING),
    FieldSpec::optional("local_path", STRING),
    FieldSpec::optional("handler", STRING),
    FieldSpec::optional("runtime", STRING),
    FieldSpec::optional("memory_size", Integer),
    FieldSpec::optional("input_type", INPUT_TYPE),
    FieldSpec::optional("publish", Boolean),
];

pub static AWS_LAMBDA_DEPLOY: ResourceSchema = action(
    "AwsLambdaDeploy",
    "buddy:index/actionAwsLambdaDeploy:ActionAwsLambdaDeploy",
    "LAMBDA_DEPLOY",
    AWS_LAMBDA_DEPLOY_FIELDS,
);

const AWS_ECS_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("cluster", STRING),
    FieldSpec::required("service", STRING),
    FieldSpec::optional("task_definition", STRING),
    FieldSpec::optional("desired_count", Integer),
    FieldSpec::optional("force_new_deployment", Boolean),
    FieldSpec::optional("wait_for_completion", Boolean),
];

pub static AWS_ECS: ResourceSchema = action(
    "AwsEcs",
    "buddy:index/actionAwsEcs:ActionAwsEcs",
    "AWS_ECS",
    AWS_ECS_FIELDS,
);

const AWS_CODE_DEPLOY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("application_name", STRING),
    FieldSpec::required("deployment_group", STRING),
    FieldSpec::optional("bucket_name", STRING),
    FieldSpec::optional("deployment_description", STRING),
    FieldSpec::optional("local_path", STRING),
    FieldSpec::optional("wait_for_deployment", Boolean),
];

pub static AWS_CODE_DEPLOY: ResourceSchema = replace_only(action(
    "AwsCodeDeploy",
    "buddy:index/actionAwsCodeDeploy:ActionAwsCodeDeploy",
    "CODE_DEPLOY",
    AWS_CODE_DEPLOY_FIELDS,
));

const AWS_ELASTIC_BEANSTALK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("application", STRING),
    FieldSpec::required("environment", STRING),
    FieldSpec::optional("bucket_name", STRING),
    FieldSpec::optional("version_label", STRING),
    FieldSpec::optional("local_path", STRING),
    FieldSpec::optional("increment_version", Boolean),
];

pub static AWS_ELASTIC_BEANSTALK: ResourceSchema = action(
    "AwsElasticBeanstalk",
    "buddy:index/actionAwsElasticBeanstalk:ActionAwsElasticBeanstalk",
    "ELASTIC_BEANSTALK",
    AWS_ELASTIC_BEANSTALK_FIELDS,
);

const CLOUDFLARE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("zone_id", STRING),
    FieldSpec::optional("purge_all", Boolean),
    FieldSpec::optional("purge_files", StringList),
];

pub static CLOUDFLARE: ResourceSchema = action(
    "Cloudflare",
    "buddy:index/actionCloudflare:ActionCloudflare",
    "CLOUDFLARE",
    CLOUDFLARE_FIELDS,
);

const DIGITAL_OCEAN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("bucket_name", STRING),
    FieldSpec::optional("acl", FieldKind::Enum(Acl::VALUES)),
    FieldSpec::optional("local_path", STRING),
    FieldSpec::optional("remote_path", STRING),
    FieldSpec::optional("deletion_disabled", Boolean),
];

pub static DIGITAL_OCEAN: ResourceSchema = replace_only(action(
    "DigitalOcean",
    "buddy:index/actionDigitalOcean:ActionDigitalOcean",
    "DIGITAL_OCEAN",
    DIGITAL_OCEAN_FIELDS,
));

const RACKSPACE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("region", STRING),
    FieldSpec::required("container", STRING),
    FieldSpec::optional("local_path", STRING),
    FieldSpec::optional("remote_path", STRING),
    FieldSpec::optional("deletion_disabled", Boolean),
];

pub static RACKSPACE: ResourceSchema = replace_only(action(
    "Rackspace",
    "buddy:index/actionRackspace:ActionRackspace",
    "RACKSPACE",
    RACKSPACE_FIELDS,
));

const DOCKERFILE_BUILD_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("integration", Integration),
    FieldSpec::required("dockerfile_path", STRING),
    FieldSpec::optional("context_path", STRING),
    FieldSpec::optional("docker_image_tag", STRING),
    FieldSpec::optional("build_args", StringList),
    FieldSpec::optional("target_platform", STRING),
    FieldSpec::optional("registry", STRING),
    FieldSpec::optional("repository", STRING),
];

pub static DOCKERFILE_BUILD: ResourceSchema = with_computed(
    action(
        "DockerfileBuild",
        "buddy:index/actionDockerfileBuild:ActionDockerfileBuild",
        "DOCKERFILE",
        DOCKERFILE_BUILD_FIELDS,
    ),
    &["url", "html_url", "action_id", "docker_image_id"],
);

const DOCKER_PUSH_IMAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("repository", STRING),
    FieldSpec::required("docker_image_tag", STRING),
    FieldSpec::optional("registry", STRING),
    FieldSpec::optional("docker_build_action_id", Integer),
];

pub static DOCKER_PUSH_IMAGE: ResourceSchema = action(
    "DockerPushImage",
    "buddy:index/actionDockerPushImage:ActionDockerPushImage",
    "DOCKER_PUSH",
    DOCKER_PUSH_IMAGE_FIELDS,
);

const KUBERNETES_APPLY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("server", STRING),
    FieldSpec::required("auth_type", FieldKind::Enum(KubernetesAuth::VALUES)),
    FieldSpec::required("config_path", STRING),
    FieldSpec::optional("namespace", STRING),
    FieldSpec::optional("kubectl_version", STRING),
    FieldSpec::optional("record_arg", Boolean),
];

pub static KUBERNETES_APPLY: ResourceSchema = action(
    "KubernetesApply",
    "buddy:index/actionKubernetesApply:ActionKubernetesApply",
    "KUBERNETES_APPLY",
    KUBERNETES_APPLY_FIELDS,
);

const KUBERNETES_RUN_HELM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::optional("helm_repository_integration", Integration),
    FieldSpec::required("server", STRING),
    FieldSpec::required("auth_type", FieldKind::Enum(KubernetesAuth::VALUES)),
    FieldSpec::required("chart", STRING),
    FieldSpec::required("release_name", STRING),
    FieldSpec::optional("namespace", STRING),
    FieldSpec::optional("helm_version", STRING),
    FieldSpec::optional("values", OBJECT),
];

pub static KUBERNETES_RUN_HELM: ResourceSchema = action(
    "KubernetesRunHelm",
    "buddy:index/actionKubernetesRunHelm:ActionKubernetesRunHelm",
    "HELM",
    KUBERNETES_RUN_HELM_FIELDS,
);

const GKE_APPLY_DEPLOYMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("cluster", STRING),
    FieldSpec::required("zone_id", STRING),
    FieldSpec::required("application_id", STRING),
    FieldSpec::required("config_path", STRING),
    FieldSpec::optional("namespace", STRING),
    FieldSpec::optional("kubectl_version", STRING),
];

pub static GKE_APPLY_DEPLOYMENT: ResourceSchema = replace_only(action(
    "GkeApplyDeployment",
    "buddy:index/actionGkeApplyDeployment:ActionGkeApplyDeployment",
    "GKE_APPLY_DEPLOYMENT",
    GKE_APPLY_DEPLOYMENT_FIELDS,
));

// `variables` is required when declaring the job, but the host may omit it
// when reporting the action back.
const GKE_RUN_JOB_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("cluster", STRING),
    FieldSpec::required("zone_id", STRING),
    FieldSpec::required("application_id", STRING),
    FieldSpec::required("config_path", STRING),
    FieldSpec::required("variables", ObjectList).optional_in_outputs(),
    FieldSpec::optional("namespace", STRING),
    FieldSpec::optional("wait_for_completion", Boolean),
];

pub static GKE_RUN_JOB: ResourceSchema = action(
    "GkeRunJob",
    "buddy:index/actionGkeRunJob:ActionGkeRunJob",
    "GKE_RUN_JOB",
    GKE_RUN_JOB_FIELDS,
);

const GKE_RUN_HELM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::optional("helm_repository_integration", Integration),
    FieldSpec::required("cluster", STRING),
    FieldSpec::required("zone_id", STRING),
    FieldSpec::required("application_id", STRING),
    FieldSpec::required("chart", STRING),
    FieldSpec::required("release_name", STRING),
    FieldSpec::optional("namespace", STRING),
    FieldSpec::optional("helm_version", STRING),
];

pub static GKE_RUN_HELM: ResourceSchema = action(
    "GkeRunHelm",
    "buddy:index/actionGkeRunHelm:ActionGkeRunHelm",
    "GKE_HELM",
    GKE_RUN_HELM_FIELDS,
);

const SLACK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("integration", Integration),
    FieldSpec::required("channel", STRING),
    FieldSpec::required("content", STRING),
    FieldSpec::optional("blocks", STRING),
    FieldSpec::optional("send_to", StringList),
];

pub static SLACK: ResourceSchema = with_computed(
    action(
        "Slack",
        "buddy:index/actionSlack:ActionSlack",
        "SLACK",
        SLACK_FIELDS,
    ),
    &["url", "html_url", "action_id", "channel_name"],
);

const SSH_COMMAND_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("host", STRING),
    FieldSpec::required("port", STRING),
    FieldSpec::required("login", STRING),
    FieldSpec::required(
        "authentication_mode",
        FieldKind::Enum(SshAuthentication::VALUES),
    ),
    FieldSpec::required("commands", StringList),
    FieldSpec::optional("password", STRING),
    FieldSpec::optional("server_key", STRING),
    FieldSpec::optional("key_phrase", STRING),
    FieldSpec::optional("working_directory", STRING),
    FieldSpec::optional("run_as_script", Boolean),
    FieldSpec::optional("shell", FieldKind::Enum(&["SH", "BASH", "POWERSHELL"])),
];

pub static SSH_COMMAND: ResourceSchema = action(
    "SshCommand",
    "buddy:index/actionSshCommand:ActionSshCommand",
    "SSH_COMMAND",
    SSH_COMMAND_FIELDS,
);

static ALL: [&ResourceSchema; 18] = [
    &AMAZON_S3,
    &AWS_LAMBDA,
    &AWS_LAMBDA_DEPLOY,
    &AWS_ECS,
    &AWS_CODE_DEPLOY,
    &AWS_ELASTIC_BEANSTALK,
    &CLOUDFLARE,
    &DIGITAL_OCEAN,
    &RACKSPACE,
    &DOCKERFILE_BUILD,
    &DOCKER_PUSH_IMAGE,
    &KUBERNETES_APPLY,
    &KUBERNETES_RUN_HELM,
    &GKE_APPLY_DEPLOYMENT,
    &GKE_RUN_JOB,
    &GKE_RUN_HELM,
    &SLACK,
    &SSH_COMMAND,
];

/// Every action schema.
pub fn all() -> &'static [&'static ResourceSchema] {
    &ALL
}

/// Look up an action schema by its type tag, e.g. `AMAZON_S3`.
pub fn find(type_tag: &str) -> Option<&'static ResourceSchema> {
    ALL.iter().copied().find(|s| s.type_tag == Some(type_tag))
}
