//! Closed enumerations used by action and integration fields.
//!
//! Each enum serializes to the platform's wire string and exposes the full
//! list of legal wire values as `VALUES`, which the action schemas use as
//! field constraints.

use crate::error::UnknownVariant;
use serde::{Deserialize, Serialize};

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every legal wire value.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        enum_name: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(value: $name) -> Self {
                serde_json::Value::String(value.as_str().to_string())
            }
        }
    };
}

closed_enum! {
    /// When an action runs relative to the pipeline outcome.
    TriggerTime {
        OnEveryExecution => "ON_EVERY_EXECUTION",
        OnFailure => "ON_FAILURE",
        OnBackToSuccess => "ON_BACK_TO_SUCCESS",
        OnWarning => "ON_WARNING",
        OnWaitForApprove => "ON_WAIT_FOR_APPROVE",
        OnTerminate => "ON_TERMINATE",
    }
}

closed_enum! {
    /// How the next action is scheduled.
    RunNext {
        WaitOnSuccess => "WAIT_ON_SUCCESS",
        InSoftParallel => "IN_SOFT_PARALLEL",
        InHardParallel => "IN_HARD_PARALLEL",
    }
}

closed_enum! {
    /// Condition kinds for `trigger_conditions` entries.
    TriggerCondition {
        Always => "ALWAYS",
        OnChange => "ON_CHANGE",
        OnChangeAtPath => "ON_CHANGE_AT_PATH",
        VarIs => "VAR_IS",
        VarIsNot => "VAR_IS_NOT",
        VarContains => "VAR_CONTAINS",
        VarNotContains => "VAR_NOT_CONTAINS",
        VarLessThan => "VAR_LESS_THAN",
        VarGreaterThan => "VAR_GREATER_THAN",
        Datetime => "DATETIME",
        SuccessPipeline => "SUCCESS_PIPELINE",
        Days => "DAYS",
        Hours => "HOURS",
        TriggeringUserIs => "TRIGGERING_USER_IS",
        TriggeringUserIsInGroup => "TRIGGERING_USER_IS_IN_GROUP",
    }
}

closed_enum! {
    /// Object ACLs for bucket deployments.
    Acl {
        Private => "PRIVATE",
        PublicRead => "PUBLIC_READ",
        PublicReadWrite => "PUBLIC_READ_WRITE",
        AuthenticatedRead => "AUTHENTICATED_READ",
        AwsExecRead => "AWS_EXEC_READ",
        BucketOwnerRead => "BUCKET_OWNER_READ",
        BucketOwnerFullControl => "BUCKET_OWNER_FULL_CONTROL",
        LogDeliveryWrite => "LOG_DELIVERY_WRITE",
    }
}

closed_enum! {
    /// Third-party provider an integration connects to.
    IntegrationType {
        Amazon => "AMAZON",
        DigitalOcean => "DIGITAL_OCEAN",
        Rackspace => "RACKSPACE",
        Cloudflare => "CLOUDFLARE",
        GoogleServiceAccount => "GOOGLE_SERVICE_ACCOUNT",
        Azure => "AZURE",
        AzureCloud => "AZURE_CLOUD",
        DockerHub => "DOCKER_HUB",
        GitHub => "GIT_HUB",
        GitLab => "GIT_LAB",
        Slack => "SLACK",
        MicrosoftTeams => "MICROSOFT_TEAMS",
        Discord => "DISCORD",
        Sentry => "SENTRY",
        Datadog => "DATADOG",
        NewRelic => "NEW_RELIC",
        Netlify => "NETLIFY",
        Heroku => "HEROKU",
        Kubernetes => "KUBERNETES",
    }
}

closed_enum! {
    /// Who can use an integration.
    IntegrationScope {
        Workspace => "WORKSPACE",
        Project => "PROJECT",
        Admin => "ADMIN",
        PrivateInProject => "PRIVATE_IN_PROJECT",
    }
}

closed_enum! {
    /// How Kubernetes actions authenticate against the cluster.
    KubernetesAuth {
        Basic => "BASIC",
        Token => "TOKEN",
        Certs => "CERTS",
    }
}

closed_enum! {
    /// How SSH actions authenticate.
    SshAuthentication {
        Password => "PASS",
        PrivateKey => "PRIVATE_KEY",
        PrivateKeyWithPassphrase => "PRIVATE_KEY_PASS",
        BuddyKey => "BUDDY_KEY",
    }
}
