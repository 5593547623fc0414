//! Action schemas bound through the shared binder.

use super::common::*;
use buddy_binding::{ActionState, BindingError, ResourceOptions};
use buddy_core::{GET_INTEGRATIONS_TOKEN, OutputError, PropertyValue, TriggerTime};
use buddy_sdk::catalog;
use buddy_sdk::{Action, AmazonS3, AwsCodeDeploy, AwsEcs, GkeRunJob, Integration, SshCommand};
use pretty_assertions::assert_eq;
use serde_json::json;

// =============================================================================
// CREATE MODE
// =============================================================================

#[test]
fn test_each_missing_required_field_is_named() {
    for &schema in catalog::all() {
        for field in schema.required_fields() {
            let host = numbered_host();
            let args = required_args_without(schema, field.name);

            let err = binder(&host)
                .create(schema, "action", &args, ResourceOptions::new())
                .unwrap_err();

            assert!(
                matches!(err, BindingError::MissingRequiredField { .. }),
                "{}: expected missing field error, got {}",
                schema.name,
                err
            );
            assert_eq!(err.field(), Some(field.name));
            assert!(
                host.registrations().is_empty(),
                "{} registered without {}",
                schema.name,
                field.name
            );
        }
    }
}

#[test]
fn test_required_fields_suffice() {
    for &schema in catalog::all() {
        let host = numbered_host();
        binder(&host)
            .create(schema, "action", &required_args(schema), ResourceOptions::new())
            .unwrap_or_else(|e| panic!("{}: {}", schema.name, e));

        let registration = host.registration("action").unwrap();
        assert_eq!(registration.token, schema.token);
        assert_eq!(registration.props.literal_str("type"), schema.type_tag);
        for output in catalog::ACTION_COMPUTED {
            assert!(registration.props.get(output).unwrap().is_unset());
        }
    }
}

#[test]
fn test_amazon_s3_type_tag() {
    let host = numbered_host();
    let args = required_args(&catalog::AMAZON_S3);
    let upload = AmazonS3::new(&binder(&host), "upload", &args, ResourceOptions::new()).unwrap();

    assert_eq!(upload.type_tag(), Some("AMAZON_S3"));
    assert_eq!(
        host.registration("upload").unwrap().props.literal_str("type"),
        Some("AMAZON_S3")
    );
}

#[test]
fn test_enum_fields_reject_unknown_values() {
    let host = numbered_host();
    let args = required_args(&catalog::AMAZON_S3)
        .set("trigger_time", TriggerTime::OnFailure)
        .set("acl", "WORLD_WRITABLE");

    let err = AmazonS3::new(&binder(&host), "upload", &args, ResourceOptions::new()).unwrap_err();
    assert_eq!(err.field(), Some("acl"));
    assert!(host.registrations().is_empty());
}

#[test]
fn test_ssh_command_needs_no_integration() {
    let host = numbered_host();
    let args = required_args(&catalog::SSH_COMMAND);
    assert!(!args.contains("integration"));

    SshCommand::new(&binder(&host), "ssh", &args, ResourceOptions::new()).unwrap();
}

// =============================================================================
// BINDING OPTIONS
// =============================================================================

#[test]
fn test_linkage_always_ignored() {
    let caller_lists: [Vec<&str>; 3] = [vec![], vec!["timeout"], vec!["project_name", "disabled"]];

    for &schema in catalog::all() {
        for (i, caller) in caller_lists.iter().enumerate() {
            let host = numbered_host();
            let name = format!("action-{}", i);
            let options = ResourceOptions::new().ignore_changes(caller.iter().copied());
            binder(&host)
                .create(schema, &name, &required_args(schema), options)
                .unwrap();

            let ignored = host.registration(&name).unwrap().options.ignore_changes;
            assert!(ignored.contains(&"project_name".to_string()), "{}", schema.name);
            assert!(ignored.contains(&"pipeline_id".to_string()), "{}", schema.name);
            for entry in caller {
                assert!(ignored.contains(&entry.to_string()));
            }
        }
    }
}

#[test]
fn test_replace_only_defaults() {
    for &schema in catalog::all() {
        let host = numbered_host();
        binder(&host)
            .create(schema, "default", &required_args(schema), ResourceOptions::new())
            .unwrap();

        let expected = schema.replace_only.then_some(true);
        assert_eq!(
            host.registration("default").unwrap().options.delete_before_replace,
            expected,
            "{}",
            schema.name
        );
    }
}

#[test]
fn test_replace_only_respects_override() {
    let host = numbered_host();
    let binder = binder(&host);
    let args = required_args(&catalog::AWS_CODE_DEPLOY);

    AwsCodeDeploy::new(&binder, "default", &args, ResourceOptions::new()).unwrap();
    AwsCodeDeploy::new(
        &binder,
        "in-place",
        &args,
        ResourceOptions::new().delete_before_replace(false),
    )
    .unwrap();

    assert_eq!(host.registration("default").unwrap().options.delete_before_replace, Some(true));
    assert_eq!(host.registration("in-place").unwrap().options.delete_before_replace, Some(false));
}

#[test]
fn test_version_stamped_unless_pinned() {
    let host = numbered_host();
    let binder = binder(&host);
    let args = required_args(&catalog::AWS_ECS);

    AwsEcs::new(&binder, "stamped", &args, ResourceOptions::new()).unwrap();
    AwsEcs::new(&binder, "pinned", &args, ResourceOptions::new().with_version("1.0.0")).unwrap();

    assert_eq!(host.registration("stamped").unwrap().options.version.as_deref(), Some(TEST_VERSION));
    assert_eq!(host.registration("pinned").unwrap().options.version.as_deref(), Some("1.0.0"));
}

// =============================================================================
// REHYDRATE MODE
// =============================================================================

#[test]
fn test_rehydrate_never_validates() {
    let snapshots = [
        ActionState::new(),
        ActionState::new().set("name", "partial"),
        ActionState::new()
            .set("trigger_time", "NOT_A_TRIGGER")
            .set("pipeline_id", "not a number")
            .set("unknown_field", true),
    ];

    for &schema in catalog::all() {
        for (i, state) in snapshots.iter().enumerate() {
            let host = numbered_host();
            let name = format!("existing-{}", i);
            binder(&host)
                .rehydrate(schema, &name, "42", state, ResourceOptions::new())
                .unwrap_or_else(|e| panic!("{}: {}", schema.name, e));

            let registration = host.registration(&name).unwrap();
            assert!(registration.options.is_rehydrate());
            assert!(!registration.props.contains_key("unknown_field"));
        }
    }
}

#[tokio::test]
async fn test_get_projects_state_integration() {
    let host = numbered_host();
    let state = ActionState::new().set("integration", json!({ "hash_id": "int-7" }));
    let job = GkeRunJob::get(&binder(&host), "job", "42", Some(&state), ResourceOptions::new())
        .unwrap();

    let props = host.registration("job").unwrap().props;
    assert!(matches!(props.get("variables"), Some(PropertyValue::Unset)));
    assert_eq!(
        props.get("integration").unwrap().resolve().await.unwrap(),
        Some(json!({ "hash_id": "int-7" }))
    );
    assert_eq!(job.action_id().resolve().await.unwrap(), 42);
    // Required on creation, optional when reported back.
    assert_eq!(job.output("variables").resolve().await.unwrap(), json!(null));
}

#[tokio::test]
async fn test_get_reduces_state_integration_to_hash() {
    let host = numbered_host();
    let state = ActionState::new().set(
        "integration",
        json!({ "hash_id": "int-7", "name": "aws", "type": "AMAZON" }),
    );
    let upload = AmazonS3::get(&binder(&host), "upload", "42", Some(&state), ResourceOptions::new())
        .unwrap();

    let props = host.registration("upload").unwrap().props;
    assert_eq!(props.get("integration").unwrap().as_value(), Some(&json!({ "hash_id": "int-7" })));
    assert_eq!(
        upload.output("integration").resolve().await.unwrap(),
        json!({ "hash_id": "int-7" })
    );
}

#[tokio::test]
async fn test_deferred_integration_value_must_carry_hash() {
    let host = numbered_host();
    let binder = binder(&host);
    let args = required_args(&catalog::AMAZON_S3)
        .set_output("integration", binder.invoke(GET_INTEGRATIONS_TOKEN, json!({})));
    let upload = AmazonS3::new(&binder, "upload", &args, ResourceOptions::new()).unwrap();

    assert!(matches!(
        upload.output("integration").resolve().await,
        Err(OutputError::Decode(_))
    ));
}

// =============================================================================
// TYPE GUARDS
// =============================================================================

#[test]
fn test_is_instance_and_classify() {
    let host = numbered_host();
    let args = required_args(&catalog::AMAZON_S3);
    let upload = AmazonS3::new(&binder(&host), "upload", &args, ResourceOptions::new()).unwrap();

    assert!(AmazonS3::is_instance(&upload));
    assert!(!AwsEcs::is_instance(&upload));
    assert!(!Integration::is_instance(&upload));

    let classified = Action::classify(upload.into_inner()).unwrap();
    assert!(matches!(classified, Action::AmazonS3(_)));
    assert_eq!(classified.resource().name(), "upload");
}
