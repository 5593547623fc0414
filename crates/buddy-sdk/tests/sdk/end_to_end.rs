//! An S3 upload wired to an integration declared in the same program.

use super::common::*;
use buddy_binding::{ActionArgs, IntegrationRef, ResourceOptions};
use buddy_core::{Acl, IntegrationType, PropertyValue, TriggerTime};
use buddy_sdk::{AmazonS3, Integration, IntegrationArgs};
use pretty_assertions::assert_eq;
use serde_json::json;

fn upload_args(aws: &Integration) -> ActionArgs {
    ActionArgs::new()
        .set("name", "Upload assets")
        .set("project_name", "web")
        .set("pipeline_id", 7)
        .set("trigger_time", TriggerTime::OnEveryExecution)
        .set("bucket_name", "assets")
        .set("acl", Acl::PublicRead)
        .integration("integration", aws)
}

#[tokio::test]
async fn test_amazon_s3_with_live_integration() {
    let host = numbered_host();
    let binder = binder(&host);

    let aws = Integration::new(
        &binder,
        "aws",
        IntegrationArgs::new("aws", IntegrationType::Amazon).credential("access_key", "AKIA"),
        ResourceOptions::new(),
    )
    .unwrap();
    let upload = AmazonS3::new(&binder, "upload", &upload_args(&aws), ResourceOptions::new())
        .unwrap();

    // What crossed the host boundary.
    let registration = host.registration("upload").unwrap();
    assert_eq!(registration.props.literal_str("type"), Some("AMAZON_S3"));
    assert_eq!(registration.options.ignore_changes, vec!["pipeline_id", "project_name"]);
    assert_eq!(registration.options.delete_before_replace, None);
    assert_eq!(registration.options.version.as_deref(), Some(TEST_VERSION));
    assert!(registration.props.dependencies().contains(aws.urn()));
    for computed in ["url", "html_url", "action_id"] {
        assert!(registration.props.get(computed).unwrap().is_unset(), "{}", computed);
    }

    let PropertyValue::Deferred(integration) = registration.props.get("integration").unwrap()
    else {
        panic!("a live integration should be sent as a deferred value");
    };
    assert_eq!(
        integration.resolve().await.unwrap(),
        json!({ "hash_id": "int-1" })
    );

    // What the host reports back.
    let outputs = upload.outputs().resolve().await.unwrap();
    assert_eq!(outputs["integration"], json!({ "hash_id": "int-1" }));
    assert_eq!(outputs["type"], json!("AMAZON_S3"));
    assert_eq!(outputs["acl"], json!("PUBLIC_READ"));
    assert_eq!(upload.action_id().resolve().await.unwrap(), 2);
    assert!(upload
        .url()
        .resolve()
        .await
        .unwrap()
        .ends_with("/projects/web/pipelines/7/actions/2"));
    assert!(upload
        .html_url()
        .resolve()
        .await
        .unwrap()
        .ends_with("/web/pipelines/pipeline/7/action/2"));
    assert!(upload.outputs().dependencies().contains(aws.urn()));
}

#[tokio::test]
async fn test_live_and_bare_references_agree() {
    let host = numbered_host();
    let binder = binder(&host);
    let aws = Integration::new(
        &binder,
        "aws",
        IntegrationArgs::new("aws", IntegrationType::Amazon),
        ResourceOptions::new(),
    )
    .unwrap();

    let live = AmazonS3::new(&binder, "live", &upload_args(&aws), ResourceOptions::new()).unwrap();
    let bare_args = upload_args(&aws).integration("integration", IntegrationRef::hash("int-1"));
    let bare = AmazonS3::new(&binder, "bare", &bare_args, ResourceOptions::new()).unwrap();

    assert_eq!(
        live.output("integration").resolve().await.unwrap(),
        bare.output("integration").resolve().await.unwrap()
    );
    assert!(!bare.outputs().dependencies().contains(aws.urn()));
}
