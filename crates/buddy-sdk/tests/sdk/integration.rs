//! Integration resources: declaration, attachment and lookup by type.

use super::common::*;
use buddy_binding::{BindingError, FieldMap, ResourceOptions};
use buddy_core::{GET_INTEGRATIONS_TOKEN, IntegrationScope, IntegrationType, OutputError};
use buddy_host::{InMemoryInventory, IntegrationInventory, IntegrationRecord, MemoryHost};
use buddy_sdk::catalog;
use buddy_sdk::{Integration, IntegrationArgs, Slack};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn host_with_inventory(records: Vec<IntegrationRecord>) -> Arc<MemoryHost> {
    let inventory = Arc::new(InMemoryInventory::with_records(records));
    Arc::new(MemoryHost::new().with_inventory(inventory))
}

fn mixed_inventory() -> Vec<IntegrationRecord> {
    vec![
        IntegrationRecord::new("aws-hash", "aws", "AMAZON"),
        IntegrationRecord::new("slack-hash", "team chat", "SLACK"),
        IntegrationRecord::new("gh-hash", "github", "GIT_HUB"),
    ]
}

// =============================================================================
// LOOKUP
// =============================================================================

#[tokio::test]
async fn test_lookup_finds_matching_type() {
    let host = host_with_inventory(mixed_inventory());
    let slack = Integration::lookup(
        &binder(&host),
        "chat",
        IntegrationType::Slack,
        ResourceOptions::new(),
    )
    .unwrap();

    assert_eq!(slack.hash_id().resolve().await.unwrap(), "slack-hash");
    assert_eq!(slack.id().resolve().await.unwrap(), "slack-hash");

    let registration = host.registration("chat").unwrap();
    assert!(registration.options.is_rehydrate());
    assert_eq!(registration.props.literal_str("type"), Some("SLACK"));
}

#[tokio::test]
async fn test_lookup_not_found() {
    let host = host_with_inventory(vec![
        IntegrationRecord::new("aws-hash", "aws", "AMAZON"),
        IntegrationRecord::new("gh-hash", "github", "GIT_HUB"),
    ]);
    let slack = Integration::lookup(
        &binder(&host),
        "chat",
        IntegrationType::Slack,
        ResourceOptions::new(),
    )
    .unwrap();

    let err = slack.hash_id().resolve().await.unwrap_err();
    assert_eq!(
        err,
        OutputError::NotFound("integration not found for type SLACK".to_string())
    );
    assert_eq!(err.to_string(), "integration not found for type SLACK");
}

#[tokio::test]
async fn test_lookup_failure_reaches_dependent_actions() {
    let host = host_with_inventory(Vec::new());
    let binder = binder(&host);
    let slack = Integration::lookup(&binder, "chat", IntegrationType::Slack, ResourceOptions::new())
        .unwrap();

    let args = required_args(&catalog::SLACK).integration("integration", &slack);
    let notify = Slack::new(&binder, "notify", &args, ResourceOptions::new()).unwrap();

    assert!(matches!(
        notify.output("integration").resolve().await,
        Err(OutputError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_lookup_sees_declared_integrations() {
    let host = numbered_host();
    let binder = binder(&host);
    Integration::new(
        &binder,
        "chat",
        IntegrationArgs::new("team chat", IntegrationType::Slack).credential("token", "xoxb"),
        ResourceOptions::new(),
    )
    .unwrap();

    let found = Integration::lookup(&binder, "found", IntegrationType::Slack, ResourceOptions::new())
        .unwrap();
    assert_eq!(found.hash_id().resolve().await.unwrap(), "int-1");
}

#[tokio::test]
async fn test_get_integrations_query() {
    let host = host_with_inventory(mixed_inventory());
    let result = binder(&host)
        .invoke(GET_INTEGRATIONS_TOKEN, json!({}))
        .resolve()
        .await
        .unwrap();

    assert_eq!(result["integrations"].as_array().unwrap().len(), 3);
    assert_eq!(result["integrations"][1]["type"], json!("SLACK"));
}

// =============================================================================
// DECLARE / ATTACH
// =============================================================================

#[tokio::test]
async fn test_declare_integration() {
    let host = numbered_host();
    let aws = Integration::new(
        &binder(&host),
        "aws",
        IntegrationArgs::new("aws", IntegrationType::Amazon)
            .description("Deploy credentials")
            .scope(IntegrationScope::Workspace)
            .credential("access_key", "AKIA")
            .credential("secret_key", "secret"),
        ResourceOptions::new(),
    )
    .unwrap();

    assert!(Integration::is_instance(&aws));
    assert_eq!(aws.hash_id().resolve().await.unwrap(), "int-1");
    assert!(aws.hash_id().dependencies().contains(aws.urn()));
    assert_eq!(aws.integration_id().resolve().await.unwrap(), 1);

    let outputs = aws.outputs().resolve().await.unwrap();
    assert_eq!(outputs["hash_id"], json!("int-1"));
    assert_eq!(outputs["scope"], json!("WORKSPACE"));
    assert!(outputs["html_url"].as_str().unwrap().ends_with("/integrations/int-1"));

    let records = host.inventory().list().await.unwrap();
    assert_eq!(records, vec![IntegrationRecord::new("int-1", "aws", "AMAZON")]);
}

#[test]
fn test_declare_requires_type() {
    let host = numbered_host();
    let fields = FieldMap::new().set("name", "aws");
    let err = binder(&host)
        .create(Integration::schema(), "aws", &fields, ResourceOptions::new())
        .unwrap_err();

    assert!(matches!(err, BindingError::MissingRequiredField { .. }));
    assert_eq!(err.field(), Some("type"));
    assert!(host.registrations().is_empty());
}

#[tokio::test]
async fn test_get_by_hash() {
    let host = numbered_host();
    let existing = Integration::get(
        &binder(&host),
        "existing",
        "abc123",
        None,
        ResourceOptions::new(),
    )
    .unwrap();

    assert_eq!(existing.hash_id().resolve().await.unwrap(), "abc123");
    assert!(host.inventory().list().await.unwrap().is_empty());
}
