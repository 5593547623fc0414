//! JSON Schema documents rendered from the action and integration schemas.

use super::common::*;
use buddy_binding::ResourceOptions;
use buddy_sdk::catalog;
use buddy_sdk::{AmazonS3, GkeRunJob, Integration};
use serde_json::{Value, json};

fn validator(schema: &Value) -> jsonschema::Validator {
    jsonschema::validator_for(schema).expect("schema must compile")
}

fn errors(validator: &jsonschema::Validator, instance: &Value) -> Vec<String> {
    validator
        .iter_errors(instance)
        .take(20)
        .map(|e| e.to_string())
        .collect()
}

#[test]
fn test_args_schemas_accept_full_documents() {
    for &schema in catalog::all().iter().chain([Integration::schema()].iter()) {
        let validator = validator(&schema.args_json_schema());
        let document = full_document(schema);
        let errors = errors(&validator, &document);
        assert!(errors.is_empty(), "{}: {}", schema.name, errors.join("; "));
    }
}

#[test]
fn test_args_schema_rejects_missing_and_unknown_fields() {
    let validator = validator(&catalog::AMAZON_S3.args_json_schema());

    let mut missing = full_document(&catalog::AMAZON_S3);
    missing.as_object_mut().unwrap().remove("bucket_name");
    assert!(!validator.is_valid(&missing));

    let mut unknown = full_document(&catalog::AMAZON_S3);
    unknown["bucket"] = json!("assets");
    assert!(!validator.is_valid(&unknown));

    let mut bad_enum = full_document(&catalog::AMAZON_S3);
    bad_enum["acl"] = json!("WORLD_WRITABLE");
    assert!(!validator.is_valid(&bad_enum));
}

#[tokio::test]
async fn test_host_outputs_match_outputs_schema() {
    let host = numbered_host();
    let binder = binder(&host);

    let upload = AmazonS3::new(
        &binder,
        "upload",
        &required_args(&catalog::AMAZON_S3),
        ResourceOptions::new(),
    )
    .unwrap();
    let outputs = Value::Object(upload.outputs().resolve().await.unwrap());
    let validator = validator(&catalog::AMAZON_S3.outputs_json_schema());
    let errors = errors(&validator, &outputs);
    assert!(errors.is_empty(), "{}", errors.join("; "));
}

#[tokio::test]
async fn test_gke_run_job_outputs_may_omit_variables() {
    let host = numbered_host();
    let job = GkeRunJob::get(&binder(&host), "job", "5", None, ResourceOptions::new()).unwrap();
    let outputs = Value::Object(job.outputs().resolve().await.unwrap());
    assert!(outputs.get("variables").is_none());

    let args_validator = validator(&catalog::GKE_RUN_JOB.args_json_schema());
    let mut args = full_document(&catalog::GKE_RUN_JOB);
    args.as_object_mut().unwrap().remove("variables");
    assert!(!args_validator.is_valid(&args));

    let outputs_validator = validator(&catalog::GKE_RUN_JOB.outputs_json_schema());
    let mut reported = full_document(&catalog::GKE_RUN_JOB);
    reported.as_object_mut().unwrap().remove("variables");
    reported["type"] = json!("GKE_RUN_JOB");
    reported["url"] = json!("https://api.buddy.works/x");
    reported["html_url"] = json!("https://app.buddy.works/x");
    reported["action_id"] = json!(5);
    assert!(outputs_validator.is_valid(&reported));
}
