//! The integration resource.
//!
//! An integration holds the credentials actions use to reach a third-party
//! provider. Actions reference it through their integration-typed fields,
//! either by a known `hash_id` or by passing the live [`Integration`] handle.
//!
//! Three ways to obtain one:
//!
//! | Constructor | Mode | Identity |
//! |-------------|------|----------|
//! | [`Integration::new`] | create | assigned by the host |
//! | [`Integration::get`] | rehydrate | supplied by the caller |
//! | [`Integration::lookup`] | rehydrate | first inventory entry of the given type |

use buddy_binding::{
    BindingError, BoundResource, FieldKind, FieldMap, FieldSpec, IntegrationRef, LiveIntegration,
    ResourceBinder, ResourceOptions, ResourceSchema,
};
use buddy_core::{
    GET_INTEGRATIONS_TOKEN, INTEGRATION_TOKEN, Input, IntegrationScope, IntegrationType, Output,
    OutputError,
};
use buddy_host::IntegrationRecord;
use serde_json::{Value, json};
use std::ops::Deref;

const STRING: FieldKind = FieldKind::String;

const INTEGRATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", STRING),
    FieldSpec::required("type", FieldKind::Enum(IntegrationType::VALUES)),
    FieldSpec::optional("description", STRING),
    FieldSpec::optional("scope", FieldKind::Enum(IntegrationScope::VALUES)),
    FieldSpec::optional("project_name", STRING),
    FieldSpec::optional("access_key", STRING),
    FieldSpec::optional("secret_key", STRING),
    FieldSpec::optional("token", STRING),
    FieldSpec::optional("api_key", STRING),
    FieldSpec::optional("username", STRING),
    FieldSpec::optional("password", STRING),
    FieldSpec::optional("app_id", STRING),
    FieldSpec::optional("google_project", STRING),
    FieldSpec::optional("host_url", STRING),
    FieldSpec::optional("webhook_address", STRING),
    FieldSpec::optional("role_assumptions", FieldKind::ObjectList),
];

/// Schema of the integration resource. Carries no fixed type tag: `type` is
/// chosen by the caller.
pub static INTEGRATION: ResourceSchema = ResourceSchema {
    name: "Integration",
    token: INTEGRATION_TOKEN,
    type_tag: None,
    base_fields: &[],
    fields: INTEGRATION_FIELDS,
    computed: &["hash_id", "integration_id", "url", "html_url"],
    immutable: &[],
    replace_only: false,
};

/// Arguments for declaring an integration.
#[derive(Debug, Clone)]
pub struct IntegrationArgs {
    fields: FieldMap,
}

impl IntegrationArgs {
    pub fn new(name: impl Into<String>, integration_type: IntegrationType) -> Self {
        let name: String = name.into();
        Self {
            fields: FieldMap::new()
                .set("name", name)
                .set("type", integration_type),
        }
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        let description: String = description.into();
        self.credential("description", description)
    }

    pub fn scope(self, scope: IntegrationScope) -> Self {
        self.credential("scope", scope)
    }

    pub fn project_name(self, project_name: impl Into<String>) -> Self {
        let project_name: String = project_name.into();
        self.credential("project_name", project_name)
    }

    /// Set a provider-specific field such as `access_key` or `token`.
    pub fn credential(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields = self.fields.set(field, value);
        self
    }

    /// Set a provider-specific field computed by another resource.
    pub fn credential_output(mut self, field: &str, value: Output<Value>) -> Self {
        self.fields = self.fields.set_output(field, value);
        self
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// A bound integration resource.
#[derive(Debug, Clone)]
pub struct Integration {
    resource: BoundResource,
    hash_id: Output<String>,
}

impl Integration {
    pub fn schema() -> &'static ResourceSchema {
        &INTEGRATION
    }

    /// Declare a new integration.
    pub fn new(
        binder: &ResourceBinder,
        name: &str,
        args: IntegrationArgs,
        options: ResourceOptions,
    ) -> Result<Self, BindingError> {
        binder
            .create(Self::schema(), name, &args.fields, options)
            .map(Self::from_resource)
    }

    /// Attach to an existing integration by its hash.
    pub fn get(
        binder: &ResourceBinder,
        name: &str,
        id: impl Into<Input<String>>,
        state: Option<&FieldMap>,
        options: ResourceOptions,
    ) -> Result<Self, BindingError> {
        let empty = FieldMap::new();
        binder
            .rehydrate(Self::schema(), name, id, state.unwrap_or(&empty), options)
            .map(Self::from_resource)
    }

    /// Attach to the first integration of `integration_type` in the host's
    /// inventory.
    ///
    /// The match is made when the query result resolves. If there is none,
    /// the handle's `hash_id` (and every value derived from it) fails with
    /// [`OutputError::NotFound`].
    pub fn lookup(
        binder: &ResourceBinder,
        name: &str,
        integration_type: IntegrationType,
        options: ResourceOptions,
    ) -> Result<Self, BindingError> {
        tracing::debug!(
            name,
            integration_type = %integration_type,
            "Looking up integration by type"
        );

        let wanted = integration_type.as_str();
        let hash_id = binder
            .invoke(GET_INTEGRATIONS_TOKEN, json!({}))
            .try_map(move |result| first_of_type(result, wanted));

        let state = FieldMap::new().set("type", integration_type);
        Self::get(binder, name, hash_id, Some(&state), options)
    }

    /// Whether `resource` is an integration.
    pub fn is_instance(resource: &BoundResource) -> bool {
        resource.is(INTEGRATION_TOKEN)
    }

    /// Host-assigned identity.
    pub fn hash_id(&self) -> &Output<String> {
        &self.hash_id
    }

    /// Numeric identifier assigned by the platform.
    pub fn integration_id(&self) -> Output<i64> {
        self.resource.integer_output("integration_id")
    }

    /// A reference suitable for an action's integration field.
    pub fn to_ref(&self) -> IntegrationRef {
        IntegrationRef::from(self)
    }

    pub fn into_inner(self) -> BoundResource {
        self.resource
    }

    fn from_resource(resource: BoundResource) -> Self {
        let hash_id = resource.id().clone().with_dependency(resource.urn());
        Self { resource, hash_id }
    }
}

impl Deref for Integration {
    type Target = BoundResource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl From<&Integration> for IntegrationRef {
    fn from(integration: &Integration) -> Self {
        IntegrationRef::Live(LiveIntegration::new(
            integration.resource.urn(),
            integration.hash_id.clone(),
        ))
    }
}

fn first_of_type(result: Value, wanted: &str) -> Result<String, OutputError> {
    let listed = result
        .get("integrations")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let records: Vec<IntegrationRecord> =
        serde_json::from_value(listed).map_err(|e| OutputError::Decode(e.to_string()))?;

    records
        .into_iter()
        .find(|r| r.integration_type == wanted)
        .map(|r| r.hash_id)
        .ok_or_else(|| OutputError::NotFound(format!("integration not found for type {}", wanted)))
}
