//! Resource binding.
//!
//! The binder turns a declaration into a registered resource:
//!
//! 1. Pick the mode: an `id` in the options means rehydrate, otherwise create
//! 2. Project the fields into a property bag (validating in create mode)
//! 3. Normalize the options: ignore-changes union, replacement strategy,
//!    protocol version
//! 4. Register with the resource host
//!
//! Validation failures are raised before step 4. Host failures come back
//! unchanged.

use crate::error::BindingError;
use crate::fields::FieldMap;
use crate::projector::{ProjectionMode, project};
use crate::schema::ResourceSchema;
use buddy_core::{Input, Output, OutputError, SdkConfig};
use buddy_host::{InvokeOptions, RegisterOptions, RegisteredResource, ResourceHost};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Caller-facing registration options.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    /// Identity of an existing resource. Switches binding to rehydrate mode.
    pub id: Option<Input<String>>,
    /// Provider protocol version to pin.
    pub version: Option<String>,
    /// Extra fields whose changes the host should ignore.
    pub ignore_changes: Vec<String>,
    /// Replacement strategy override.
    pub delete_before_replace: Option<bool>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<Input<String>>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn ignore_changes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_changes.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn delete_before_replace(mut self, enabled: bool) -> Self {
        self.delete_before_replace = Some(enabled);
        self
    }
}

/// Binds declarations to a resource host.
#[derive(Clone)]
pub struct ResourceBinder {
    host: Arc<dyn ResourceHost>,
    config: SdkConfig,
}

impl ResourceBinder {
    /// Create a binder with an explicit configuration.
    pub fn new(host: Arc<dyn ResourceHost>, config: SdkConfig) -> Self {
        Self { host, config }
    }

    /// Create a binder using the process-wide configuration.
    pub fn with_global_config(host: Arc<dyn ResourceHost>) -> Self {
        Self::new(host, SdkConfig::global().clone())
    }

    pub fn host(&self) -> &Arc<dyn ResourceHost> {
        &self.host
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Bind a resource. Mode is chosen by the presence of `options.id`.
    pub fn bind(
        &self,
        schema: &'static ResourceSchema,
        name: &str,
        input: &FieldMap,
        options: ResourceOptions,
    ) -> Result<BoundResource, BindingError> {
        let mode = if options.id.is_some() {
            ProjectionMode::Rehydrate
        } else {
            ProjectionMode::Create
        };

        let props = project(schema, mode, input)?;
        let register = self.register_options(schema, options);

        tracing::debug!(
            resource = schema.name,
            token = schema.token,
            name,
            ?mode,
            version = ?register.version,
            "Binding resource"
        );

        let registered = self
            .host
            .register_resource(schema.token, name, props, &register)?;
        Ok(BoundResource::new(schema, name, registered))
    }

    /// Declare a new resource.
    pub fn create(
        &self,
        schema: &'static ResourceSchema,
        name: &str,
        args: &FieldMap,
        options: ResourceOptions,
    ) -> Result<BoundResource, BindingError> {
        self.bind(schema, name, args, options)
    }

    /// Attach to an existing resource by identity, with optional prior state.
    pub fn rehydrate(
        &self,
        schema: &'static ResourceSchema,
        name: &str,
        id: impl Into<Input<String>>,
        state: &FieldMap,
        options: ResourceOptions,
    ) -> Result<BoundResource, BindingError> {
        self.bind(schema, name, state, options.with_id(id))
    }

    /// Run a query against host state, stamped with the configured version.
    pub fn invoke(&self, token: &str, args: Value) -> Output<Value> {
        let options = InvokeOptions {
            version: Some(self.config.effective_version()),
        };
        self.host.invoke(token, args, &options)
    }

    fn register_options(&self, schema: &ResourceSchema, options: ResourceOptions) -> RegisterOptions {
        let mut ignore_changes: BTreeSet<String> = options.ignore_changes.into_iter().collect();
        ignore_changes.extend(schema.immutable.iter().map(|f| f.to_string()));
        ignore_changes.extend(self.config.defaults.ignore_changes.iter().cloned());

        let delete_before_replace = options
            .delete_before_replace
            .or(schema.replace_only.then_some(true));

        RegisterOptions {
            id: options.id.map(Input::into_output),
            version: Some(
                options
                    .version
                    .unwrap_or_else(|| self.config.effective_version()),
            ),
            ignore_changes: ignore_changes.into_iter().collect(),
            delete_before_replace,
        }
    }
}

/// A resource registered with the host.
#[derive(Debug, Clone)]
pub struct BoundResource {
    schema: &'static ResourceSchema,
    name: String,
    urn: String,
    id: Output<String>,
    outputs: Output<Map<String, Value>>,
}

impl BoundResource {
    fn new(schema: &'static ResourceSchema, name: &str, registered: RegisteredResource) -> Self {
        Self {
            schema,
            name: name.to_string(),
            urn: registered.urn,
            id: registered.id,
            outputs: registered.outputs,
        }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Host resource token.
    pub fn token(&self) -> &'static str {
        self.schema.token
    }

    /// Fixed type tag, e.g. `AMAZON_S3`.
    pub fn type_tag(&self) -> Option<&'static str> {
        self.schema.type_tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn urn(&self) -> &str {
        &self.urn
    }

    /// Host-assigned identity.
    pub fn id(&self) -> &Output<String> {
        &self.id
    }

    /// Every field as the host reports it.
    pub fn outputs(&self) -> &Output<Map<String, Value>> {
        &self.outputs
    }

    /// One field as the host reports it.
    ///
    /// Fields the host must always report fail with
    /// [`OutputError::MissingOutput`] when absent; optional ones resolve to
    /// `null`.
    pub fn output(&self, field: &str) -> Output<Value> {
        let required = self.schema.output_required(field);
        let known = self.schema.has_output(field);
        let field = field.to_string();

        self.outputs.try_map(move |mut fields| match fields.remove(&field) {
            Some(value) if !value.is_null() => Ok(value),
            _ if required || !known => Err(OutputError::MissingOutput { field }),
            _ => Ok(Value::Null),
        })
    }

    /// A string field.
    pub fn string_output(&self, field: &str) -> Output<String> {
        let name = field.to_string();
        self.output(field).try_map(move |value| match value {
            Value::String(s) => Ok(s),
            other => Err(OutputError::Decode(format!(
                "field '{}' is not a string: {}",
                name, other
            ))),
        })
    }

    /// An integer field.
    pub fn integer_output(&self, field: &str) -> Output<i64> {
        let name = field.to_string();
        self.output(field).try_map(move |value| {
            value.as_i64().ok_or_else(|| {
                OutputError::Decode(format!("field '{}' is not an integer: {}", name, value))
            })
        })
    }

    /// Host-assigned numeric action identifier.
    pub fn action_id(&self) -> Output<i64> {
        self.integer_output("action_id")
    }

    /// API URL of the resource.
    pub fn url(&self) -> Output<String> {
        self.string_output("url")
    }

    /// Web UI URL of the resource.
    pub fn html_url(&self) -> Output<String> {
        self.string_output("html_url")
    }

    pub fn project_name(&self) -> Output<String> {
        self.string_output("project_name")
    }

    pub fn pipeline_id(&self) -> Output<i64> {
        self.integer_output("pipeline_id")
    }

    /// Whether this handle was registered under `token`.
    pub fn is(&self, token: &str) -> bool {
        self.schema.token == token
    }
}
