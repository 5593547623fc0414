//! In-process resource host.
//!
//! `MemoryHost` resolves registered bags locally, assigns identifiers and
//! fills in the computed fields a real host would (action ids, URLs,
//! integration hashes). It keeps a log of every registration so callers can
//! inspect exactly what was sent across the boundary.

use crate::error::HostError;
use crate::host::{InvokeOptions, RegisterOptions, RegisteredResource, ResourceHost};
use crate::inventory::{InMemoryInventory, IntegrationInventory, IntegrationRecord};
use buddy_core::{
    GET_INTEGRATIONS_TOKEN, INTEGRATION_TOKEN, Output, OutputError, PropertyBag,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

type IdAllocator = Box<dyn Fn(&str, u64) -> String + Send + Sync>;

/// A registration as received by the host.
#[derive(Debug, Clone)]
pub struct Registration {
    pub token: String,
    pub name: String,
    pub urn: String,
    pub props: PropertyBag,
    pub options: RegisterOptions,
    pub registered_at: DateTime<Utc>,
}

/// Resource host that runs entirely in process memory.
pub struct MemoryHost {
    inventory: Arc<dyn IntegrationInventory>,
    registrations: Mutex<Vec<Registration>>,
    sequence: AtomicU64,
    allocate_id: IdAllocator,
    rejections: RwLock<HashMap<String, String>>,
    api_url: String,
    app_url: String,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a host with an empty inventory.
    pub fn new() -> Self {
        Self {
            inventory: Arc::new(InMemoryInventory::new()),
            registrations: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(0),
            allocate_id: Box::new(default_id),
            rejections: RwLock::new(HashMap::new()),
            api_url: "https://api.buddy.works".to_string(),
            app_url: "https://app.buddy.works".to_string(),
        }
    }

    /// Use a custom inventory backend.
    pub fn with_inventory(mut self, inventory: Arc<dyn IntegrationInventory>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Use a custom identifier allocator. Receives the resource token and
    /// the registration sequence number (starting at 1).
    pub fn with_id_allocator<F>(mut self, allocate: F) -> Self
    where
        F: Fn(&str, u64) -> String + Send + Sync + 'static,
    {
        self.allocate_id = Box::new(allocate);
        self
    }

    /// Base URLs used for computed `url` / `html_url` fields.
    pub fn with_urls(mut self, api_url: impl Into<String>, app_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.app_url = app_url.into();
        self
    }

    /// Reject every registration of `token` with the given reason.
    pub fn reject(self, token: impl Into<String>, reason: impl Into<String>) -> Self {
        match self.rejections.write() {
            Ok(mut rejections) => {
                rejections.insert(token.into(), reason.into());
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejection list lock poisoned, rejection not recorded");
            }
        }
        self
    }

    /// The inventory backend.
    pub fn inventory(&self) -> &Arc<dyn IntegrationInventory> {
        &self.inventory
    }

    /// Every registration received so far, in order.
    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// The registration with the given resource name, if any.
    pub fn registration(&self, name: &str) -> Option<Registration> {
        self.registrations().into_iter().find(|r| r.name == name)
    }

    fn rejection_for(&self, token: &str) -> Result<Option<String>, HostError> {
        let rejections = self.rejections.read().map_err(|e| {
            HostError::Unavailable(format!("Failed to acquire rejection list lock: {}", e))
        })?;
        Ok(rejections.get(token).cloned())
    }

    fn record_integration(&self, hash_id: &str, props: &PropertyBag) -> Result<(), HostError> {
        let Some(integration_type) = props.literal_str("type") else {
            tracing::debug!(hash_id, "Integration type is deferred, not added to inventory");
            return Ok(());
        };
        let name = props.literal_str("name").unwrap_or_default();
        self.inventory
            .insert(IntegrationRecord::new(hash_id, name, integration_type))
    }
}

impl ResourceHost for MemoryHost {
    fn register_resource(
        &self,
        token: &str,
        name: &str,
        props: PropertyBag,
        options: &RegisterOptions,
    ) -> Result<RegisteredResource, HostError> {
        if let Some(reason) = self.rejection_for(token)? {
            return Err(HostError::Rejected {
                token: token.to_string(),
                reason,
            });
        }

        let urn = format!("urn:buddy::{}::{}", token, name);
        let mut registrations = self.registrations.lock().map_err(|e| {
            HostError::Unavailable(format!("Failed to acquire registration log lock: {}", e))
        })?;
        if registrations.iter().any(|r| r.urn == urn) {
            return Err(HostError::DuplicateResource { urn });
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let id = match &options.id {
            Some(id) => id.clone(),
            None => {
                let allocated = (self.allocate_id)(token, seq);
                if token == INTEGRATION_TOKEN {
                    self.record_integration(&allocated, &props)?;
                }
                Output::resolved(allocated)
            }
        };

        let computed = ComputedFields {
            seq,
            api_url: self.api_url.clone(),
            app_url: self.app_url.clone(),
            unset: props.unset_keys(),
        };
        let resolved = props.resolve();
        let id_for_outputs = id.clone();
        let outputs = Output::new(async move {
            let mut fields = resolved.resolve().await?;
            let id = id_for_outputs.resolve().await?;
            computed.fill(&mut fields, &id);
            Ok::<_, OutputError>(fields)
        })
        .with_dependencies(props.dependencies())
        .with_dependency(urn.clone());

        tracing::debug!(
            token,
            name,
            urn = %urn,
            rehydrate = options.is_rehydrate(),
            ignore_changes = ?options.ignore_changes,
            delete_before_replace = ?options.delete_before_replace,
            "Registered resource"
        );

        registrations.push(Registration {
            token: token.to_string(),
            name: name.to_string(),
            urn: urn.clone(),
            props,
            options: options.clone(),
            registered_at: Utc::now(),
        });

        Ok(RegisteredResource {
            urn: urn.clone(),
            id: id.with_dependency(urn),
            outputs,
        })
    }

    fn invoke(&self, token: &str, _args: Value, _options: &InvokeOptions) -> Output<Value> {
        if token != GET_INTEGRATIONS_TOKEN {
            return Output::failed(OutputError::Remote(format!(
                "unknown query token '{}'",
                token
            )));
        }

        let inventory = Arc::clone(&self.inventory);
        Output::new(async move {
            let records = inventory.list().await?;
            let integrations =
                serde_json::to_value(records).map_err(|e| OutputError::Decode(e.to_string()))?;
            Ok::<_, OutputError>(json!({ "integrations": integrations }))
        })
    }
}

/// Host-computed values filled into fields the bag left unset.
struct ComputedFields {
    seq: u64,
    api_url: String,
    app_url: String,
    unset: Vec<String>,
}

impl ComputedFields {
    fn fill(&self, fields: &mut Map<String, Value>, id: &str) {
        let action_id = match id.parse::<u64>() {
            Ok(action_id) => action_id,
            Err(_) => {
                tracing::debug!(id, seq = self.seq, "Non-numeric id, numbering by sequence");
                self.seq
            }
        };
        let pipeline = match (fields.get("project_name"), fields.get("pipeline_id")) {
            (Some(Value::String(project)), Some(pipeline)) => Some((project.clone(), pipeline.to_string())),
            _ => None,
        };
        let channel = fields.get("channel").cloned();

        for key in &self.unset {
            let value = match (key.as_str(), &pipeline) {
                ("action_id", _) => json!(action_id),
                ("hash_id", _) => json!(id),
                ("integration_id", _) => json!(self.seq),
                ("url", Some((project, pipeline))) => json!(format!(
                    "{}/workspaces/buddy/projects/{}/pipelines/{}/actions/{}",
                    self.api_url, project, pipeline, action_id
                )),
                ("html_url", Some((project, pipeline))) => json!(format!(
                    "{}/buddy/{}/pipelines/pipeline/{}/action/{}",
                    self.app_url, project, pipeline, action_id
                )),
                ("url", None) => json!(format!("{}/workspaces/buddy/integrations/{}", self.api_url, id)),
                ("html_url", None) => json!(format!("{}/buddy/-/integrations/{}", self.app_url, id)),
                ("docker_image_id", _) => json!(format!("sha256:{:064x}", action_id)),
                ("channel_name", _) => match &channel {
                    Some(channel) => channel.clone(),
                    None => continue,
                },
                _ => continue,
            };
            fields.insert(key.clone(), value);
        }
    }
}

fn default_id(token: &str, seq: u64) -> String {
    if token == INTEGRATION_TOKEN {
        Uuid::new_v4().simple().to_string()
    } else {
        seq.to_string()
    }
}
