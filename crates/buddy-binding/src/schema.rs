//! Declarative resource schemas.
//!
//! A [`ResourceSchema`] describes everything the binder needs to know about
//! one resource kind: its host token and type tag, the fields it accepts,
//! which of them are required, which hold integration references, which
//! outputs the host computes, and which fields are write-once.

use serde_json::{Map, Value, json};

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    /// A string from a closed set of wire values.
    Enum(&'static [&'static str]),
    StringList,
    Object,
    ObjectList,
    /// An integration reference, transmitted as `{ hash_id }`.
    Integration,
}

impl FieldKind {
    /// Whether a literal value fits this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Enum(values) => value.as_str().is_some_and(|s| values.contains(&s)),
            FieldKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldKind::Object => value.is_object(),
            FieldKind::ObjectList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_object)),
            FieldKind::Integration => value
                .get("hash_id")
                .is_some_and(Value::is_string),
        }
    }

    /// Short description used in validation messages.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::String => "expected a string".to_string(),
            FieldKind::Integer => "expected an integer".to_string(),
            FieldKind::Boolean => "expected a boolean".to_string(),
            FieldKind::Enum(values) => format!("expected one of {}", values.join(", ")),
            FieldKind::StringList => "expected a list of strings".to_string(),
            FieldKind::Object => "expected an object".to_string(),
            FieldKind::ObjectList => "expected a list of objects".to_string(),
            FieldKind::Integration => "expected an integration reference".to_string(),
        }
    }

    /// JSON Schema fragment for this kind.
    pub fn json_schema(&self) -> Value {
        match self {
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Integer => json!({ "type": "integer" }),
            FieldKind::Boolean => json!({ "type": "boolean" }),
            FieldKind::Enum(values) => json!({ "type": "string", "enum": values }),
            FieldKind::StringList => json!({ "type": "array", "items": { "type": "string" } }),
            FieldKind::Object => json!({ "type": "object" }),
            FieldKind::ObjectList => json!({ "type": "array", "items": { "type": "object" } }),
            FieldKind::Integration => json!({
                "type": "object",
                "properties": { "hash_id": { "type": "string" } },
                "required": ["hash_id"]
            }),
        }
    }
}

/// One declared input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Must be supplied when creating the resource.
    pub required: bool,
    /// Always present in the host's view of the resource.
    pub output_required: bool,
}

impl FieldSpec {
    /// A field required on creation and always present in outputs.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            output_required: true,
        }
    }

    /// A field that may be omitted.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            output_required: false,
        }
    }

    /// Keep the field required on creation but allow the host to omit it
    /// from outputs.
    pub const fn optional_in_outputs(mut self) -> Self {
        self.output_required = false;
        self
    }

    pub fn is_integration(&self) -> bool {
        self.kind == FieldKind::Integration
    }
}

/// Declarative description of one resource kind.
#[derive(Debug)]
pub struct ResourceSchema {
    /// Human-facing name, e.g. `AmazonS3`.
    pub name: &'static str,
    /// Host resource token.
    pub token: &'static str,
    /// Fixed `type` value injected into every bag, if the kind has one.
    pub type_tag: Option<&'static str>,
    /// Fields shared with other kinds (e.g. pipeline linkage).
    pub base_fields: &'static [FieldSpec],
    /// Fields specific to this kind.
    pub fields: &'static [FieldSpec],
    /// Output-only fields the host computes.
    pub computed: &'static [&'static str],
    /// Fields whose later changes the host must ignore.
    pub immutable: &'static [&'static str],
    /// Updates are destroy-then-recreate only.
    pub replace_only: bool,
}

impl ResourceSchema {
    /// Every declared input field, shared ones first.
    pub fn all_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let base: &'static [FieldSpec] = self.base_fields;
        let own: &'static [FieldSpec] = self.fields;
        base.iter().chain(own.iter())
    }

    /// Look up a declared input field.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        self.all_fields().filter(|f| f.required)
    }

    pub fn integration_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        self.all_fields().filter(|f| f.is_integration())
    }

    pub fn is_computed(&self, name: &str) -> bool {
        self.computed.contains(&name)
    }

    /// Whether `name` is something the host reports for this resource.
    pub fn has_output(&self, name: &str) -> bool {
        (name == "type" && self.type_tag.is_some())
            || self.is_computed(name)
            || self.field(name).is_some()
    }

    /// Whether the host must always report `name`.
    pub fn output_required(&self, name: &str) -> bool {
        if self.is_computed(name) || (name == "type" && self.type_tag.is_some()) {
            return true;
        }
        self.field(name).is_some_and(|f| f.output_required)
    }

    /// JSON Schema for the creation arguments.
    pub fn args_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.all_fields() {
            properties.insert(field.name.to_string(), field.kind.json_schema());
        }
        let required: Vec<&str> = self.required_fields().map(|f| f.name).collect();

        json!({
            "title": format!("{}Args", self.name),
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }

    /// JSON Schema for the host's view of the resource.
    pub fn outputs_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.all_fields() {
            properties.insert(field.name.to_string(), field.kind.json_schema());
            if field.output_required {
                required.push(field.name);
            }
        }
        if let Some(tag) = self.type_tag {
            properties.insert("type".to_string(), json!({ "type": "string", "const": tag }));
            required.push("type");
        }
        for name in self.computed {
            let schema = match *name {
                "action_id" | "integration_id" => json!({ "type": "integer" }),
                _ => json!({ "type": "string" }),
            };
            properties.insert(name.to_string(), schema);
            required.push(name);
        }

        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}
