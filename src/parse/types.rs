//! Rust types for exported workflow definitions.
//!
//! Only the keys the analyzers read are modelled. Everything is optional:
//! the structural requirements are enforced by the property analyzer, not by
//! deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::field::{
    Field, PropertyValue, from_object, lenient, lenient_or_default, object, object_list,
    object_list_or_default, object_or_default,
};

// =============================================================================
// TOP-LEVEL DOCUMENT
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "object")]
    pub workflow: Field<WorkflowBody>,
    #[serde(default)]
    pub categories: Field<Vec<Category>>,
    /// Hard-coded targets. Any non-null value is a fault.
    #[serde(default)]
    pub targets: Field<Value>,
    #[serde(default)]
    pub target_groups: Field<TargetGroups>,
    #[serde(default, deserialize_with = "object_list")]
    pub triggers: Field<Vec<Trigger>>,
    #[serde(default)]
    pub atomic_workflows: Field<Vec<Value>>,
}

impl Document {
    pub fn body(&self) -> Option<&WorkflowBody> {
        self.workflow.present()
    }

    /// Top-level action list, if the document declares a non-empty one.
    pub fn root_actions(&self) -> Option<&[Action]> {
        self.body()
            .and_then(|b| b.actions.present())
            .map(Vec::as_slice)
            .filter(|actions| !actions.is_empty())
    }

    /// Identifiers of the atomic sub-workflows this document depends on.
    pub fn atomic_references(&self) -> Vec<String> {
        self.atomic_workflows
            .present()
            .map(|refs| {
                refs.iter()
                    .map(|r| match r {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowBody {
    #[serde(default, deserialize_with = "object")]
    pub properties: Field<WorkflowProperties>,
    #[serde(default)]
    pub variables: Field<Vec<Variable>>,
    #[serde(default, deserialize_with = "object_list")]
    pub actions: Field<Vec<Action>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowProperties {
    #[serde(default, deserialize_with = "object")]
    pub atomic: Field<AtomicSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtomicSettings {
    #[serde(default)]
    pub is_atomic: Field<bool>,
}

/// A category is either a bare string or an object carrying a `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Plain(String),
    Named { name: String },
    Other(Value),
}

impl Category {
    pub fn display_name(&self) -> String {
        match self {
            Category::Plain(s) => s.clone(),
            Category::Named { name } => name.clone(),
            Category::Other(v) => v.to_string(),
        }
    }
}

// =============================================================================
// VARIABLES
// =============================================================================

/// A declared variable. Entries that are not objects deserialize with no
/// properties and are reported by the variable analyzer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct Variable {
    pub properties: Option<VariableProperties>,
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        let properties = value
            .get("properties")
            .and_then(from_object::<VariableProperties>);
        Variable { properties }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariableProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub data_type: Option<String>,
    #[serde(default)]
    pub is_required: PropertyValue,
}

// =============================================================================
// TARGETS
// =============================================================================

/// Target groups keyed by group id, in document order.
#[derive(Debug, Clone, Default)]
pub struct TargetGroups(pub Vec<(String, TargetGroup)>);

impl<'de> Deserialize<'de> for TargetGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let groups = map
            .into_iter()
            .map(|(id, group)| {
                let group = from_object::<TargetGroup>(&group).unwrap_or_default();
                (id, group)
            })
            .collect();
        Ok(TargetGroups(groups))
    }
}

impl TargetGroups {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetGroup)> {
        self.0.iter().map(|(id, g)| (id.as_str(), g))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetGroup {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "object_list_or_default")]
    pub targets: Vec<GroupTarget>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupTarget {
    #[serde(default, deserialize_with = "lenient")]
    pub data_target_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub selected_target_ids: Vec<Value>,
}

// =============================================================================
// TRIGGERS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Trigger {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub trigger_type: Option<String>,
}

// =============================================================================
// ACTIONS
// =============================================================================

pub const HTTP_REQUEST: &str = "web-service.http_request";
pub const JSON_PATH_QUERY: &str = "corejava.jsonpathquery";
pub const SUBWORKFLOW: &str = "subworkflow";

/// One node of the action tree. Child nodes live under either `blocks` or
/// `actions`; use [`Action::children`] rather than either list directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Action {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub action_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub base_type: Option<String>,
    #[serde(default, deserialize_with = "object_or_default")]
    pub properties: ActionProperties,
    #[serde(default, deserialize_with = "object_list_or_default")]
    pub blocks: Vec<Action>,
    #[serde(default, deserialize_with = "object_list_or_default")]
    pub actions: Vec<Action>,
}

impl Action {
    /// Child nodes: `blocks` first, then `actions`.
    pub fn children(&self) -> impl Iterator<Item = &Action> {
        self.blocks.iter().chain(self.actions.iter())
    }

    pub fn display_name(&self) -> &str {
        match self.properties.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unnamed Action",
        }
    }

    pub fn is_subworkflow(&self) -> bool {
        self.base_type.as_deref() == Some(SUBWORKFLOW)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub continue_on_failure: PropertyValue,
    #[serde(default)]
    pub continue_on_error_status_code: PropertyValue,
    #[serde(default)]
    pub allow_auto_redirect: PropertyValue,
    #[serde(default, deserialize_with = "object")]
    pub runtime_user: Field<RuntimeUser>,
    /// Set on subworkflow actions: the id of the atomic being called.
    #[serde(default, deserialize_with = "lenient")]
    pub workflow_id: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeUser {
    #[serde(default)]
    pub target_default: PropertyValue,
}

impl RuntimeUser {
    pub fn uses_target_default(&self) -> bool {
        self.target_default.is_truthy()
    }
}
