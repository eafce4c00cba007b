//! Canonical node-configuration schema.
//!
//! Every workflow node owns exactly one configuration document, created and
//! edited by the builder UI, normalized on submit, and persisted as an opaque
//! JSON column. [`NodeConfig`] is the discriminated union over the node
//! types; the wire format tags it with a `type` field and omits optional keys
//! entirely rather than persisting empty strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::{Condition, ConditionGroup, LogicalOperator, evaluate_all};
use crate::error::ConfigError;
use crate::payload::resolve;

pub mod delay;
pub mod form;
pub mod normalize;
pub mod query;
pub mod schedule;

pub use delay::{DurationUnit, MAX_DELAY_MS};
pub use query::{OrderBy, QueryConfig, SortDirection};
pub use schedule::{Frequency, ScheduleConfig, ScheduleMode};

/// Upper bound on LOOP iteration counts and QUERY result limits.
pub const MAX_ITERATIONS: u32 = 10_000;

/// A workflow node's configuration, discriminated by node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeConfig {
    #[serde(rename = "TRIGGER")]
    Trigger(TriggerConfig),
    #[serde(rename = "ACTION")]
    Action(ActionConfig),
    #[serde(rename = "DELAY")]
    Delay(DelayConfig),
    #[serde(rename = "LOOP")]
    Loop(LoopConfig),
    #[serde(rename = "QUERY")]
    Query(QueryConfig),
    #[serde(rename = "FILTER")]
    Filter(FilterConfig),
    #[serde(rename = "CONDITION")]
    Condition(ConditionConfig),
    #[serde(rename = "SCHEDULE")]
    Schedule(ScheduleConfig),
}

impl NodeConfig {
    pub fn node_type(&self) -> &'static str {
        match self {
            NodeConfig::Trigger(_) => "TRIGGER",
            NodeConfig::Action(_) => "ACTION",
            NodeConfig::Delay(_) => "DELAY",
            NodeConfig::Loop(_) => "LOOP",
            NodeConfig::Query(_) => "QUERY",
            NodeConfig::Filter(_) => "FILTER",
            NodeConfig::Condition(_) => "CONDITION",
            NodeConfig::Schedule(_) => "SCHEDULE",
        }
    }

    /// The key under which this node's output is stored for downstream nodes.
    pub fn result_key(&self) -> Option<&str> {
        let key = match self {
            NodeConfig::Trigger(c) => &c.result_key,
            NodeConfig::Action(c) => c.result_key(),
            NodeConfig::Delay(c) => &c.result_key,
            NodeConfig::Loop(c) => &c.result_key,
            NodeConfig::Query(c) => &c.result_key,
            NodeConfig::Filter(c) => &c.result_key,
            NodeConfig::Condition(c) => &c.result_key,
            NodeConfig::Schedule(c) => &c.result_key,
        };
        key.as_deref()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::JsonParse(e.to_string()))
    }
}

/// TRIGGER: fires the workflow when a named application event occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
}

/// ACTION: sends an outbound message. Bodies are interpolation templates;
/// see [`crate::template::render`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ActionConfig {
    #[serde(rename = "email", rename_all = "camelCase")]
    Email {
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result_key: Option<String>,
    },
    #[serde(rename = "sms", rename_all = "camelCase")]
    Sms {
        to: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result_key: Option<String>,
    },
}

impl ActionConfig {
    fn result_key(&self) -> &Option<String> {
        match self {
            ActionConfig::Email { result_key, .. } | ActionConfig::Sms { result_key, .. } => {
                result_key
            }
        }
    }
}

/// DELAY: suspends the workflow for `delay_ms` milliseconds, capped at
/// seven days. Unit conversion lives in [`delay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayConfig {
    pub delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
}

/// LOOP: iterates over a resolved collection with a bounded iteration count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    /// Dot-path to the collection in the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
    #[serde(default = "default_item_variable")]
    pub item_variable: String,
    #[serde(default = "default_index_variable")]
    pub index_variable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
    /// Edge handle to follow when the collection is empty or missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_path_handle: Option<String>,
}

fn default_item_variable() -> String {
    "item".to_string()
}

fn default_index_variable() -> String {
    "index".to_string()
}

/// One planned loop iteration: the scope object binds the configured item
/// and index variables for downstream nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopIteration {
    pub index: usize,
    pub scope: Value,
}

/// The result of resolving a LOOP configuration against a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopPlan {
    pub iterations: Vec<LoopIteration>,
    /// True when the source collection was missing or empty; the engine then
    /// follows `empty_path_handle` instead of the loop body.
    pub empty: bool,
    /// True when the collection was longer than the iteration cap.
    pub truncated: bool,
}

impl LoopConfig {
    fn source(&self) -> Option<&str> {
        self.source_key.as_deref().or(self.data_source.as_deref())
    }

    /// Resolves the source collection and plans the bounded iterations.
    pub fn plan(&self, payload: &Value) -> LoopPlan {
        let items = self
            .source()
            .and_then(|path| resolve(payload, path))
            .and_then(Value::as_array);
        let Some(items) = items.filter(|items| !items.is_empty()) else {
            return LoopPlan {
                iterations: Vec::new(),
                empty: true,
                truncated: false,
            };
        };

        let cap = self
            .max_iterations
            .unwrap_or(MAX_ITERATIONS)
            .min(MAX_ITERATIONS) as usize;
        let iterations = items
            .iter()
            .take(cap)
            .enumerate()
            .map(|(index, item)| {
                let mut scope = serde_json::Map::new();
                scope.insert(self.item_variable.clone(), item.clone());
                scope.insert(self.index_variable.clone(), Value::from(index));
                LoopIteration {
                    index,
                    scope: Value::Object(scope),
                }
            })
            .collect::<Vec<_>>();
        LoopPlan {
            truncated: items.len() > cap,
            empty: iterations.is_empty(),
            iterations,
        }
    }
}

/// FILTER: keeps the items of a source collection that match the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Dot-path to the collection in the payload. Required.
    pub source_key: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_key: Option<String>,
}

impl FilterConfig {
    /// Whether a single collection item passes the filter. Each item is its
    /// own payload tree for the conditions.
    pub fn matches(&self, item: &Value) -> bool {
        evaluate_all(&self.conditions, self.logical_operator, item)
    }

    /// Resolves the source collection and keeps the matching items.
    ///
    /// `None` means the source was missing or not an array; downstream nodes
    /// then read `fallback_key` instead of `result_key`.
    pub fn apply(&self, payload: &Value) -> Option<Vec<Value>> {
        let items = resolve(payload, &self.source_key)?.as_array()?;
        Some(
            items
                .iter()
                .filter(|item| self.matches(item))
                .cloned()
                .collect(),
        )
    }
}

/// CONDITION: routes the workflow on a boolean group evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
}

impl ConditionConfig {
    pub fn evaluate(&self, payload: &Value) -> bool {
        evaluate_all(&self.conditions, self.logical_operator, payload)
    }

    pub fn group(&self) -> ConditionGroup {
        ConditionGroup::new(self.conditions.clone(), self.logical_operator)
    }
}
