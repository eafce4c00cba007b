//! Condition tuples and the group evaluator.
//!
//! A [`Condition`] is the `{field, operator, value, negate}` tuple emitted by
//! the builder UI for Condition and Filter nodes, and for QUERY row filters.
//! A [`ConditionGroup`] combines an ordered list of them with AND/OR.

use serde::{Deserialize, Serialize};

mod evaluator;

pub use evaluator::{evaluate_all, evaluate_condition, evaluate_group};

/// The closed vocabulary of comparison operators.
///
/// Wire names are snake_case, matching the strings the UI persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    Between,
    IsEmpty,
    IsNotEmpty,
}

impl Operator {
    /// Whether the operator consumes the condition's `value`.
    /// The emptiness operators ignore it entirely.
    pub fn requires_value(self) -> bool {
        !matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }
}

/// How the results of a group's conditions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// A single field/operator/value rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Dot-path into the runtime payload. Must be non-empty after trimming.
    pub field: String,
    pub operator: Operator,
    /// Comparison operand. Ignored by `is_empty`/`is_not_empty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Inverts the per-condition result before combining.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: Option<&str>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.map(str::to_string),
            negate: None,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = Some(true);
        self
    }
}

/// An ordered set of conditions plus the combinator.
///
/// An empty `conditions` list is valid and always evaluates to `true`; the
/// builder allows saving Condition nodes without any rules, displayed as
/// "always pass".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl ConditionGroup {
    pub fn new(conditions: Vec<Condition>, logical_operator: LogicalOperator) -> Self {
        Self {
            conditions,
            logical_operator,
        }
    }

    /// Evaluates the group against a payload tree. Pure and infallible;
    /// malformed data degrades to "no match".
    pub fn evaluate(&self, payload: &serde_json::Value) -> bool {
        evaluate_group(self, payload)
    }
}
