//! QUERY node schema and reference in-memory semantics.
//!
//! The persisted config describes a query against an external model store.
//! [`QueryConfig::apply_to`] defines the semantics an engine must honor -
//! AND-combined row filters, multi-key ordering, offset/limit paging, and
//! field projection - as a pure function over an in-memory collection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::{Condition, LogicalOperator, evaluate_all};
use crate::config::MAX_ITERATIONS;
use crate::payload::{number_of, resolve, text_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// QUERY: fetches rows of a named model, filtered and shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    pub model: String,
    #[serde(default)]
    pub filters: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderBy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_key: Option<String>,
}

impl QueryConfig {
    /// Row filters combine with AND; an empty filter list matches every row.
    pub fn matches(&self, row: &Value) -> bool {
        evaluate_all(&self.filters, LogicalOperator::And, row)
    }

    /// Applies the query to an in-memory collection of rows.
    pub fn apply_to(&self, rows: &[Value]) -> Vec<Value> {
        let mut result: Vec<Value> = rows.iter().filter(|r| self.matches(r)).cloned().collect();

        if let Some(order_by) = &self.order_by {
            result.sort_by(|a, b| compare_rows(a, b, order_by));
        }

        let offset = self.offset.unwrap_or(0) as usize;
        let limit = self.limit.unwrap_or(MAX_ITERATIONS).min(MAX_ITERATIONS) as usize;
        result = result.into_iter().skip(offset).take(limit).collect();

        if let Some(select) = &self.select {
            result = result.iter().map(|row| project(row, select)).collect();
        }
        result
    }
}

fn compare_rows(a: &Value, b: &Value, order_by: &[OrderBy]) -> Ordering {
    for spec in order_by {
        // Rows missing the sort field go last in either direction.
        let ord = match (resolve(a, &spec.field), resolve(b, &spec.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match spec.direction {
                SortDirection::Asc => compare_fields(a, b),
                SortDirection::Desc => compare_fields(a, b).reverse(),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Numeric-aware ordering of two present field values.
fn compare_fields(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (number_of(a), number_of(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    match (text_of(a), text_of(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

/// Projects a row down to the selected top-level keys.
fn project(row: &Value, select: &[String]) -> Value {
    let Value::Object(map) = row else {
        return row.clone();
    };
    let mut projected = serde_json::Map::new();
    for key in select {
        if let Some(value) = map.get(key) {
            projected.insert(key.clone(), value.clone());
        }
    }
    Value::Object(projected)
}
