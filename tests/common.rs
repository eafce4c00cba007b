//! Common test utilities for building conditions, configs, and payloads.
use jouken::prelude::*;
use serde_json::{Value, json};

/// Shorthand for a non-negated condition.
#[allow(dead_code)]
pub fn cond(field: &str, operator: Operator, value: Option<&str>) -> Condition {
    Condition::new(field, operator, value)
}

/// A CRM-shaped payload covering nested objects, arrays, numbers, and nulls.
#[allow(dead_code)]
pub fn crm_payload() -> Value {
    json!({
        "contact": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "tags": ["vip", "engineering"],
            "phone": null,
        },
        "deal": {
            "stage": "won",
            "amount": 2500,
            "probability": "0.9",
        },
        "tasks": [
            { "title": "Send contract", "done": true, "hours": 2 },
            { "title": "Kickoff call", "done": false, "hours": 1 },
            { "title": "Invoice", "done": false, "hours": 3 },
        ],
    })
}

/// A filter over the `tasks` collection: keep the unfinished ones.
#[allow(dead_code)]
pub fn open_tasks_filter() -> FilterConfig {
    FilterConfig {
        source_key: "tasks".to_string(),
        conditions: vec![cond("done", Operator::Equals, Some("false"))],
        logical_operator: LogicalOperator::And,
        result_key: Some("openTasks".to_string()),
        fallback_key: None,
    }
}

/// A daily schedule config in frequency mode.
#[allow(dead_code)]
pub fn daily_schedule() -> ScheduleConfig {
    ScheduleConfig {
        frequency: Some(Frequency::Daily),
        ..ScheduleConfig::default()
    }
}

/// A canvas node with no config yet.
#[allow(dead_code)]
pub fn blank_node(id: &str) -> NodeState {
    NodeState {
        id: id.to_string(),
        label: format!("Node {id}"),
        position: Position { x: 0.0, y: 0.0 },
        config: None,
    }
}

/// An edge between two nodes, id derived from the endpoints.
#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> EdgeState {
    EdgeState {
        id: format!("{source}-{target}"),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: None,
        target_handle: None,
    }
}
