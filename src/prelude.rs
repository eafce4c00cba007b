//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the jouken crate. Import
//! this module to get the core functionality without importing each type
//! individually.
//!
//! # Example
//!
//! ```rust
//! use jouken::prelude::*;
//!
//! let group = ConditionGroup::new(
//!     vec![Condition::new("status", Operator::Equals, Some("active"))],
//!     LogicalOperator::And,
//! );
//! assert!(group.evaluate(&serde_json::json!({ "status": "active" })));
//! ```

// Condition vocabulary and evaluation
pub use crate::condition::{
    Condition, ConditionGroup, LogicalOperator, Operator, evaluate_condition, evaluate_group,
};

// Node configuration schema
pub use crate::config::{
    ActionConfig, ConditionConfig, DelayConfig, DurationUnit, FilterConfig, Frequency, LoopConfig,
    LoopPlan, NodeConfig, OrderBy, QueryConfig, ScheduleConfig, ScheduleMode, SortDirection,
    TriggerConfig,
};

// Forms and normalization
pub use crate::config::form::{FieldError, FormState, NodeForm};
pub use crate::config::normalize::{
    ConditionForm, DelayForm, EmailActionForm, FilterForm, LoopForm, PathSelection, QueryForm,
    ScheduleForm, SmsActionForm, TriggerForm,
};

// Canvas state
pub use crate::canvas::{CanvasState, EdgeState, NodeState, Position, ReconcileReport, WorkflowApi};

// Payload resolution and templates
pub use crate::payload::resolve;
pub use crate::template::render;

// Error types
pub use crate::error::{ConfigError, ScheduleError, SyncError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
