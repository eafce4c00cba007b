//! # Jouken - Workflow Condition Evaluation and Node Configuration Engine
//!
//! **Jouken** is the engine-side counterpart of a visual, node-based workflow
//! automation builder. The builder UI emits configuration documents - JSON
//! blobs describing triggers, actions, delays, loops, queries, filters,
//! conditions, and schedules. Jouken defines the canonical schema for those
//! documents, normalizes raw form input into it, and implements the execution
//! semantics they imply as pure, side-effect-free functions.
//!
//! ## Core Workflow
//!
//! 1.  **Collect form input**: drive a per-node-type form (e.g.
//!     [`config::normalize::ConditionForm`]) through a
//!     [`config::form::FormState`]; validation errors stay attached to their
//!     fields and block submission.
//! 2.  **Normalize**: a clean submit produces a canonical [`config::NodeConfig`]
//!     with trimmed strings, clamped ranges, and empty optionals omitted -
//!     ready to persist as an opaque JSON column.
//! 3.  **Evaluate**: at run time, feed a node's config and the workflow
//!     payload to the pure semantics: condition groups evaluate to booleans,
//!     filters keep matching items, loops plan bounded iterations, schedules
//!     report their next occurrence, and templates interpolate payload values.
//!
//! ## Quick Start
//!
//! ```rust
//! use jouken::prelude::*;
//! use serde_json::json;
//!
//! // A condition group as the builder UI would persist it.
//! let group = ConditionGroup::new(
//!     vec![
//!         Condition::new("deal.stage", Operator::Equals, Some("won")),
//!         Condition::new("deal.amount", Operator::Gte, Some("1000")),
//!     ],
//!     LogicalOperator::And,
//! );
//!
//! let payload = json!({ "deal": { "stage": "won", "amount": 2500 } });
//! assert!(group.evaluate(&payload));
//!
//! // Evaluation is silent on malformed data: it degrades to "no match".
//! let payload = json!({ "deal": { "stage": "won", "amount": "n/a" } });
//! assert!(!group.evaluate(&payload));
//! ```

pub mod canvas;
pub mod condition;
pub mod config;
pub mod error;
pub mod payload;
pub mod prelude;
pub mod template;
