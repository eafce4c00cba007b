//! Explicit form state for the node configuration side-sheets.
//!
//! The original editor kept form state in an ambient form library; here it is
//! an explicit `{values, errors, touched}` struct driven through a controlled
//! update function. Validation runs at submit time and blocks normalization,
//! so the normalizer itself never raises.

use ahash::{AHashMap, AHashSet};

use crate::config::NodeConfig;

/// A validation failure attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The contract every node-type form implements: validate the raw input, and
/// normalize it into the canonical persisted shape.
pub trait NodeForm {
    /// Field-keyed validation errors. Empty means the form may be submitted.
    fn validate(&self) -> Vec<FieldError>;

    /// Produces the canonical config. Only called after validation passes;
    /// leftover irregularities degrade (cleared fields, clamped ranges)
    /// rather than erroring.
    fn normalize(&self) -> NodeConfig;
}

/// Controlled form state for one node's configuration sheet.
#[derive(Debug, Clone, Default)]
pub struct FormState<F: NodeForm> {
    pub values: F,
    errors: AHashMap<&'static str, String>,
    touched: AHashSet<&'static str>,
}

impl<F: NodeForm> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: AHashMap::new(),
            touched: AHashSet::new(),
        }
    }

    /// Applies an edit to one field, marking it touched and clearing its
    /// stale error.
    pub fn update(&mut self, field: &'static str, edit: impl FnOnce(&mut F)) {
        edit(&mut self.values);
        self.touched.insert(field);
        self.errors.remove(field);
    }

    /// Validates and, if clean, normalizes. On failure the errors are stored
    /// for inline display and submission is blocked.
    pub fn submit(&mut self) -> Option<NodeConfig> {
        let errors = self.values.validate();
        self.errors = errors
            .into_iter()
            .map(|e| (e.field, e.message))
            .collect();
        if self.errors.is_empty() {
            Some(self.values.normalize())
        } else {
            None
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }
}

/// Trims a free-text field; trimmed-empty input means "no value" and the key
/// is dropped from the persisted config entirely.
pub(crate) fn clean(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lenient numeric parse: unparsable or empty input resolves to `None`
/// rather than an error at this layer.
pub(crate) fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn parse_count(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}
