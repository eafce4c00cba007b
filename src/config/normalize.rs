//! Per-node-type raw forms and their normalization into [`NodeConfig`].
//!
//! Free-text inputs stay `String`s here because that is what the editor
//! collects; `normalize` applies the canonicalization rules: trim everything,
//! drop trimmed-empty optionals, parse numbers leniently, clamp ranges, and
//! derive rather than store the schedule mode.

use serde::{Deserialize, Serialize};

use crate::config::delay::{DurationUnit, to_delay_ms};
use crate::config::form::{FieldError, NodeForm, clean, parse_count, parse_number};
use crate::config::query::{OrderBy, QueryConfig};
use crate::config::schedule::{Frequency, ScheduleConfig, ScheduleMode, parse_cron};
use crate::config::{
    ActionConfig, ConditionConfig, DelayConfig, FilterConfig, LoopConfig, MAX_ITERATIONS,
    NodeConfig, TriggerConfig,
};
use crate::condition::{Condition, LogicalOperator};

/// A path input backed by a dropdown of curated suggestions plus a free-text
/// escape hatch.
///
/// The editor multiplexes the two with a `"__custom"` sentinel selection
/// value. The sentinel is a pure UI artifact: modeling the selection as an
/// enum keeps it out of persisted configs by construction, and
/// [`PathSelection::resolve`] additionally refuses a literal sentinel string
/// pasted into either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSelection {
    Preset(String),
    Custom(String),
}

impl PathSelection {
    pub const CUSTOM_SENTINEL: &'static str = "__custom";

    /// The real dot-path, or `None` when unset, blank, or the sentinel.
    pub fn resolve(&self) -> Option<String> {
        let raw = match self {
            PathSelection::Preset(value) | PathSelection::Custom(value) => value,
        };
        clean(raw).filter(|path| path != Self::CUSTOM_SENTINEL)
    }
}

impl Default for PathSelection {
    fn default() -> Self {
        PathSelection::Preset(String::new())
    }
}

/// Trims condition fields and values; `negate` is persisted only when set.
fn normalize_conditions(conditions: &[Condition]) -> Vec<Condition> {
    conditions
        .iter()
        .map(|c| Condition {
            field: c.field.trim().to_string(),
            operator: c.operator,
            value: c.value.as_deref().and_then(clean),
            negate: c.negate.filter(|&n| n),
        })
        .collect()
}

/// Every condition row needs a non-empty field path.
fn validate_conditions(conditions: &[Condition], field: &'static str) -> Vec<FieldError> {
    conditions
        .iter()
        .enumerate()
        .filter(|(_, c)| c.field.trim().is_empty())
        .map(|(i, _)| FieldError::new(field, format!("Condition {} is missing a field", i + 1)))
        .collect()
}

// ---------------------------------------------------------------------------
// TRIGGER / ACTION
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TriggerForm {
    pub event: String,
    pub result_key: String,
}

impl NodeForm for TriggerForm {
    fn validate(&self) -> Vec<FieldError> {
        if self.event.trim().is_empty() {
            vec![FieldError::new("event", "An event is required")]
        } else {
            Vec::new()
        }
    }

    fn normalize(&self) -> NodeConfig {
        NodeConfig::Trigger(TriggerConfig {
            event: self.event.trim().to_string(),
            result_key: clean(&self.result_key),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmailActionForm {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub result_key: String,
}

impl NodeForm for EmailActionForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.to.trim().is_empty() {
            errors.push(FieldError::new("to", "A recipient is required"));
        }
        if self.body.trim().is_empty() {
            errors.push(FieldError::new("body", "A message body is required"));
        }
        errors
    }

    fn normalize(&self) -> NodeConfig {
        NodeConfig::Action(ActionConfig::Email {
            to: self.to.trim().to_string(),
            subject: clean(&self.subject),
            body: self.body.trim().to_string(),
            result_key: clean(&self.result_key),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmsActionForm {
    pub to: String,
    pub body: String,
    pub result_key: String,
}

impl NodeForm for SmsActionForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.to.trim().is_empty() {
            errors.push(FieldError::new("to", "A recipient is required"));
        }
        if self.body.trim().is_empty() {
            errors.push(FieldError::new("body", "A message body is required"));
        }
        errors
    }

    fn normalize(&self) -> NodeConfig {
        NodeConfig::Action(ActionConfig::Sms {
            to: self.to.trim().to_string(),
            body: self.body.trim().to_string(),
            result_key: clean(&self.result_key),
        })
    }
}

// ---------------------------------------------------------------------------
// DELAY
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DelayForm {
    pub duration_value: String,
    pub duration_unit: DurationUnit,
    pub result_key: String,
}

impl Default for DelayForm {
    fn default() -> Self {
        Self {
            duration_value: String::new(),
            duration_unit: DurationUnit::Seconds,
            result_key: String::new(),
        }
    }
}

impl DelayForm {
    /// Re-opens an existing config for editing, deriving the display unit
    /// from the persisted milliseconds.
    pub fn from_config(config: &DelayConfig) -> Self {
        let (value, unit) = super::delay::derive_display(config.delay_ms);
        Self {
            duration_value: if value.fract() == 0.0 {
                format!("{}", value as u64)
            } else {
                format!("{value}")
            },
            duration_unit: unit,
            result_key: config.result_key.clone().unwrap_or_default(),
        }
    }
}

impl NodeForm for DelayForm {
    fn validate(&self) -> Vec<FieldError> {
        match parse_number(&self.duration_value) {
            None => vec![FieldError::new(
                "durationValue",
                "Enter a numeric duration",
            )],
            Some(n) if n < 0.0 => {
                vec![FieldError::new("durationValue", "Duration cannot be negative")]
            }
            Some(_) => Vec::new(),
        }
    }

    fn normalize(&self) -> NodeConfig {
        let value = parse_number(&self.duration_value).unwrap_or(0.0);
        NodeConfig::Delay(DelayConfig {
            delay_ms: to_delay_ms(value, self.duration_unit),
            result_key: clean(&self.result_key),
        })
    }
}

// ---------------------------------------------------------------------------
// LOOP
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LoopForm {
    pub source: PathSelection,
    pub item_variable: String,
    pub index_variable: String,
    pub max_iterations: String,
    pub result_key: String,
    pub empty_path_handle: String,
}

impl NodeForm for LoopForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let raw = self.max_iterations.trim();
        if !raw.is_empty() && parse_count(raw).is_none() {
            errors.push(FieldError::new(
                "maxIterations",
                "Enter a whole number of iterations",
            ));
        }
        errors
    }

    fn normalize(&self) -> NodeConfig {
        NodeConfig::Loop(LoopConfig {
            data_source: None,
            source_key: self.source.resolve(),
            item_variable: clean(&self.item_variable).unwrap_or_else(|| "item".to_string()),
            index_variable: clean(&self.index_variable).unwrap_or_else(|| "index".to_string()),
            max_iterations: parse_count(&self.max_iterations).map(|n| n.min(MAX_ITERATIONS)),
            result_key: clean(&self.result_key),
            empty_path_handle: clean(&self.empty_path_handle),
        })
    }
}

// ---------------------------------------------------------------------------
// QUERY
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct QueryForm {
    pub model: String,
    pub filters: Vec<Condition>,
    pub limit: String,
    pub offset: String,
    pub order_by: Vec<OrderBy>,
    pub select: Vec<String>,
    pub include: Vec<String>,
    pub result_key: String,
    pub fallback_key: String,
}

impl NodeForm for QueryForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.model.trim().is_empty() {
            errors.push(FieldError::new("model", "A model is required"));
        }
        errors.extend(validate_conditions(&self.filters, "filters"));
        errors
    }

    fn normalize(&self) -> NodeConfig {
        let order_by: Vec<OrderBy> = self
            .order_by
            .iter()
            .filter(|o| !o.field.trim().is_empty())
            .map(|o| OrderBy {
                field: o.field.trim().to_string(),
                direction: o.direction,
            })
            .collect();
        let select: Vec<String> = self.select.iter().filter_map(|s| clean(s)).collect();
        let include: Vec<String> = self.include.iter().filter_map(|s| clean(s)).collect();

        NodeConfig::Query(QueryConfig {
            model: self.model.trim().to_string(),
            filters: normalize_conditions(&self.filters),
            limit: parse_count(&self.limit).map(|n| n.min(MAX_ITERATIONS)),
            offset: parse_count(&self.offset),
            order_by: if order_by.is_empty() { None } else { Some(order_by) },
            select: if select.is_empty() { None } else { Some(select) },
            include: if include.is_empty() { None } else { Some(include) },
            result_key: clean(&self.result_key),
            fallback_key: clean(&self.fallback_key),
        })
    }
}

// ---------------------------------------------------------------------------
// FILTER / CONDITION
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub source: PathSelection,
    pub conditions: Vec<Condition>,
    pub logical_operator: LogicalOperator,
    pub result_key: String,
    pub fallback_key: String,
}

impl NodeForm for FilterForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.source.resolve().is_none() {
            errors.push(FieldError::new("sourceKey", "A source collection is required"));
        }
        errors.extend(validate_conditions(&self.conditions, "conditions"));
        errors
    }

    fn normalize(&self) -> NodeConfig {
        NodeConfig::Filter(FilterConfig {
            source_key: self.source.resolve().unwrap_or_default(),
            conditions: normalize_conditions(&self.conditions),
            logical_operator: self.logical_operator,
            result_key: clean(&self.result_key),
            fallback_key: clean(&self.fallback_key),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConditionForm {
    pub conditions: Vec<Condition>,
    pub logical_operator: LogicalOperator,
    pub result_key: String,
}

impl NodeForm for ConditionForm {
    fn validate(&self) -> Vec<FieldError> {
        // Zero conditions is a valid "always pass" node.
        validate_conditions(&self.conditions, "conditions")
    }

    fn normalize(&self) -> NodeConfig {
        NodeConfig::Condition(ConditionConfig {
            conditions: normalize_conditions(&self.conditions),
            logical_operator: self.logical_operator,
            result_key: clean(&self.result_key),
        })
    }
}

// ---------------------------------------------------------------------------
// SCHEDULE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub mode: ScheduleMode,
    pub cron: String,
    pub frequency: Option<Frequency>,
    pub timezone: String,
    pub start_at: String,
    pub end_at: String,
    pub is_active: bool,
    pub result_key: String,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            mode: ScheduleMode::Frequency,
            cron: String::new(),
            frequency: None,
            timezone: "UTC".to_string(),
            start_at: String::new(),
            end_at: String::new(),
            is_active: true,
            result_key: String::new(),
        }
    }
}

impl ScheduleForm {
    /// Switches the recurrence tab. The modes are mutually exclusive, so the
    /// fields of the mode being left are cleared immediately.
    pub fn switch_mode(&mut self, mode: ScheduleMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        match mode {
            ScheduleMode::Cron => self.frequency = None,
            ScheduleMode::Frequency => self.cron.clear(),
        }
    }
}

impl NodeForm for ScheduleForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self.mode {
            ScheduleMode::Cron => match clean(&self.cron) {
                None => errors.push(FieldError::new("cron", "A cron expression is required")),
                Some(expr) => {
                    if let Err(e) = parse_cron(&expr) {
                        errors.push(FieldError::new("cron", e.to_string()));
                    }
                }
            },
            ScheduleMode::Frequency => {
                if self.frequency.is_none() {
                    errors.push(FieldError::new("frequency", "A frequency is required"));
                }
            }
        }
        if let Some(tz) = clean(&self.timezone) {
            if tz.parse::<chrono_tz::Tz>().is_err() {
                errors.push(FieldError::new("timezone", format!("Unknown timezone '{tz}'")));
            }
        }
        for (field, raw) in [("startAt", &self.start_at), ("endAt", &self.end_at)] {
            if let Some(value) = clean(raw) {
                if chrono::DateTime::parse_from_rfc3339(&value).is_err() {
                    errors.push(FieldError::new(field, "Enter an ISO-8601 timestamp"));
                }
            }
        }
        errors
    }

    fn normalize(&self) -> NodeConfig {
        // Mode is derived from the persisted fields, never stored: only the
        // active tab's recurrence field survives normalization.
        let (cron, frequency) = match self.mode {
            ScheduleMode::Cron => (clean(&self.cron), None),
            ScheduleMode::Frequency => (None, self.frequency),
        };
        NodeConfig::Schedule(ScheduleConfig {
            cron,
            frequency,
            timezone: clean(&self.timezone).unwrap_or_else(|| "UTC".to_string()),
            start_at: clean(&self.start_at),
            end_at: clean(&self.end_at),
            is_active: self.is_active,
            result_key: clean(&self.result_key),
        })
    }
}
