//! SCHEDULE node semantics: cron vs. frequency recurrence.
//!
//! The two modes are mutually exclusive. Mode is never stored explicitly: a
//! config with a non-empty `cron` string is in cron mode, anything else is in
//! frequency mode. The schedule form clears the inactive mode's fields on a
//! tab switch, so a normalized config never carries both.

use std::str::FromStr;

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Named cadences for frequency mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// The derived recurrence mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    Cron,
    Frequency,
}

/// SCHEDULE: recurring workflow trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// ISO-8601. The schedule produces no occurrences before this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    /// ISO-8601. The schedule produces no occurrences after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_key: Option<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_is_active() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: None,
            frequency: None,
            timezone: default_timezone(),
            start_at: None,
            end_at: None,
            is_active: true,
            result_key: None,
        }
    }
}

impl ScheduleConfig {
    /// Presence of a non-empty cron expression implies cron mode.
    pub fn mode(&self) -> ScheduleMode {
        match &self.cron {
            Some(expr) if !expr.trim().is_empty() => ScheduleMode::Cron,
            _ => ScheduleMode::Frequency,
        }
    }

    /// The next instant this schedule fires strictly after `after`, honoring
    /// the active flag, the start/end window, and the configured timezone.
    ///
    /// `Ok(None)` means the schedule will not fire again (inactive, past its
    /// end, or frequency mode without a cadence).
    pub fn next_occurrence(
        &self,
        after: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, ScheduleError> {
        if !self.is_active {
            return Ok(None);
        }
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| ScheduleError::InvalidTimezone {
                timezone: self.timezone.clone(),
            })?;
        let start = parse_instant("startAt", self.start_at.as_deref())?;
        let end = parse_instant("endAt", self.end_at.as_deref())?;

        // Occurrences are strictly after `after`, but a future startAt is
        // itself eligible, so the search begins just before it.
        let floor = match start {
            Some(start) if start > after => start - TimeDelta::milliseconds(1),
            _ => after,
        };

        let next = match self.mode() {
            ScheduleMode::Cron => {
                let expr = self.cron.as_deref().unwrap_or_default();
                let schedule = parse_cron(expr)?;
                schedule
                    .after(&floor.with_timezone(&tz))
                    .next()
                    .map(|t| t.with_timezone(&Utc))
            }
            ScheduleMode::Frequency => match self.frequency {
                Some(frequency) => next_by_frequency(frequency, floor, start, tz),
                None => None,
            },
        };

        let next = match (next, end) {
            (Some(t), Some(end)) if t > end => None,
            (next, _) => next,
        };
        tracing::debug!(?next, timezone = %self.timezone, "computed next occurrence");
        Ok(next)
    }
}

/// Parses a cron expression, accepting the standard five-field form the UI
/// emits by padding a zero seconds field.
pub fn parse_cron(expression: &str) -> Result<Schedule, ScheduleError> {
    let expr = expression.trim();
    let padded;
    let full = if expr.split_whitespace().count() == 5 {
        padded = format!("0 {expr}");
        &padded
    } else {
        expr
    };
    Schedule::from_str(full).map_err(|e| ScheduleError::InvalidCron {
        expression: expression.to_string(),
        message: e.to_string(),
    })
}

fn parse_instant(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ScheduleError> {
    match value {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|_| ScheduleError::InvalidTimestamp {
                field,
                value: raw.to_string(),
            }),
    }
}

/// Steps the cadence in local calendar time from the anchor until it passes
/// `floor`. The anchor is `startAt` when present so monthly schedules keep
/// their day-of-month; otherwise the cadence is anchored at `floor` itself.
fn next_by_frequency(
    frequency: Frequency,
    floor: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    tz: Tz,
) -> Option<DateTime<Utc>> {
    let anchor = start.unwrap_or(floor);
    let mut local = anchor.with_timezone(&tz);
    while local.with_timezone(&Utc) <= floor {
        local = match frequency {
            Frequency::Hourly => local.checked_add_signed(TimeDelta::hours(1))?,
            Frequency::Daily => local.checked_add_days(Days::new(1))?,
            Frequency::Weekly => local.checked_add_days(Days::new(7))?,
            Frequency::Monthly => local.checked_add_months(Months::new(1))?,
            // Months arithmetic clamps Feb 29 anchors to Feb 28.
            Frequency::Yearly => local.checked_add_months(Months::new(12))?,
        };
    }
    Some(local.with_timezone(&Utc))
}
