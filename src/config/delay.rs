//! Duration unit math for DELAY nodes.
//!
//! The form collects a free-text duration value plus a unit; the persisted
//! config only carries `delayMs`. Re-opening the form derives the friendliest
//! unit back from the stored milliseconds.

use serde::{Deserialize, Serialize};

/// Hard cap on a delay: seven days in milliseconds.
pub const MAX_DELAY_MS: u64 = 604_800_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    /// Units in ascending order of magnitude.
    pub const ASCENDING: [DurationUnit; 4] = [
        DurationUnit::Seconds,
        DurationUnit::Minutes,
        DurationUnit::Hours,
        DurationUnit::Days,
    ];

    pub fn multiplier(self) -> u64 {
        match self {
            DurationUnit::Seconds => 1_000,
            DurationUnit::Minutes => 60_000,
            DurationUnit::Hours => 3_600_000,
            DurationUnit::Days => 86_400_000,
        }
    }
}

/// Computes the persisted millisecond value from the form's duration input,
/// clamped to `[0, MAX_DELAY_MS]`. Negative and non-finite inputs clamp to 0.
pub fn to_delay_ms(value: f64, unit: DurationUnit) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let ms = value * unit.multiplier() as f64;
    if ms >= MAX_DELAY_MS as f64 {
        MAX_DELAY_MS
    } else {
        ms.round() as u64
    }
}

/// Derives the display form from a persisted `delayMs`.
///
/// Scans units from seconds up and keeps the largest one that still divides
/// the value evenly, so 1_800_000 ms comes back as 30 minutes rather than
/// 1800 seconds. Zero and values no unit divides fall back to seconds.
pub fn derive_display(delay_ms: u64) -> (f64, DurationUnit) {
    if delay_ms == 0 {
        return (0.0, DurationUnit::Seconds);
    }
    let mut best = None;
    for unit in DurationUnit::ASCENDING {
        if delay_ms % unit.multiplier() == 0 {
            best = Some(unit);
        }
    }
    match best {
        Some(unit) => ((delay_ms / unit.multiplier()) as f64, unit),
        None => (delay_ms as f64 / 1_000.0, DurationUnit::Seconds),
    }
}
