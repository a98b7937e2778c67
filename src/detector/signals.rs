use serde::Serialize;

use crate::config::thresholds::*;
use crate::config::{HOURS_PER_DAY, LONG_WINDOW_DAYS, SHORT_WINDOW_DAYS, SNOW_TOTAL_DAYS, SNOW_WINDOW_HOURS};
use crate::types::{DaySample, ForecastSnapshot, HourSample};

/// Quantities the mood rules read, all relative to the look-ahead offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Signals {
    /// Hourly snowfall over the 48 hours from the offset day, mm.
    pub snow48h_mm: f64,
    /// Daily snowfall of the offset day and the next, mm.
    pub snow2d_mm: f64,
    pub warm3d_count: usize,
    pub warm5d_count: usize,
    pub sun3d_count: usize,
    pub sun5d_count: usize,
    pub freezethaw_count: usize,
}

impl Signals {
    pub fn derive(snapshot: &ForecastSnapshot, offset: usize) -> Self {
        let hours = hour_window(&snapshot.hourly, offset, SNOW_WINDOW_HOURS);
        let short = day_window(&snapshot.daily, offset, SHORT_WINDOW_DAYS);
        let long = day_window(&snapshot.daily, offset, LONG_WINDOW_DAYS);

        Self {
            snow48h_mm: hours.iter().map(HourSample::snow_mm).sum(),
            snow2d_mm: day_window(&snapshot.daily, offset, SNOW_TOTAL_DAYS)
                .iter()
                .map(DaySample::snow_mm)
                .sum(),
            warm3d_count: count(short, is_warm),
            warm5d_count: count(long, is_warm),
            sun3d_count: count(short, is_sunny),
            sun5d_count: count(long, is_sunny),
            freezethaw_count: count(short, is_freeze_thaw),
        }
    }
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// `len` daily entries starting at `offset`. Truncates at the end of the
/// series; an offset past the end yields an empty window.
pub fn day_window(daily: &[DaySample], offset: usize, len: usize) -> &[DaySample] {
    window(daily, offset, len)
}

/// `len` hourly entries starting at the first hour of day `offset`.
/// Same truncation policy as [`day_window`].
pub fn hour_window(hourly: &[HourSample], offset: usize, len: usize) -> &[HourSample] {
    window(hourly, offset.saturating_mul(HOURS_PER_DAY), len)
}

fn window<T>(items: &[T], start: usize, len: usize) -> &[T] {
    let start = start.min(items.len());
    let end = start.saturating_add(len).min(items.len());
    &items[start..end]
}

// ---------------------------------------------------------------------------
// Day predicates
// ---------------------------------------------------------------------------

fn count(days: &[DaySample], pred: fn(&DaySample) -> bool) -> usize {
    days.iter().filter(|d| pred(d)).count()
}

pub fn is_warm(day: &DaySample) -> bool {
    day.temperature_max >= WARM_MAX_C
}

pub fn is_sunny(day: &DaySample) -> bool {
    SUNNY_CONDITION_CODES.contains(&day.condition_code) && day.uv_index >= SUNNY_MIN_UV
}

pub fn is_freeze_thaw(day: &DaySample) -> bool {
    day.temperature_max >= THAW_MAX_C && day.temperature_min <= FREEZE_MIN_C
}
