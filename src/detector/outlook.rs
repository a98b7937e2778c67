use serde::Serialize;

use crate::detector::classifier::classify;
use crate::types::{ForecastSnapshot, Mood};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayMood {
    pub offset: usize,
    pub mood: Mood,
}

/// Mood for every day the snapshot covers, each offset classified on its own.
pub fn outlook(snapshot: &ForecastSnapshot) -> Vec<DayMood> {
    (0..snapshot.daily.len())
        .map(|offset| DayMood {
            offset,
            mood: classify(snapshot, offset),
        })
        .collect()
}
