use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// One hour of the forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourSample {
    /// Seconds since epoch (UTC).
    pub timestamp: i64,
    /// Snowfall in this hour, mm. `None` when the provider omits it.
    pub snow_1h: Option<f64>,
    pub temperature: f64,
    /// Probability of precipitation, 0–1.
    pub precipitation_probability: f64,
    pub condition_code: u32,
    pub condition_main: String,
}

impl HourSample {
    pub fn snow_mm(&self) -> f64 {
        self.snow_1h.unwrap_or(0.0)
    }
}

/// One calendar day of the forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySample {
    pub temperature_max: f64,
    pub temperature_min: f64,
    /// Total snowfall for the day, mm. `None` when the provider omits it.
    pub snow_total: Option<f64>,
    pub uv_index: f64,
    pub condition_code: u32,
    pub condition_description: String,
    /// Percent.
    pub humidity: f64,
    /// m/s.
    pub wind_speed: f64,
}

impl DaySample {
    pub fn snow_mm(&self) -> f64 {
        self.snow_total.unwrap_or(0.0)
    }
}

/// A forecast as handed over by the provider: hourly and daily series, both
/// chronological. Read-only input to classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastSnapshot {
    pub hourly: Vec<HourSample>,
    pub daily: Vec<DaySample>,
}

impl ForecastSnapshot {
    /// Precondition for looking ahead `offset` days: the offset day must exist.
    pub fn check_offset(&self, offset: usize) -> Result<()> {
        if offset < self.daily.len() {
            Ok(())
        } else {
            Err(AppError::OffsetOutOfRange {
                offset,
                days: self.daily.len(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Fresh powder.
    Jumping,
    /// Groomers, the default.
    Carving,
    /// Heavy, slushy or icy snow.
    Sitting,
    /// Melting, no snow in sight.
    SadWalk,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mood::Jumping => "jumping",
            Mood::Carving => "carving",
            Mood::Sitting => "sitting",
            Mood::SadWalk => "sad_walk",
        };
        write!(f, "{s}")
    }
}
