use crate::error::{AppError, Result};

/// Hourly samples per forecast day. Scales an offset into the hourly series.
pub const HOURS_PER_DAY: usize = 24;

/// Length of the hourly snowfall window (hours).
pub const SNOW_WINDOW_HOURS: usize = 48;

/// Short daily window: warm, sunny and freeze-thaw streaks.
pub const SHORT_WINDOW_DAYS: usize = 3;

/// Long daily window: sustained warm/sunny streaks.
pub const LONG_WINDOW_DAYS: usize = 5;

/// Days summed for the daily snowfall total (the offset day and the next).
pub const SNOW_TOTAL_DAYS: usize = 2;

/// Default request body limit for forecast uploads (bytes).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Rule thresholds. Temperatures in °C, snowfall in mm, UV index dimensionless.
pub mod thresholds {
    /// Day max at or above this counts as warm.
    pub const WARM_MAX_C: f64 = 4.0;
    /// Freeze-thaw: day max at or above this...
    pub const THAW_MAX_C: f64 = 3.0;
    /// ...and night min at or below this.
    pub const FREEZE_MIN_C: f64 = -3.0;
    /// Today's max at or above this counts as currently warm.
    pub const TODAY_WARM_MAX_C: f64 = 6.0;
    /// Minimum UV index for a sunny day.
    pub const SUNNY_MIN_UV: f64 = 5.0;
    /// Clear sky and few/scattered clouds.
    pub const SUNNY_CONDITION_CODES: [u32; 3] = [800, 801, 802];

    /// Fresh powder regardless of temperature.
    pub const POWDER_MM: f64 = 15.0;
    /// Fresh powder if nothing warm is coming.
    pub const COLD_POWDER_MM: f64 = 8.0;

    /// Streak lengths (days).
    pub const WARM_SHORT_STREAK: usize = 2;
    pub const SUN_SHORT_STREAK: usize = 2;
    pub const FREEZE_THAW_STREAK: usize = 2;
    pub const WARM_LONG_STREAK: usize = 4;
    pub const SUN_LONG_STREAK: usize = 3;
    pub const SUN_DRY_STREAK: usize = 4;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub bind_addr: String,
    pub api_port: u16,
    /// One Call JSON preloaded into the view state at startup (FORECAST_PATH)
    pub forecast_path: Option<String>,
    /// Offset selected once the preloaded forecast is in (DEFAULT_OFFSET)
    pub default_offset: usize,
    /// Upload size cap for forecast bodies (MAX_BODY_BYTES)
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            forecast_path: std::env::var("FORECAST_PATH")
                .ok()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            default_offset: std::env::var("DEFAULT_OFFSET")
                .unwrap_or_else(|_| "0".to_string())
                .parse::<usize>()
                .map_err(|_| {
                    AppError::Config("DEFAULT_OFFSET must be a non-negative integer".to_string())
                })?,
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        })
    }
}
