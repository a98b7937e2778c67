//! OpenWeather One Call 3.0 (`units=metric`) payloads into `ForecastSnapshot`.
//! Only the fields classification and the view read are kept; everything else
//! in the payload is ignored.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::types::{DaySample, ForecastSnapshot, HourSample};

/// One entry of a `weather` array. Only the first entry is meaningful.
#[derive(Debug, Deserialize, Clone, Default)]
struct RawCondition {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

/// `hourly[].snow` — `{"1h": mm}`.
#[derive(Debug, Deserialize)]
struct RawHourSnow {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawHour {
    #[serde(default)]
    dt: i64,
    #[serde(default)]
    temp: f64,
    #[serde(default)]
    pop: f64,
    snow: Option<RawHourSnow>,
    #[serde(default)]
    weather: Vec<RawCondition>,
}

#[derive(Debug, Deserialize, Default)]
struct RawDayTemp {
    #[serde(default)]
    max: f64,
    #[serde(default)]
    min: f64,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    #[serde(default)]
    temp: RawDayTemp,
    /// Daily snow is a bare number, unlike the hourly `{"1h": ..}` object.
    snow: Option<f64>,
    #[serde(default)]
    uvi: f64,
    #[serde(default)]
    weather: Vec<RawCondition>,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    wind_speed: f64,
}

/// Top-level payload. `hourly` and `daily` are mandatory: a payload without
/// them is not a forecast.
#[derive(Debug, Deserialize)]
struct RawOneCall {
    hourly: Vec<RawHour>,
    daily: Vec<RawDay>,
}

impl From<RawHour> for HourSample {
    fn from(raw: RawHour) -> Self {
        let condition = raw.weather.into_iter().next().unwrap_or_default();
        HourSample {
            timestamp: raw.dt,
            snow_1h: raw.snow.and_then(|s| s.one_hour),
            temperature: raw.temp,
            precipitation_probability: raw.pop,
            condition_code: condition.id,
            condition_main: condition.main,
        }
    }
}

impl From<RawDay> for DaySample {
    fn from(raw: RawDay) -> Self {
        let condition = raw.weather.into_iter().next().unwrap_or_default();
        DaySample {
            temperature_max: raw.temp.max,
            temperature_min: raw.temp.min,
            snow_total: raw.snow,
            uv_index: raw.uvi,
            condition_code: condition.id,
            condition_description: condition.description,
            humidity: raw.humidity,
            wind_speed: raw.wind_speed,
        }
    }
}

/// Parse a One Call response body.
pub fn parse_onecall(raw: &[u8]) -> Result<ForecastSnapshot> {
    let parsed: RawOneCall = serde_json::from_slice(raw)?;
    let snapshot = ForecastSnapshot {
        hourly: parsed.hourly.into_iter().map(HourSample::from).collect(),
        daily: parsed.daily.into_iter().map(DaySample::from).collect(),
    };
    debug!(
        hourly = snapshot.hourly.len(),
        daily = snapshot.daily.len(),
        "parsed One Call forecast"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn parses_hourly_and_daily_fields() {
        let raw = br#"{
            "lat": 39.64, "lon": -106.37, "timezone": "America/Denver",
            "hourly": [
                {"dt": 1700000000, "temp": -4.2, "pop": 0.8, "snow": {"1h": 1.25},
                 "weather": [{"id": 601, "main": "Snow", "description": "snow", "icon": "13n"}]},
                {"dt": 1700003600, "temp": -3.9, "pop": 0.1,
                 "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04n"}]}
            ],
            "daily": [
                {"dt": 1699984800, "temp": {"day": -1.0, "min": -9.5, "max": 2.5, "night": -6.0},
                 "snow": 12.4, "uvi": 2.1, "humidity": 81, "wind_speed": 4.6,
                 "weather": [{"id": 601, "main": "Snow", "description": "snow", "icon": "13d"}]}
            ]
        }"#;
        let snapshot = parse_onecall(raw).unwrap();

        assert_eq!(snapshot.hourly.len(), 2);
        let first = &snapshot.hourly[0];
        assert_eq!(first.timestamp, 1_700_000_000);
        assert_eq!(first.snow_1h, Some(1.25));
        assert!((first.temperature + 4.2).abs() < 1e-9);
        assert!((first.precipitation_probability - 0.8).abs() < 1e-9);
        assert_eq!(first.condition_code, 601);
        assert_eq!(first.condition_main, "Snow");
        assert_eq!(snapshot.hourly[1].snow_1h, None);

        assert_eq!(snapshot.daily.len(), 1);
        let day = &snapshot.daily[0];
        assert!((day.temperature_max - 2.5).abs() < 1e-9);
        assert!((day.temperature_min + 9.5).abs() < 1e-9);
        assert_eq!(day.snow_total, Some(12.4));
        assert!((day.uv_index - 2.1).abs() < 1e-9);
        assert_eq!(day.condition_code, 601);
        assert_eq!(day.condition_description, "snow");
        assert!((day.humidity - 81.0).abs() < 1e-9);
        assert!((day.wind_speed - 4.6).abs() < 1e-9);
    }

    #[test]
    fn missing_optional_fields_default_to_zero() {
        let raw = br#"{"hourly":[{"dt":1}],"daily":[{"temp":{"max":5}}]}"#;
        let snapshot = parse_onecall(raw).unwrap();
        assert_eq!(snapshot.hourly[0].snow_mm(), 0.0);
        assert_eq!(snapshot.hourly[0].condition_code, 0);
        assert_eq!(snapshot.daily[0].snow_total, None);
        assert_eq!(snapshot.daily[0].temperature_min, 0.0);
        assert_eq!(snapshot.daily[0].uv_index, 0.0);
        assert!(snapshot.daily[0].condition_description.is_empty());
    }

    #[test]
    fn hourly_snow_object_without_1h_is_absent() {
        let raw = br#"{"hourly":[{"dt":1,"snow":{}}],"daily":[]}"#;
        let snapshot = parse_onecall(raw).unwrap();
        assert_eq!(snapshot.hourly[0].snow_1h, None);
    }

    #[test]
    fn missing_daily_is_rejected() {
        let raw = br#"{"hourly":[]}"#;
        assert!(matches!(parse_onecall(raw), Err(AppError::Json(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_onecall(b"not json").is_err());
    }
}
