//! Immutable view state. Every change goes through [`update`], which returns a
//! new state and leaves the old one untouched.

use std::sync::Arc;

use serde::Serialize;

use crate::detector::{classify, Signals};
use crate::error::{AppError, Result};
use crate::types::{ForecastSnapshot, Mood};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum LoadStatus {
    Empty,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Event {
    LoadStarted,
    ForecastLoaded(Arc<ForecastSnapshot>),
    ForecastFailed(String),
    OffsetSelected(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub forecast: Option<Arc<ForecastSnapshot>>,
    pub offset: usize,
    pub status: LoadStatus,
}

/// What a client sees for the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodView {
    pub offset: usize,
    pub mood: Mood,
    pub signals: Signals,
}

impl AppState {
    pub fn new(offset: usize) -> Self {
        Self {
            forecast: None,
            offset,
            status: LoadStatus::Empty,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.forecast.is_some()
    }

    /// Mood for the selected offset. A failed load hides any older forecast.
    pub fn view(&self) -> Result<MoodView> {
        if let LoadStatus::Failed(reason) = &self.status {
            return Err(AppError::ForecastFailed(reason.clone()));
        }
        let forecast = self.forecast.as_deref().ok_or(AppError::NoForecast)?;
        forecast.check_offset(self.offset)?;
        Ok(MoodView {
            offset: self.offset,
            mood: classify(forecast, self.offset),
            signals: Signals::derive(forecast, self.offset),
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Advance `state` by one event.
///
/// A new forecast keeps the selected offset when it still fits and falls back
/// to its last day otherwise. Selecting an offset the forecast does not cover
/// leaves the state as it was. Before any forecast arrives, any offset is
/// accepted and checked once the forecast lands.
pub fn update(state: &AppState, event: Event) -> AppState {
    match event {
        Event::LoadStarted => AppState {
            status: LoadStatus::Loading,
            ..state.clone()
        },
        Event::ForecastLoaded(forecast) => {
            let offset = match forecast.daily.len() {
                0 => 0,
                days => state.offset.min(days - 1),
            };
            AppState {
                forecast: Some(forecast),
                offset,
                status: LoadStatus::Ready,
            }
        }
        Event::ForecastFailed(reason) => AppState {
            status: LoadStatus::Failed(reason),
            ..state.clone()
        },
        Event::OffsetSelected(offset) => match &state.forecast {
            Some(forecast) if forecast.check_offset(offset).is_err() => state.clone(),
            _ => AppState {
                offset,
                ..state.clone()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DaySample, HourSample};

    fn forecast(days: usize, snow_mm_per_hour: f64) -> Arc<ForecastSnapshot> {
        Arc::new(ForecastSnapshot {
            hourly: vec![
                HourSample {
                    snow_1h: Some(snow_mm_per_hour),
                    ..Default::default()
                };
                days * 24
            ],
            daily: vec![DaySample::default(); days],
        })
    }

    #[test]
    fn starts_empty_without_view() {
        let state = AppState::default();
        assert_eq!(state.status, LoadStatus::Empty);
        assert!(!state.is_loaded());
        assert!(matches!(state.view(), Err(AppError::NoForecast)));
    }

    #[test]
    fn load_cycle_reaches_ready() {
        let state = update(&AppState::default(), Event::LoadStarted);
        assert_eq!(state.status, LoadStatus::Loading);

        let state = update(&state, Event::ForecastLoaded(forecast(5, 1.0)));
        assert_eq!(state.status, LoadStatus::Ready);
        let view = state.view().unwrap();
        assert_eq!(view.offset, 0);
        assert_eq!(view.mood, Mood::Jumping);
        assert_eq!(view.signals.snow48h_mm, 48.0);
    }

    #[test]
    fn update_does_not_touch_previous_state() {
        let before = AppState::default();
        let after = update(&before, Event::ForecastLoaded(forecast(3, 0.0)));
        assert!(!before.is_loaded());
        assert!(after.is_loaded());
    }

    #[test]
    fn select_offset_within_forecast() {
        let state = update(&AppState::default(), Event::ForecastLoaded(forecast(5, 0.0)));
        let state = update(&state, Event::OffsetSelected(3));
        assert_eq!(state.offset, 3);
        assert_eq!(state.view().unwrap().offset, 3);
    }

    #[test]
    fn select_offset_outside_forecast_is_ignored() {
        let state = update(&AppState::default(), Event::ForecastLoaded(forecast(5, 0.0)));
        let state = update(&state, Event::OffsetSelected(2));
        let same = update(&state, Event::OffsetSelected(5));
        assert_eq!(same, state);
    }

    #[test]
    fn shorter_forecast_clamps_offset() {
        let state = update(&AppState::new(6), Event::ForecastLoaded(forecast(3, 0.0)));
        assert_eq!(state.offset, 2);
        assert!(state.view().is_ok());
    }

    #[test]
    fn empty_daily_view_is_out_of_range() {
        let state = update(&AppState::default(), Event::ForecastLoaded(forecast(0, 0.0)));
        assert_eq!(state.offset, 0);
        assert!(matches!(state.view(), Err(AppError::OffsetOutOfRange { .. })));
    }

    #[test]
    fn failure_hides_previous_forecast_until_reload() {
        let loaded = update(&AppState::default(), Event::ForecastLoaded(forecast(5, 0.0)));
        let failed = update(&loaded, Event::ForecastFailed("upstream timeout".to_string()));
        assert!(failed.is_loaded());
        match failed.view() {
            Err(AppError::ForecastFailed(reason)) => assert_eq!(reason, "upstream timeout"),
            other => panic!("expected ForecastFailed, got {other:?}"),
        }

        let reloaded = update(&failed, Event::ForecastLoaded(forecast(5, 0.0)));
        assert!(reloaded.view().is_ok());
    }
}
