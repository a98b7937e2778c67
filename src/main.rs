mod api;
mod config;
mod detector;
mod error;
mod forecast;
mod state;
mod types;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::forecast::parse_onecall;
use crate::state::{AppState, Event};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let api_state = ApiState::new(AppState::new(cfg.default_offset));

    // --- Optional preloaded forecast ---
    match &cfg.forecast_path {
        Some(path) => preload_forecast(&api_state, path).await,
        None => info!("FORECAST_PATH not set, waiting for PUT /forecast"),
    }

    // --- HTTP API server ---
    let app = router(api_state, cfg.max_body_bytes);
    let bind_addr = format!("{}:{}", cfg.bind_addr, cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load a One Call JSON file into the view state. Failures are recorded in the
/// state rather than aborting startup.
async fn preload_forecast(api_state: &ApiState, path: &str) {
    api_state.dispatch(Event::LoadStarted).await;

    let loaded = match tokio::fs::read(path).await {
        Ok(bytes) => parse_onecall(&bytes),
        Err(e) => Err(e.into()),
    };

    match loaded {
        Ok(snapshot) => {
            let (hourly, daily) = (snapshot.hourly.len(), snapshot.daily.len());
            let app = api_state
                .dispatch(Event::ForecastLoaded(Arc::new(snapshot)))
                .await;
            info!(hourly, daily, offset = app.offset, "Preloaded forecast from {path}");
            match app.view() {
                Ok(view) => info!(
                    event = "MOOD",
                    offset = view.offset,
                    mood = %view.mood,
                    "Current mood: {}", view.mood,
                ),
                Err(e) => warn!("Preloaded forecast has no view: {e}"),
            }
        }
        Err(e) => {
            warn!("Could not preload forecast from {path}: {e}");
            api_state.dispatch(Event::ForecastFailed(e.to_string())).await;
        }
    }
}
