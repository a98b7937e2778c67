use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::health::HealthState;
use crate::detector::{classify, outlook, DayMood, Signals};
use crate::error::{AppError, Result};
use crate::forecast::parse_onecall;
use crate::state::{update, AppState, Event, LoadStatus, MoodView};
use crate::types::ForecastSnapshot;

#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<RwLock<AppState>>,
    pub health: Arc<HealthState>,
}

impl ApiState {
    pub fn new(app: AppState) -> Self {
        Self {
            app: Arc::new(RwLock::new(app)),
            health: Arc::new(HealthState::new()),
        }
    }

    /// Apply one event to the shared view state.
    pub async fn dispatch(&self, event: Event) -> AppState {
        let mut guard = self.app.write().await;
        *guard = update(&guard, event);
        guard.clone()
    }

    /// Select an offset on the loaded forecast. The bounds check and the update
    /// run under one write guard so a concurrent reload cannot slip in between.
    pub async fn select_offset(&self, offset: usize) -> Result<AppState> {
        let mut guard = self.app.write().await;
        guard
            .forecast
            .as_deref()
            .ok_or(AppError::NoForecast)?
            .check_offset(offset)?;
        *guard = update(&guard, Event::OffsetSelected(offset));
        Ok(guard.clone())
    }

    fn parse(&self, body: &[u8]) -> Result<ForecastSnapshot> {
        parse_onecall(body).inspect_err(|e| {
            self.health.inc_rejected_inputs();
            warn!("Rejected forecast body: {e}");
        })
    }
}

pub fn router(state: ApiState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/classify", post(post_classify))
        .route("/outlook", post(post_outlook))
        .route("/forecast", get(get_forecast).put(put_forecast))
        .route("/forecast/loading", post(post_forecast_loading))
        .route("/forecast/failure", post(post_forecast_failure))
        .route("/offset/:offset", put(put_offset))
        .route("/mood", get(get_mood))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ClassifyQuery {
    pub offset: Option<usize>,
}

#[derive(Deserialize)]
pub struct FailureBody {
    pub reason: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub forecast_loaded: bool,
    pub load: LoadStatus,
    pub offset: usize,
    pub classifications: u64,
    pub rejected_inputs: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let app = state.app.read().await;
    Json(HealthResponse {
        forecast_loaded: app.is_loaded(),
        load: app.status.clone(),
        offset: app.offset,
        classifications: state.health.classifications(),
        rejected_inputs: state.health.rejected_inputs(),
    })
}

/// Stateless: classify the posted forecast without touching the view.
async fn post_classify(
    State(state): State<ApiState>,
    Query(params): Query<ClassifyQuery>,
    body: Bytes,
) -> Result<Json<MoodView>> {
    let snapshot = state.parse(&body)?;
    let offset = params.offset.unwrap_or(0);
    if let Err(e) = snapshot.check_offset(offset) {
        state.health.inc_rejected_inputs();
        return Err(e);
    }

    let view = MoodView {
        offset,
        mood: classify(&snapshot, offset),
        signals: Signals::derive(&snapshot, offset),
    };
    state.health.inc_classifications(1);
    log_mood(&view);
    Ok(Json(view))
}

async fn post_outlook(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<Vec<DayMood>>> {
    let snapshot = state.parse(&body)?;
    let days = outlook(&snapshot);
    state.health.inc_classifications(days.len() as u64);
    debug!(days = days.len(), "outlook computed");
    Ok(Json(days))
}

async fn put_forecast(State(state): State<ApiState>, body: Bytes) -> Result<Json<MoodView>> {
    let snapshot = state.parse(&body)?;
    let (hourly, daily) = (snapshot.hourly.len(), snapshot.daily.len());
    let app = state.dispatch(Event::ForecastLoaded(Arc::new(snapshot))).await;
    info!(hourly, daily, offset = app.offset, "Forecast loaded");
    view_response(&state, &app)
}

/// The loaded forecast as the classifier sees it, for hourly and snowfall views.
async fn get_forecast(State(state): State<ApiState>) -> Result<Json<ForecastSnapshot>> {
    let app = state.app.read().await;
    app.forecast.as_deref().cloned().map(Json).ok_or(AppError::NoForecast)
}

async fn post_forecast_loading(State(state): State<ApiState>) -> Json<LoadStatus> {
    let app = state.dispatch(Event::LoadStarted).await;
    info!("Forecast load started");
    Json(app.status)
}

async fn post_forecast_failure(
    State(state): State<ApiState>,
    Json(body): Json<FailureBody>,
) -> Json<LoadStatus> {
    warn!("Forecast load failed: {}", body.reason);
    let app = state.dispatch(Event::ForecastFailed(body.reason)).await;
    Json(app.status)
}

async fn put_offset(
    State(state): State<ApiState>,
    Path(offset): Path<usize>,
) -> Result<Json<MoodView>> {
    let app = state.select_offset(offset).await?;
    info!(offset, "Offset selected");
    view_response(&state, &app)
}

async fn get_mood(State(state): State<ApiState>) -> Result<Json<MoodView>> {
    let app = state.app.read().await.clone();
    view_response(&state, &app)
}

fn view_response(state: &ApiState, app: &AppState) -> Result<Json<MoodView>> {
    let view = app.view()?;
    state.health.inc_classifications(1);
    log_mood(&view);
    Ok(Json(view))
}

fn log_mood(v: &MoodView) {
    debug!(
        event = "MOOD",
        offset = v.offset,
        mood = %v.mood,
        snow48h_mm = v.signals.snow48h_mm,
        snow2d_mm = v.signals.snow2d_mm,
        warm3d = v.signals.warm3d_count,
        warm5d = v.signals.warm5d_count,
        sun3d = v.signals.sun3d_count,
        sun5d = v.signals.sun5d_count,
        freezethaw = v.signals.freezethaw_count,
        "MOOD | offset: {} | mood: {} | snow48h: {:.1}mm | snow2d: {:.1}mm",
        v.offset, v.mood, v.signals.snow48h_mm, v.signals.snow2d_mm,
    );
}
