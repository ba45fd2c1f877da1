use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use anyhow::{Context, Result};
use log::{debug, error, info};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::clock::{is_correct, CanonicalTime};
use crate::config::Config;
use crate::leaderboard::{Leaderboard, LeaderboardError, ScoreEntry};
use crate::parser::{self, TimeParseError};
use crate::round::{random_round, Round};

// API state that will be shared across handlers
pub struct ApiState {
    pub config: Config,
    // Serializes the read-modify-write of score submissions
    pub leaderboard: Mutex<Leaderboard>,
}

impl ApiState {
    pub fn new(config: Config) -> Result<Self> {
        let leaderboard = Leaderboard::from_config(&config.leaderboard)?;
        Ok(Self::with_leaderboard(config, leaderboard))
    }

    pub fn with_leaderboard(config: Config, leaderboard: Leaderboard) -> Self {
        Self { config, leaderboard: Mutex::new(leaderboard) }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(rename = "guessText")]
    pub guess_text: Option<String>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub ok: bool,
    pub parsed: Option<CanonicalTime>,
    pub reason: Option<TimeParseError>,
    pub target: Round,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub name: Option<String>,
    pub score: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { error: message.into() }))
}

/// Parse a guess and grade it against the round it was made for
pub fn check_guess(guess_text: &str, target: Round) -> CheckResponse {
    match parser::parse(guess_text) {
        Ok(parsed) => CheckResponse {
            ok: is_correct(&parsed, target.hour, target.minute),
            parsed: Some(parsed),
            reason: None,
            target,
        },
        Err(reason) => CheckResponse { ok: false, parsed: None, reason: Some(reason), target },
    }
}

async fn round_handler() -> Json<Round> {
    Json(random_round())
}

async fn check_handler(payload: Result<Json<CheckRequest>, JsonRejection>) -> ApiResult<CheckResponse> {
    let Json(request) = payload
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e)))?;

    let (Some(guess_text), Some(hour), Some(minute)) =
        (request.guess_text, request.hour, request.minute)
    else {
        return Err(api_error(StatusCode::BAD_REQUEST, "guessText, hour and minute are required"));
    };
    if hour > 23 || minute > 59 {
        return Err(api_error(StatusCode::BAD_REQUEST, "Target time is out of range"));
    }

    let response = check_guess(&guess_text, Round { hour, minute });
    debug!(
        "Checked guess '{}' against {:02}:{:02}: ok={}",
        guess_text, hour, minute, response.ok
    );
    Ok(Json(response))
}

async fn leaderboard_handler(State(state): State<Arc<ApiState>>) -> Json<Vec<ScoreEntry>> {
    let leaderboard = state.leaderboard.lock().await;
    Json(leaderboard.top())
}

async fn score_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> ApiResult<OkResponse> {
    let Json(request) = payload
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e)))?;
    let (Some(name), Some(score)) = (request.name, request.score) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Name and score are required"));
    };

    let leaderboard = state.leaderboard.lock().await;
    match leaderboard.submit(&name, score) {
        Ok(entry) => {
            info!("Recorded score {} for '{}'", entry.score, entry.name);
            Ok(Json(OkResponse { ok: true }))
        }
        Err(e) if e.downcast_ref::<LeaderboardError>().is_some() => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            error!("Failed to save score: {:#}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save score"))
        }
    }
}

// Health check endpoint
async fn health_check() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}

/// Build the application router
pub fn router(state: Arc<ApiState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let static_dir = state.config.server.static_dir.clone();

    let mut app: Router = Router::new()
        .route("/api/round", get(round_handler))
        .route("/api/check", post(check_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/score", post(score_handler))
        .route("/api/health", get(health_check))
        .with_state(state);

    if let Some(dir) = static_dir {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
}

// Create and start the API server
pub async fn start_api_server(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(ApiState::new(config)?);
    info!(
        "Leaderboard stored at {}",
        state.leaderboard.lock().await.path().display()
    );
    let app = router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await.context("API server stopped unexpectedly")?;

    Ok(())
}
