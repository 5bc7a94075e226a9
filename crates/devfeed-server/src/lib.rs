//! HTTP API for event classification.
//!
//! Provides a local HTTP API that renderers can call to merge a batch of
//! events and turn it into icons, action text and card rows.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use devfeed_core::{
    CardOptions, ColumnHeader, DescribeOptions, EventCard, GitHubEvent, IconDescriptor, Palette,
    RequestSubtype, RequestType, classify, column_header, describe, event_cards,
    merge_similar_events_with,
};
use devfeed_fs::{FeedConfig, FeedStore, FeedSummary};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Server state shared across handlers.
struct AppState {
    store_path: PathBuf,
}

impl AppState {
    /// Configuration of the store, or defaults when no store exists.
    fn config(&self) -> FeedConfig {
        match FeedStore::open(&self.store_path) {
            Ok(store) => store.config().clone(),
            Err(e) => {
                debug!(error = %e, "No feed store, using default config");
                FeedConfig::default()
            }
        }
    }
}

/// Build the API router for the store at `store_path`.
pub fn router(store_path: &std::path::Path) -> Router {
    let state = Arc::new(AppState {
        store_path: store_path.to_path_buf(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/classify", post(classify_event))
        .route("/describe", post(describe_event))
        .route("/merge", post(merge_events))
        .route("/cards", post(cards))
        .route("/columns/{type}/{subtype}", get(column))
        .route("/feeds", get(list_feeds))
        .route("/feeds/{name}/cards", get(feed_cards))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server.
///
/// # Errors
/// Returns error if binding fails or server encounters an error.
pub async fn serve(store_path: &std::path::Path, host: &str, port: u16) -> Result<()> {
    let app = router(store_path);

    let addr = format!("{host}:{port}");
    info!(address = %addr, "Starting devfeed server");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Request/Response types ---

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    event: GitHubEvent,
    /// Overrides the store palette.
    #[serde(default)]
    palette: Option<Palette>,
}

#[derive(Debug, Deserialize)]
struct DescribeRequest {
    event: GitHubEvent,
    #[serde(default)]
    options: DescribeOptions,
}

#[derive(Debug, Serialize)]
struct DescribeResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct MergeRequest {
    events: Vec<GitHubEvent>,
}

#[derive(Debug, Serialize)]
struct MergeResponse {
    /// Whether any events were folded together.
    merged: bool,
    count: usize,
    events: Vec<GitHubEvent>,
}

#[derive(Debug, Deserialize)]
struct CardsRequest {
    events: Vec<GitHubEvent>,
    #[serde(default)]
    options: Option<CardOptions>,
    /// Merge similar events first (default: true).
    #[serde(default)]
    merge: Option<bool>,
}

#[derive(Debug, Serialize)]
struct CardsResponse {
    cards: Vec<EventCard>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Handlers ---

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn classify_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Json<IconDescriptor> {
    let palette = req.palette.unwrap_or_else(|| state.config().palette);
    Json(classify(&req.event, Some(&palette)))
}

async fn describe_event(Json(req): Json<DescribeRequest>) -> Json<DescribeResponse> {
    Json(DescribeResponse {
        text: describe(&req.event, req.options),
    })
}

async fn merge_events(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MergeRequest>,
) -> Json<MergeResponse> {
    let policy = state.config().merge;

    let merged = match merge_similar_events_with(&policy, &req.events) {
        Cow::Borrowed(_) => None,
        Cow::Owned(events) => Some(events),
    };
    let (merged, events) = match merged {
        Some(events) => (true, events),
        None => (false, req.events),
    };

    Json(MergeResponse {
        merged,
        count: events.len(),
        events,
    })
}

async fn cards(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CardsRequest>,
) -> Json<CardsResponse> {
    let config = state.config();
    let options = req.options.unwrap_or(CardOptions {
        repo_is_known: config.feed.repo_is_known,
    });
    let merge = req.merge.unwrap_or(!config.feed.disable_merge);

    let cards = build_cards(&config, &req.events, options, merge);

    Json(CardsResponse {
        count: cards.len(),
        cards,
    })
}

async fn column(
    Path((request_type, subtype)): Path<(RequestType, RequestSubtype)>,
) -> Json<ColumnHeader> {
    Json(column_header(&request_type, &subtype))
}

async fn list_feeds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FeedSummary>>, AppError> {
    let store = FeedStore::open(&state.store_path)?;
    Ok(Json(store.list_feeds()?))
}

async fn feed_cards(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CardsResponse>, AppError> {
    let store = FeedStore::open(&state.store_path)?;
    let events = store.load_feed(&name)?;
    let config = store.config();

    let options = CardOptions {
        repo_is_known: config.feed.repo_is_known,
    };
    let cards = build_cards(config, &events, options, !config.feed.disable_merge);

    Ok(Json(CardsResponse {
        count: cards.len(),
        cards,
    }))
}

fn build_cards(
    config: &FeedConfig,
    events: &[GitHubEvent],
    options: CardOptions,
    merge: bool,
) -> Vec<EventCard> {
    if merge {
        let merged = merge_similar_events_with(&config.merge, events);
        event_cards(&merged, options, Some(&config.palette))
    } else {
        event_cards(events, options, Some(&config.palette))
    }
}

// --- Error handling ---

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let message = self.0.to_string();
        let status = if message.contains("not found") {
            StatusCode::NOT_FOUND
        } else if message.starts_with("invalid") {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
