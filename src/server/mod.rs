//! API server
//!
//! Routes:
//!
//! - `GET /api/posts?tag=<filter>` - blog posts, newest first
//! - `GET /api/resume/academic`, `GET /api/resume/work` - resume timelines
//! - `GET|POST /api/v0/hello-world` - cookie round-trip demo
//!
//! Anything else, including other methods on those paths, is a 404.

mod error;

pub use error::ApiError;

use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{ContentStore, LoadError};
use crate::query;
use crate::Folio;

/// Cookie set by `POST /api/v0/hello-world`
pub const SESSION_COOKIE: &str = "name=folio";

const GREETING: &str = "Hello, world!";

/// Server state
#[derive(Clone)]
struct AppState {
    store: Arc<ContentStore>,
}

/// Build the API router over a content store
pub fn router(store: ContentStore) -> Router {
    let state = AppState {
        store: Arc::new(store),
    };

    // `get` also answers HEAD, so HEAD is routed to the 404 handler explicitly
    Router::new()
        .route(
            "/api/posts",
            get(list_posts).head(not_found).fallback(not_found),
        )
        .route(
            "/api/resume/academic",
            get(academic_timeline).head(not_found).fallback(not_found),
        )
        .route(
            "/api/resume/work",
            get(work_timeline).head(not_found).fallback(not_found),
        )
        .route(
            "/api/v0/hello-world",
            get(hello_world)
                .post(hello_world_post)
                .head(not_found)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let store = folio.store();
    tracing::info!("Serving content from {:?}", store.root());
    let app = router(store);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}

/// Query parameters for `/api/posts`
#[derive(Debug, Deserialize)]
struct PostsParams {
    tag: Option<String>,
}

async fn list_posts(
    State(state): State<AppState>,
    params: Result<Query<PostsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    tracing::debug!("List posts: {:?}", params);

    let posts = load(&state, move |store| {
        query::list_posts(store, params.tag.as_deref())
    })
    .await?;

    json_response(&posts)
}

async fn academic_timeline(State(state): State<AppState>) -> Result<Response, ApiError> {
    let items = load(&state, |store| store.load_resume()).await?;
    json_response(&query::academic_timeline(&items))
}

async fn work_timeline(State(state): State<AppState>) -> Result<Response, ApiError> {
    let items = load(&state, |store| store.load_resume()).await?;
    json_response(&query::work_timeline(&items))
}

#[derive(Debug, Serialize)]
struct Greeting {
    message: &'static str,
    now: i64,
    authenticated: bool,
}

async fn hello_world(headers: HeaderMap) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    if content_type == Some("application/json") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    Json(Greeting {
        message: GREETING,
        now: chrono::Utc::now().timestamp_millis(),
        authenticated: has_session_cookie(&headers),
    })
    .into_response()
}

async fn hello_world_post() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, SESSION_COOKIE)],
        Json(serde_json::json!({ "message": GREETING })),
    )
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Whether any `Cookie` header carries the session cookie
fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|cookie| cookie.trim() == SESSION_COOKIE)
}

/// Run a blocking collection load off the async workers
async fn load<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&ContentStore) -> Result<T, LoadError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let value = tokio::task::spawn_blocking(move || f(&store)).await??;
    Ok(value)
}

/// Pretty-printed JSON body
fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_string_pretty(value)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
