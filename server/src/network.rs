//! HTTP surface of the journal
//!
//! | Method  | Path             | Response                              |
//! |---------|------------------|---------------------------------------|
//! | GET     | `/`              | UI page                               |
//! | GET     | `/Character.png` | character image                       |
//! | GET     | `/api/gamestate` | current snapshot JSON                 |
//! | POST    | `/api/tagplayer` | `200`, or `500` on a malformed body   |
//! | OPTIONS | any              | `204`, no body                        |
//!
//! Anything else is `404`. Every response carries permissive CORS headers.

use crate::assets::Assets;
use crate::error::TagError;
use crate::publisher::Publisher;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use journal_shared::TagRequest;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Handler state, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub publisher: Arc<Publisher>,
    pub assets: Assets,
}

pub fn router(publisher: Arc<Publisher>, assets: Assets) -> Router {
    let state = AppState { publisher, assets };

    Router::new()
        .route("/", get(index_page).fallback(not_found))
        .route("/Character.png", get(character_image).fallback(not_found))
        .route("/api/gamestate", get(game_state).fallback(not_found))
        .route("/api/tagplayer", post(tag_player).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// Answers preflights and stamps CORS headers on everything else.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}

async fn index_page(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        state.assets.index_html.clone(),
    )
        .into_response()
}

async fn character_image(State(state): State<AppState>) -> Response {
    if state.assets.character_png.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }

    (
        [(header::CONTENT_TYPE, "image/png")],
        state.assets.character_png.clone(),
    )
        .into_response()
}

async fn game_state(State(state): State<AppState>) -> Response {
    let snapshot = state.publisher.snapshot().await;
    (
        [(header::CONTENT_TYPE, "application/json")],
        String::from(&*snapshot),
    )
        .into_response()
}

/// Body read failures (including the size limit) are `500` like any other bad tag.
async fn tag_player(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, TagError> {
    let request = body
        .map_err(TagError::from)
        .and_then(|body| TagRequest::parse(&body).map_err(TagError::from))
        .map_err(|e| {
            warn!("Failed to tag player: {}", e);
            e
        })?;

    state.publisher.apply_tag(&request).await;
    Ok(StatusCode::OK)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Listener plus router, bound but not yet serving
pub struct NetworkServer {
    listener: TcpListener,
    app: Router,
}

impl NetworkServer {
    pub async fn bind(addr: &str, app: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("HTTP server listening on {}", listener.local_addr()?);
        Ok(Self { listener, app })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until the listener fails; each connection gets its own task.
    pub async fn run(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.app).await
    }
}
