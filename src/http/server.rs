//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with one route per public placeholder
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Resolve each path placeholder through the route binder
//! - Apply directory snapshot updates from the seed watcher
//! - Graceful shutdown on Ctrl-C or an explicit signal
//!
//! # Design Decisions
//! - Every resolution failure maps to a bare 404; the response does not
//!   reveal whether the token was malformed or the record missing
//! - The directory snapshot is loaded once per request, so a reload
//!   mid-request cannot mix two snapshots
//! - Nested placeholders resolve left to right, handler gets the leaf

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer, ServiceBuilderExt,
};

use crate::config::AppConfig;
use crate::http::request::MakeRequestUuid;
use crate::http::response::EntityView;
use crate::ident::HashidCodec;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{EntityKind, RouteBinder};
use crate::store::{Entity, MemoryDirectory};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<HashidCodec>,
    pub binder: RouteBinder,
    pub directory: Arc<ArcSwap<MemoryDirectory>>,
}

/// HTTP server for the resolution core.
pub struct HttpServer {
    router: Router,
    directory: Arc<ArcSwap<MemoryDirectory>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(
        config: &AppConfig,
        codec: Arc<HashidCodec>,
        directory: Arc<ArcSwap<MemoryDirectory>>,
    ) -> Self {
        let state = AppState {
            binder: RouteBinder::new(codec.clone()),
            codec,
            directory: directory.clone(),
        };

        let router = Self::build_router(config, state);
        Self { router, directory }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .set_x_request_id(MakeRequestUuid)
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(track_requests))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetResponseHeaderLayer::overriding(
                header::SERVER,
                HeaderValue::from_static("linkboard"),
            ))
            .propagate_x_request_id();

        Router::new()
            .route("/g/{group}", get(show_group))
            .route("/u/{user}", get(show_user))
            .route("/c/{content}", get(show_content))
            .route("/c/{content}/{comment}", get(show_comment))
            .route("/c/{content}/{comment}/{reply}", get(show_comment_reply))
            .route("/related/{related}", get(show_related))
            .route("/e/{entry}", get(show_entry))
            .route("/e/{entry}/{reply}", get(show_entry_reply))
            .route("/conversations/{conversation}", get(show_conversation))
            .route("/notifications/{notification}", get(show_notification))
            .route("/resolve/{kind}/{segment}", get(resolve_any))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server on the given listener.
    ///
    /// Directory snapshots arriving on `directory_updates` are swapped
    /// in atomically; in-flight requests keep the snapshot they loaded.
    pub async fn run(
        self,
        listener: TcpListener,
        mut directory_updates: mpsc::UnboundedReceiver<MemoryDirectory>,
        shutdown_signal: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let directory = self.directory.clone();
        tokio::spawn(async move {
            while let Some(snapshot) = directory_updates.recv().await {
                let entities = snapshot.len();
                directory.store(Arc::new(snapshot));
                metrics::record_seed_reload();
                metrics::record_directory_size(entities);
                tracing::info!(entities, "Entity directory snapshot replaced");
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown_signal))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Request accounting middleware.
async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

/// Resolve one placeholder segment or produce the uniform 404.
fn resolve_segment(
    state: &AppState,
    kind: EntityKind,
    segment: &str,
) -> Result<Entity, StatusCode> {
    let directory = state.directory.load();
    match state.binder.resolve(&**directory, kind, segment) {
        Ok(entity) => {
            metrics::record_resolution(kind, "hit");
            Ok(entity)
        }
        Err(e) => {
            tracing::debug!(kind = %kind, segment = %segment, error = %e, "Resolution failed");
            metrics::record_resolution(kind, "miss");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

fn view(state: &AppState, entity: &Entity) -> Json<EntityView> {
    Json(EntityView::new(entity, &state.codec))
}

async fn show_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::Group, &group)?;
    Ok(view(&state, &entity))
}

async fn show_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::User, &user)?;
    Ok(view(&state, &entity))
}

async fn show_content(
    State(state): State<AppState>,
    Path(content): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::Content, &content)?;
    Ok(view(&state, &entity))
}

async fn show_comment(
    State(state): State<AppState>,
    Path((content, comment)): Path<(String, String)>,
) -> Result<Json<EntityView>, StatusCode> {
    resolve_segment(&state, EntityKind::Content, &content)?;
    let entity = resolve_segment(&state, EntityKind::Comment, &comment)?;
    Ok(view(&state, &entity))
}

async fn show_comment_reply(
    State(state): State<AppState>,
    Path((content, comment, reply)): Path<(String, String, String)>,
) -> Result<Json<EntityView>, StatusCode> {
    resolve_segment(&state, EntityKind::Content, &content)?;
    resolve_segment(&state, EntityKind::Comment, &comment)?;
    let entity = resolve_segment(&state, EntityKind::CommentReply, &reply)?;
    Ok(view(&state, &entity))
}

async fn show_related(
    State(state): State<AppState>,
    Path(related): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::ContentRelated, &related)?;
    Ok(view(&state, &entity))
}

async fn show_entry(
    State(state): State<AppState>,
    Path(entry): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::Entry, &entry)?;
    Ok(view(&state, &entity))
}

async fn show_entry_reply(
    State(state): State<AppState>,
    Path((entry, reply)): Path<(String, String)>,
) -> Result<Json<EntityView>, StatusCode> {
    resolve_segment(&state, EntityKind::Entry, &entry)?;
    let entity = resolve_segment(&state, EntityKind::EntryReply, &reply)?;
    Ok(view(&state, &entity))
}

async fn show_conversation(
    State(state): State<AppState>,
    Path(conversation): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::Conversation, &conversation)?;
    Ok(view(&state, &entity))
}

async fn show_notification(
    State(state): State<AppState>,
    Path(notification): Path<String>,
) -> Result<Json<EntityView>, StatusCode> {
    let entity = resolve_segment(&state, EntityKind::Notification, &notification)?;
    Ok(view(&state, &entity))
}

/// Kind-tagged resolution, used by the management CLI.
async fn resolve_any(
    State(state): State<AppState>,
    Path((kind, segment)): Path<(String, String)>,
) -> Response {
    let kind: EntityKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected resolve request");
            return (StatusCode::BAD_REQUEST, "Unknown entity kind").into_response();
        }
    };

    match resolve_segment(&state, kind, &segment) {
        Ok(entity) => view(&state, &entity).into_response(),
        Err(status) => status.into_response(),
    }
}
