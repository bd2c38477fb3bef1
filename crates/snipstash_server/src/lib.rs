//! HTTP server wiring for SnipStash: router, middleware and shared state.

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for snippet and system endpoints.
pub mod handlers;

pub use snipstash_core::{config, db, models, AppError, Config, Database, DEFAULT_PORT};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use snipstash_core::constants::{API_VERSION, API_VERSION_HEADER};
use snipstash_core::env::non_empty_var;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

const CORS_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    /// Reference point for the uptime reported by `/api/health`.
    pub started_at: Instant,
}

impl AppState {
    /// Construct shared application state; the uptime clock starts now.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// With `allow_public_access` unset, CORS only admits the local origins on
/// the configured port.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors_port = state.config.port;
    create_app_with_cors_port(state, allow_public_access, cors_port)
}

fn parse_bind_override(fallback: SocketAddr) -> SocketAddr {
    let Some(value) = non_empty_var("BIND") else {
        return fallback;
    };
    value.parse().unwrap_or_else(|err| {
        tracing::warn!("Invalid BIND='{}': {}. Falling back to {}", value, err, fallback);
        fallback
    })
}

/// Resolve the listener address from `BIND` and the public-access policy.
///
/// Non-loopback addresses are pinned back to `127.0.0.1` (keeping the port)
/// unless public access is allowed.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let loopback = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
    let requested = parse_bind_override(loopback);
    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from((Ipv4Addr::LOCALHOST, requested.port()))
}

fn local_origins(port: u16) -> Vec<HeaderValue> {
    ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
        .collect()
}

fn cors_layer(allow_public_access: bool, cors_port: u16) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(CORS_METHODS);
    if allow_public_access {
        layer.allow_origin(Any).allow_headers(Any)
    } else {
        layer
            .allow_origin(local_origins(cors_port))
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    }
}

fn api_routes() -> Router<AppState> {
    use handlers::{snippet, system};

    Router::new()
        .route(
            "/api/snippets",
            get(snippet::list_snippets).post(snippet::create_snippet),
        )
        .route(
            "/api/snippets/:id",
            get(snippet::get_snippet)
                .put(snippet::update_snippet)
                .delete(snippet::delete_snippet),
        )
        .route("/api/health", get(system::health))
        .fallback(system::fallback)
        .method_not_allowed_fallback(system::fallback)
}

fn create_app_with_cors_port(state: AppState, allow_public_access: bool, cors_port: u16) -> Router {
    let body_limit = state.config.max_body_size;

    api_routes()
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_static(API_VERSION),
        ))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(allow_public_access, cors_port)),
        )
}

fn listener_cors_port(listener: &tokio::net::TcpListener, fallback_port: u16) -> u16 {
    listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(fallback_port)
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let cors_port = listener_cors_port(&listener, state.config.port);
    let app = create_app_with_cors_port(state, allow_public_access, cors_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
