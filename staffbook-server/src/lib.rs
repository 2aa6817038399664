//! staffbook-server library - departments and employees REST service
//!
//! Layers, outermost first:
//! - [`api`]: axum handlers mapping HTTP verbs and paths to service calls
//! - [`schema`]: payload validation and response serialization
//! - [`services`]: CRUD and query operations over the SQLite store

use axum::Router;
use sqlx::SqlitePool;
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod cli;
pub mod error;
pub mod schema;
pub mod services;

pub use error::{ApiError, ApiResult};

/// URL prefix for every REST resource
pub const API_PREFIX: &str = "/api/v1";

/// Router wrapped so that a trailing slash is dropped before route matching
pub type App = NormalizePath<Router>;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, owned by `main` for the process lifetime
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Unsupported methods on a known path are answered with 405 by the method
/// router. `/api/v1/departments/` and `/api/v1/departments` are the same path.
pub fn build_router(state: AppState) -> App {
    use axum::routing::get;

    let resources = Router::new()
        .route(
            "/departments",
            get(api::departments::list).post(api::departments::create),
        )
        .route(
            "/departments/:id",
            get(api::departments::show)
                .put(api::departments::replace)
                .patch(api::departments::modify)
                .delete(api::departments::remove),
        )
        .route(
            "/departments/:id/employees",
            get(api::departments::list_employees).post(api::departments::create_employee),
        )
        .route(
            "/departments/:id/employees/search",
            get(api::search::search_department),
        )
        .route(
            "/employees",
            get(api::employees::list).post(api::employees::create),
        )
        .route("/employees/search", get(api::search::search_all))
        .route(
            "/employees/:id",
            get(api::employees::show)
                .put(api::employees::replace)
                .patch(api::employees::modify)
                .delete(api::employees::remove),
        );

    let router = Router::new()
        .nest(API_PREFIX, resources)
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Layers added with `Router::layer` run after routing; this one must not
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
