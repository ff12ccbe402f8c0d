//! HTTP interface - an `axum` router over the core operations.
//!
//! Every route lives under `/api`. Read routes are public; write routes take a
//! [`auth::Caller`] extractor that enforces the role the route requires.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::AppState;

use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use handlers::{agents, catalog, elements, lists, records, roster, semester, users};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Routes relative to `/api`.
pub fn router(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/users", get(users::list_users))
        .route("/users/register", post(users::register))
        .route("/users/pending", get(users::list_pending))
        .route("/users/{id}", delete(users::delete))
        .route("/users/{id}/approve", post(users::approve))
        .route("/users/{id}/role", patch(users::update_role))
        .route("/agents", get(agents::list).post(agents::create))
        .route("/agents/{id}", delete(agents::delete))
        .route("/agents/{id}/sector", patch(agents::assign_sector))
        .route("/sectors", get(catalog::sectors))
        .route("/stations", get(catalog::stations))
        .route("/elements", get(elements::list).post(elements::create))
        .route("/elements/counts", get(elements::counts))
        .route(
            "/elements/{id}",
            put(elements::update).delete(elements::delete),
        )
        .route("/elements/{id}/toggle", post(elements::toggle))
        .route(
            "/maintenance",
            get(records::maintenance_history).post(records::add_maintenance),
        )
        .route("/maintenance/{id}", delete(records::delete_maintenance))
        .route(
            "/faults",
            get(records::fault_history).post(records::add_fault),
        )
        .route("/faults/{id}", delete(records::delete_fault))
        .route("/reports/daily", get(records::daily_report))
        .route("/reports/monthly", get(records::monthly_report))
        .route("/lists", get(lists::get_list).post(lists::save_list))
        .route("/stats", get(lists::semester_stats))
        .route("/roster", get(roster::get_roster).post(roster::save_roster))
        .route("/roster/stats", get(roster::roster_stats))
        .route("/semester/reset", post(semester::reset))
        .with_state(state)
}

/// The complete application: `/api` routes plus CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", router(state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
