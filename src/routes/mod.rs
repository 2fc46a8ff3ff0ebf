//! Route definitions for the jobtrack API.

pub mod applications;
pub mod contacts;
pub mod dashboard;
pub mod health;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full router: health probes plus everything under `/api`.
pub fn router(state: AppState) -> Router {
    let application_routes = Router::new()
        .route(
            "/applications",
            get(applications::list).post(applications::create),
        )
        .route(
            "/applications/{id}",
            get(applications::get_by_id)
                .put(applications::update)
                .delete(applications::delete),
        );

    let contact_routes = Router::new()
        .route("/contacts", get(contacts::list).post(contacts::create))
        .route(
            "/contacts/{id}",
            get(contacts::get_by_id)
                .put(contacts::update)
                .delete(contacts::delete),
        );

    let dashboard_routes = Router::new().route("/dashboard/stats", get(dashboard::stats));

    let api = Router::new()
        .merge(application_routes)
        .merge(contact_routes)
        .merge(dashboard_routes);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
