use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        organizations::{
            create_organization, get_department, get_organization, get_report,
            list_project_employees, list_records,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/organizations", post(create_organization))
        .route("/organizations/{org}", get(get_organization))
        .route("/organizations/{org}/report", get(get_report))
        .route("/organizations/{org}/records/{kind}", get(list_records))
        .route(
            "/organizations/{org}/departments/{name}",
            get(get_department),
        )
        .route(
            "/organizations/{org}/projects/{name}/employees",
            get(list_project_employees),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
