pub mod auth;
pub mod middleware;
pub mod pages;
pub mod rest;
pub mod session;
pub mod state;

pub use middleware::require_auth;
pub use rest::{generate_plan_handler, index_handler};

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{login_handler, login_page_handler, logout_handler, register_handler, register_page_handler};
use rest::ApiDoc;
use state::AppState;

/// Builds the complete application: pages, the plan endpoint and the Swagger UI.
pub fn app(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/login", get(login_page_handler).post(login_handler))
        .route("/logout", get(logout_handler))
        .route("/cadastro", get(register_page_handler).post(register_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/", get(index_handler))
        .route("/gerar", post(generate_plan_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let pages_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    Router::new()
        .merge(pages_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
