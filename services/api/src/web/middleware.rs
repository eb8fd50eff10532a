//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use lesson_plan_core::AuthSession;
use std::sync::Arc;
use tracing::error;

use crate::web::session::{read_cookie, Flash, SESSION_COOKIE};
use crate::web::state::AppState;

/// The logged-in user, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Looks up the live session named by the request's session cookie.
pub async fn current_session(state: &AppState, headers: &HeaderMap) -> Option<AuthSession> {
    let session_id = read_cookie(headers, SESSION_COOKIE)?;
    state
        .sessions
        .get(session_id)
        .await
        .map_err(|e| {
            error!("Failed to look up auth session: {:?}", e);
        })
        .ok()
        .flatten()
}

/// Middleware that validates the session cookie.
///
/// If valid, inserts the `CurrentUser` into request extensions for handlers to use.
/// Otherwise redirects to the login page with a flash message.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    match current_session(&state, req.headers()).await {
        Some(session) => {
            req.extensions_mut().insert(CurrentUser(session.username));
            next.run(req).await
        }
        None => (
            AppendHeaders([(
                header::SET_COOKIE,
                Flash::LoginRequired.cookie(state.config.cookie_secure),
            )]),
            Redirect::to("/login"),
        )
            .into_response(),
    }
}
