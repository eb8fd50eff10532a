//! services/api/src/web/auth.rs
//!
//! Authentication pages and endpoints: login, logout and registration.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use lesson_plan_core::ports::PortError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::web::middleware::current_session;
use crate::web::pages;
use crate::web::session::{self, Flash, Notice};
use crate::web::state::AppState;

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsForm {
    fn trimmed(&self) -> (&str, &str) {
        (self.username.trim(), self.password.trim())
    }
}

//=========================================================================================
// Helpers
//=========================================================================================

/// Renders a page with the pending flash message, if any, and consumes it.
pub fn render_with_flash(
    headers: &HeaderMap,
    secure: bool,
    render: impl FnOnce(Option<&Notice>) -> String,
) -> Response {
    match Flash::from_headers(headers) {
        Some(flash) => (
            AppendHeaders([(header::SET_COOKIE, Flash::clear_cookie(secure))]),
            Html(render(Some(&flash.notice()))),
        )
            .into_response(),
        None => Html(render(None)).into_response(),
    }
}

fn internal_error_page(render: fn(Option<&Notice>) -> String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render(Some(&Notice::error("Erro interno. Tente novamente.")))),
    )
        .into_response()
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /login - Show the login form
pub async fn login_page_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    if current_session(&state, &headers).await.is_some() {
        return Redirect::to("/").into_response();
    }
    render_with_flash(&headers, state.config.cookie_secure, pages::login_page)
}

/// POST /login - Login with existing account
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> Response {
    if current_session(&state, &headers).await.is_some() {
        return Redirect::to("/").into_response();
    }

    let (username, password) = form.trimmed();
    info!("Login attempt: username='{}'", username);

    if !state.credentials.verify(username, password).await {
        warn!("Login failed: username='{}'", username);
        return Html(pages::login_page(Some(&Notice::error(
            "Usuário ou senha inválidos.",
        ))))
        .into_response();
    }

    let Some(ttl) = state.session_ttl() else {
        error!(
            "Session lifetime of {} hours is out of range",
            state.config.session_ttl_hours
        );
        return internal_error_page(pages::login_page);
    };
    let session = match state.sessions.create(username, ttl).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to create auth session: {:?}", e);
            return internal_error_page(pages::login_page);
        }
    };
    info!("Login succeeded: {}", username);

    let secure = state.config.cookie_secure;
    (
        AppendHeaders([
            (
                header::SET_COOKIE,
                session::session_cookie(&session.id, ttl.num_seconds(), secure),
            ),
            (header::SET_COOKIE, Flash::LoggedIn.cookie(secure)),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}

/// GET /logout - Invalidate the session and return to the login page
pub async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(session_id) = session::read_cookie(&headers, session::SESSION_COOKIE) {
        if let Err(e) = state.sessions.delete(session_id).await {
            error!("Failed to delete auth session: {:?}", e);
        }
    }
    info!("Logout");

    let secure = state.config.cookie_secure;
    (
        AppendHeaders([
            (header::SET_COOKIE, session::clear_session_cookie(secure)),
            (header::SET_COOKIE, Flash::LoggedOut.cookie(secure)),
        ]),
        Redirect::to("/login"),
    )
        .into_response()
}

/// GET /cadastro - Show the registration form
pub async fn register_page_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    render_with_flash(&headers, state.config.cookie_secure, pages::register_page)
}

/// POST /cadastro - Create a new account
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let (username, password) = form.trimmed();

    match state.credentials.register(username, password).await {
        Ok(()) => {
            info!("Registered user: {}", username);
            (
                AppendHeaders([(
                    header::SET_COOKIE,
                    Flash::Registered.cookie(state.config.cookie_secure),
                )]),
                Redirect::to("/login"),
            )
                .into_response()
        }
        Err(PortError::InvalidInput(_)) => {
            Html(pages::register_page(Some(&Notice::error("Preencha todos os campos."))))
                .into_response()
        }
        Err(PortError::AlreadyExists(_)) => {
            warn!("Registration refused, username taken: {}", username);
            Html(pages::register_page(Some(&Notice::error("Usuário já existe."))))
                .into_response()
        }
    }
}
