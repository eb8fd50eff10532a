//! services/api/src/web/rest.rs
//!
//! Contains the handlers for the generator page and the plan endpoint, and the
//! master definition for the OpenAPI specification.

use crate::error::{PlanErrorBody, PlanRequestError};
use crate::web::auth::render_with_flash;
use crate::web::middleware::CurrentUser;
use crate::web::pages;
use crate::web::state::AppState;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap},
    response::{Json, Response},
    Extension, Form,
};
use chrono::Local;
use lesson_plan_core::{Focus, Grade, LessonDuration, PlanRequest, Subject};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_plan_handler,
    ),
    components(
        schemas(PlanForm, PlanResponse, PlanErrorBody)
    ),
    tags(
        (name = "Lesson Planner API", description = "Generates lesson plan documents from form selections.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Payload Structs
//=========================================================================================

/// Form fields posted by the generator page. Every field is required.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlanForm {
    /// Free-text lesson topic.
    #[serde(default)]
    pub tema: String,
    /// Subject label, e.g. "História".
    #[serde(default)]
    pub disciplina: String,
    /// Grade label, e.g. "9ª Classe".
    #[serde(default)]
    pub classe: String,
    /// Lesson length in minutes, 45 or 90.
    #[serde(default)]
    pub duracao: String,
    /// Focus label, e.g. "Introdução".
    #[serde(default)]
    pub foco: String,
}

impl PlanForm {
    /// Trims every field and checks it against its enumeration.
    pub fn validate(&self) -> Result<PlanRequest, PlanRequestError> {
        let fields = [
            ("tema", self.tema.trim()),
            ("disciplina", self.disciplina.trim()),
            ("classe", self.classe.trim()),
            ("duracao", self.duracao.trim()),
            ("foco", self.foco.trim()),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(PlanRequestError::MissingField(*name));
        }
        let [topic, subject, grade, duration, focus] = fields.map(|(_, value)| value);

        let duration = duration
            .parse::<LessonDuration>()
            .map_err(|_| PlanRequestError::InvalidDuration(duration.to_string()))?;

        Ok(PlanRequest {
            topic: topic.to_string(),
            subject: subject.parse::<Subject>()?,
            grade: grade.parse::<Grade>()?,
            duration,
            focus: focus.parse::<Focus>()?,
        })
    }
}

/// Reads a `PlanForm` from an urlencoded or multipart body.
///
/// Any body that cannot be read as a form becomes a 400 JSON response, and an
/// empty body is an empty form so it fails validation like any missing field.
pub struct PlanFormBody(pub PlanForm);

impl<S> FromRequest<S> for PlanFormBody
where
    S: Send + Sync,
{
    type Rejection = PlanRequestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type.as_deref() {
            None | Some("") => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| PlanRequestError::UnreadableForm(e.body_text()))?;
                if body.iter().all(u8::is_ascii_whitespace) {
                    Ok(Self(PlanForm::default()))
                } else {
                    Err(PlanRequestError::UnreadableForm(
                        "body without a content type".to_string(),
                    ))
                }
            }
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| PlanRequestError::UnreadableForm(e.body_text()))?;
                read_multipart(multipart).await.map(Self)
            }
            Some(_) => Form::<PlanForm>::from_request(req, state)
                .await
                .map(|Form(form)| Self(form))
                .map_err(|e| PlanRequestError::UnreadableForm(e.body_text())),
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<PlanForm, PlanRequestError> {
    let mut form = PlanForm::default();
    let mut seen = HashSet::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PlanRequestError::UnreadableForm(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| PlanRequestError::UnreadableForm(e.body_text()))?;

        let slot = match name.as_str() {
            "tema" => &mut form.tema,
            "disciplina" => &mut form.disciplina,
            "classe" => &mut form.classe,
            "duracao" => &mut form.duracao,
            "foco" => &mut form.foco,
            _ => continue,
        };
        if !seen.insert(name.clone()) {
            return Err(PlanRequestError::UnreadableForm(format!(
                "duplicate field `{}`",
                name
            )));
        }
        *slot = value;
    }
    Ok(form)
}

/// The response payload sent after successfully generating a plan.
#[derive(Serialize, ToSchema)]
pub struct PlanResponse {
    pub success: bool,
    pub plano: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET / - The plan generator form
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Response {
    render_with_flash(&headers, state.config.cookie_secure, |notice| {
        pages::index_page(&username, notice)
    })
}

/// Generate a lesson plan.
///
/// Requires a logged-in session. All five fields must be present, the
/// duration must be 45 or 90, and the other selections must be members of
/// their fixed lists.
#[utoipa::path(
    post,
    path = "/gerar",
    request_body(content(
        (PlanForm = "application/x-www-form-urlencoded"),
        (PlanForm = "multipart/form-data")
    )),
    responses(
        (status = 200, description = "Plan generated", body = PlanResponse),
        (status = 400, description = "Missing or invalid field, or unreadable form", body = PlanErrorBody),
        (status = 500, description = "Internal server error", body = PlanErrorBody)
    )
)]
pub async fn generate_plan_handler(
    State(state): State<Arc<AppState>>,
    PlanFormBody(form): PlanFormBody,
) -> Result<Json<PlanResponse>, PlanRequestError> {
    info!(
        "Plan requested: tema='{}', disciplina='{}', classe='{}', duracao='{}', foco='{}'",
        form.tema, form.disciplina, form.classe, form.duracao, form.foco
    );
    let request = form.validate()?;

    let generator = state.generator.clone();
    let date = Local::now().date_naive();
    let plano = tokio::task::spawn_blocking(move || generator.create_plan(&request, date))
        .await
        .map_err(|e| PlanRequestError::Internal(e.to_string()))?;

    info!("Plan generated");
    Ok(Json(PlanResponse {
        success: true,
        plano,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(tema: &str, disciplina: &str, classe: &str, duracao: &str, foco: &str) -> PlanForm {
        PlanForm {
            tema: tema.into(),
            disciplina: disciplina.into(),
            classe: classe.into(),
            duracao: duracao.into(),
            foco: foco.into(),
        }
    }

    #[test]
    fn valid_form_becomes_request() {
        let request = form(" Frações ", "Matemática", "7ª Classe", "90", "Revisão")
            .validate()
            .unwrap();
        assert_eq!(request.topic, "Frações");
        assert_eq!(request.subject, Subject::Mathematics);
        assert_eq!(request.grade, Grade::Seventh);
        assert_eq!(request.duration, LessonDuration::Long);
        assert_eq!(request.focus, Focus::Review);
    }

    #[test]
    fn blank_field_is_missing() {
        let err = form("   ", "História", "9ª Classe", "45", "Teórica")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PlanRequestError::MissingField("tema")));
    }

    #[test]
    fn missing_fields_are_reported_before_bad_values() {
        let err = form("x", "Astronomia", "9ª Classe", "60", "")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PlanRequestError::MissingField("foco")));
    }

    #[test]
    fn duration_is_checked_before_enumerations() {
        let err = form("x", "Astronomia", "9ª Classe", "60", "Teórica")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PlanRequestError::InvalidDuration(_)));
        assert!(err.to_string().contains("45 ou 90"));
    }

    #[test]
    fn unknown_selection_is_invalid() {
        let err = form("x", "Astronomia", "9ª Classe", "45", "Teórica")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PlanRequestError::InvalidEnumValue(_)));
    }
}
