use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::domain::{ApplicationDraft, FieldName, ScalarField, SkillSet};
use super::render::{render_page, RenderOptions};
use super::service::{FormService, FormServiceError};
use super::store::{StoreError, ViewId, ViewStore};
use super::validation::ValidationErrors;
use super::view::{ApplicationSummary, ApplicationView, SubmitOutcome, ViewError, ViewPhase};

/// Router exposing the HTML form and the JSON event API.
pub fn form_router<S>(service: Arc<FormService<S>>) -> Router
where
    S: ViewStore + 'static,
{
    Router::new()
        .route("/", get(mount_page_handler::<S>))
        .route(
            "/views/:view_id",
            get(page_handler::<S>).post(page_post_handler::<S>),
        )
        .route("/api/v1/views", post(mount_handler::<S>))
        .route(
            "/api/v1/views/:view_id",
            get(snapshot_handler::<S>).delete(unmount_handler::<S>),
        )
        .route("/api/v1/views/:view_id/fields", post(field_handler::<S>))
        .route("/api/v1/views/:view_id/skills", post(skill_handler::<S>))
        .route("/api/v1/views/:view_id/submit", post(submit_handler::<S>))
        .with_state(service)
}

/// JSON view of a mounted form.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub view_id: ViewId,
    pub state: ViewPhase,
    pub draft: ApplicationDraft,
    pub visible_fields: Vec<FieldName>,
    pub errors: ValidationErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ApplicationSummary>,
}

impl ViewSnapshot {
    pub fn new(view_id: ViewId, view: &ApplicationView) -> Self {
        Self {
            view_id,
            state: view.phase(),
            draft: view.draft().clone(),
            visible_fields: view.visible_fields(),
            errors: view.errors().cloned().unwrap_or_default(),
            summary: view.submitted().map(|submitted| submitted.summary()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldChangeRequest {
    pub(crate) field: String,
    pub(crate) value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SkillToggleRequest {
    pub(crate) skill: String,
    pub(crate) checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageIntent {
    Submit,
    Refresh,
}

fn page_path(id: &ViewId) -> String {
    format!("/views/{}", id.0)
}

fn render_view<S>(service: &FormService<S>, id: &ViewId, view: &ApplicationView) -> Html<String>
where
    S: ViewStore + 'static,
{
    let action = page_path(id);
    let options = RenderOptions {
        action: &action,
        skills: service.skills(),
    };
    Html(render_page(view, &options))
}

fn error_response(error: FormServiceError) -> Response {
    let status = match &error {
        FormServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        FormServiceError::View(ViewError::AlreadySubmitted) => StatusCode::CONFLICT,
        FormServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::NOT_FOUND {
        warn!("event for unknown view");
    }
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn mount_page_handler<S>(State(service): State<Arc<FormService<S>>>) -> Response
where
    S: ViewStore + 'static,
{
    match service.mount() {
        Ok((id, _)) => Redirect::to(&page_path(&id)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn page_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
) -> Response
where
    S: ViewStore + 'static,
{
    let id = ViewId(view_id);
    match service.view(&id) {
        Ok(view) => render_view(&service, &id, &view).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn page_post_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response
where
    S: ViewStore + 'static,
{
    let id = ViewId(view_id);
    let mut intent = PageIntent::Submit;
    let mut fields = Vec::new();
    let mut skills = SkillSet::default();

    for (key, value) in pairs {
        match key.as_str() {
            "intent" if value == "refresh" => intent = PageIntent::Refresh,
            "intent" => {}
            "skill" => {
                skills.insert(value);
            }
            other => match other.parse::<ScalarField>() {
                Ok(field) => fields.push((field, value)),
                Err(err) => debug!(%err, "ignoring form key"),
            },
        }
    }

    let applied = service.apply_form(&id, fields, skills);
    let view = match applied {
        Ok(view) => view,
        Err(FormServiceError::View(ViewError::AlreadySubmitted)) => {
            return match service.view(&id) {
                Ok(view) => {
                    (StatusCode::CONFLICT, render_view(&service, &id, &view)).into_response()
                }
                Err(error) => error_response(error),
            };
        }
        Err(error) => return error_response(error),
    };

    if intent == PageIntent::Refresh {
        return render_view(&service, &id, &view).into_response();
    }

    match service.submit(&id) {
        Ok((SubmitOutcome::Accepted(_), view)) => render_view(&service, &id, &view).into_response(),
        Ok((SubmitOutcome::Rejected(_), view)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            render_view(&service, &id, &view),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn mount_handler<S>(State(service): State<Arc<FormService<S>>>) -> Response
where
    S: ViewStore + 'static,
{
    match service.mount() {
        Ok((id, view)) => (StatusCode::CREATED, Json(ViewSnapshot::new(id, &view))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
) -> Response
where
    S: ViewStore + 'static,
{
    let id = ViewId(view_id);
    match service.view(&id) {
        Ok(view) => Json(ViewSnapshot::new(id, &view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unmount_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
) -> Response
where
    S: ViewStore + 'static,
{
    match service.unmount(&ViewId(view_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn field_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
    Json(request): Json<FieldChangeRequest>,
) -> Response
where
    S: ViewStore + 'static,
{
    let field = match request.field.parse::<ScalarField>() {
        Ok(field) => field,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let id = ViewId(view_id);
    match service.change_field(&id, field, request.value) {
        Ok(view) => Json(ViewSnapshot::new(id, &view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn skill_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
    Json(request): Json<SkillToggleRequest>,
) -> Response
where
    S: ViewStore + 'static,
{
    let id = ViewId(view_id);
    match service.toggle_skill(&id, &request.skill, request.checked) {
        Ok(view) => Json(ViewSnapshot::new(id, &view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<FormService<S>>>,
    Path(view_id): Path<String>,
) -> Response
where
    S: ViewStore + 'static,
{
    let id = ViewId(view_id);
    match service.submit(&id) {
        Ok((SubmitOutcome::Accepted(summary), _)) => {
            let payload = json!({
                "view_id": id,
                "state": ViewPhase::Submitted,
                "summary": summary,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok((SubmitOutcome::Rejected(errors), _)) => {
            let payload = json!({
                "view_id": id,
                "state": ViewPhase::Editing,
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
