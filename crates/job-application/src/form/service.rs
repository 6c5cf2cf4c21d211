use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{ScalarField, SkillSet};
use super::store::{StoreError, ViewId, ViewStore};
use super::view::{ApplicationView, SubmitOutcome, ViewError};
use crate::config::FormConfig;

/// Routes input and submit events to the view they belong to.
pub struct FormService<S> {
    store: Arc<S>,
    config: FormConfig,
}

/// Random ids, so one applicant cannot address another's view.
fn next_view_id() -> ViewId {
    ViewId(format!("view-{}", Uuid::new_v4().simple()))
}

impl<S> FormService<S>
where
    S: ViewStore + 'static,
{
    pub fn new(store: Arc<S>, config: FormConfig) -> Self {
        Self { store, config }
    }

    /// Skill catalog offered as checkboxes.
    pub fn skills(&self) -> &[String] {
        &self.config.skills
    }

    /// Mount a fresh view with an empty draft.
    pub fn mount(&self) -> Result<(ViewId, ApplicationView), FormServiceError> {
        let id = next_view_id();
        let view = ApplicationView::new();
        self.store.insert(id.clone(), view.clone())?;
        info!(view_id = %id.0, "application view mounted");
        Ok((id, view))
    }

    pub fn view(&self, id: &ViewId) -> Result<ApplicationView, FormServiceError> {
        let view = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(view)
    }

    pub fn change_field(
        &self,
        id: &ViewId,
        field: ScalarField,
        value: String,
    ) -> Result<ApplicationView, FormServiceError> {
        self.modify(id, |view| view.on_field_change(field, value))
    }

    pub fn toggle_skill(
        &self,
        id: &ViewId,
        skill: &str,
        checked: bool,
    ) -> Result<ApplicationView, FormServiceError> {
        self.modify(id, |view| view.on_skill_toggle(skill, checked))
    }

    /// Apply a full form post (all posted fields plus the checked skills).
    pub fn apply_form(
        &self,
        id: &ViewId,
        fields: Vec<(ScalarField, String)>,
        skills: SkillSet,
    ) -> Result<ApplicationView, FormServiceError> {
        self.modify(id, |view| view.apply_form(fields, skills))
    }

    /// Validate the view's draft, freezing it when clean.
    pub fn submit(
        &self,
        id: &ViewId,
    ) -> Result<(SubmitOutcome, ApplicationView), FormServiceError> {
        let (outcome, view) = self.store.modify(id, |view| {
            let outcome = view.submit()?;
            Ok::<_, FormServiceError>((outcome, view.clone()))
        })?;

        match &outcome {
            SubmitOutcome::Accepted(_) => {
                let position = view.submitted().map(|submitted| submitted.position().label());
                info!(view_id = %id.0, ?position, "application submitted");
            }
            SubmitOutcome::Rejected(errors) => {
                debug!(view_id = %id.0, error_count = errors.len(), "submission rejected");
            }
        }

        Ok((outcome, view))
    }

    /// Discard the view and its draft.
    pub fn unmount(&self, id: &ViewId) -> Result<(), FormServiceError> {
        self.store.remove(id)?.ok_or(StoreError::NotFound)?;
        info!(view_id = %id.0, "application view unmounted");
        Ok(())
    }

    fn modify<F>(&self, id: &ViewId, apply: F) -> Result<ApplicationView, FormServiceError>
    where
        F: FnOnce(&mut ApplicationView) -> Result<(), ViewError>,
    {
        self.store.modify(id, |view| {
            apply(view)?;
            Ok::<_, FormServiceError>(view.clone())
        })
    }
}

/// Error raised by the form service.
#[derive(Debug, thiserror::Error)]
pub enum FormServiceError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
