use chrono::NaiveDateTime;
use serde::Serialize;

use super::domain::{ApplicationDraft, FieldName, Position, ScalarField, SkillSet};
use super::state::FormState;
use super::validation::{self, format_interview_time, CheckedDraft, ValidationErrors};

/// Errors raised when an event cannot be applied to a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("application already submitted; mount a new view to apply again")]
    AlreadySubmitted,
}

/// Coarse state of a view, as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPhase {
    Editing,
    Submitted,
}

/// Draft under edit plus the errors from the last rejected submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingState {
    pub form: FormState,
    pub errors: ValidationErrors,
}

/// A draft that passed validation. Read-only from here on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedApplication {
    draft: ApplicationDraft,
    position: Position,
    interview_time: NaiveDateTime,
}

impl SubmittedApplication {
    fn freeze(draft: ApplicationDraft, checked: CheckedDraft) -> Self {
        Self {
            draft,
            position: checked.position,
            interview_time: checked.interview_time,
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn interview_time(&self) -> NaiveDateTime {
        self.interview_time
    }

    /// Summary lines for the submitted position only; stale values of other positions are dropped.
    pub fn summary(&self) -> ApplicationSummary {
        let draft = &self.draft;
        let mut lines = vec![
            SummaryLine::new(FieldName::FullName, draft.full_name.trim()),
            SummaryLine::new(FieldName::Email, draft.email.trim()),
            SummaryLine::new(FieldName::PhoneNumber, draft.phone_number.trim()),
            SummaryLine::new(FieldName::ApplyingForPosition, self.position.label()),
        ];

        for &field in self.position.conditional_fields() {
            let line = match field {
                FieldName::RelevantExperience => SummaryLine::new(
                    field,
                    format!("{} years", draft.relevant_experience.trim()),
                ),
                FieldName::PortfolioUrl => SummaryLine::new(field, draft.portfolio_url.trim()),
                FieldName::ManagementExperience => {
                    SummaryLine::new(field, draft.management_experience.trim())
                }
                _ => continue,
            };
            lines.push(line);
        }

        lines.push(SummaryLine::new(
            FieldName::AdditionalSkills,
            draft.additional_skills.joined(", "),
        ));
        lines.push(SummaryLine::new(
            FieldName::PreferredInterviewTime,
            format_interview_time(&self.interview_time),
        ));

        ApplicationSummary { lines }
    }
}

/// One labelled line of the read-only summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub field: FieldName,
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(field: FieldName, value: impl Into<String>) -> Self {
        Self {
            field,
            label: field.label(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    pub lines: Vec<SummaryLine>,
}

impl ApplicationSummary {
    pub fn line(&self, field: FieldName) -> Option<&SummaryLine> {
        self.lines.iter().find(|line| line.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Editing(EditingState),
    Submitted(SubmittedApplication),
}

/// Result of a submit attempt on an editing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(ApplicationSummary),
    Rejected(ValidationErrors),
}

/// One mounted instance of the application form.
///
/// Starts in `Editing`; moves to `Submitted` once a submit validates clean and never leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationView {
    state: ViewState,
}

impl Default for ApplicationView {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationView {
    pub fn new() -> Self {
        Self::with_draft(ApplicationDraft::default())
    }

    /// Mount a view pre-filled with an existing draft.
    pub fn with_draft(draft: ApplicationDraft) -> Self {
        Self {
            state: ViewState::Editing(EditingState {
                form: FormState::from_draft(draft),
                errors: ValidationErrors::default(),
            }),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> ViewPhase {
        match self.state {
            ViewState::Editing(_) => ViewPhase::Editing,
            ViewState::Submitted(_) => ViewPhase::Submitted,
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        match &self.state {
            ViewState::Editing(editing) => editing.form.draft(),
            ViewState::Submitted(submitted) => submitted.draft(),
        }
    }

    /// Errors from the last rejected submit; `None` once submitted.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match &self.state {
            ViewState::Editing(editing) => Some(&editing.errors),
            ViewState::Submitted(_) => None,
        }
    }

    pub fn submitted(&self) -> Option<&SubmittedApplication> {
        match &self.state {
            ViewState::Submitted(submitted) => Some(submitted),
            ViewState::Editing(_) => None,
        }
    }

    pub fn visible_fields(&self) -> Vec<FieldName> {
        self.draft().visible_fields()
    }

    pub fn on_field_change(
        &mut self,
        field: ScalarField,
        value: impl Into<String>,
    ) -> Result<(), ViewError> {
        self.form_mut()?.on_field_change(field, value);
        Ok(())
    }

    pub fn on_skill_toggle(&mut self, skill: &str, is_checked: bool) -> Result<(), ViewError> {
        self.form_mut()?.on_skill_toggle(skill, is_checked);
        Ok(())
    }

    /// Apply a complete form post: every listed field plus the full skill set.
    pub fn apply_form<I>(&mut self, fields: I, skills: SkillSet) -> Result<(), ViewError>
    where
        I: IntoIterator<Item = (ScalarField, String)>,
    {
        let form = self.form_mut()?;
        for (field, value) in fields {
            form.on_field_change(field, value);
        }
        form.set_skills(skills);
        Ok(())
    }

    /// Validate the draft and transition to `Submitted` when it is clean.
    ///
    /// A rejected submit replaces the displayed errors and leaves the draft untouched.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ViewError> {
        let editing = match &mut self.state {
            ViewState::Editing(editing) => editing,
            ViewState::Submitted(_) => return Err(ViewError::AlreadySubmitted),
        };

        match validation::check(editing.form.draft()) {
            Err(errors) => {
                editing.errors = errors.clone();
                Ok(SubmitOutcome::Rejected(errors))
            }
            Ok(checked) => {
                let draft = std::mem::take(&mut editing.form).into_draft();
                let submitted = SubmittedApplication::freeze(draft, checked);
                let summary = submitted.summary();
                self.state = ViewState::Submitted(submitted);
                Ok(SubmitOutcome::Accepted(summary))
            }
        }
    }

    fn form_mut(&mut self) -> Result<&mut FormState, ViewError> {
        match &mut self.state {
            ViewState::Editing(editing) => Ok(&mut editing.form),
            ViewState::Submitted(_) => Err(ViewError::AlreadySubmitted),
        }
    }
}
