use super::domain::{ApplicationDraft, FieldName, ScalarField, SkillSet};

/// Owns the draft for one view and applies input events to it.
///
/// No validation happens here; every event succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: ApplicationDraft,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draft(draft: ApplicationDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ApplicationDraft {
        self.draft
    }

    /// Set a scalar field. Values of fields hidden by a later position change are kept.
    pub fn on_field_change(&mut self, field: ScalarField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Add the skill when checked, remove it otherwise.
    pub fn on_skill_toggle(&mut self, skill: &str, is_checked: bool) {
        if is_checked {
            self.draft.additional_skills.insert(skill);
        } else {
            self.draft.additional_skills.remove(skill);
        }
    }

    /// Replace the whole skill set, as a full form post does.
    pub fn set_skills(&mut self, skills: SkillSet) {
        self.draft.additional_skills = skills;
    }

    pub fn visible_fields(&self) -> Vec<FieldName> {
        self.draft.visible_fields()
    }
}
