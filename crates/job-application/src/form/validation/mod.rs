//! Field-conditional validation of an application draft.
//!
//! Every applicable rule runs, so one pass reports the complete error set. Conditional fields
//! are only checked when the selected position requires them; values left over from another
//! position are ignored.

mod rules;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::domain::{ApplicationDraft, FieldName, Position};

pub use rules::{format_interview_time, parse_interview_time, parse_number};

/// Field-keyed error messages. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn record<T>(&mut self, field: FieldName, outcome: rules::RuleResult<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.0.insert(field, message.to_string());
                None
            }
        }
    }
}

/// Values the validator had to parse anyway, kept for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedDraft {
    pub position: Position,
    pub interview_time: NaiveDateTime,
}

/// Evaluate every rule against the draft.
pub fn validate(draft: &ApplicationDraft) -> ValidationErrors {
    match check(draft) {
        Ok(_) => ValidationErrors::default(),
        Err(errors) => errors,
    }
}

/// Like [`validate`], but hands back the parsed position and interview time when clean.
pub fn check(draft: &ApplicationDraft) -> Result<CheckedDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.record(FieldName::FullName, rules::full_name(&draft.full_name));
    errors.record(FieldName::Email, rules::email(&draft.email));
    errors.record(FieldName::PhoneNumber, rules::phone_number(&draft.phone_number));
    let position = errors.record(
        FieldName::ApplyingForPosition,
        rules::position(&draft.applying_for_position),
    );

    if let Some(position) = position {
        for &field in position.conditional_fields() {
            let outcome = match field {
                FieldName::RelevantExperience => {
                    rules::relevant_experience(&draft.relevant_experience)
                }
                FieldName::PortfolioUrl => rules::portfolio_url(&draft.portfolio_url),
                FieldName::ManagementExperience => {
                    rules::management_experience(&draft.management_experience)
                }
                _ => Ok(()),
            };
            errors.record(field, outcome);
        }
    }

    errors.record(
        FieldName::AdditionalSkills,
        rules::additional_skills(&draft.additional_skills),
    );
    let interview_time = errors.record(
        FieldName::PreferredInterviewTime,
        rules::preferred_interview_time(&draft.preferred_interview_time),
    );

    match (position, interview_time) {
        (Some(position), Some(interview_time)) if errors.is_empty() => Ok(CheckedDraft {
            position,
            interview_time,
        }),
        _ => Err(errors),
    }
}
