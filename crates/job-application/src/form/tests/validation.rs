use super::common::*;
use crate::form::domain::{ApplicationDraft, FieldName, ScalarField, SkillSet};
use crate::form::validation::{check, validate};

#[test]
fn complete_drafts_validate_clean_for_every_position() {
    for draft in [developer_draft(), designer_draft(), manager_draft()] {
        let errors = validate(&draft);
        assert!(
            errors.is_empty(),
            "{} draft should be valid, got {errors:?}",
            draft.applying_for_position
        );
    }
}

#[test]
fn empty_draft_reports_every_unconditional_field() {
    let errors = validate(&ApplicationDraft::default());

    let fields: Vec<FieldName> = errors.fields().collect();
    assert_eq!(
        fields,
        vec![
            FieldName::FullName,
            FieldName::Email,
            FieldName::PhoneNumber,
            FieldName::ApplyingForPosition,
            FieldName::AdditionalSkills,
            FieldName::PreferredInterviewTime,
        ]
    );
    assert_eq!(errors.get(FieldName::FullName), Some("Full Name is required"));
    assert_eq!(
        errors.get(FieldName::AdditionalSkills),
        Some("At least one skill must be selected")
    );
}

#[test]
fn unset_position_suppresses_conditional_requirements() {
    let mut draft = designer_draft();
    draft.applying_for_position = String::new();
    draft.relevant_experience = String::new();
    draft.portfolio_url = "not-a-url".to_string();

    let errors = validate(&draft);

    assert_eq!(
        errors.get(FieldName::ApplyingForPosition),
        Some("Applying for Position is required")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn unknown_position_is_rejected_without_conditional_checks() {
    let mut draft = developer_draft();
    draft.applying_for_position = "Intern".to_string();
    draft.relevant_experience = String::new();

    let errors = validate(&draft);

    assert_eq!(
        errors.get(FieldName::ApplyingForPosition),
        Some("Applying for Position must be Developer, Designer or Manager")
    );
    assert!(!errors.contains(FieldName::RelevantExperience));
}

#[test]
fn developer_with_negative_experience_is_rejected() {
    let mut draft = developer_draft();
    draft.relevant_experience = "-1".to_string();

    let errors = validate(&draft);

    assert_eq!(
        errors.get(FieldName::RelevantExperience),
        Some("Relevant Experience must be a number greater than 0")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn designer_with_bad_portfolio_and_no_skills() {
    let mut draft = designer_draft();
    draft.portfolio_url = "not-a-url".to_string();
    draft.relevant_experience = "3".to_string();
    draft.additional_skills = SkillSet::default();

    let errors = validate(&draft);

    assert_eq!(
        errors.get(FieldName::PortfolioUrl),
        Some("Portfolio URL is not valid")
    );
    assert!(errors.contains(FieldName::AdditionalSkills));
    assert!(!errors.contains(FieldName::RelevantExperience));
    assert_eq!(errors.len(), 2);
}

#[test]
fn stale_fields_from_other_positions_are_ignored() {
    let mut draft = manager_draft();
    draft.relevant_experience = "-7".to_string();
    draft.portfolio_url = "still not a url".to_string();

    assert!(validate(&draft).is_empty());
}

#[test]
fn manager_requires_management_experience_text() {
    let mut draft = manager_draft();
    draft.management_experience = "   ".to_string();

    let errors = validate(&draft);

    assert_eq!(
        errors.get(FieldName::ManagementExperience),
        Some("Management Experience is required")
    );
}

#[test]
fn phone_number_accepts_numeric_forms_only() {
    let mut draft = developer_draft();
    draft.phone_number = "-12.5".to_string();
    assert!(validate(&draft).is_empty());

    draft.phone_number = "555-0100".to_string();
    assert_eq!(
        validate(&draft).get(FieldName::PhoneNumber),
        Some("Phone Number must be a valid number")
    );

    draft.phone_number = " ".to_string();
    assert_eq!(
        validate(&draft).get(FieldName::PhoneNumber),
        Some("Phone Number is required")
    );
}

#[test]
fn invalid_interview_time_is_reported() {
    let mut draft = manager_draft();
    draft.preferred_interview_time = "2026-13-01T10:00".to_string();

    assert_eq!(
        validate(&draft).get(FieldName::PreferredInterviewTime),
        Some("Preferred Interview Time must be a valid date and time")
    );
}

#[test]
fn check_returns_parsed_values_when_clean() {
    let checked = check(&designer_draft()).expect("designer draft is valid");
    assert_eq!(checked.position.label(), "Designer");
    assert_eq!(
        checked.interview_time.format("%Y-%m-%d %H:%M").to_string(),
        "2026-11-02 14:30"
    );
}

#[test]
fn validation_reads_current_values_only() {
    let mut draft = ApplicationDraft::default();
    draft.set(ScalarField::FullName, "  ".to_string());
    draft.set(ScalarField::Email, "bad@".to_string());

    let errors = validate(&draft);

    assert_eq!(errors.get(FieldName::FullName), Some("Full Name is required"));
    assert_eq!(errors.get(FieldName::Email), Some("Email is invalid"));
}

#[test]
fn errors_serialize_keyed_by_wire_name() {
    let mut draft = designer_draft();
    draft.portfolio_url = String::new();

    let json = serde_json::to_value(validate(&draft)).expect("errors serialize");

    assert_eq!(json["portfolioURL"], "Portfolio URL is required");
    assert_eq!(json.as_object().map(|map| map.len()), Some(1));
}
