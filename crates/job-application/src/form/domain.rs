use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Roles an applicant can apply for. Each one decides which conditional fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Developer,
    Designer,
    Manager,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Developer, Position::Designer, Position::Manager];

    pub const fn label(self) -> &'static str {
        match self {
            Position::Developer => "Developer",
            Position::Designer => "Designer",
            Position::Manager => "Manager",
        }
    }

    /// Conditional fields shown and required while this position is selected.
    pub const fn conditional_fields(self) -> &'static [FieldName] {
        match self {
            Position::Developer => &[FieldName::RelevantExperience],
            Position::Designer => &[FieldName::RelevantExperience, FieldName::PortfolioUrl],
            Position::Manager => &[FieldName::ManagementExperience],
        }
    }

    pub fn requires(self, field: FieldName) -> bool {
        self.conditional_fields().contains(&field)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.label() == value)
            .ok_or_else(|| UnknownPosition(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position '{0}'")]
pub struct UnknownPosition(pub String);

/// Every field of the form, in display order. Serializes as the form's wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
    #[serde(rename = "applyingForPosition")]
    ApplyingForPosition,
    #[serde(rename = "relevantExperience")]
    RelevantExperience,
    #[serde(rename = "portfolioURL")]
    PortfolioUrl,
    #[serde(rename = "managementExperience")]
    ManagementExperience,
    #[serde(rename = "additionalSkills")]
    AdditionalSkills,
    #[serde(rename = "preferredInterviewTime")]
    PreferredInterviewTime,
}

impl FieldName {
    pub const ALL: [FieldName; 9] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::PhoneNumber,
        FieldName::ApplyingForPosition,
        FieldName::RelevantExperience,
        FieldName::PortfolioUrl,
        FieldName::ManagementExperience,
        FieldName::AdditionalSkills,
        FieldName::PreferredInterviewTime,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            FieldName::FullName => "fullName",
            FieldName::Email => "email",
            FieldName::PhoneNumber => "phoneNumber",
            FieldName::ApplyingForPosition => "applyingForPosition",
            FieldName::RelevantExperience => "relevantExperience",
            FieldName::PortfolioUrl => "portfolioURL",
            FieldName::ManagementExperience => "managementExperience",
            FieldName::AdditionalSkills => "additionalSkills",
            FieldName::PreferredInterviewTime => "preferredInterviewTime",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldName::FullName => "Full Name",
            FieldName::Email => "Email",
            FieldName::PhoneNumber => "Phone Number",
            FieldName::ApplyingForPosition => "Applying for Position",
            FieldName::RelevantExperience => "Relevant Experience",
            FieldName::PortfolioUrl => "Portfolio URL",
            FieldName::ManagementExperience => "Management Experience",
            FieldName::AdditionalSkills => "Additional Skills",
            FieldName::PreferredInterviewTime => "Preferred Interview Time",
        }
    }

    /// Whether visibility depends on the selected position.
    pub const fn is_conditional(self) -> bool {
        matches!(
            self,
            FieldName::RelevantExperience
                | FieldName::PortfolioUrl
                | FieldName::ManagementExperience
        )
    }

    /// Whether the field is shown for the given selection. `None` means no position is selected.
    pub fn applies_to(self, position: Option<Position>) -> bool {
        if !self.is_conditional() {
            return true;
        }
        position.is_some_and(|position| position.requires(self))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = FieldKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| FieldKeyError::Unknown(key.to_string()))
    }
}

/// The single-valued fields that `on_field_change` can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    FullName,
    Email,
    PhoneNumber,
    ApplyingForPosition,
    RelevantExperience,
    PortfolioUrl,
    ManagementExperience,
    PreferredInterviewTime,
}

impl ScalarField {
    pub const fn field_name(self) -> FieldName {
        match self {
            ScalarField::FullName => FieldName::FullName,
            ScalarField::Email => FieldName::Email,
            ScalarField::PhoneNumber => FieldName::PhoneNumber,
            ScalarField::ApplyingForPosition => FieldName::ApplyingForPosition,
            ScalarField::RelevantExperience => FieldName::RelevantExperience,
            ScalarField::PortfolioUrl => FieldName::PortfolioUrl,
            ScalarField::ManagementExperience => FieldName::ManagementExperience,
            ScalarField::PreferredInterviewTime => FieldName::PreferredInterviewTime,
        }
    }
}

impl TryFrom<FieldName> for ScalarField {
    type Error = FieldKeyError;

    fn try_from(field: FieldName) -> Result<Self, Self::Error> {
        match field {
            FieldName::FullName => Ok(ScalarField::FullName),
            FieldName::Email => Ok(ScalarField::Email),
            FieldName::PhoneNumber => Ok(ScalarField::PhoneNumber),
            FieldName::ApplyingForPosition => Ok(ScalarField::ApplyingForPosition),
            FieldName::RelevantExperience => Ok(ScalarField::RelevantExperience),
            FieldName::PortfolioUrl => Ok(ScalarField::PortfolioUrl),
            FieldName::ManagementExperience => Ok(ScalarField::ManagementExperience),
            FieldName::PreferredInterviewTime => Ok(ScalarField::PreferredInterviewTime),
            FieldName::AdditionalSkills => Err(FieldKeyError::NotScalar(field.key())),
        }
    }
}

impl FromStr for ScalarField {
    type Err = FieldKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        ScalarField::try_from(key.parse::<FieldName>()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldKeyError {
    #[error("unknown field '{0}'")]
    Unknown(String),
    #[error("field '{0}' holds a skill set; toggle skills instead")]
    NotScalar(&'static str),
}

/// Selected skill tags. Membership is all that matters; iteration is alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        self.0.insert(skill.into())
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        self.0.remove(skill)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn joined(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// In-memory application data for one view. Every scalar is kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub applying_for_position: String,
    pub relevant_experience: String,
    #[serde(rename = "portfolioURL")]
    pub portfolio_url: String,
    pub management_experience: String,
    pub additional_skills: SkillSet,
    pub preferred_interview_time: String,
}

impl ApplicationDraft {
    pub fn value(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::FullName => &self.full_name,
            ScalarField::Email => &self.email,
            ScalarField::PhoneNumber => &self.phone_number,
            ScalarField::ApplyingForPosition => &self.applying_for_position,
            ScalarField::RelevantExperience => &self.relevant_experience,
            ScalarField::PortfolioUrl => &self.portfolio_url,
            ScalarField::ManagementExperience => &self.management_experience,
            ScalarField::PreferredInterviewTime => &self.preferred_interview_time,
        }
    }

    pub fn set(&mut self, field: ScalarField, value: String) {
        let slot = match field {
            ScalarField::FullName => &mut self.full_name,
            ScalarField::Email => &mut self.email,
            ScalarField::PhoneNumber => &mut self.phone_number,
            ScalarField::ApplyingForPosition => &mut self.applying_for_position,
            ScalarField::RelevantExperience => &mut self.relevant_experience,
            ScalarField::PortfolioUrl => &mut self.portfolio_url,
            ScalarField::ManagementExperience => &mut self.management_experience,
            ScalarField::PreferredInterviewTime => &mut self.preferred_interview_time,
        };
        *slot = value;
    }

    /// The selected position, or `None` when unset or not a known position.
    pub fn position(&self) -> Option<Position> {
        self.applying_for_position.parse().ok()
    }

    /// Fields rendered for the current selection, in display order.
    pub fn visible_fields(&self) -> Vec<FieldName> {
        let position = self.position();
        FieldName::ALL
            .into_iter()
            .filter(|field| field.applies_to(position))
            .collect()
    }
}
