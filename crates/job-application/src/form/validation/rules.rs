use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use url::Url;

use super::super::domain::{Position, SkillSet};

pub(crate) type RuleResult<T = ()> = Result<T, &'static str>;

const INTERVIEW_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn full_name(value: &str) -> RuleResult {
    if is_blank(value) {
        return Err("Full Name is required");
    }
    Ok(())
}

pub(crate) fn email(value: &str) -> RuleResult {
    if is_blank(value) {
        return Err("Email is required");
    }
    if !email_shape().is_match(value) {
        return Err("Email is invalid");
    }
    Ok(())
}

pub(crate) fn phone_number(value: &str) -> RuleResult {
    if is_blank(value) {
        return Err("Phone Number is required");
    }
    if parse_number(value).is_none() {
        return Err("Phone Number must be a valid number");
    }
    Ok(())
}

pub(crate) fn position(value: &str) -> RuleResult<Position> {
    if is_blank(value) {
        return Err("Applying for Position is required");
    }
    value
        .parse()
        .map_err(|_| "Applying for Position must be Developer, Designer or Manager")
}

pub(crate) fn relevant_experience(value: &str) -> RuleResult {
    if is_blank(value) {
        return Err("Relevant Experience is required");
    }
    match parse_number(value) {
        Some(years) if years > 0.0 => Ok(()),
        _ => Err("Relevant Experience must be a number greater than 0"),
    }
}

pub(crate) fn portfolio_url(value: &str) -> RuleResult {
    if is_blank(value) {
        return Err("Portfolio URL is required");
    }
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| "Portfolio URL is not valid")
}

pub(crate) fn management_experience(value: &str) -> RuleResult {
    if is_blank(value) {
        return Err("Management Experience is required");
    }
    Ok(())
}

pub(crate) fn additional_skills(skills: &SkillSet) -> RuleResult {
    if skills.is_empty() {
        return Err("At least one skill must be selected");
    }
    Ok(())
}

pub(crate) fn preferred_interview_time(value: &str) -> RuleResult<NaiveDateTime> {
    if is_blank(value) {
        return Err("Preferred Interview Time is required");
    }
    parse_interview_time(value).ok_or("Preferred Interview Time must be a valid date and time")
}

/// Parse numeric text the way a browser's `Number()` coercion does: surrounding whitespace,
/// a sign, decimals, exponents, `Infinity` and unsigned `0x`/`0o`/`0b` literals are accepted.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|value| value as f64);
        }
    }

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // f64's parser also takes "inf"/"nan" spellings, which are not numbers here.
    let numeric_chars = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric_chars {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Parse a preferred interview time into local wall-clock time.
pub fn parse_interview_time(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    INTERVIEW_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Human-readable interview time for the summary, e.g. `10/19/2026, 2:30:00 PM`.
pub fn format_interview_time(time: &NaiveDateTime) -> String {
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
