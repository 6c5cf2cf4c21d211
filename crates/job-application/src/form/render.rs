//! HTML rendering for the two view states.
//!
//! The editing page only renders fields that apply to the selected position, whatever the draft
//! still holds for the others. Mount transitions are plain CSS animations.

use super::domain::{ApplicationDraft, FieldName, Position, ScalarField};
use super::validation::ValidationErrors;
use super::view::{ApplicationView, SubmittedApplication, ViewState};
use url::Url;

const STYLES: &str = r#"
.form-container { max-width: 36rem; margin: 2rem auto; font-family: sans-serif; animation: mount-in 0.4s ease-out; }
.form-title { text-align: center; }
.form-group { display: flex; flex-direction: column; margin-bottom: 1rem; }
.form-group input, .form-group select, .form-group textarea { padding: 0.5rem; }
.checkbox-group { display: flex; gap: 1rem; }
.error-input { border: 1px solid #c0392b; }
.error { color: #c0392b; font-size: 0.85rem; margin-top: 0.25rem; }
.form-body, .form-summary { animation: fade-in 0.5s ease-in; }
@keyframes mount-in { from { opacity: 0; transform: translateY(-20px); } to { opacity: 1; transform: translateY(0); } }
@keyframes fade-in { from { opacity: 0; } to { opacity: 1; } }
"#;

/// Where the form posts and which skills it offers.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub action: &'a str,
    pub skills: &'a [String],
}

/// Render the full page for the view's current state.
pub fn render_page(view: &ApplicationView, options: &RenderOptions<'_>) -> String {
    let body = match view.state() {
        ViewState::Editing(editing) => render_form(editing.form.draft(), &editing.errors, options),
        ViewState::Submitted(submitted) => render_summary(submitted),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Job Application Form</title>\n<style>{STYLES}</style>\n</head>\n<body>\n\
         <div class=\"form-container\">\n<h1 class=\"form-title\">Job Application Form</h1>\n\
         {body}</div>\n</body>\n</html>\n"
    )
}

/// Editing state: visible controls with inline errors.
pub fn render_form(
    draft: &ApplicationDraft,
    errors: &ValidationErrors,
    options: &RenderOptions<'_>,
) -> String {
    let mut html = format!(
        "<form class=\"form-body\" method=\"post\" action=\"{}\">\n",
        escape(options.action)
    );

    for field in draft.visible_fields() {
        html.push_str("<div class=\"form-group\">\n");
        html.push_str(&render_control(field, draft, errors, options));
        if let Some(message) = errors.get(field) {
            html.push_str(&format!("<div class=\"error\">{}</div>\n", escape(message)));
        }
        html.push_str("</div>\n");
    }

    html.push_str(
        "<button type=\"submit\" name=\"intent\" value=\"submit\">Submit</button>\n\
         <button type=\"submit\" name=\"intent\" value=\"refresh\">Update fields</button>\n\
         </form>\n",
    );
    html
}

fn render_control(
    field: FieldName,
    draft: &ApplicationDraft,
    errors: &ValidationErrors,
    options: &RenderOptions<'_>,
) -> String {
    let key = field.key();
    let class = if errors.contains(field) {
        " class=\"error-input\""
    } else {
        ""
    };

    let scalar = match ScalarField::try_from(field) {
        Ok(scalar) => scalar,
        Err(_) => return render_skills(draft, options),
    };
    let value = escape(draft.value(scalar));

    let label = match field {
        FieldName::RelevantExperience => "Relevant Experience (years)",
        other => other.label(),
    };
    let mut html = format!("<label for=\"{key}\">{label}</label>\n");

    let control = match scalar {
        ScalarField::ApplyingForPosition => render_position_select(draft, class),
        ScalarField::ManagementExperience => {
            format!("<textarea id=\"{key}\" name=\"{key}\"{class}>{value}</textarea>\n")
        }
        other => {
            let input_type = match other {
                ScalarField::Email => "email",
                ScalarField::PhoneNumber => "tel",
                ScalarField::RelevantExperience => "number",
                ScalarField::PreferredInterviewTime => "datetime-local",
                _ => "text",
            };
            format!(
                "<input type=\"{input_type}\" id=\"{key}\" name=\"{key}\" value=\"{value}\"{class}>\n"
            )
        }
    };
    html.push_str(&control);
    html
}

fn render_position_select(draft: &ApplicationDraft, class: &str) -> String {
    let key = FieldName::ApplyingForPosition.key();
    let selected = draft.position();
    let mut html = format!(
        "<select id=\"{key}\" name=\"{key}\"{class}>\n<option value=\"\">Select Position</option>\n"
    );
    for position in Position::ALL {
        let marker = if selected == Some(position) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{label}\"{marker}>{label}</option>\n",
            label = position.label()
        ));
    }
    html.push_str("</select>\n");
    html
}

fn render_skills(draft: &ApplicationDraft, options: &RenderOptions<'_>) -> String {
    let selected = &draft.additional_skills;
    let mut offered: Vec<&str> = options.skills.iter().map(String::as_str).collect();
    for skill in selected.iter() {
        if !offered.contains(&skill) {
            offered.push(skill);
        }
    }

    let mut html =
        String::from("<label>Additional Skills</label>\n<div class=\"checkbox-group\">\n");
    for skill in offered {
        let checked = if selected.contains(skill) { " checked" } else { "" };
        let skill = escape(skill);
        html.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"skill\" value=\"{skill}\"{checked}> {skill}</label>\n"
        ));
    }
    html.push_str("</div>\n");
    html
}

/// Submitted state: read-only summary for the submitted position.
pub fn render_summary(submitted: &SubmittedApplication) -> String {
    let mut html = String::from(
        "<div class=\"form-summary\">\n<h2>Thank you for your submission!</h2>\n\
         <p>Here is a summary of your application:</p>\n<ul>\n",
    );

    for line in submitted.summary().lines {
        let value = if line.field == FieldName::PortfolioUrl {
            portfolio_link(&line.value)
        } else {
            escape(&line.value)
        };
        html.push_str(&format!("<li><strong>{}:</strong> {value}</li>\n", line.label));
    }

    html.push_str("</ul>\n</div>\n");
    html
}

/// Only web URLs become links; any other scheme is shown as text.
fn portfolio_link(raw: &str) -> String {
    let value = escape(raw);
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            format!("<a href=\"{value}\" target=\"_blank\" rel=\"noopener noreferrer\">{value}</a>")
        }
        _ => value,
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
