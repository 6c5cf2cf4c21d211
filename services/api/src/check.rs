//! Offline check of a saved draft: runs one submit attempt and reports the outcome.

use clap::Args;
use job_application::error::AppError;
use job_application::form::{ApplicationDraft, ApplicationView, SubmitOutcome};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// JSON file holding a draft keyed by form field names
    pub(crate) draft: PathBuf,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.draft)?;
    let report = check_draft(&raw)?;
    print!("{report}");
    Ok(())
}

fn check_draft(raw: &str) -> Result<String, AppError> {
    let draft: ApplicationDraft = serde_json::from_str(raw)?;
    let mut view = ApplicationView::with_draft(draft);
    let report = match view.submit()? {
        SubmitOutcome::Rejected(errors) => {
            let mut report = String::from("Submission rejected\n");
            for (field, message) in errors.iter() {
                report.push_str(&format!("- {}: {}\n", field.label(), message));
            }
            report
        }
        SubmitOutcome::Accepted(summary) => {
            let mut report = String::from("Thank you for your submission!\n");
            for line in &summary.lines {
                report.push_str(&format!("{}: {}\n", line.label, line.value));
            }
            report
        }
    };

    Ok(report)
}
