//! The job application form component.
//!
//! `FormState` owns the draft and applies input events, `validation` turns a draft into
//! field-keyed messages, and `ApplicationView` runs the editing/submitted state machine on top
//! of both. `render` and `router` present a view over HTTP; `store` keeps mounted views alive
//! until they are unmounted.

pub mod domain;
pub mod render;
pub mod router;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;
pub mod view;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDraft, FieldKeyError, FieldName, Position, ScalarField, SkillSet, UnknownPosition,
};
pub use render::{render_page, RenderOptions};
pub use router::{form_router, ViewSnapshot};
pub use service::{FormService, FormServiceError};
pub use state::FormState;
pub use store::{StoreError, ViewId, ViewStore};
pub use validation::{validate, ValidationErrors};
pub use view::{
    ApplicationSummary, ApplicationView, SubmitOutcome, SubmittedApplication, SummaryLine,
    ViewError, ViewPhase, ViewState,
};
