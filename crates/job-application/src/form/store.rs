use serde::{Deserialize, Serialize};

use super::view::ApplicationView;

/// Identifier of one mounted view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub String);

/// Holds mounted views for the lifetime of each view. Nothing outlives `remove`.
pub trait ViewStore: Send + Sync {
    fn insert(&self, id: ViewId, view: ApplicationView) -> Result<(), StoreError>;
    fn fetch(&self, id: &ViewId) -> Result<Option<ApplicationView>, StoreError>;

    /// Run `apply` against the stored view while holding it exclusively.
    ///
    /// The view is replaced only when `apply` succeeds, so a failed event leaves it untouched.
    fn modify<T, E, F>(&self, id: &ViewId, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut ApplicationView) -> Result<T, E>,
        E: From<StoreError>;

    fn remove(&self, id: &ViewId) -> Result<Option<ApplicationView>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("view already mounted")]
    Conflict,
    #[error("view not found")]
    NotFound,
    #[error("view store unavailable: {0}")]
    Unavailable(String),
}
