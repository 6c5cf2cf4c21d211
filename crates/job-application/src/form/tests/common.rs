use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::FormConfig;
use crate::form::domain::{ApplicationDraft, SkillSet};
use crate::form::service::FormService;
use crate::form::store::{StoreError, ViewId, ViewStore};
use crate::form::view::ApplicationView;

fn base_draft(position: &str) -> ApplicationDraft {
    ApplicationDraft {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        phone_number: "5550100".to_string(),
        applying_for_position: position.to_string(),
        additional_skills: ["JavaScript", "Python"].into_iter().collect::<SkillSet>(),
        preferred_interview_time: "2026-11-02T14:30".to_string(),
        ..ApplicationDraft::default()
    }
}

pub(super) fn developer_draft() -> ApplicationDraft {
    ApplicationDraft {
        relevant_experience: "4".to_string(),
        ..base_draft("Developer")
    }
}

pub(super) fn designer_draft() -> ApplicationDraft {
    ApplicationDraft {
        relevant_experience: "3".to_string(),
        portfolio_url: "https://portfolio.example.com/jane".to_string(),
        ..base_draft("Designer")
    }
}

pub(super) fn manager_draft() -> ApplicationDraft {
    ApplicationDraft {
        management_experience: "Led a team of 5".to_string(),
        ..base_draft("Manager")
    }
}

pub(super) fn form_config() -> FormConfig {
    FormConfig::default()
}

pub(super) fn build_service() -> (FormService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = FormService::new(store.clone(), form_config());
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) views: Arc<Mutex<HashMap<ViewId, ApplicationView>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.views.lock().expect("store mutex poisoned").len()
    }
}

impl ViewStore for MemoryStore {
    fn insert(&self, id: ViewId, view: ApplicationView) -> Result<(), StoreError> {
        let mut guard = self.views.lock().expect("store mutex poisoned");
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(id, view);
        Ok(())
    }

    fn fetch(&self, id: &ViewId) -> Result<Option<ApplicationView>, StoreError> {
        let guard = self.views.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify<T, E, F>(&self, id: &ViewId, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut ApplicationView) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut guard = self.views.lock().expect("store mutex poisoned");
        let slot = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        let mut next = slot.clone();
        let value = apply(&mut next)?;
        *slot = next;
        Ok(value)
    }

    fn remove(&self, id: &ViewId) -> Result<Option<ApplicationView>, StoreError> {
        let mut guard = self.views.lock().expect("store mutex poisoned");
        Ok(guard.remove(id))
    }
}

pub(super) struct UnavailableStore;

impl ViewStore for UnavailableStore {
    fn insert(&self, _id: ViewId, _view: ApplicationView) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &ViewId) -> Result<Option<ApplicationView>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn modify<T, E, F>(&self, _id: &ViewId, _apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut ApplicationView) -> Result<T, E>,
        E: From<StoreError>,
    {
        Err(StoreError::Unavailable("offline".to_string()).into())
    }

    fn remove(&self, _id: &ViewId) -> Result<Option<ApplicationView>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
