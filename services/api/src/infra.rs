use job_application::form::{ApplicationView, StoreError, ViewId, ViewStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct StoredView {
    view: ApplicationView,
    touched: Instant,
}

type ViewMap = HashMap<ViewId, StoredView>;

/// Process-local view store. Views vanish on unmount, idle expiry or restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryViewStore {
    views: Arc<Mutex<ViewMap>>,
}

impl InMemoryViewStore {
    fn lock(&self) -> Result<MutexGuard<'_, ViewMap>, StoreError> {
        self.views
            .lock()
            .map_err(|_| StoreError::Unavailable("view store mutex poisoned".to_string()))
    }

    /// Drop views nobody has touched for `max_idle` as of `now`. Returns how many were dropped.
    pub(crate) fn evict_idle(
        &self,
        now: Instant,
        max_idle: Duration,
    ) -> Result<usize, StoreError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|_, stored| now.saturating_duration_since(stored.touched) < max_idle);
        Ok(before - guard.len())
    }
}

impl ViewStore for InMemoryViewStore {
    fn insert(&self, id: ViewId, view: ApplicationView) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(
            id,
            StoredView {
                view,
                touched: Instant::now(),
            },
        );
        Ok(())
    }

    fn fetch(&self, id: &ViewId) -> Result<Option<ApplicationView>, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.get_mut(id).map(|stored| {
            stored.touched = Instant::now();
            stored.view.clone()
        }))
    }

    fn modify<T, E, F>(&self, id: &ViewId, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut ApplicationView) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut guard = self.lock()?;
        let stored = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        let mut next = stored.view.clone();
        let value = apply(&mut next)?;
        stored.view = next;
        stored.touched = Instant::now();
        Ok(value)
    }

    fn remove(&self, id: &ViewId) -> Result<Option<ApplicationView>, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id).map(|stored| stored.view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_application::form::{ScalarField, ViewError};

    fn id(raw: &str) -> ViewId {
        ViewId(raw.to_string())
    }

    fn rename(store: &InMemoryViewStore, view_id: &ViewId, name: &str) -> Result<(), StoreError> {
        store.modify(view_id, |view| {
            view.on_field_change(ScalarField::FullName, name)
                .map_err(|_: ViewError| StoreError::Conflict)
        })
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let store = InMemoryViewStore::default();
        store
            .insert(id("view-1"), ApplicationView::new())
            .expect("first insert");

        assert!(matches!(
            store.insert(id("view-1"), ApplicationView::new()),
            Err(StoreError::Conflict)
        ));
    }

    #[test]
    fn modify_requires_mounted_view() {
        let store = InMemoryViewStore::default();
        assert!(matches!(
            rename(&store, &id("view-2"), "Jane Doe"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn fetch_returns_latest_modification() {
        let store = InMemoryViewStore::default();
        store
            .insert(id("view-3"), ApplicationView::new())
            .expect("insert");

        rename(&store, &id("view-3"), "Jane Doe").expect("modify");

        let stored = store
            .fetch(&id("view-3"))
            .expect("fetch")
            .expect("view present");
        assert_eq!(stored.draft().full_name, "Jane Doe");
    }

    #[test]
    fn remove_drops_the_view() {
        let store = InMemoryViewStore::default();
        store
            .insert(id("view-4"), ApplicationView::new())
            .expect("insert");

        assert!(store.remove(&id("view-4")).expect("remove").is_some());
        assert!(store.fetch(&id("view-4")).expect("fetch").is_none());
        assert!(store.remove(&id("view-4")).expect("remove").is_none());
    }

    #[test]
    fn idle_views_are_evicted() {
        let store = InMemoryViewStore::default();
        let ttl = Duration::from_secs(60);
        store
            .insert(id("view-5"), ApplicationView::new())
            .expect("insert");

        assert_eq!(store.evict_idle(Instant::now(), ttl).expect("sweep"), 0);
        assert!(store.fetch(&id("view-5")).expect("fetch").is_some());

        let later = Instant::now() + Duration::from_secs(120);
        assert_eq!(store.evict_idle(later, ttl).expect("sweep"), 1);
        assert!(store.fetch(&id("view-5")).expect("fetch").is_none());
    }

    #[test]
    fn recently_touched_views_survive_sweep() {
        let store = InMemoryViewStore::default();
        let ttl = Duration::from_secs(60);
        store
            .insert(id("view-6"), ApplicationView::new())
            .expect("insert");
        store
            .insert(id("view-7"), ApplicationView::new())
            .expect("insert");

        let sweep_at = Instant::now() + Duration::from_secs(90);
        {
            let mut guard = store.views.lock().expect("view store mutex poisoned");
            if let Some(stored) = guard.get_mut(&id("view-7")) {
                stored.touched = sweep_at - Duration::from_secs(10);
            }
        }

        assert_eq!(store.evict_idle(sweep_at, ttl).expect("sweep"), 1);
        assert!(store.fetch(&id("view-6")).expect("fetch").is_none());
        assert!(store.fetch(&id("view-7")).expect("fetch").is_some());
    }
}
