use scrollbox_runtime::ScrollStore;
use tracing::debug;
use web_sys::Storage;

/// The calls [`SessionStore`] makes on a storage area.
pub trait StorageArea {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

impl StorageArea for Storage {
    fn get(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.set_item(key, value).is_ok()
    }

    fn remove(&self, key: &str) {
        if self.remove_item(key).is_err() {
            debug!(key, "could not clear sidebar scroll");
        }
    }
}

/// `window.sessionStorage`, when the browser lets us have it.
pub struct SessionStore<A = Storage> {
    area: Option<A>,
}

impl SessionStore {
    pub fn new() -> Self {
        let area = web_sys::window().and_then(|window| window.session_storage().ok().flatten());
        Self::with_area(area)
    }
}

impl<A: StorageArea> SessionStore<A> {
    pub fn with_area(area: Option<A>) -> Self {
        Self { area }
    }
}

impl<A: StorageArea> ScrollStore for SessionStore<A> {
    fn save(&mut self, key: &str, value: String) {
        let Some(area) = &self.area else {
            debug!("no session storage, scroll offset dropped");
            return;
        };
        if !area.set(key, &value) {
            debug!(key, "could not persist sidebar scroll");
        }
    }

    fn take(&mut self, key: &str) -> Option<String> {
        let area = self.area.as_ref()?;
        let value = area.get(key);
        area.remove(key);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeArea {
        values: RefCell<HashMap<String, String>>,
        read_only: bool,
    }

    impl StorageArea for FakeArea {
        fn get(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            if self.read_only {
                return false;
            }
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn remove(&self, key: &str) {
            self.values.borrow_mut().remove(key);
        }
    }

    #[test]
    fn take_reads_then_clears() {
        let mut store = SessionStore::with_area(Some(FakeArea::default()));
        store.save("sidebar-scroll", "150".to_string());

        assert_eq!(store.take("sidebar-scroll"), Some("150".to_string()));
        assert_eq!(store.take("sidebar-scroll"), None);
    }

    #[test]
    fn missing_storage_degrades_to_nothing() {
        let mut store: SessionStore<FakeArea> = SessionStore::with_area(None);
        store.save("sidebar-scroll", "150".to_string());
        assert_eq!(store.take("sidebar-scroll"), None);
    }

    #[test]
    fn refused_writes_are_not_errors() {
        let mut store = SessionStore::with_area(Some(FakeArea {
            read_only: true,
            ..FakeArea::default()
        }));
        store.save("sidebar-scroll", "150".to_string());
        assert_eq!(store.take("sidebar-scroll"), None);
    }
}
