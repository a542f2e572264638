use std::collections::HashMap;

/// Session-scoped key/value slot the sidebar uses to carry its scroll
/// offset from one page load to the next.
pub trait ScrollStore {
    fn save(&mut self, key: &str, value: String);

    /// Reads the value and clears the slot.
    fn take(&mut self, key: &str) -> Option<String>;
}

/// In-process store, used by the command line session and in tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ScrollStore for MemoryStore {
    fn save(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl<S: ScrollStore + ?Sized> ScrollStore for &mut S {
    fn save(&mut self, key: &str, value: String) {
        (**self).save(key, value)
    }

    fn take(&mut self, key: &str) -> Option<String> {
        (**self).take(key)
    }
}
