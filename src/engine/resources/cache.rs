use std::collections::HashMap;

use log::{debug, warn};

use crate::engine::error::ResourceError;

/// Named storage for one kind of resource.
pub struct ResourceCache<T> {
    kind: &'static str,
    entries: HashMap<String, T>,
}

impl<T> ResourceCache<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Stores `value` under `name`, handing back whatever it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        debug!("Caching {} `{}`", self.kind, name);
        let previous = self.entries.insert(name.clone(), value);
        if previous.is_some() {
            warn!("Replaced an already loaded {} `{}`", self.kind, name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Result<&T, ResourceError> {
        self.entries.get(name).ok_or_else(|| ResourceError::Missing {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names currently cached, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
