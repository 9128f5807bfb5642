//! Property bags
//!
//! Custom metadata attached to chats, threads and events, grouped by
//! namespace. Values can be any JSON shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Names of properties to delete, grouped by namespace
pub type DeletedProperties = HashMap<String, Vec<String>>;

/// Namespace -> property name -> value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(HashMap<String, HashMap<String, Value>>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property as `T`. Missing properties and values of another
    /// shape both come back as `None`.
    pub fn get<T: DeserializeOwned>(&self, namespace: &str, name: &str) -> Option<T> {
        let value = self.0.get(namespace)?.get(name)?;
        T::deserialize(value).ok()
    }

    /// Raw value of a property
    pub fn get_value(&self, namespace: &str, name: &str) -> Option<&Value> {
        self.0.get(namespace)?.get(name)
    }

    /// Store `value` under `namespace.name`, replacing any previous value
    pub fn set<T: Serialize>(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: T,
    ) -> serde_json::Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        self.0
            .entry(namespace.into())
            .or_default()
            .insert(name.into(), value);
        Ok(self)
    }

    /// Remove a single property. Empty namespaces are dropped as well.
    pub fn remove(&mut self, namespace: &str, name: &str) -> Option<Value> {
        let ns = self.0.get_mut(namespace)?;
        let removed = ns.remove(name);
        if ns.is_empty() {
            self.0.remove(namespace);
        }
        removed
    }

    pub fn namespace(&self, namespace: &str) -> Option<&HashMap<String, Value>> {
        self.0.get(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<HashMap<String, HashMap<String, Value>>> for Properties {
    fn from(map: HashMap<String, HashMap<String, Value>>) -> Self {
        Self(map)
    }
}

impl From<Properties> for HashMap<String, HashMap<String, Value>> {
    fn from(properties: Properties) -> Self {
        properties.0
    }
}
