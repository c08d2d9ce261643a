//! Export-format components attached to a node before scene export.

use crate::description::DescriptionError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered component name → props map written into the exported scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportComponents {
    entries: Vec<(String, serde_json::Value)>,
}

impl ExportComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a component.
    pub fn add<T: Serialize>(&mut self, name: &str, props: &T) -> Result<(), DescriptionError> {
        let value = serde_json::to_value(props).map_err(|source| DescriptionError::Encode {
            name: name.to_string(),
            source,
        })?;

        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Component names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExportComponents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, props) in &self.entries {
            map.serialize_entry(name, props)?;
        }
        map.end()
    }
}
