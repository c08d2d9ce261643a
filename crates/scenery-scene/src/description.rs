//! Persisted node descriptions.
//!
//! A node is stored as its name plus an ordered list of named component
//! blocks, each carrying a JSON props object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors reading or writing a node description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// A component the node type requires is absent.
    #[error("Missing required component '{0}'")]
    MissingComponent(String),

    /// A component's props do not match its schema.
    #[error("Invalid '{name}' component: {source}")]
    InvalidComponent {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A component could not be encoded.
    #[error("Failed to encode '{name}' component: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One named component of a persisted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBlock {
    pub name: String,
    #[serde(default)]
    pub props: serde_json::Value,
}

impl ComponentBlock {
    /// Encode `props` under `name`.
    pub fn new<T: Serialize>(name: impl Into<String>, props: &T) -> Result<Self, DescriptionError> {
        let name = name.into();
        let props = serde_json::to_value(props).map_err(|source| DescriptionError::Encode {
            name: name.clone(),
            source,
        })?;
        Ok(Self { name, props })
    }

    /// Decode the props into a typed component.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, DescriptionError> {
        serde_json::from_value(self.props.clone()).map_err(|source| {
            DescriptionError::InvalidComponent {
                name: self.name.clone(),
                source,
            }
        })
    }
}

/// A persisted scene-graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Stable identity, kept across save/load so exported network ids match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentBlock>,
}

impl NodeDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// First component called `name`.
    pub fn component(&self, name: &str) -> Option<&ComponentBlock> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.component(name).is_some()
    }

    /// Parse an optional component.
    pub fn parse_component<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, DescriptionError> {
        self.component(name).map(ComponentBlock::parse).transpose()
    }

    /// Parse a component that must be present.
    pub fn require_component<T: DeserializeOwned>(&self, name: &str) -> Result<T, DescriptionError> {
        self.component(name)
            .ok_or_else(|| DescriptionError::MissingComponent(name.to_string()))?
            .parse()
    }
}
