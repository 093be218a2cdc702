//! Document: the immutable tree value that travels through a pipeline
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Immutable tree-structured document.
///
/// Cloning is cheap: the underlying tree is shared, never mutated. A shift
/// that wants a different tree builds a new one and wraps it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Arc<Value>);

impl Document {
    /// Wrap an existing tree
    pub fn new(value: Value) -> Self {
        Self(Arc::new(value))
    }

    /// A document whose root is a single text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Value::String(text.into()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Root text, if the root is a text leaf
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// The underlying tree, cloned only if still shared
    pub fn into_value(self) -> Value {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Length in bytes of the compact JSON encoding
    pub fn size(&self) -> usize {
        serde_json::to_vec(self.as_value())
            .map(|bytes| bytes.len())
            .unwrap_or(0)
    }

    /// Content digest, stable across clones and processes
    pub fn digest(&self) -> String {
        let bytes = serde_json::to_vec(self.as_value()).unwrap_or_default();
        format!("blake3:{}", blake3::hash(&bytes))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
