//! In-memory home for named template definitions
use crate::renderer::TemplateTransform;
use std::collections::HashMap;
use std::sync::Arc;
use xsline_core::{ResourceLocator, ShiftError, ShiftResult, Transform};

/// Definitions registered by name, compiled when a shift first asks for them
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    definitions: HashMap<String, String>,
}

impl ResourceRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ResourceRegistry::register`]
    pub fn with_definition(mut self, name: impl Into<String>, yaml: impl Into<String>) -> Self {
        self.register(name, yaml);
        self
    }

    /// Register `yaml` under `name`, replacing any earlier definition
    pub fn register(&mut self, name: impl Into<String>, yaml: impl Into<String>) {
        self.definitions.insert(name.into(), yaml.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl ResourceLocator for ResourceRegistry {
    fn locate(&self, name: &str) -> ShiftResult<Arc<dyn Transform>> {
        let yaml = self
            .definitions
            .get(name)
            .ok_or_else(|| ShiftError::not_found(name))?;
        tracing::debug!(target: "xsline", resource = name, "compiling template definition");
        Ok(Arc::new(TemplateTransform::from_yaml(yaml)?))
    }
}
