//! Template definitions
//!
//! A definition is a small YAML document:
//!
//! ```yaml
//! id: add-brackets
//! description: Wrap the text root in square brackets
//! template: "[{{doc}}]"
//! output: text
//! ```

use serde::Deserialize;
use thiserror::Error;
use xsline_core::ShiftError;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Definition parse failed: {0}")]
    Parse(String),
    #[error("Template compile failed: {0}")]
    Compile(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Output is not a valid tree: {0}")]
    Output(String),
}

impl From<TemplateError> for ShiftError {
    fn from(err: TemplateError) -> Self {
        ShiftError::Configuration(err.to_string())
    }
}

/// How rendered text becomes the next document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// The rendered text is the new text root
    #[default]
    Text,
    /// The rendered text is parsed as JSON
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDefinition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub template: String,
    #[serde(default)]
    pub output: OutputKind,
}

impl TemplateDefinition {
    /// Parse one definition from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        serde_yaml::from_str(yaml).map_err(|e| TemplateError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_definition() {
        let yaml = r#"
id: to-json
description: Build an object
template: '{"name": "{{doc}}"}'
output: json
"#;
        let def = TemplateDefinition::from_yaml(yaml).unwrap();
        assert_eq!(def.id.as_deref(), Some("to-json"));
        assert_eq!(def.output, OutputKind::Json);
    }

    #[test]
    fn test_defaults() {
        let def = TemplateDefinition::from_yaml("template: \"{{doc}}!\"").unwrap();
        assert!(def.id.is_none());
        assert_eq!(def.output, OutputKind::Text);
    }

    #[test]
    fn test_missing_template() {
        let err = TemplateDefinition::from_yaml("id: nothing").unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }
}
