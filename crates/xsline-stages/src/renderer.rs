//! Handlebars-backed transform
//!
//! The current document is exposed to the template as `doc`. Helpers:
//! - upper: uppercase a string
//! - lower: lowercase a string
//! - trim: strip surrounding whitespace
//! - json: encode any value as JSON, for splicing into `output: json` templates

use crate::definition::{OutputKind, TemplateDefinition, TemplateError};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::{json, Value};
use xsline_core::{Document, Transform, TransformFailure};

const TEMPLATE_NAME: &str = "shift";

handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(trim: |s: str| s.trim().to_string());
handlebars_helper!(to_json: |v: Json| v.to_string());

/// One compiled template definition
pub struct TemplateTransform {
    handlebars: Handlebars<'static>,
    definition: TemplateDefinition,
}

impl TemplateTransform {
    /// Compile `definition` into a ready engine
    pub fn new(definition: TemplateDefinition) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();

        // Documents are trees, not HTML
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(false);

        handlebars.register_helper("upper", Box::new(upper));
        handlebars.register_helper("lower", Box::new(lower));
        handlebars.register_helper("trim", Box::new(trim));
        handlebars.register_helper("json", Box::new(to_json));

        handlebars
            .register_template_string(TEMPLATE_NAME, &definition.template)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        Ok(Self {
            handlebars,
            definition,
        })
    }

    /// Parse and compile a YAML definition
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        Self::new(TemplateDefinition::from_yaml(yaml)?)
    }

    pub fn definition(&self) -> &TemplateDefinition {
        &self.definition
    }

    /// Render against `doc` and turn the text into the next document
    pub fn render(&self, doc: &Document) -> Result<Document, TemplateError> {
        let rendered = self
            .handlebars
            .render(TEMPLATE_NAME, &json!({ "doc": doc.as_value() }))
            .map_err(|e| TemplateError::Render(e.to_string()))?;

        match self.definition.output {
            OutputKind::Text => Ok(Document::text(rendered)),
            OutputKind::Json => serde_json::from_str::<Value>(&rendered)
                .map(Document::new)
                .map_err(|e| TemplateError::Output(e.to_string())),
        }
    }
}

impl Transform for TemplateTransform {
    fn declared_id(&self) -> Option<String> {
        self.definition.id.clone()
    }

    fn transform(&self, doc: &Document) -> Result<Document, TransformFailure> {
        Ok(self.render(doc)?)
    }
}
