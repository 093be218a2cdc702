//! Xsline Stages: reference leaf shifts backed by handlebars templates.
//!
//! The engine treats transforms as opaque. These stay intentionally small
//! so pipelines can be assembled and run without a real rewrite engine;
//! teams are expected to plug in their own [`xsline_core::Transform`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use xsline_core::{Document, TrDefault, Train, Xsline};
//! use xsline_stages::{builtin_registry, resource, template};
//!
//! let registry = Arc::new(builtin_registry());
//! let train = TrDefault::new()
//!     .with(resource(&registry, "trim"))
//!     .with(template("id: greet\ntemplate: \"hello {{doc}}\"").unwrap());
//!
//! let out = Xsline::new(train).pass(Document::text("  world ")).unwrap();
//! assert_eq!(out.as_str(), Some("hello world"));
//! ```

pub mod definition;
pub mod registry;
pub mod renderer;

pub use definition::{OutputKind, TemplateDefinition, TemplateError};
pub use registry::ResourceRegistry;
pub use renderer::TemplateTransform;

use std::sync::Arc;
use xsline_core::{ShiftExt, ShiftRef, StResource, StTransform, TrDefault, Train, TrainRef};

/// A shift running one inline template definition
pub fn template(yaml: &str) -> Result<ShiftRef, TemplateError> {
    Ok(StTransform::new(TemplateTransform::from_yaml(yaml)?).into_ref())
}

/// A shift running the definition registered under `name`, looked up on first use
pub fn resource(registry: &Arc<ResourceRegistry>, name: &str) -> ShiftRef {
    StResource::new(registry.clone(), name).into_ref()
}

/// Registry preloaded with a few text definitions
pub fn builtin_registry() -> ResourceRegistry {
    ResourceRegistry::new()
        .with_definition("trim", "id: trim\ntemplate: \"{{trim doc}}\"")
        .with_definition("upper", "id: upper\ntemplate: \"{{upper doc}}\"")
        .with_definition("lower", "id: lower\ntemplate: \"{{lower doc}}\"")
        .with_definition(
            "add-brackets",
            "id: add-brackets\ntemplate: \"[{{doc}}]\"",
        )
}

/// `trim → lower`, resolved against `registry`
pub fn normalize_train(registry: &Arc<ResourceRegistry>) -> TrainRef<ShiftRef> {
    TrDefault::new()
        .with(resource(registry, "trim"))
        .with(resource(registry, "lower"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsline_core::{Document, Shift, Xsline};

    #[test]
    fn test_builtin_registry() {
        let registry = builtin_registry();
        assert_eq!(registry.names(), vec!["add-brackets", "lower", "trim", "upper"]);
    }

    #[test]
    fn test_normalize_train() {
        let registry = Arc::new(builtin_registry());
        let report = Xsline::new(normalize_train(&registry))
            .run(Document::text("  MiXeD  "))
            .unwrap();
        assert_eq!(report.output.as_str(), Some("mixed"));
        assert_eq!(report.uids, vec!["trim", "lower"]);
    }

    #[test]
    fn test_inline_template_uid() {
        let shift = template("id: inline-1\ntemplate: \"{{doc}}\"").unwrap();
        assert_eq!(shift.uid(), "inline-1");
    }
}
