//! Runner configuration
use crate::error::{ShiftError, ShiftResult};
use serde::{Deserialize, Serialize};

/// Environment variable toggling the pass summary
pub const ENV_DIAGNOSTICS: &str = "XSLINE_DIAGNOSTICS";
/// Environment variable toggling per-shift tracing
pub const ENV_TRACE_SHIFTS: &str = "XSLINE_TRACE_SHIFTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XslineConfig {
    /// Hand a summary of every pass to the diagnostics sink
    pub diagnostics: bool,
    /// Wrap every shift of a pass in `StLogged`
    pub trace_shifts: bool,
}

impl Default for XslineConfig {
    fn default() -> Self {
        Self {
            diagnostics: true,
            trace_shifts: false,
        }
    }
}

impl XslineConfig {
    /// Parse a config, missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> ShiftResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ShiftError::Configuration(format!("invalid runner config: {}", e)))
    }

    /// Defaults, overridden by `XSLINE_DIAGNOSTICS` and `XSLINE_TRACE_SHIFTS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            diagnostics: lookup(ENV_DIAGNOSTICS)
                .map(|v| truthy(&v))
                .unwrap_or(defaults.diagnostics),
            trace_shifts: lookup(ENV_TRACE_SHIFTS)
                .map(|v| truthy(&v))
                .unwrap_or(defaults.trace_shifts),
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
