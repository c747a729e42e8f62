//! Generator and dialect configuration.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! [generator]
//! conditional_true = "1 = 1"
//! conditional_false = "1 = 0"
//! parameter_rendering = "literal"
//!
//! [dialect]
//! supports_except_all = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CriteriaError, CriteriaResult};

/// How parameters are rendered by the query generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterRenderingMode {
    /// `:name` or `?1`
    #[default]
    Placeholder,
    /// The bound value, falling back to the placeholder when unbound
    Literal,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub dialect: DialectConfig,
}

impl CriteriaConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> CriteriaResult<Self> {
        toml::from_str(content).map_err(|e| CriteriaError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> CriteriaResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading criteria config from: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Rendering options of the query generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Boolean literal text in a predicate context
    #[serde(default = "default_true_text")]
    pub conditional_true: String,
    #[serde(default = "default_false_text")]
    pub conditional_false: String,

    /// Boolean literal text in a CASE WHEN context
    #[serde(default = "default_true_text")]
    pub boolean_true: String,
    #[serde(default = "default_false_text")]
    pub boolean_false: String,

    #[serde(default)]
    pub parameter_rendering: ParameterRenderingMode,

    /// Function wrapped around both sides of a case-insensitive LIKE
    #[serde(default = "default_case_insensitive_function")]
    pub case_insensitive_function: String,
}

fn default_true_text() -> String {
    "TRUE".to_string()
}

fn default_false_text() -> String {
    "FALSE".to_string()
}

fn default_case_insensitive_function() -> String {
    "UPPER".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            conditional_true: default_true_text(),
            conditional_false: default_false_text(),
            boolean_true: default_true_text(),
            boolean_false: default_false_text(),
            parameter_rendering: ParameterRenderingMode::default(),
            case_insensitive_function: default_case_insensitive_function(),
        }
    }
}

impl GeneratorConfig {
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    pub(crate) fn conditional(&self, value: bool) -> &str {
        if value { &self.conditional_true } else { &self.conditional_false }
    }

    pub(crate) fn boolean(&self, value: bool) -> &str {
        if value { &self.boolean_true } else { &self.boolean_false }
    }
}

/// Builder for [`GeneratorConfig`]
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Set the predicate-context boolean texts
    pub fn conditional(mut self, when_true: impl Into<String>, when_false: impl Into<String>) -> Self {
        self.config.conditional_true = when_true.into();
        self.config.conditional_false = when_false.into();
        self
    }

    /// Set the CASE WHEN context boolean texts
    pub fn boolean(mut self, when_true: impl Into<String>, when_false: impl Into<String>) -> Self {
        self.config.boolean_true = when_true.into();
        self.config.boolean_false = when_false.into();
        self
    }

    pub fn parameter_rendering(mut self, mode: ParameterRenderingMode) -> Self {
        self.config.parameter_rendering = mode;
        self
    }

    pub fn case_insensitive_function(mut self, name: impl Into<String>) -> Self {
        self.config.case_insensitive_function = name.into();
        self
    }

    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

/// Dialect capabilities consulted when assembling set operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialectConfig {
    #[serde(default = "default_true")]
    pub supports_intersect_all: bool,
    #[serde(default = "default_true")]
    pub supports_except_all: bool,
    /// ORDER BY of a set operation must reference select aliases
    #[serde(default)]
    pub needs_alias_in_set_order_by: bool,
    /// Derived tables must carry an alias
    #[serde(default)]
    pub needs_alias_for_from_clause: bool,
    /// Appended to `partition by ...` when the dialect needs an ORDER BY in window functions
    #[serde(default)]
    pub window_function_dummy_order_by: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            supports_intersect_all: true,
            supports_except_all: true,
            needs_alias_in_set_order_by: false,
            needs_alias_for_from_clause: false,
            window_function_dummy_order_by: None,
        }
    }
}
