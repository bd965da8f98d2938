//! Source tree selection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

fn default_suffixes() -> Vec<String> {
    vec![".c".to_string(), ".h".to_string()]
}

fn default_excluded_trees() -> Vec<String> {
    vec!["Include/cpython/".to_string()]
}

/// Which files under the scanned roots are C sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// File name suffixes to scan, leading `.` included, in report order.
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,

    /// Subtrees to skip, relative to `relative_to` (or the walked root).
    #[serde(default = "default_excluded_trees")]
    pub excluded_trees: Vec<String>,

    /// Directory reported paths are made relative to.
    #[serde(default)]
    pub relative_to: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
            excluded_trees: default_excluded_trees(),
            relative_to: None,
        }
    }
}

impl SourceConfig {
    /// Check the suffix and excluded tree lists.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suffixes.is_empty() {
            return Err(invalid("source.suffixes", "at least one suffix is required"));
        }
        if let Some(bad) = self.suffixes.iter().find(|s| !is_valid_suffix(s)) {
            return Err(invalid(
                "source.suffixes",
                format!("'{bad}' is not a '.'-prefixed file suffix"),
            ));
        }
        if self.excluded_trees.iter().any(|tree| tree.trim().is_empty()) {
            return Err(invalid("source.excluded_trees", "empty tree path"));
        }
        Ok(())
    }
}

/// A suffix is a `.` followed by at least one character and no separator.
#[must_use]
pub fn is_valid_suffix(suffix: &str) -> bool {
    suffix
        .strip_prefix('.')
        .is_some_and(|rest| !rest.is_empty() && !rest.contains(['/', '\\']))
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
