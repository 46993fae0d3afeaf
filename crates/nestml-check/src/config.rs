//! Checker configuration, read from TOML.
//!
//! ```toml
//! [definition_order]
//! enabled = true
//! report_unresolved = true
//! ```
//!
//! Every key is optional; missing keys take their defaults. Unknown keys
//! are rejected.

use crate::error::CheckError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub definition_order: DefinitionOrderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefinitionOrderConfig {
    /// Run the definition-order condition at all.
    pub enabled: bool,
    /// Emit `VAR_UNRESOLVED` warnings for names missing from the scope
    /// chain. Errors are reported either way. With `false`, an absent name
    /// no longer yields its one warning, so findings differ from the
    /// default checker's.
    pub report_unresolved: bool,
}

impl Default for DefinitionOrderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_unresolved: true,
        }
    }
}

impl CheckConfig {
    /// Parse a config from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, CheckError> {
        toml::from_str(text).map_err(|source| CheckError::ParseToml {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let text = std::fs::read_to_string(path).map_err(|source| CheckError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), ?config, "checker config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        let config = CheckConfig::from_toml_str("", "<inline>").unwrap();
        assert_eq!(config, CheckConfig::default());
        assert!(config.definition_order.enabled);
        assert!(config.definition_order.report_unresolved);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let text = "[definition_order]\nreport_unresolved = false\n";
        let config = CheckConfig::from_toml_str(text, "<inline>").unwrap();
        assert!(config.definition_order.enabled);
        assert!(!config.definition_order.report_unresolved);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = "[definition_order]\nstrict = true\n";
        let err = CheckConfig::from_toml_str(text, "nestml.toml").unwrap_err();
        assert!(matches!(err, CheckError::ParseToml { ref path, .. } if path == "nestml.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = CheckConfig::load(Path::new("/nonexistent/nestml-check.toml")).unwrap_err();
        assert!(matches!(err, CheckError::ReadFile { .. }));
    }
}
