//! Runtime configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! text_input_kinds = ["text-input"]
//! undo_policy = "exchange"
//! panel_anchor = "bottom-end"
//! panel_extra_offset = 0
//! extra_fold_groups = ["äæ=a", "öœ=o"]
//! ```

use crate::fold::{FoldGroup, FoldTable};
use crate::host::{Anchor, TEXT_INPUT_KIND};
use crate::undo::UndoPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Element kinds whose focus/text events select the target field
    pub text_input_kinds: Vec<String>,

    /// `exchange` keeps undo repeatable (second undo redoes), `consume`
    /// empties the slot after one undo
    pub undo_policy: UndoPolicy,

    /// Screen corner the panel is pinned to
    pub panel_anchor: Anchor,
    /// Pixels added to the keyboard height when placing the panel
    pub panel_extra_offset: i32,

    /// Additional fold groups as `"variants=c"` rules, applied after the
    /// built-in groups so they take precedence
    pub extra_fold_groups: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_input_kinds: vec![TEXT_INPUT_KIND.to_string()],
            undo_policy: UndoPolicy::Exchange,
            panel_anchor: Anchor::BottomEnd,
            panel_extra_offset: 0,
            extra_fold_groups: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed `extra_fold_groups`. Malformed rules are skipped with a warning.
    pub fn fold_groups(&self) -> Vec<FoldGroup> {
        self.extra_fold_groups
            .iter()
            .filter_map(|rule| {
                let group = FoldGroup::parse(rule);
                if group.is_none() {
                    warn!(rule = %rule, "ignoring malformed fold group");
                }
                group
            })
            .collect()
    }

    /// Fold table for this configuration.
    pub fn fold_table(&self) -> FoldTable {
        FoldTable::with_extra_groups(&self.fold_groups())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.text_input_kinds, vec!["text-input".to_string()]);
        assert_eq!(config.undo_policy, UndoPolicy::Exchange);
    }

    #[test]
    fn test_parse_fields() {
        let config = Config::from_toml_str(
            r#"
            text_input_kinds = ["android.widget.EditText"]
            undo_policy = "consume"
            panel_anchor = "bottom-start"
            panel_extra_offset = 12
            extra_fold_groups = ["äæ=a", "broken"]
            "#,
        )
        .unwrap();
        assert_eq!(config.undo_policy, UndoPolicy::Consume);
        assert_eq!(config.panel_anchor, Anchor::BottomStart);
        assert_eq!(config.panel_extra_offset, 12);
        assert_eq!(config.fold_groups(), vec![FoldGroup::new("äæ", 'a')]);
        assert_eq!(config.fold_table().fold("Ä"), "a");
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("undo_policy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.panel_extra_offset = 8;
        config.extra_fold_groups.push("ø=o".to_string());
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "keyboard_extension_config_{}.toml",
            std::process::id()
        ));
        let mut config = Config::default();
        config.undo_policy = UndoPolicy::Consume;
        config.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_toml("/nonexistent/keyboard-extension.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
