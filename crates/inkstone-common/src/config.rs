//! Editor configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the editor shell.
///
/// Hosts usually start from `EditorConfig::default()` and override
/// individual fields; the serde derives allow loading the whole struct from
/// an embedding application's config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Placeholder shown while the document is empty.
    pub placeholder: String,
    /// Maximum number of snapshots kept in the undo history.
    pub history_depth: usize,
    /// Debounce interval for the auto-save signal, in milliseconds.
    pub autosave_debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: "Start writing...".to_owned(),
            history_depth: 100,
            autosave_debounce_ms: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_observed_editor() {
        let config = EditorConfig::default();
        assert_eq!(config.placeholder, "Start writing...");
        assert_eq!(config.autosave_debounce_ms, 5_000);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"placeholder": "Say something"}"#).unwrap();
        assert_eq!(config.placeholder, "Say something");
        assert_eq!(config.history_depth, 100);
    }
}
