//! Generation configuration.
//!
//! Read from an optional JSON file; command-line flags are applied on top by
//! the binary. Keys this crate does not know are kept as opaque rendering
//! options and passed through untouched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source roots; the first one anchors namespace resolution.
    #[serde(default)]
    pub input: Vec<String>,
    /// Explicit link targets for type names, checked before namespaces.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, String>,
    #[serde(default)]
    pub hljs: HighlightConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_version: Option<String>,
    /// Render `@internal` items too.
    #[serde(default)]
    pub show_internal: bool,
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightConfig {
    /// Let the highlighter guess the language instead of assuming JavaScript.
    #[serde(default)]
    pub highlight_auto: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Directory namespace paths are computed against: the first input
    /// joined onto `cwd`, or `cwd` itself when no input is configured.
    pub fn resolution_root(&self, cwd: &Path) -> PathBuf {
        match self.input.first() {
            Some(input) => cwd.join(input),
            None => cwd.to_path_buf(),
        }
    }

    /// Page title: "name version" from whichever parts are set.
    pub fn title(&self) -> String {
        match (&self.project_name, &self.project_version) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name.clone(),
            (None, Some(version)) => version.clone(),
            (None, None) => "API Reference".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_with_opaque_options() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "input": ["src", "lib"],
                "paths": {"Widget": "https://example.com/widget"},
                "hljs": {"highlightAuto": true},
                "projectName": "toolkit",
                "theme": {"accent": "teal"}
            }"#,
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.input, ["src", "lib"]);
        assert_eq!(config.paths["Widget"], "https://example.com/widget");
        assert!(config.hljs.highlight_auto);
        assert!(!config.show_internal);
        assert_eq!(config.options["theme"]["accent"], "teal");
    }

    #[test]
    fn opaque_options_round_trip() {
        let config: Config = serde_json::from_str(r#"{"input": [], "extra": 3}"#).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["extra"], 3);
    }

    #[test]
    fn missing_config_file_reports_path() {
        let err = Config::load(Path::new("/nonexistent/apidoc.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/apidoc.json"));
    }

    #[test]
    fn resolution_root_uses_first_input() {
        let config = Config {
            input: vec!["src".into(), "other".into()],
            ..Default::default()
        };
        assert_eq!(
            config.resolution_root(Path::new("/work")),
            PathBuf::from("/work/src")
        );
    }

    #[test]
    fn absolute_input_replaces_cwd() {
        let config = Config {
            input: vec!["/project/src".into()],
            ..Default::default()
        };
        assert_eq!(
            config.resolution_root(Path::new("/work")),
            PathBuf::from("/project/src")
        );
    }

    #[test]
    fn empty_input_resolves_against_cwd() {
        let config = Config::default();
        assert_eq!(config.resolution_root(Path::new("/work")), PathBuf::from("/work"));
    }

    #[test]
    fn title_variants() {
        let mut config = Config::default();
        assert_eq!(config.title(), "API Reference");
        config.project_name = Some("toolkit".into());
        config.project_version = Some("1.2.0".into());
        assert_eq!(config.title(), "toolkit 1.2.0");
    }
}
