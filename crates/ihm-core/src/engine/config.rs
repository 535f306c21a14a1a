use crate::core::io::cif::DEFAULT_LINE_WIDTH;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for parameter '{0}'")]
    InvalidParameter(&'static str),
}

/// Settings that shape the mmCIF output without changing its content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct DumpConfig {
    /// Column at which loop rows are folded.
    pub line_width: usize,
    /// Directory local file paths are written relative to; the working directory if unset.
    pub local_files_root: Option<PathBuf>,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            local_files_root: None,
        }
    }
}

impl DumpConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// Keys use kebab-case (`line-width`, `local-files-root`); missing keys keep their
    /// defaults and unknown keys are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: DumpConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.line_width == 0 {
            return Err(ConfigError::InvalidParameter("line_width"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct DumpConfigBuilder {
    line_width: Option<usize>,
    local_files_root: Option<PathBuf>,
}

impl DumpConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_width(mut self, width: usize) -> Self {
        self.line_width = Some(width);
        self
    }
    pub fn local_files_root(mut self, root: PathBuf) -> Self {
        self.local_files_root = Some(root);
        self
    }

    pub fn build(self) -> Result<DumpConfig, ConfigError> {
        let config = DumpConfig {
            line_width: self.line_width.unwrap_or(DEFAULT_LINE_WIDTH),
            local_files_root: self.local_files_root,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dump.toml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();
        (dir, path)
    }

    #[test]
    fn builder_uses_defaults_for_unset_fields() {
        let config = DumpConfigBuilder::new().build().unwrap();
        assert_eq!(config, DumpConfig::default());
        assert_eq!(config.line_width, 80);
        assert_eq!(config.local_files_root, None);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = DumpConfigBuilder::new()
            .line_width(120)
            .local_files_root(PathBuf::from("/data"))
            .build()
            .unwrap();
        assert_eq!(config.line_width, 120);
        assert_eq!(config.local_files_root, Some(PathBuf::from("/data")));
    }

    #[test]
    fn builder_rejects_zero_line_width() {
        let result = DumpConfigBuilder::new().line_width(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidParameter("line_width"))));
    }

    #[test]
    fn load_reads_kebab_case_keys() {
        let (_dir, path) = write_config(
            r#"
            line-width = 100
            local-files-root = "/srv/models"
            "#,
        );
        let config = DumpConfig::load(&path).unwrap();
        assert_eq!(config.line_width, 100);
        assert_eq!(config.local_files_root, Some(PathBuf::from("/srv/models")));
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let (_dir, path) = write_config("line-width = 90");
        let config = DumpConfig::load(&path).unwrap();
        assert_eq!(config.line_width, 90);
        assert_eq!(config.local_files_root, None);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let (_dir, path) = write_config("line-length = 90");
        assert!(matches!(DumpConfig::load(&path), Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = DumpConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
