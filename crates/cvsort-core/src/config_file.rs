use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Model artifact used when neither the CLI nor a config file names one.
pub const DEFAULT_MODEL_PATH: &str = "model.json";
/// Export file name used when `--output` is given without a config override.
pub const DEFAULT_OUTPUT_FILE: &str = "resume_predictions.csv";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub model: Option<ModelConfig>,
    pub output: Option<OutputConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    /// One of `csv`, `json`, `text`.
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
}

impl ConfigFile {
    pub fn model_path(&self) -> Option<PathBuf> {
        self.model
            .as_ref()
            .and_then(|m| m.path.as_ref())
            .map(PathBuf::from)
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_ref())
            .map(PathBuf::from)
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }

    pub fn color(&self) -> Option<bool> {
        self.display.as_ref().and_then(|d| d.color)
    }
}

/// Platform config directory path: `<config_dir>/cvsort/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cvsort").join("config.toml"))
}

/// Load config by cascading CWD `.cvsort.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".cvsort.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        model: Some(ModelConfig {
            path: overlay
                .model
                .as_ref()
                .and_then(|m| m.path.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.path.clone())),
        }),
        output: Some(OutputConfig {
            path: overlay
                .output
                .as_ref()
                .and_then(|o| o.path.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.path.clone())),
            format: overlay
                .output
                .as_ref()
                .and_then(|o| o.format.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.format.clone())),
        }),
        display: Some(DisplayConfig {
            color: overlay
                .display
                .as_ref()
                .and_then(|d| d.color)
                .or_else(|| base.display.as_ref().and_then(|d| d.color)),
        }),
    }
}
