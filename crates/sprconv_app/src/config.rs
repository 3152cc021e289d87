use std::{io, path::Path};

use serde::{Deserialize, Serialize};
use sprconv_canvas::PanelConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
    pub window: WindowConfig,
    pub panel: PanelConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            window: WindowConfig::default(),
            panel: PanelConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl ViewerConfig {
    pub const FILE_NAME: &'static str = "sprconv.toml";

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Loads `path`, falling back to defaults. A missing file is not an
    /// error; anything else is handed back so it can be logged once logging
    /// is up.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                (Self::default(), None)
            }
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use sprconv_canvas::RetryPolicy;

    use super::*;

    #[test]
    fn reads_nested_sections() {
        let config: ViewerConfig = toml::from_str(
            r#"
            log_filter = "sprconv_canvas=debug"

            [window]
            width = 800

            [panel]
            lock_timeout_ms = 250
            retry = "immediate"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "sprconv_canvas=debug");
        assert_eq!(
            config.window,
            WindowConfig {
                width: 800,
                height: 480
            }
        );
        assert_eq!(config.panel.lock_timeout_ms, 250);
        assert_eq!(config.panel.retry, RetryPolicy::Immediate);
        assert_eq!(config.panel.min_width, 64);
    }

    #[test]
    fn missing_file_means_defaults() {
        let (config, error) = ViewerConfig::load_or_default("no/such/dir/sprconv.toml");
        assert_eq!(config, ViewerConfig::default());
        assert!(error.is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let path = std::env::temp_dir().join(format!(
            "sprconv-malformed-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "window = 3").unwrap();

        let (config, error) = ViewerConfig::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config, ViewerConfig::default());
        assert!(matches!(error, Some(ConfigError::Toml(_))));
    }
}
