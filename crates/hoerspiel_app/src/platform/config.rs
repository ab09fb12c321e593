//! Read-only settings for the terminal front-end.
//!
//! Settings live in `./hoerspiel.ron` unless another path is given. A missing
//! file means defaults; nothing is ever written back.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::LogDestination;
use hoerspiel_core::{
    BrowserSettings, LandingSection, SectionOrder, DEFAULT_SEARCH_TARGET, DEFAULT_SERIES_TARGET,
    DEFAULT_SERIES_TERM,
};
use hoerspiel_engine::FetchSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "hoerspiel.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogOutput {
    File,
    #[default]
    Terminal,
    Both,
    Off,
}

impl From<LogOutput> for LogDestination {
    fn from(output: LogOutput) -> Self {
        match output {
            LogOutput::File => LogDestination::File,
            LogOutput::Terminal => LogDestination::Terminal,
            LogOutput::Both => LogDestination::Both,
            LogOutput::Off => LogDestination::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingConfig {
    pub title: String,
    pub term: String,
    pub target: usize,
    /// Sort newest first and keep this many; upstream order when absent.
    #[serde(default)]
    pub newest_first: Option<usize>,
    #[serde(default)]
    pub series_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub country: String,
    pub page_size: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub series_term: String,
    pub series_target: usize,
    pub search_target: usize,
    pub landing: Vec<LandingConfig>,
    pub log_output: LogOutput,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let browser = BrowserSettings::default();
        Self {
            base_url: fetch.base_url,
            country: fetch.country,
            page_size: fetch.page_size,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            series_term: DEFAULT_SERIES_TERM.to_string(),
            series_target: DEFAULT_SERIES_TARGET,
            search_target: DEFAULT_SEARCH_TARGET,
            landing: browser
                .landing
                .into_iter()
                .map(|section| LandingConfig {
                    title: section.title,
                    term: section.term,
                    target: section.target,
                    newest_first: match section.order {
                        SectionOrder::Upstream => None,
                        SectionOrder::NewestFirst { keep } => Some(keep),
                    },
                    series_link: section.series_link,
                })
                .collect(),
            log_output: LogOutput::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            country: self.country.clone(),
            page_size: self.page_size,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            series_target: self.series_target,
            search_target: self.search_target,
            landing: self
                .landing
                .iter()
                .map(|section| LandingSection {
                    title: section.title.clone(),
                    term: section.term.clone(),
                    target: section.target,
                    order: match section.newest_first {
                        Some(keep) => SectionOrder::NewestFirst { keep },
                        None => SectionOrder::Upstream,
                    },
                    series_link: section.series_link.clone(),
                })
                .collect(),
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(".").join(CONFIG_FILENAME)
}

/// Loads settings from `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.browser_settings(), BrowserSettings::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                country: "AT",
                series_term: "TKKG",
                series_target: 250,
                log_output: Both,
                log_level: "debug",
            )"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.country, "AT");
        assert_eq!(config.series_term, "TKKG");
        assert_eq!(config.series_target, 250);
        assert_eq!(config.search_target, DEFAULT_SEARCH_TARGET);
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(LogDestination::from(config.log_output), LogDestination::Both);

        let fetch = config.fetch_settings();
        assert_eq!(fetch.country, "AT");
        assert_eq!(fetch.media, "music");
        assert_eq!(fetch.entity, "album");
    }

    #[test]
    fn landing_sections_round_trip_into_browser_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                landing: [
                    (title: "Bibi Blocksberg", term: "Bibi Blocksberg", target: 50, newest_first: Some(10)),
                ],
            )"#,
        )
        .unwrap();

        let settings = load_config(&path).unwrap().browser_settings();
        assert_eq!(
            settings.landing,
            vec![LandingSection {
                title: "Bibi Blocksberg".to_string(),
                term: "Bibi Blocksberg".to_string(),
                target: 50,
                order: SectionOrder::NewestFirst { keep: 10 },
                series_link: None,
            }]
        );
    }

    #[test]
    fn invalid_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(page_size: \"viele\")").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "laut".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), LevelFilter::Info);
    }
}
