//! Configuration for the ProjectStack CLI.
//!
//! Settings live in `config.json` inside the [`DataStorage`] directory and
//! are grouped in optional modules, so a fresh install runs on defaults and
//! `init` only touches the modules the user picks.
//!
//! ```rust,no_run
//! use projectstack::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("API: {}", config.server().api_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::metadata::APP_METADATA_DEFAULT_API_URL;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Overrides the configured API URL when set, e.g. from `.env`.
pub const API_URL_ENV: &str = "PROJECTSTACK_API_URL";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A module offered by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

impl ConfigModule {
    fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Where the REST backend lives and how long to wait for it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL, including the API prefix (`http://host:8080/api`).
    pub api_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: APP_METADATA_DEFAULT_API_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Replaces the URL with `api_url` when it is present and not blank.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = api_url.trim().to_owned();
        }
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BoardConfig {
    /// Project opened by `board` and `task` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardConfig>,
}

impl Config {
    /// Loads the saved configuration, or the defaults if none was saved yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective server settings: the saved module or the defaults, then the
    /// `PROJECTSTACK_API_URL` override.
    pub fn server(&self) -> ServerConfig {
        self.server
            .clone()
            .unwrap_or_default()
            .with_api_url_override(env::var(API_URL_ENV).ok())
    }

    pub fn default_project(&self) -> Option<&str> {
        self.board.as_ref()?.default_project.as_deref().filter(|id| !id.is_empty())
    }

    /// Interactive setup; starts from the saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![ConfigModule::new("server", "Server"), ConfigModule::new("board", "Board")];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                        timeout_secs: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerTimeout.to_string())
                            .default(default.timeout_secs)
                            .interact_text()?,
                    });
                }
                "board" => {
                    let default = config.board.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleBoard);
                    let project: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultProject.to_string())
                        .default(default.default_project.unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    let project = project.trim();
                    config.board = Some(BoardConfig {
                        default_project: (!project.is_empty()).then(|| project.to_owned()),
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_keeps_configured_url() {
        let server = ServerConfig {
            api_url: "http://saved/api".into(),
            timeout_secs: 10,
        };
        assert_eq!(server.clone().with_api_url_override(Some("  ".into())).api_url, "http://saved/api");
        assert_eq!(server.with_api_url_override(Some("http://env/api".into())).api_url, "http://env/api");
    }

    #[test]
    fn timeout_defaults_when_missing_from_file() {
        let server: ServerConfig = serde_json::from_str(r#"{ "api_url": "http://saved/api" }"#).unwrap();
        assert_eq!(server.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn empty_default_project_counts_as_unset() {
        let config = Config {
            server: None,
            board: Some(BoardConfig {
                default_project: Some(String::new()),
            }),
        };
        assert_eq!(config.default_project(), None);
    }
}
