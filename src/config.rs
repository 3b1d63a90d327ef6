use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORD_LIST_URL: &str = "https://raw.githubusercontent.com/monkeytypegame/monkeytype/refs/heads/master/frontend/static/languages/japanese_hiragana.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_show_keyboard")]
    pub show_keyboard: bool,
    #[serde(default = "default_show_romaji")]
    pub show_romaji: bool,
    #[serde(default = "default_word_list_url")]
    pub word_list_url: String,
    #[serde(default = "default_word_list_downloads_enabled")]
    pub word_list_downloads_enabled: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_word_count() -> usize {
    5
}
fn default_show_keyboard() -> bool {
    true
}
fn default_show_romaji() -> bool {
    true
}
fn default_word_list_url() -> String {
    DEFAULT_WORD_LIST_URL.to_string()
}
fn default_word_list_downloads_enabled() -> bool {
    false
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: default_word_count(),
            show_keyboard: default_show_keyboard(),
            show_romaji: default_show_romaji(),
            word_list_url: default_word_list_url(),
            word_list_downloads_enabled: default_word_list_downloads_enabled(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kare")
            .join("config.toml")
    }

    /// Resets values that would leave the app without a usable test.
    pub fn normalize(&mut self) {
        if self.word_count == 0 {
            self.word_count = default_word_count();
        }
        if self.word_list_url.trim().is_empty() {
            self.word_list_url = default_word_list_url();
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            self.log_level = default_log_level();
        }
    }
}
