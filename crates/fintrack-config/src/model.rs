use std::{env, path::PathBuf};

use fintrack_domain::PeriodMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Environment variable overriding where fintrack keeps its data.
pub const HOME_ENV_VAR: &str = "FINTRACK_HOME";
const DEFAULT_DIR_NAME: &str = ".fintrack";

/// User preferences plus the location of the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Period the dashboard opens on.
    #[serde(default)]
    pub default_period: PeriodMode,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `$FINTRACK_HOME` or `~/.fintrack`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            default_period: PeriodMode::default(),
            backup_retention: Self::default_backup_retention(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            last_user: None,
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "pt-BR".into()
    }

    pub fn default_currency() -> String {
        "BRL".into()
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }
        default_data_root()
    }

    pub fn records_dir(&self) -> PathBuf {
        self.resolve_data_root().join("records")
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.resolve_data_root().join("backups")
    }
}

/// `$FINTRACK_HOME` when set, otherwise `~/.fintrack`.
pub fn default_data_root() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
