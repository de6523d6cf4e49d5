//! Settings sections of the config file

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the PEARL backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Send progress events to the backend after each answer
    #[serde(default = "default_sync_enabled")]
    pub sync_enabled: bool,

    /// Location used for job recommendations when none is given
    #[serde(default = "default_job_location")]
    pub job_location: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_sync_enabled() -> bool {
    true
}

fn default_job_location() -> String {
    "Chennai".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            sync_enabled: default_sync_enabled(),
            job_location: default_job_location(),
        }
    }
}

/// Game rules that may be tuned per install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Minutes until a lost life comes back
    #[serde(default = "default_life_regen_minutes")]
    pub life_regen_minutes: u64,
}

fn default_life_regen_minutes() -> u64 {
    30
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            life_regen_minutes: default_life_regen_minutes(),
        }
    }
}

/// Where local state lives
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Override for the state database (default: ~/.pearl/pearl.db)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}
