use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

pub const RIG_URL_ENV: &str = "DUCKRIG_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RigSettings {
    pub rig_url: String,
    pub reconnect_delay_ms: u64,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            rig_url: "http://192.168.4.1".into(),
            reconnect_delay_ms: 3_000,
        }
    }
}

impl RigSettings {
    /// `{rig_url}/{path}` without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.rig_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn validate(&self) -> Result<()> {
        let url = self.rig_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("rig URL must start with http:// or https://, got '{url}'"));
        }
        if self.reconnect_delay_ms == 0 {
            return Err(anyhow!("reconnect delay must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    rig: RigSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let mut data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        if let Ok(url) = std::env::var(RIG_URL_ENV) {
            if !url.trim().is_empty() {
                data.rig.rig_url = url.trim().to_string();
            }
        }

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn rig(&self) -> RigSettings {
        match self.data.read() {
            Ok(guard) => guard.rig.clone(),
            Err(poisoned) => poisoned.into_inner().rig.clone(),
        }
    }

    pub fn update_rig(&self, settings: RigSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        guard.rig = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
