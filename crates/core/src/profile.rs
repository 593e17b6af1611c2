//! Profile management
//!
//! Profiles are named references to a storage zone, including the access key,
//! the API endpoint and the request timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};
use crate::zone::StorageZone;

/// Default storage API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://storage.bunnycdn.com/";

/// Default overall request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A profile names a storage zone and how to reach it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique name for this profile
    pub name: String,

    /// Storage zone name
    pub zone: String,

    /// Zone access key (the zone password)
    pub access_key: String,

    /// Storage API endpoint, e.g. a regional host
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Overall timeout applied to every request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Profile {
    /// Create a new profile with the default endpoint and timeout
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
            access_key: access_key.into(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// The zone this profile points at
    pub fn storage_zone(&self) -> StorageZone {
        StorageZone::new(&self.zone, &self.access_key)
    }

    /// Parsed endpoint URL
    pub fn endpoint_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.endpoint)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Manager for profile operations
pub struct ProfileManager {
    config_manager: ConfigManager,
}

impl ProfileManager {
    /// Create a new ProfileManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new ProfileManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured profiles
    pub fn list(&self) -> Result<Vec<Profile>> {
        let config = self.config_manager.load()?;
        Ok(config.profiles)
    }

    /// Get a profile by name
    pub fn get(&self, name: &str) -> Result<Profile> {
        let config = self.config_manager.load()?;
        config
            .profiles
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// Resolve the profile to use: the explicit name, else the configured
    /// default, else the only profile when exactly one exists
    pub fn resolve(&self, name: Option<&str>) -> Result<Profile> {
        let mut config = self.config_manager.load()?;
        let wanted = name
            .map(str::to_string)
            .or_else(|| config.defaults.profile.clone());

        if let Some(name) = wanted {
            return config
                .profiles
                .into_iter()
                .find(|p| p.name == name)
                .ok_or(Error::ProfileNotFound(name));
        }

        match config.profiles.len() {
            0 => Err(Error::Config(
                "No profiles configured. Add one with `bsc profile set`".into(),
            )),
            1 => Ok(config.profiles.swap_remove(0)),
            _ => Err(Error::Config(
                "Several profiles configured; choose one with --profile".into(),
            )),
        }
    }

    /// Add or update a profile
    pub fn set(&self, profile: Profile) -> Result<()> {
        profile.endpoint_url()?;
        let mut config = self.config_manager.load()?;

        config.profiles.retain(|p| p.name != profile.name);
        config.profiles.push(profile);

        self.config_manager.save(&config)
    }

    /// Name of the default profile, if one is set
    pub fn default_name(&self) -> Result<Option<String>> {
        Ok(self.config_manager.load()?.defaults.profile)
    }

    /// Make an existing profile the default
    pub fn set_default(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        if !config.profiles.iter().any(|p| p.name == name) {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        config.defaults.profile = Some(name.to_string());
        self.config_manager.save(&config)
    }

    /// Remove a profile
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.profiles.len();

        config.profiles.retain(|p| p.name != name);

        if config.profiles.len() == original_len {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        if config.defaults.profile.as_deref() == Some(name) {
            config.defaults.profile = None;
        }

        self.config_manager.save(&config)
    }

    /// Check if a profile exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let config = self.config_manager.load()?;
        Ok(config.profiles.iter().any(|p| p.name == name))
    }
}
