use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use atlassian_rest_api::{Credential, TransportConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which of the two REST APIs a transport talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Jira,
    Crowd,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Jira => f.write_str("jira"),
            Product::Crowd => f.write_str("crowd"),
        }
    }
}

/// Represents the full configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load configuration from the provided path or the default config file.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file at {}", path.display()))?;

        serde_yaml::from_str(&raw)
            .with_context(|| format!("Malformed YAML in config file {}", path.display()))
    }

    /// Persist the configuration to disk, creating parent directories if needed.
    pub fn save<P: AsRef<Path>>(&self, path: Option<P>) -> Result<()> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let serialized = serde_yaml::to_string(self)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Unable to write config file {}", path.display()))?;

        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Returns either the requested profile or falls back to the default one,
    /// then to the first profile by name.
    pub fn resolve_profile<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Option<(&'a str, &'a Profile)> {
        if let Some(name) = requested {
            self.profiles.get(name).map(|profile| (name, profile))
        } else if let Some(default_name) = self.default_profile.as_deref() {
            self.profiles
                .get(default_name)
                .map(|profile| (default_name, profile))
        } else {
            self.profiles
                .iter()
                .next()
                .map(|(name, profile)| (name.as_str(), profile))
        }
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".atlassian-rest");
        path.push("config.yaml");
        path
    }
}

/// Connection settings for one Jira and/or Crowd installation. Values are
/// optional to support partially configured setups.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Profile {
    pub fn base_url(&self, product: Product) -> Option<&str> {
        match product {
            Product::Jira => self.jira_url.as_deref(),
            Product::Crowd => self.crowd_url.as_deref(),
        }
    }

    /// Credential for this profile: anonymous without a username.
    pub fn credential(&self, password: Option<String>) -> Credential {
        match &self.username {
            Some(username) => Credential::basic(username.clone(), password.unwrap_or_default()),
            None => Credential::anonymous(),
        }
    }

    /// Builds the transport settings for `product`.
    pub fn transport_config(&self, product: Product, credential: Credential) -> Result<TransportConfig> {
        let base_url = self
            .base_url(product)
            .ok_or_else(|| anyhow!("Profile has no {product}_url configured"))?;

        let mut config = TransportConfig::new(base_url, credential)
            .with_debug(self.debug)
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Some(Duration::from_secs(secs)));
        }
        if let Some(path) = &self.ca_bundle {
            config = config.with_ca_bundle(path);
        }
        if let Some(path) = &self.cookie_file {
            config = config.with_cookie_file(path);
        }

        Ok(config)
    }
}
