use crate::security::Policy;
use crate::security::policy::split_list;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Overrides the location of the system policy file
pub const CONFIG_PATH_ENV: &str = "PUSH_GUARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Values baked into the binary at build time
///
/// Version and disclaimer are base64 so they can carry newlines and quotes
/// through the build environment. The lists and the collector URL are plain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedConfig {
    pub version: &'static str,
    pub disclaimer: &'static str,
    pub log_collector_url: &'static str,
    pub protocol_and_domain_allow_list: &'static str,
    pub directory_allow_list: &'static str,
    pub directory_regex_allow_list: &'static str,
    pub protected_branches: &'static str,
}

impl EmbeddedConfig {
    pub const fn compiled() -> Self {
        Self {
            version: embedded(option_env!("PUSH_GUARD_VERSION")),
            disclaimer: embedded(option_env!("PUSH_GUARD_DISCLAIMER")),
            log_collector_url: embedded(option_env!("PUSH_GUARD_LOG_COLLECTOR_URL")),
            protocol_and_domain_allow_list: embedded(option_env!(
                "PUSH_GUARD_PROTOCOL_AND_DOMAIN_ALLOW_LIST"
            )),
            directory_allow_list: embedded(option_env!("PUSH_GUARD_DIRECTORY_ALLOW_LIST")),
            directory_regex_allow_list: embedded(option_env!(
                "PUSH_GUARD_DIRECTORY_REGEX_ALLOW_LIST"
            )),
            protected_branches: embedded(option_env!("PUSH_GUARD_PROTECTED_BRANCHES")),
        }
    }
}

const fn embedded(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "",
    }
}

/// Decode a base64 configuration value, yielding `""` when it is not valid
pub fn decode_config_string(value: &str) -> String {
    let bytes = match STANDARD.decode(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Error decoding base64 configuration value");
            return String::new();
        }
    };

    match String::from_utf8(bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, "Decoded configuration value is not UTF-8");
            String::new()
        }
    }
}

/// Optional system-wide policy file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    pub disclaimer: Option<String>,
    pub log_collector_url: Option<String>,
    #[serde(default)]
    pub policy: PolicySection,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    pub protocol_and_domain_allow_list: Option<Vec<String>>,
    pub directory_allow_list: Option<Vec<String>>,
    pub directory_regex_allow_list: Option<Vec<String>>,
    pub protected_branches: Option<Vec<String>>,
}

impl PolicyFile {
    /// Get the system policy file path
    pub fn default_path() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from("C:\\ProgramData\\push-guard\\config.toml")
        } else {
            PathBuf::from("/etc/push-guard/config.toml")
        }
    }

    /// The policy file to read, honouring an override path when it is set
    pub fn resolve_path(override_path: Option<OsString>) -> PathBuf {
        override_path
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path)
    }

    /// Load a policy file; `Ok(None)` when it does not exist
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let file: PolicyFile = toml::from_str(&contents)?;

        file.validate()?;

        Ok(Some(file))
    }

    /// Reject empty entries; an empty prefix would allow every destination
    fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("protocol_and_domain_allow_list", &self.policy.protocol_and_domain_allow_list),
            ("directory_allow_list", &self.policy.directory_allow_list),
            ("directory_regex_allow_list", &self.policy.directory_regex_allow_list),
            ("protected_branches", &self.policy.protected_branches),
        ];

        for (name, list) in lists {
            if list.iter().flatten().any(|entry| entry.is_empty()) {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must not contain empty entries",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub version: String,
    pub disclaimer: String,
    pub log_collector_url: Option<String>,
    pub protocol_and_domain_allow_list: Vec<String>,
    pub directory_allow_list: Vec<String>,
    pub directory_regex_allow_list: Vec<String>,
    pub protected_branches: Vec<String>,
}

impl Settings {
    /// Embedded values overlaid with the system policy file, if any
    pub fn load() -> Self {
        let path = PolicyFile::resolve_path(std::env::var_os(CONFIG_PATH_ENV));
        Self::load_with(&EmbeddedConfig::compiled(), &path)
    }

    /// A policy file that cannot be read or is invalid is ignored
    pub fn load_with(embedded: &EmbeddedConfig, policy_path: &Path) -> Self {
        let settings = Self::from_embedded(embedded);

        match PolicyFile::load_from(policy_path) {
            Ok(Some(file)) => {
                debug!(path = %policy_path.display(), "Applying policy file");
                settings.with_policy_file(file)
            }
            Ok(None) => settings,
            Err(e) => {
                warn!(path = %policy_path.display(), error = %e, "Ignoring policy file");
                settings
            }
        }
    }

    pub fn from_embedded(embedded: &EmbeddedConfig) -> Self {
        let version = match decode_config_string(embedded.version) {
            v if v.is_empty() => env!("CARGO_PKG_VERSION").to_string(),
            v => v,
        };
        let owned = |value: &str| -> Vec<String> {
            split_list(value).into_iter().map(str::to_string).collect()
        };

        Self {
            version,
            disclaimer: decode_config_string(embedded.disclaimer),
            log_collector_url: Some(embedded.log_collector_url.to_string())
                .filter(|url| !url.is_empty()),
            protocol_and_domain_allow_list: owned(embedded.protocol_and_domain_allow_list),
            directory_allow_list: owned(embedded.directory_allow_list),
            directory_regex_allow_list: owned(embedded.directory_regex_allow_list),
            protected_branches: owned(embedded.protected_branches),
        }
    }

    pub fn with_policy_file(mut self, file: PolicyFile) -> Self {
        if let Some(disclaimer) = file.disclaimer {
            self.disclaimer = disclaimer;
        }
        if let Some(url) = file.log_collector_url {
            self.log_collector_url = Some(url).filter(|url| !url.is_empty());
        }

        let section = file.policy;
        if let Some(list) = section.protocol_and_domain_allow_list {
            self.protocol_and_domain_allow_list = list;
        }
        if let Some(list) = section.directory_allow_list {
            self.directory_allow_list = list;
        }
        if let Some(list) = section.directory_regex_allow_list {
            self.directory_regex_allow_list = list;
        }
        if let Some(list) = section.protected_branches {
            self.protected_branches = list;
        }

        self
    }

    /// Build the immutable policy used for every decision in this process
    pub fn policy(&self) -> Policy {
        Policy::new(
            &self.protocol_and_domain_allow_list,
            &self.directory_allow_list,
            &self.directory_regex_allow_list,
            &self.protected_branches,
        )
    }
}
