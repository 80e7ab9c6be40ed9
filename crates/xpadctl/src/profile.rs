use std::path::{Path, PathBuf};

use ahash::AHashMap;
use serde::Deserialize;
use thiserror::Error;
use xpad_gamepad::{DeviceIndex, NormalizeMode, SessionConfig, MAX_DEVICES};

const DEFAULT_PROFILE_FILE_NAME: &str = "xpad.yaml";

#[derive(Debug, Error)]
pub(crate) enum ProfileError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("invalid controller index: {0}")]
    InvalidIndex(DeviceIndex),
    #[error("duplicate controller index: {0}")]
    DuplicateIndex(DeviceIndex),
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Per-controller sensitivity settings.
#[derive(Debug, Clone, Default)]
pub(crate) struct Profile {
    controllers: AHashMap<DeviceIndex, SessionConfig>,
}

impl Profile {
    /// Session settings for `index`, or the defaults when the profile has none.
    pub(crate) fn config_for(&self, index: DeviceIndex) -> SessionConfig {
        self.controllers.get(&index).copied().unwrap_or_default()
    }

    /// Apply command line overrides to every controller, present or not.
    pub(crate) fn with_overrides(
        mut self,
        deadzone: Option<f64>,
        dampen: Option<f64>,
    ) -> Result<Self, ProfileError> {
        if let Some(value) = deadzone {
            check_non_negative("deadzone", value)?;
        }
        if let Some(value) = dampen {
            check_non_negative("dampen", value)?;
        }
        for index in 0..MAX_DEVICES {
            let mut config = self.config_for(index);
            if let Some(value) = deadzone {
                config.deadzone = value;
            }
            if let Some(value) = dampen {
                config.dampen = value;
            }
            self.controllers.insert(index, config);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct VersionedProfile {
    version: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileV1 {
    #[allow(dead_code)]
    version: u8,
    #[serde(default)]
    controllers: Vec<ProfileV1Controller>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileV1Controller {
    index: DeviceIndex,
    #[serde(default)]
    deadzone: Option<f64>,
    #[serde(default)]
    dampen: Option<f64>,
    #[serde(default)]
    normalize: Option<NormalizeMode>,
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidValue { field, value })
    }
}

/// Parse yaml profile.
pub(crate) fn parse_profile(input: &str) -> Result<Profile, ProfileError> {
    let version = parse_version(input)?;
    match version {
        1 => {
            let raw: ProfileV1 = serde_yaml::from_str(input)?;
            let mut controllers = AHashMap::new();
            for controller in raw.controllers {
                if controller.index >= MAX_DEVICES {
                    return Err(ProfileError::InvalidIndex(controller.index));
                }
                let mut config = SessionConfig::default();
                if let Some(value) = controller.deadzone {
                    check_non_negative("deadzone", value)?;
                    config.deadzone = value;
                }
                if let Some(value) = controller.dampen {
                    check_non_negative("dampen", value)?;
                    config.dampen = value;
                }
                if let Some(mode) = controller.normalize {
                    config.normalize = mode;
                }
                if controllers.insert(controller.index, config).is_some() {
                    return Err(ProfileError::DuplicateIndex(controller.index));
                }
            }
            Ok(Profile { controllers })
        }
        _ => Err(ProfileError::UnsupportedVersion(version)),
    }
}

/// Parse the version of yaml profile.
fn parse_version(input: &str) -> Result<u8, ProfileError> {
    let raw: VersionedProfile = serde_yaml::from_str(input)?;
    Ok(raw.version)
}

/// Load the profile at `path`, or `./xpad.yaml` if it exists, or the defaults.
pub(crate) fn load_profile(path: Option<&Path>) -> Result<Profile, ProfileError> {
    let path = match path {
        Some(path) => path.to_owned(),
        None => {
            let fallback = std::env::current_dir()
                .map(|dir| dir.join(DEFAULT_PROFILE_FILE_NAME))
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROFILE_FILE_NAME));
            if !fallback.exists() {
                return Ok(Profile::default());
            }
            fallback
        }
    };
    let input = std::fs::read_to_string(&path).map_err(|source| ProfileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_profile(&input)
}
