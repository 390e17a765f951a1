use std::path::{Path, PathBuf};

use dogcheck_core::Architecture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "dogcheck.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Optional settings, as read from `dogcheck.toml` or collected from flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub dir: Option<PathBuf>,
    pub arch: Option<Architecture>,
    pub dogfile: Option<PathBuf>,
    pub predictions: Option<PathBuf>,
    pub run_dir: Option<PathBuf>,
    pub print_incorrect_dogs: Option<bool>,
    pub print_incorrect_breed: Option<bool>,
}

impl CheckConfig {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: CheckConfig) -> CheckConfig {
        CheckConfig {
            dir: self.dir.or(fallback.dir),
            arch: self.arch.or(fallback.arch),
            dogfile: self.dogfile.or(fallback.dogfile),
            predictions: self.predictions.or(fallback.predictions),
            run_dir: self.run_dir.or(fallback.run_dir),
            print_incorrect_dogs: self.print_incorrect_dogs.or(fallback.print_incorrect_dogs),
            print_incorrect_breed: self.print_incorrect_breed.or(fallback.print_incorrect_breed),
        }
    }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckSettings {
    pub dir: PathBuf,
    pub arch: Architecture,
    pub dogfile: PathBuf,
    pub predictions: PathBuf,
    pub run_dir: PathBuf,
    pub print_incorrect_dogs: bool,
    pub print_incorrect_breed: bool,
}

impl From<CheckConfig> for CheckSettings {
    fn from(config: CheckConfig) -> Self {
        Self {
            dir: config.dir.unwrap_or_else(|| PathBuf::from("pet_images/")),
            arch: config.arch.unwrap_or_default(),
            dogfile: config.dogfile.unwrap_or_else(|| PathBuf::from("dognames.txt")),
            predictions: config
                .predictions
                .unwrap_or_else(|| PathBuf::from("predictions.csv")),
            run_dir: config.run_dir.unwrap_or_else(|| PathBuf::from("runs")),
            print_incorrect_dogs: config.print_incorrect_dogs.unwrap_or(false),
            print_incorrect_breed: config.print_incorrect_breed.unwrap_or(false),
        }
    }
}

/// Load the explicit config file, or `dogcheck.toml` when it exists.
pub fn load_config(explicit: Option<&Path>) -> ConfigResult<CheckConfig> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_config(path)
            } else {
                Ok(CheckConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> ConfigResult<CheckConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}
