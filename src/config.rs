use crate::chart::MarkerWindows;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/health.json";
const DEFAULT_UNIT: &str = "kg";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub weight_windows: MarkerWindows,
    pub weight_unit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            weight_windows: MarkerWindows::default(),
            weight_unit: DEFAULT_UNIT.to_owned(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparsable values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|err| {
                warn!("ignoring PORT={raw:?}: {err}");
                defaults.port
            }),
            None => defaults.port,
        };

        let data_path = lookup("HEALTH_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let weight_windows = match lookup("WEIGHT_WINDOWS") {
            Some(raw) => raw.parse::<MarkerWindows>().unwrap_or_else(|err| {
                warn!("ignoring WEIGHT_WINDOWS={raw:?}: {err}");
                defaults.weight_windows.clone()
            }),
            None => defaults.weight_windows,
        };

        let weight_unit = lookup("WEIGHT_UNIT")
            .map(|unit| unit.trim().to_owned())
            .filter(|unit| !unit.is_empty())
            .unwrap_or(defaults.weight_unit);

        Self {
            port,
            data_path,
            weight_windows,
            weight_unit,
        }
    }
}
