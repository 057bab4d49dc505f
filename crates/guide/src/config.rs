use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use parks::DEFAULT_SAMPLE_SIZE;
use parks::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

pub const ENV_PREFIX: &str = "PARK_GUIDE_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub sample_size: usize,
    /// Where photographs and the map image are written.
    pub image_dir: PathBuf,
    pub output_path: PathBuf,
    pub title: String,
    pub request_timeout_secs: u64,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            image_dir: PathBuf::from("."),
            output_path: PathBuf::from("state_park_guide.docx"),
            title: "Minnesota State Park Travel Guide".to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            map: MapConfig {
                enabled: true,
                width: 1000,
                height: 800,
            },
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `PARK_GUIDE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(format!("{}{}", ENV_PREFIX, name).as_str());
        let mut config = Self::default();

        if let Some(v) = var("API_BASE_URL") {
            config.api_base_url = v;
        }
        if let Some(v) = var("SAMPLE_SIZE") {
            config.sample_size = parse("SAMPLE_SIZE", &v)?;
        }
        if let Some(v) = var("IMAGE_DIR") {
            config.image_dir = PathBuf::from(v);
        }
        if let Some(v) = var("OUTPUT") {
            config.output_path = PathBuf::from(v);
        }
        if let Some(v) = var("TITLE") {
            config.title = v;
        }
        if let Some(v) = var("TIMEOUT_SECS") {
            config.request_timeout_secs = parse("TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = var("MAP") {
            config.map.enabled = parse_flag("MAP", &v)?;
        }

        if config.sample_size == 0 {
            return Err(GuideError::Config {
                key: format!("{}SAMPLE_SIZE", ENV_PREFIX),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| GuideError::Config {
        key: format!("{}{}", ENV_PREFIX, name),
        message: format!("invalid value '{}': {}", value, e),
    })
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GuideError::Config {
            key: format!("{}{}", ENV_PREFIX, name),
            message: format!("expected a boolean, got '{}'", value),
        }),
    }
}
