use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "hidden-spots.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_city")]
    pub city: String,

    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    #[serde(default = "default_flow_timeout_ms")]
    pub flow_timeout_ms: u64,

    /// JSON spot dataset to use instead of the built-in one
    #[serde(default)]
    pub dataset_path: Option<String>,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Behaviour of the simulated location, camera and submission services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_true")]
    pub grant_location: bool,

    #[serde(default = "default_true")]
    pub grant_camera: bool,

    #[serde(default = "default_true")]
    pub grant_library: bool,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_street")]
    pub street: Option<String>,

    #[serde(default = "default_geocode_city")]
    pub city: Option<String>,

    #[serde(default = "default_location_latency_ms")]
    pub location_latency_ms: u64,

    #[serde(default = "default_submit_latency_ms")]
    pub submit_latency_ms: u64,

    #[serde(default)]
    pub fail_location: bool,

    /// The picker closes without a photo, as if the user backed out
    #[serde(default)]
    pub cancel_photos: bool,

    #[serde(default)]
    pub fail_photos: bool,

    #[serde(default)]
    pub fail_submissions: bool,
}

fn default_city() -> String {
    "Gwalior".to_string()
}

fn default_toast_duration_ms() -> u64 {
    3000
}

fn default_refresh_delay_ms() -> u64 {
    1000
}

fn default_flow_timeout_ms() -> u64 {
    15_000
}

fn default_true() -> bool {
    true
}

fn default_latitude() -> f64 {
    26.2183
}

fn default_longitude() -> f64 {
    78.1828
}

fn default_street() -> Option<String> {
    Some("Fort Road".to_string())
}

fn default_geocode_city() -> Option<String> {
    Some("Gwalior".to_string())
}

fn default_location_latency_ms() -> u64 {
    600
}

fn default_submit_latency_ms() -> u64 {
    2000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            toast_duration_ms: default_toast_duration_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            flow_timeout_ms: default_flow_timeout_ms(),
            dataset_path: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grant_location: true,
            grant_camera: true,
            grant_library: true,
            latitude: default_latitude(),
            longitude: default_longitude(),
            street: default_street(),
            city: default_geocode_city(),
            location_latency_ms: default_location_latency_ms(),
            submit_latency_ms: default_submit_latency_ms(),
            fail_location: false,
            cancel_photos: false,
            fail_photos: false,
            fail_submissions: false,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read `hidden-spots.toml` from the working directory, or use defaults
    pub fn load() -> anyhow::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn flow_timeout(&self) -> Duration {
        Duration::from_millis(self.flow_timeout_ms)
    }
}
