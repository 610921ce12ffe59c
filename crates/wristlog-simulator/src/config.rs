//! Simulator configuration, read from an optional TOML file
//!
//! ```toml
//! clock_24h = false
//! screen = "round"
//! log_dir = "datalog"
//! headless_secs = 120
//!
//! [watch.accel]
//! sampling_rate = "hz25"
//! samples_per_batch = 25
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use embedded_graphics::prelude::Size;
use log::info;
use serde::{Deserialize, Serialize};
use wristlog_core::WatchConfig;
use wristlog_core::host::ScreenShape;

use crate::error::SimError;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "wristlog.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Settings passed through to the watch app.
    pub watch: WatchConfig,
    /// Initial 12h/24h preference; `T` toggles it at runtime.
    pub clock_24h: bool,
    pub screen: ScreenShape,
    /// Directory that receives `session_<tag>.bin` files.
    pub log_dir: PathBuf,
    /// Run time without a window before the simulator exits.
    pub headless_secs: u64,
    /// Pixel scale factor for the SDL window.
    pub window_scale: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            watch: WatchConfig::default(),
            clock_24h: true,
            screen: ScreenShape::Rectangular,
            log_dir: PathBuf::from("datalog"),
            headless_secs: 60,
            window_scale: 2,
        }
    }
}

impl SimulatorConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(content)?)
    }

    /// Display size of the configured watch model.
    pub fn display_size(&self) -> Size {
        match self.screen {
            ScreenShape::Rectangular => Size::new(144, 168),
            ScreenShape::Round => Size::new(180, 180),
        }
    }
}
