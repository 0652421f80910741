//! TOML configuration for the rota balancer.
//!
//! Every section is optional; a missing file means all defaults.
//!
//! ```
//! use rota_balancer::config::BalancerConfig;
//!
//! let config = BalancerConfig::from_toml_str(r#"
//!     [horizon]
//!     start_date = "2024-09-17"
//!     end_date = "2024-09-23"
//!
//!     [limits]
//!     max_swaps = 20
//! "#).unwrap();
//!
//! assert_eq!(config.horizon().unwrap().len(), 7);
//! assert_eq!(config.limits.max_swaps, 20);
//! assert_eq!(config.limits.min_daily_staff, 3);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::{CalendarDate, Horizon, StaffingLimits};

/// Where the repair roster comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterSource {
    /// Distinct staff ids in the draft schedule, first-seen order
    #[default]
    Schedule,
    /// Everyone in the staff directory, directory order
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start_date: CalendarDate::from(
                chrono::NaiveDate::from_ymd_opt(2024, 9, 17).unwrap_or_default(),
            ),
            end_date: CalendarDate::from(
                chrono::NaiveDate::from_ymd_opt(2024, 10, 7).unwrap_or_default(),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub roster_path: PathBuf,
    pub preferences_path: PathBuf,
    pub roster_source: RosterSource,
    /// Seed for generated demo preferences when the data files are missing
    pub demo_seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("data/profiles.csv"),
            preferences_path: PathBuf::from("data/shift_preferences.csv"),
            roster_source: RosterSource::default(),
            demo_seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub schedule_path: PathBuf,
    pub csv_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            schedule_path: PathBuf::from("schedule_balanced.txt"),
            csv_path: PathBuf::from("schedule_balanced.csv"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    pub horizon: HorizonConfig,
    pub limits: StaffingLimits,
    pub data: DataConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

impl BalancerConfig {
    /// Loads and validates a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.limits.validate()?;
        Ok(config)
    }

    pub fn horizon(&self) -> Result<Horizon> {
        Horizon::from_range(self.horizon.start_date, self.horizon.end_date)
    }
}
