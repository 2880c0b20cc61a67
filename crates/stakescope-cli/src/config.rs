// crates/stakescope-cli/src/config.rs
//
// Runtime configuration for the stakescope CLI.
// Loaded from a TOML file or populated with sensible defaults.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;

use stakescope_analysis::{
    HistoricalParams, SamplerConfig, DEFAULT_HISTORICAL_STAKED_RATIO,
    DEFAULT_HISTORICAL_START_SLOT, DEFAULT_MAX_LOOKBACK_SLOTS,
};
use stakescope_economics::TARGET_SLOT_TIME_SECS;
use stakescope_rpc::RpcConfig;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "~/.stakescope/config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StakescopeConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Node endpoint and query settings.
    #[serde(default)]
    pub rpc: RpcConfig,

    /// Cadence sampling bounds for the recent window.
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Assumptions for the historical yield reconstruction.
    #[serde(default)]
    pub historical: HistoricalConfig,
}

/// `[sampling]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    /// Consecutive-block deltas averaged for the recent window.
    #[serde(default = "default_window")]
    pub recent_window: usize,

    /// Maximum timestamp lookups in flight. 1 = sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Slots a single walk may look up before giving up.
    #[serde(default = "default_max_lookback_slots")]
    pub max_lookback_slots: u64,

    /// Scheduled slot time in seconds, used by both yield estimates.
    #[serde(default = "default_target_slot_time")]
    pub target_slot_time: f64,
}

/// `[historical]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalConfig {
    /// Slot the historical cadence walk starts from.
    #[serde(default = "default_historical_start_slot")]
    pub start_slot: u64,

    /// Consecutive-block deltas averaged for the historical window.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Staked ratio assumed for the historical period.
    #[serde(default = "default_historical_staked_ratio")]
    pub staked_ratio: f64,

    /// Date the historical window represents ("YYYY-MM-DD").
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_window() -> usize {
    100
}

fn default_concurrency() -> usize {
    1
}

fn default_max_lookback_slots() -> u64 {
    DEFAULT_MAX_LOOKBACK_SLOTS
}

fn default_historical_start_slot() -> u64 {
    DEFAULT_HISTORICAL_START_SLOT
}

fn default_historical_staked_ratio() -> f64 {
    DEFAULT_HISTORICAL_STAKED_RATIO
}

fn default_reference_date() -> NaiveDate {
    HistoricalParams::default().reference_date
}

fn default_target_slot_time() -> f64 {
    TARGET_SLOT_TIME_SECS
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            recent_window: default_window(),
            concurrency: default_concurrency(),
            max_lookback_slots: default_max_lookback_slots(),
            target_slot_time: default_target_slot_time(),
        }
    }
}

impl Default for HistoricalConfig {
    fn default() -> Self {
        Self {
            start_slot: default_historical_start_slot(),
            window: default_window(),
            staked_ratio: default_historical_staked_ratio(),
            reference_date: default_reference_date(),
        }
    }
}

impl Default for StakescopeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            rpc: RpcConfig::default(),
            sampling: SamplingConfig::default(),
            historical: HistoricalConfig::default(),
        }
    }
}

impl StakescopeConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// A leading `~/` is expanded to the home directory. Returns an error if
    /// the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: StakescopeConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            concurrency: self.sampling.concurrency,
            max_lookback_slots: self.sampling.max_lookback_slots,
        }
    }

    pub fn historical_params(&self) -> HistoricalParams {
        HistoricalParams {
            staked_ratio: self.historical.staked_ratio,
            reference_date: self.historical.reference_date,
            target_slot_time: self.sampling.target_slot_time,
        }
    }
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
