//! # Configuration Management
//!
//! Timing thresholds for the segmentation and calibration logic, plus the
//! optional `tide-config.toml` station file the host binary reads. The
//! library itself never requires the file; a missing or invalid config
//! falls back to production defaults.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds driving period segmentation and calibration accumulation.
///
/// `Default` is the production preset; [`Timing::cal_debug`] is the
/// bench-test preset with minutes-scale periods so a full cycle can be
/// exercised without waiting a day.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    /// Length of one tidal period, seconds. Production is 25 hours so both
    /// low tides of a mixed semidiurnal cycle land inside one period.
    pub datum_period_s: u32,
    /// Largest tolerated gap between consecutive readings, seconds; a
    /// larger gap abandons the open period.
    pub datum_max_gap_s: u32,
    /// Readings required before calibration is trusted.
    pub min_calibration_readings: u32,
    /// Accumulated coverage required before calibration is trusted, seconds.
    pub min_calibration_duration_s: u32,
    /// Largest tolerated gap inside a calibration run, seconds; a larger
    /// gap restarts the run from scratch.
    pub max_calibration_gap_s: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            datum_period_s: 90_000, // 25 hours
            datum_max_gap_s: 3_600, // 60 minutes
            min_calibration_readings: 13,
            min_calibration_duration_s: 46_800, // 13 hours
            max_calibration_gap_s: 3_660,
        }
    }
}

impl Timing {
    /// Bench-test preset: 5-minute periods, 2-minute gap tolerance.
    pub fn cal_debug() -> Self {
        Timing {
            datum_period_s: 300,
            datum_max_gap_s: 120,
            min_calibration_readings: 3,
            min_calibration_duration_s: 180,
            max_calibration_gap_s: 120,
        }
    }
}

/// Host configuration loaded from tide-config.toml.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Station identity and storage location
    pub station: StationConfig,
    /// Segmentation/calibration thresholds
    #[serde(default)]
    pub timing: Timing,
}

/// Station identity configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct StationConfig {
    /// Human-readable station name for reports
    pub name: String,
    /// Path of the file-backed state store
    pub store_path: String,
    /// Device identity as 32 hex characters; empty means "derive from host"
    #[serde(default)]
    pub node_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                name: "Unnamed station".to_string(),
                store_path: "tide-stats.fram".to_string(),
                node_id: String::new(),
            },
            timing: Timing::default(),
        }
    }
}

impl Config {
    /// Load configuration from tide-config.toml in the working directory.
    /// Falls back to default configuration if the file is missing or invalid.
    pub fn load() -> Self {
        Self::load_from_path("tide-config.toml")
    }

    /// Load configuration from the given path.
    /// Falls back to default configuration if the file is missing or invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("invalid config file format: {e}; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_timing_is_production_preset() {
        let timing = Timing::default();
        assert_eq!(timing.datum_period_s, 90_000);
        assert_eq!(timing.datum_max_gap_s, 3_600);
        assert_eq!(timing.min_calibration_readings, 13);
        assert_eq!(timing.min_calibration_duration_s, 46_800);
        assert_eq!(timing.max_calibration_gap_s, 3_660);
    }

    #[test]
    fn cal_debug_preset_is_minutes_scale() {
        let timing = Timing::cal_debug();
        assert_eq!(timing.datum_period_s, 300);
        assert_eq!(timing.datum_max_gap_s, 120);
        assert_eq!(timing.min_calibration_readings, 3);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.station.name, parsed.station.name);
        assert_eq!(config.timing, parsed.timing);
    }

    #[test]
    fn load_nonexistent_file_falls_back_to_default() {
        let config = Config::load_from_path("/nonexistent/path");
        assert_eq!(config.station.store_path, "tide-stats.fram");
        assert_eq!(config.timing, Timing::default());
    }

    /// Partial timing tables fill the remaining fields from the production
    /// defaults, so a config only has to name what it overrides.
    #[test]
    fn partial_timing_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[station]\nname = \"Test pier\"\nstore_path = \"/tmp/t.fram\"\n\n\
             [timing]\ndatum_period_s = 300"
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.station.name, "Test pier");
        assert_eq!(config.timing.datum_period_s, 300);
        assert_eq!(config.timing.datum_max_gap_s, 3_600);
    }
}
