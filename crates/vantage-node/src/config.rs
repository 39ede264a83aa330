//! Run configuration – reads `vantage.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Host run configuration. Every field has a default, so an empty file (or
/// no file at all) yields a usable config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the sensor profile to run, resolved through the registry.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Number of simulation ticks to drive through the pipeline.
    #[serde(default = "default_tick_count")]
    pub tick_count: u64,

    /// Simulated duration of one tick in milliseconds.
    #[serde(default = "default_tick_duration_ms")]
    pub tick_duration_ms: u64,

    /// Detections synthesised per sensor per tick.
    #[serde(default = "default_detections_per_sensor")]
    pub detections_per_sensor: usize,
}

fn default_profile() -> String {
    "reflection_lidar".to_string()
}
fn default_tick_count() -> u64 {
    10
}
fn default_tick_duration_ms() -> u64 {
    100
}
fn default_detections_per_sensor() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            tick_count: default_tick_count(),
            tick_duration_ms: default_tick_duration_ms(),
            detections_per_sensor: default_detections_per_sensor(),
        }
    }
}

/// Load the config from a specific path.  Returns `None` if the file does
/// not exist.
pub fn load_from(path: &PathBuf) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    Ok(Some(cfg))
}

/// Apply `VANTAGE_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `VANTAGE_PROFILE` | `profile` |
/// | `VANTAGE_TICK_COUNT` | `tick_count` |
/// | `VANTAGE_TICK_DURATION_MS` | `tick_duration_ms` |
/// | `VANTAGE_DETECTIONS_PER_SENSOR` | `detections_per_sensor` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("VANTAGE_PROFILE") {
        cfg.profile = v;
    }
    if let Ok(v) = std::env::var("VANTAGE_TICK_COUNT")
        && let Ok(n) = v.parse::<u64>() {
            cfg.tick_count = n;
        }
    if let Ok(v) = std::env::var("VANTAGE_TICK_DURATION_MS")
        && let Ok(n) = v.parse::<u64>() {
            cfg.tick_duration_ms = n;
        }
    if let Ok(v) = std::env::var("VANTAGE_DETECTIONS_PER_SENSOR")
        && let Ok(n) = v.parse::<usize>() {
            cfg.detections_per_sensor = n;
        }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_the_lidar_profile() {
        let cfg = Config::default();
        assert_eq!(cfg.profile, "reflection_lidar");
        assert_eq!(cfg.tick_count, 10);
        assert_eq!(cfg.tick_duration_ms, 100);
        assert_eq!(cfg.detections_per_sensor, 8);
    }

    #[test]
    fn load_from_reads_a_full_file() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("vantage.toml");
        std::fs::write(
            &path,
            "profile = \"reflection_radar\"\n\
             tick_count = 3\n\
             tick_duration_ms = 50\n\
             detections_per_sensor = 2\n",
        )
        .expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.profile, "reflection_radar");
        assert_eq!(cfg.tick_count, 3);
        assert_eq!(cfg.tick_duration_ms, 50);
        assert_eq!(cfg.detections_per_sensor, 2);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("vantage.toml");
        std::fs::write(&path, "profile = \"reflection_radar\"\n").expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.profile, "reflection_radar");
        assert_eq!(cfg.tick_count, 10);
        assert_eq!(cfg.detections_per_sensor, 8);
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("vantage.toml");
        let result = load_from(&path).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("vantage.toml");
        std::fs::write(&path, "tick_count = \"many\"\n").expect("write");

        let err = load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"));
    }

    #[test]
    fn apply_env_overrides_changes_profile() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("VANTAGE_PROFILE", "reflection_radar") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.profile, "reflection_radar");
        unsafe { std::env::remove_var("VANTAGE_PROFILE") };
    }

    #[test]
    fn apply_env_overrides_changes_tick_count() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("VANTAGE_TICK_COUNT", "25") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.tick_count, 25);
        unsafe { std::env::remove_var("VANTAGE_TICK_COUNT") };
    }

    #[test]
    fn apply_env_overrides_ignores_invalid_duration() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("VANTAGE_TICK_DURATION_MS", "not-a-number") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.tick_duration_ms, 100);
        unsafe { std::env::remove_var("VANTAGE_TICK_DURATION_MS") };
    }

    #[test]
    fn apply_env_overrides_changes_detections_per_sensor() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("VANTAGE_DETECTIONS_PER_SENSOR", "4") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.detections_per_sensor, 4);
        unsafe { std::env::remove_var("VANTAGE_DETECTIONS_PER_SENSOR") };
    }
}
