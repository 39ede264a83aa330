//! [`ProfileRegistry`] – name-to-generator lookup for sensor profiles.
//!
//! The registry maps profile names to the `fn() -> Profile` generators that
//! build them. It is an explicit value owned by the host, built once at
//! setup: construct with [`ProfileRegistry::with_builtins`] (or
//! [`ProfileRegistry::new`] for an empty one), add custom generators with
//! [`ProfileRegistry::register`], then resolve the configured name through
//! [`ProfileRegistry::load`].

use std::collections::HashMap;

use tracing::debug;

use vantage_types::VantageError;

use crate::profile::{self, Profile};

/// Registry of named profile generators.
#[derive(Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, fn() -> Profile>,
}

impl ProfileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the built-in profiles
    /// (`reflection_lidar` and `reflection_radar`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("reflection_lidar", profile::reflection_lidar);
        registry.register("reflection_radar", profile::reflection_radar);
        registry
    }

    /// Register a profile generator. Any previously registered generator
    /// with the same `name` is replaced.
    pub fn register(&mut self, name: &str, generator: fn() -> Profile) {
        self.profiles.insert(name.to_string(), generator);
    }

    /// Generate the profile registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::UnknownProfile`] when no generator is
    /// registered under `name`.
    pub fn load(&self, name: &str) -> Result<Profile, VantageError> {
        match self.profiles.get(name) {
            Some(generator) => {
                let profile = generator();
                debug!(
                    profile = name,
                    lidar_mounts = profile.lidar_mounts.len(),
                    radar_mounts = profile.radar_mounts.len(),
                    "profile loaded"
                );
                Ok(profile)
            }
            None => Err(VantageError::UnknownProfile(name.to_string())),
        }
    }

    /// Names of all registered profiles, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::StageKind;
    use vantage_types::{MountingPose, Orientation3, Vec3};

    #[test]
    fn with_builtins_resolves_both_shipped_profiles() {
        let registry = ProfileRegistry::with_builtins();
        let lidar = registry.load("reflection_lidar").unwrap();
        assert_eq!(lidar.lidar_mounts.len(), 2);
        let radar = registry.load("reflection_radar").unwrap();
        assert_eq!(radar.radar_mounts.len(), 1);
    }

    #[test]
    fn unknown_name_reports_which_profile_was_missing() {
        let registry = ProfileRegistry::with_builtins();
        let err = registry.load("reflection_camera").unwrap_err();
        assert!(matches!(err, VantageError::UnknownProfile(_)));
        assert_eq!(
            err.to_string(),
            "unknown profile 'reflection_camera'"
        );
    }

    #[test]
    fn register_adds_a_custom_generator() {
        fn bench_profile() -> Profile {
            Profile {
                name: "bench".to_string(),
                lidar_mounts: vec![MountingPose::new(
                    Vec3::zero(),
                    Orientation3::zero(),
                )],
                radar_mounts: Vec::new(),
                stages: vec![StageKind::PointCloudFusion],
            }
        }

        let mut registry = ProfileRegistry::new();
        registry.register("bench", bench_profile);
        let profile = registry.load("bench").unwrap();
        assert_eq!(profile.name, "bench");
        assert_eq!(profile.lidar_mounts.len(), 1);
    }

    #[test]
    fn re_registering_replaces_the_old_generator() {
        fn empty_profile() -> Profile {
            Profile {
                name: "custom".to_string(),
                lidar_mounts: Vec::new(),
                radar_mounts: Vec::new(),
                stages: Vec::new(),
            }
        }

        let mut registry = ProfileRegistry::with_builtins();
        registry.register("reflection_lidar", empty_profile);
        let profile = registry.load("reflection_lidar").unwrap();
        assert!(profile.lidar_mounts.is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let registry = ProfileRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["reflection_lidar".to_string(), "reflection_radar".to_string()]
        );
    }
}
