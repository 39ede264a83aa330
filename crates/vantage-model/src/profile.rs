//! Sensor-suite profiles.
//!
//! A [`Profile`] is a named, generated description of a simulated sensor
//! configuration: where each sensor is mounted on the vehicle and which
//! pipeline stages process its data, in order. Hosts pick a profile once at
//! setup (usually through the [`ProfileRegistry`][crate::registry::ProfileRegistry]),
//! assemble the pipeline with
//! [`Sequence::from_profile`][crate::sequence::Sequence::from_profile], and
//! use the mount lists to synthesise feature data with matching headers.
//!
//! Profiles are plain generated data, not configuration files: each built-in
//! is a `fn() -> Profile` returning the same value every call.

use vantage_types::{MountingPose, Orientation3, Vec3};

/// Pipeline stages a profile can name, in the order they should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Fuse per-sensor detections into the ego-frame logical point cloud.
    PointCloudFusion,
}

/// A named sensor configuration: mounting poses per modality plus the stage
/// pipeline that processes their data.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Registry name of this profile.
    pub name: String,
    /// Mounting poses of the simulated lidar sensors, one per sensor.
    pub lidar_mounts: Vec<MountingPose>,
    /// Mounting poses of the simulated radar sensors, one per sensor.
    pub radar_mounts: Vec<MountingPose>,
    /// Stages to assemble, in execution order.
    pub stages: Vec<StageKind>,
}

/// Two roof-corner lidars (yawed 0.3 rad outward) feeding the fusion stage.
pub fn reflection_lidar() -> Profile {
    Profile {
        name: "reflection_lidar".to_string(),
        lidar_mounts: vec![
            MountingPose::new(Vec3::new(1.2, 0.5, 1.7), Orientation3::new(0.0, 0.0, 0.3)),
            MountingPose::new(Vec3::new(1.2, -0.5, 1.7), Orientation3::new(0.0, 0.0, -0.3)),
        ],
        radar_mounts: Vec::new(),
        stages: vec![StageKind::PointCloudFusion],
    }
}

/// A single forward-facing bumper radar feeding the fusion stage.
pub fn reflection_radar() -> Profile {
    Profile {
        name: "reflection_radar".to_string(),
        lidar_mounts: Vec::new(),
        radar_mounts: vec![MountingPose::new(
            Vec3::new(2.4, 0.0, 0.5),
            Orientation3::new(0.0, 0.0, 0.0),
        )],
        stages: vec![StageKind::PointCloudFusion],
    }
}
