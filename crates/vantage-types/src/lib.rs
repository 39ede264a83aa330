use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Geometry primitives
// ────────────────────────────────────────────────────────────────────────────

/// A 3-D cartesian point or translation, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    pub fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Euclidean norm.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A 3-D rotation as Euler angles in radians.
///
/// The rotation is applied yaw (about z), then pitch (about y), then roll
/// (about x).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation3 {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Orientation3 {
    /// Create a new orientation.
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// No rotation.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// A point in sensor-local spherical coordinates: distance in meters,
/// azimuth and elevation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical3 {
    pub distance: f64,
    pub azimuth: f64,
    pub elevation: f64,
}

impl Spherical3 {
    /// Create a new spherical position.
    pub fn new(distance: f64, azimuth: f64, elevation: f64) -> Self {
        Self {
            distance,
            azimuth,
            elevation,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Simulation time
// ────────────────────────────────────────────────────────────────────────────

/// A simulation timestamp split into whole seconds and subsecond nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl Timestamp {
    /// Create a timestamp from seconds and subsecond nanoseconds.
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// The timestamp as fractional seconds: `seconds + nanos / 1e9`.
    pub fn as_secs_f64(self) -> f64 {
        self.seconds as f64 + f64::from(self.nanos) / 1e9
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mounting pose
// ────────────────────────────────────────────────────────────────────────────

/// A sensor's rigid transform from its local frame into the ego frame:
/// rotate by `orientation`, then translate by `position`. Fixed for the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountingPose {
    pub position: Vec3,
    pub orientation: Orientation3,
}

impl MountingPose {
    /// Create a mounting pose.
    pub fn new(position: Vec3, orientation: Orientation3) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Zero translation, zero rotation: sensor frame coincides with ego frame.
    pub fn identity() -> Self {
        Self::new(Vec3::zero(), Orientation3::zero())
    }
}

/// Per-sensor header carried with each feature-data entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorHeader {
    pub mounting_pose: MountingPose,
}

impl SensorHeader {
    pub fn new(mounting_pose: MountingPose) -> Self {
        Self { mounting_pose }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sensor views
// ────────────────────────────────────────────────────────────────────────────

/// Ground-truth context for the tick. Only the timestamp is consumed by the
/// pipeline (for diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundTruth {
    pub timestamp: Timestamp,
}

/// Marker that a lidar sensor produced a raw view this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LidarSensorView {
    pub sensor_id: u64,
}

impl LidarSensorView {
    pub fn new(sensor_id: u64) -> Self {
        Self { sensor_id }
    }
}

/// Marker that a radar sensor produced a raw view this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarSensorView {
    pub sensor_id: u64,
}

impl RadarSensorView {
    pub fn new(sensor_id: u64) -> Self {
        Self { sensor_id }
    }
}

/// Raw sensor views for one tick. A non-empty per-modality list marks that
/// modality active; the lists carry no detection payload themselves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorView {
    pub ground_truth: GroundTruth,
    pub lidar: Vec<LidarSensorView>,
    pub radar: Vec<RadarSensorView>,
}

// ────────────────────────────────────────────────────────────────────────────
// Feature data
// ────────────────────────────────────────────────────────────────────────────

/// One raw lidar detection in the sensor's local spherical frame.
///
/// `intensity` and `echo_pulse_width` are mutually exclusive: a detection
/// carries at most one of the two. Use the dedicated constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LidarDetection {
    pub position: Spherical3,
    pub intensity: Option<f64>,
    pub echo_pulse_width: Option<f64>,
}

impl LidarDetection {
    /// A detection with neither intensity nor echo pulse width.
    pub fn new(position: Spherical3) -> Self {
        Self {
            position,
            intensity: None,
            echo_pulse_width: None,
        }
    }

    /// A detection carrying an intensity value.
    pub fn with_intensity(position: Spherical3, intensity: f64) -> Self {
        Self {
            position,
            intensity: Some(intensity),
            echo_pulse_width: None,
        }
    }

    /// A detection carrying an echo pulse width instead of an intensity.
    pub fn with_echo_pulse_width(position: Spherical3, echo_pulse_width: f64) -> Self {
        Self {
            position,
            intensity: None,
            echo_pulse_width: Some(echo_pulse_width),
        }
    }
}

/// One raw radar detection in the sensor's local spherical frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarDetection {
    pub position: Spherical3,
    /// Radar cross-section of the return.
    pub rcs: f64,
}

impl RadarDetection {
    pub fn new(position: Spherical3, rcs: f64) -> Self {
        Self { position, rcs }
    }
}

/// One lidar sensor's detections for the tick, with its mounting header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LidarSensor {
    pub header: SensorHeader,
    pub detections: Vec<LidarDetection>,
}

impl LidarSensor {
    pub fn new(header: SensorHeader, detections: Vec<LidarDetection>) -> Self {
        Self { header, detections }
    }
}

/// One radar sensor's detections for the tick, with its mounting header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSensor {
    pub header: SensorHeader,
    pub detections: Vec<RadarDetection>,
}

impl RadarSensor {
    pub fn new(header: SensorHeader, detections: Vec<RadarDetection>) -> Self {
        Self { header, detections }
    }
}

/// Per-sensor detection lists for the tick, grouped by modality.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureData {
    pub lidar_sensors: Vec<LidarSensor>,
    pub radar_sensors: Vec<RadarSensor>,
}

// ────────────────────────────────────────────────────────────────────────────
// Fusion output
// ────────────────────────────────────────────────────────────────────────────

/// A fused detection in ego-frame cartesian coordinates.
///
/// Exactly one of `intensity` and `echo_pulse_width` is carried through from
/// the source detection; radar RCS values land in `intensity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalDetection {
    pub position: Vec3,
    pub intensity: Option<f64>,
    pub echo_pulse_width: Option<f64>,
}

impl LogicalDetection {
    /// A logical detection with no intensity-like attribute yet.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            intensity: None,
            echo_pulse_width: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sensor data buffer
// ────────────────────────────────────────────────────────────────────────────

/// The single mutable record passed through the pipeline each tick.
///
/// The host creates one per tick, fills the views and feature data, and
/// consumes `logical_detections` after the pipeline returns. Stages receive
/// a transient `&mut` and must not retain it past the call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorDataBuffer {
    pub sensor_view: SensorView,
    pub feature_data: FeatureData,
    pub logical_detections: Vec<LogicalDetection>,
}

impl SensorDataBuffer {
    /// An empty buffer stamped with the tick's ground-truth timestamp.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            sensor_view: SensorView {
                ground_truth: GroundTruth { timestamp },
                lidar: Vec::new(),
                radar: Vec::new(),
            },
            feature_data: FeatureData::default(),
            logical_detections: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Error type spanning profile lookup and pipeline execution failures.
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum VantageError {
    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("stage '{stage}' failed: {details}")]
    StageFailure { stage: String, details: String },

    #[error("sequence stopped at stage {index} ('{stage}'): {details}")]
    SequenceHalted {
        index: usize,
        stage: String,
        details: String,
    },
}
