//! Point-Cloud Fusion Stage.
//!
//! Fuses the active modality's raw per-sensor detections into the buffer's
//! single logical point cloud, expressed in the ego frame.
//!
//! Modality selection is a priority, not a merge: a populated lidar view
//! wins over radar, and only one modality's feature data is consumed per
//! call. For every detection of every sensor of the selected modality the
//! stage converts the spherical position to cartesian, lifts it into the ego
//! frame through the sensor's mounting pose, and appends one
//! [`LogicalDetection`]. Lidar carries its intensity through (falling back
//! to echo pulse width); radar writes its RCS into the intensity field.
//!
//! The logical-detection list never accumulates across ticks: every call
//! that selects a modality clears it before rebuilding, including the
//! missing-feature-data case, which clears, logs a timestamped diagnostic
//! through the injected [`LogSink`][crate::stage::LogSink], and returns.
//! When neither view is populated the stage does nothing and stays silent.
//!
//! # Example
//!
//! ```rust
//! use vantage_model::fusion::PointCloudFusion;
//! use vantage_model::stage::{AlertSink, LogSink, Stage, StageContext};
//! use vantage_types::{
//!     LidarDetection, LidarSensor, LidarSensorView, MountingPose, SensorDataBuffer,
//!     SensorHeader, Spherical3,
//! };
//!
//! let context = StageContext::new(LogSink::new(|_| {}), AlertSink::new(|_| {}));
//! let mut fusion = PointCloudFusion::new(context);
//!
//! let mut buffer = SensorDataBuffer::default();
//! buffer.sensor_view.lidar.push(LidarSensorView::new(0));
//! buffer.feature_data.lidar_sensors.push(LidarSensor::new(
//!     SensorHeader::new(MountingPose::identity()),
//!     vec![LidarDetection::with_intensity(Spherical3::new(10.0, 0.0, 0.0), 0.8)],
//! ));
//!
//! fusion.apply(&mut buffer).unwrap();
//! assert_eq!(buffer.logical_detections.len(), 1);
//! assert!((buffer.logical_detections[0].position.x - 10.0).abs() < 1e-9);
//! ```

use vantage_types::{LogicalDetection, SensorDataBuffer, VantageError};

use crate::stage::{Stage, StageContext};
use crate::transform::{to_cartesian, to_ego_frame};

// ────────────────────────────────────────────────────────────────────────────
// PointCloudFusion
// ────────────────────────────────────────────────────────────────────────────

/// The fusion stage. Stateless between calls: every `apply` recomputes the
/// logical-detection list from scratch.
pub struct PointCloudFusion {
    context: StageContext,
}

impl PointCloudFusion {
    /// Create the stage with its injected host capabilities.
    pub fn new(context: StageContext) -> Self {
        Self { context }
    }

    /// The selected modality reported no sensors this tick: drop stale
    /// output and tell the host which tick was affected.
    fn skip_missing_input(&self, buffer: &mut SensorDataBuffer) {
        buffer.logical_detections.clear();
        self.context.log(&format!(
            "no feature data available for timestamp {}",
            buffer.sensor_view.ground_truth.timestamp.as_secs_f64()
        ));
    }

    fn fuse_lidar(&self, buffer: &mut SensorDataBuffer) {
        buffer.logical_detections.clear();
        for sensor in &buffer.feature_data.lidar_sensors {
            for detection in &sensor.detections {
                let ego = to_ego_frame(
                    to_cartesian(detection.position),
                    &sensor.header.mounting_pose,
                );
                let mut logical = LogicalDetection::new(ego);
                // At most one of the two attributes is present; intensity wins.
                if let Some(intensity) = detection.intensity {
                    logical.intensity = Some(intensity);
                } else if let Some(width) = detection.echo_pulse_width {
                    logical.echo_pulse_width = Some(width);
                }
                buffer.logical_detections.push(logical);
            }
        }
        self.log_result(buffer);
    }

    fn fuse_radar(&self, buffer: &mut SensorDataBuffer) {
        buffer.logical_detections.clear();
        for sensor in &buffer.feature_data.radar_sensors {
            for detection in &sensor.detections {
                let ego = to_ego_frame(
                    to_cartesian(detection.position),
                    &sensor.header.mounting_pose,
                );
                let mut logical = LogicalDetection::new(ego);
                logical.intensity = Some(detection.rcs);
                buffer.logical_detections.push(logical);
            }
        }
        self.log_result(buffer);
    }

    fn log_result(&self, buffer: &SensorDataBuffer) {
        self.context.log(&format!(
            "point cloud fusion produced {} logical detections",
            buffer.logical_detections.len()
        ));
    }
}

impl Stage for PointCloudFusion {
    fn apply(&mut self, buffer: &mut SensorDataBuffer) -> Result<(), VantageError> {
        if !buffer.sensor_view.lidar.is_empty() {
            if buffer.feature_data.lidar_sensors.is_empty() {
                self.skip_missing_input(buffer);
            } else {
                self.fuse_lidar(buffer);
            }
        } else if !buffer.sensor_view.radar.is_empty() {
            if buffer.feature_data.radar_sensors.is_empty() {
                self.skip_missing_input(buffer);
            } else {
                self.fuse_radar(buffer);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "point_cloud_fusion"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
