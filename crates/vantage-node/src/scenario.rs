//! Deterministic scenario synthesis.
//!
//! Builds one [`SensorDataBuffer`] per tick from a profile's mount lists.
//! Detection values are a pure function of the (tick, sensor, detection)
//! indices, so two runs with the same config produce identical buffers.

use vantage_model::profile::Profile;
use vantage_types::{
    LidarDetection, LidarSensor, LidarSensorView, RadarDetection, RadarSensor, RadarSensorView,
    SensorDataBuffer, SensorHeader, Spherical3, Timestamp,
};

use crate::config::Config;

/// Simulated clock: tick index times the configured tick duration.
pub fn tick_timestamp(tick: u64, tick_duration_ms: u64) -> Timestamp {
    let total_ms = tick * tick_duration_ms;
    Timestamp::new((total_ms / 1000) as i64, ((total_ms % 1000) * 1_000_000) as u32)
}

/// Build the tick's input buffer from the profile's sensor suite.
///
/// Every mounted sensor appears both in the sensor view (so the fusion
/// stage selects its modality) and in the feature data, with a header
/// carrying its mounting pose.
pub fn build_buffer(profile: &Profile, tick: u64, config: &Config) -> SensorDataBuffer {
    let mut buffer = SensorDataBuffer::new(tick_timestamp(tick, config.tick_duration_ms));

    for (sensor_idx, mount) in profile.lidar_mounts.iter().enumerate() {
        buffer
            .sensor_view
            .lidar
            .push(LidarSensorView::new(sensor_idx as u64));
        let detections = (0..config.detections_per_sensor)
            .map(|detection_idx| lidar_detection(tick, sensor_idx, detection_idx))
            .collect();
        buffer
            .feature_data
            .lidar_sensors
            .push(LidarSensor::new(SensorHeader::new(*mount), detections));
    }

    for (sensor_idx, mount) in profile.radar_mounts.iter().enumerate() {
        buffer
            .sensor_view
            .radar
            .push(RadarSensorView::new(sensor_idx as u64));
        let detections = (0..config.detections_per_sensor)
            .map(|detection_idx| {
                RadarDetection::new(
                    detection_position(tick, sensor_idx, detection_idx),
                    10.0 - 0.5 * detection_idx as f64,
                )
            })
            .collect();
        buffer
            .feature_data
            .radar_sensors
            .push(RadarSensor::new(SensorHeader::new(*mount), detections));
    }

    buffer
}

/// One synthetic lidar detection. Even detection indices report intensity,
/// odd ones echo pulse width, exercising both attribute paths downstream.
fn lidar_detection(tick: u64, sensor_idx: usize, detection_idx: usize) -> LidarDetection {
    let position = detection_position(tick, sensor_idx, detection_idx);
    if detection_idx % 2 == 0 {
        LidarDetection::with_intensity(position, 100.0 / position.distance)
    } else {
        LidarDetection::with_echo_pulse_width(position, 3.0 + 0.1 * detection_idx as f64)
    }
}

/// Spherical position of one synthetic detection: a fan of targets drifting
/// slowly outward as the run progresses.
fn detection_position(tick: u64, sensor_idx: usize, detection_idx: usize) -> Spherical3 {
    Spherical3::new(
        10.0 + 2.0 * detection_idx as f64 + 0.5 * tick as f64,
        -0.4 + 0.1 * detection_idx as f64 + 0.05 * sensor_idx as f64,
        -0.05 + 0.02 * detection_idx as f64,
    )
}
