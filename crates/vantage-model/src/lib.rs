//! `vantage-model` – the sensor-model pipeline.
//!
//! Turns raw per-sensor detections into the unified ego-frame point cloud a
//! downstream consumer reasons about, one simulation tick at a time.
//!
//! # Modules
//!
//! - [`transform`] – pure spherical→cartesian conversion and the rigid
//!   sensor-to-ego frame transform (hand-rolled [`Quaternion`][transform::Quaternion]).
//! - [`stage`] – the [`Stage`][stage::Stage] trait every pipeline unit
//!   implements, plus the injected [`LogSink`][stage::LogSink] /
//!   [`AlertSink`][stage::AlertSink] capabilities.
//! - [`sequence`] – [`Sequence`][sequence::Sequence]: an ordered, owning list
//!   of child stages applied fail-fast against one shared buffer.
//! - [`fusion`] – [`PointCloudFusion`][fusion::PointCloudFusion]: fuses the
//!   active modality's detections into the buffer's logical-detection list.
//! - [`profile`] – named sensor configurations ([`Profile`][profile::Profile])
//!   and the built-in generators.
//! - [`registry`] – [`ProfileRegistry`][registry::ProfileRegistry]: the
//!   name→factory lookup a host uses once at setup.

pub mod fusion;
pub mod profile;
pub mod registry;
pub mod sequence;
pub mod stage;
pub mod transform;
