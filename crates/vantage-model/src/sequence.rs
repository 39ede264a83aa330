//! Stage sequencing.
//!
//! A [`Sequence`] owns an ordered list of boxed [`Stage`]s and forwards each
//! per-tick call to every child in order, sharing one `&mut SensorDataBuffer`
//! so later stages see earlier stages' writes. Execution is fail-fast: the
//! first child error halts the run, wrapped in
//! [`VantageError::SequenceHalted`] with the child's index and name, and the
//! remaining children never see the tick. A `Sequence` is itself a [`Stage`],
//! so pipelines nest.
//!
//! # Example
//!
//! ```rust
//! use vantage_model::profile;
//! use vantage_model::sequence::Sequence;
//! use vantage_model::stage::{AlertSink, LogSink, Stage, StageContext};
//! use vantage_types::SensorDataBuffer;
//!
//! let context = StageContext::new(LogSink::new(|_| {}), AlertSink::new(|_| {}));
//! let mut pipeline = Sequence::from_profile(&profile::reflection_lidar(), &context);
//!
//! // No sensor view is populated, so every stage is a no-op this tick.
//! let mut buffer = SensorDataBuffer::default();
//! pipeline.apply(&mut buffer).unwrap();
//! assert!(buffer.logical_detections.is_empty());
//! ```

use tracing::trace;

use vantage_types::{SensorDataBuffer, VantageError};

use crate::fusion::PointCloudFusion;
use crate::profile::{Profile, StageKind};
use crate::stage::{Stage, StageContext};

/// An ordered, fail-fast pipeline of stages.
#[derive(Default)]
pub struct Sequence {
    children: Vec<Box<dyn Stage>>,
}

impl Sequence {
    /// Create an empty sequence. Applying it is a no-op that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the pipeline a [`Profile`] names, instantiating each listed
    /// stage with a clone of `context`.
    pub fn from_profile(profile: &Profile, context: &StageContext) -> Self {
        let mut sequence = Self::new();
        for kind in &profile.stages {
            match kind {
                StageKind::PointCloudFusion => {
                    sequence.push(Box::new(PointCloudFusion::new(context.clone())));
                }
            }
        }
        sequence
    }

    /// Append a stage to the end of the pipeline.
    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.children.push(stage);
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// `true` when the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Stage for Sequence {
    fn apply(&mut self, buffer: &mut SensorDataBuffer) -> Result<(), VantageError> {
        for (index, child) in self.children.iter_mut().enumerate() {
            trace!(stage = child.name(), index, "applying stage");
            child
                .apply(buffer)
                .map_err(|source| VantageError::SequenceHalted {
                    index,
                    stage: child.name().to_string(),
                    details: source.to_string(),
                })?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}
