//! The `Stage` trait and the host-injected capabilities stages run with.
//!
//! A stage is one unit of per-tick pipeline work: it mutates the shared
//! [`SensorDataBuffer`] in place. Concrete stages are assembled into a
//! [`Sequence`][crate::sequence::Sequence] from a profile; the rest of the
//! system only ever talks to the trait, so stages can be added without
//! touching the host.
//!
//! Logging and alerting are capabilities the host hands to each stage at
//! construction time, never global singletons, so a pipeline is reproducible
//! under test without a real host runtime.
//!
//! # Example
//!
//! ```rust
//! use vantage_model::stage::{AlertSink, LogSink, StageContext};
//!
//! let context = StageContext::new(
//!     LogSink::new(|message| println!("log: {message}")),
//!     AlertSink::new(|message| eprintln!("alert: {message}")),
//! );
//! context.log("pipeline ready");
//! ```

use std::sync::Arc;

use vantage_types::{SensorDataBuffer, VantageError};

// ────────────────────────────────────────────────────────────────────────────
// Capability sinks
// ────────────────────────────────────────────────────────────────────────────

/// The injected logging capability: fire-and-forget, cannot fail from the
/// stage's perspective.
#[derive(Clone)]
pub struct LogSink(Arc<dyn Fn(&str) + Send + Sync>);

impl LogSink {
    /// Wrap a host-provided logging function.
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Emit one diagnostic message.
    pub fn log(&self, message: &str) {
        (self.0)(message);
    }
}

/// The injected alerting capability, shaped like [`LogSink`] but reserved for
/// conditions the host must react to.
#[derive(Clone)]
pub struct AlertSink(Arc<dyn Fn(&str) + Send + Sync>);

impl AlertSink {
    /// Wrap a host-provided alerting function.
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Raise one alert message.
    pub fn alert(&self, message: &str) {
        (self.0)(message);
    }
}

/// The capability set a stage is constructed with.
#[derive(Clone)]
pub struct StageContext {
    log: LogSink,
    alert: AlertSink,
}

impl StageContext {
    /// Bundle the two host capabilities.
    pub fn new(log: LogSink, alert: AlertSink) -> Self {
        Self { log, alert }
    }

    /// Emit one diagnostic message through the host's log sink.
    pub fn log(&self, message: &str) {
        self.log.log(message);
    }

    /// Raise one alert through the host's alert sink.
    pub fn alert(&self, message: &str) {
        self.alert.alert(message);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stage
// ────────────────────────────────────────────────────────────────────────────

/// One polymorphic unit of pipeline work.
///
/// `apply` receives the tick's buffer as a transient `&mut` and must not
/// retain it past the call; all output goes back into the buffer itself.
pub trait Stage: Send + Sync {
    /// Run this stage against the tick's buffer, mutating it in place.
    ///
    /// # Errors
    ///
    /// Returns a [`VantageError`] only for fatal conditions; recoverable
    /// input gaps are handled internally (logged or skipped) and still
    /// return `Ok`.
    fn apply(&mut self, buffer: &mut SensorDataBuffer) -> Result<(), VantageError>;

    /// Stable identifier used in failure reports, e.g. `"point_cloud_fusion"`.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn log_sink_invokes_wrapped_function() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::clone(&captured);
        let sink = LogSink::new(move |message| inner.lock().unwrap().push(message.to_string()));

        sink.log("first");
        sink.log("second");
        assert_eq!(*captured.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn context_routes_log_and_alert_separately() {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let logs_inner = Arc::clone(&logs);
        let alerts_inner = Arc::clone(&alerts);

        let context = StageContext::new(
            LogSink::new(move |message| logs_inner.lock().unwrap().push(message.to_string())),
            AlertSink::new(move |message| alerts_inner.lock().unwrap().push(message.to_string())),
        );

        context.log("routine");
        context.alert("fatal");

        assert_eq!(*logs.lock().unwrap(), vec!["routine"]);
        assert_eq!(*alerts.lock().unwrap(), vec!["fatal"]);
    }

    #[test]
    fn cloned_sinks_share_the_same_target() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::clone(&captured);
        let sink = LogSink::new(move |message| inner.lock().unwrap().push(message.to_string()));
        let clone = sink.clone();

        sink.log("from original");
        clone.log("from clone");
        assert_eq!(captured.lock().unwrap().len(), 2);
    }
}
