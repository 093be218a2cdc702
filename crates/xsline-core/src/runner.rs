//! Xsline: passes a document through a train of shifts
use crate::config::XslineConfig;
use crate::document::Document;
use crate::error::ShiftResult;
use crate::logged::StLogged;
use crate::shift::{Shift, ShiftRef};
use crate::train::{TrDefault, Train, TrainRef};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Level;

/// What one pass did
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub output: Document,
    /// Uids of the shifts applied, in order
    pub uids: Vec<String>,
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
}

impl PassReport {
    /// Number of shifts applied
    pub fn count(&self) -> usize {
        self.uids.len()
    }

    /// One-line description of the pass
    pub fn summary(&self) -> String {
        format!(
            "Transformed through {} stage(s) in {}ms: {}",
            self.count(),
            self.elapsed.as_millis(),
            self.uids.join(", ")
        )
    }
}

/// Receives one report per successful pass.
///
/// Sinks are observers only. A sink that panics is ignored.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, report: &PassReport);
}

/// Logs the pass summary at DEBUG on the `xsline` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, report: &PassReport) {
        if tracing::enabled!(target: "xsline", Level::DEBUG) {
            tracing::debug!(
                target: "xsline",
                stages = report.count(),
                elapsed_ms = report.elapsed.as_millis() as u64,
                "{}",
                report.summary()
            );
        }
    }
}

/// Drives the shifts of a train over a document, one after another.
///
/// Stateless between passes and safe to share across threads.
pub struct Xsline {
    train: TrainRef<ShiftRef>,
    config: XslineConfig,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Xsline {
    /// Runner over `train` with default config and the [`TracingSink`]
    pub fn new(train: impl Train<ShiftRef> + 'static) -> Self {
        Self {
            train: Arc::new(train),
            config: XslineConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Runner over a train of one shift
    pub fn single(shift: impl Shift + 'static) -> Self {
        Self::new(TrDefault::of(vec![Arc::new(shift) as ShiftRef]))
    }

    /// Replace the config
    pub fn with_config(mut self, config: XslineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the diagnostics sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Pass `input` through every shift and return the last output
    pub fn pass(&self, input: Document) -> ShiftResult<Document> {
        self.run(input).map(|report| report.output)
    }

    /// Like [`Xsline::pass`], keeping uids and timing.
    ///
    /// The first failing shift aborts the pass; shifts after it never run.
    pub fn run(&self, input: Document) -> ShiftResult<PassReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let shifts = self.train.iter();
        let (output, uids) = if self.config.trace_shifts {
            drive(
                shifts.map(|shift| Arc::new(StLogged::from_ref(shift)) as ShiftRef),
                input,
            )?
        } else {
            drive(shifts, input)?
        };

        let report = PassReport {
            output,
            uids,
            elapsed: start.elapsed(),
            started_at,
        };
        if self.config.diagnostics {
            self.emit(&report);
        }
        Ok(report)
    }

    fn emit(&self, report: &PassReport) {
        let sink = &self.sink;
        if catch_unwind(AssertUnwindSafe(|| sink.record(report))).is_err() {
            tracing::trace!(target: "xsline", "diagnostics sink panicked, report dropped");
        }
    }
}

/// Applies `shifts` in order, threading positions from zero
pub(crate) fn drive(
    shifts: impl Iterator<Item = ShiftRef>,
    input: Document,
) -> ShiftResult<(Document, Vec<String>)> {
    let mut output = input;
    let mut uids = Vec::new();
    for (position, shift) in shifts.enumerate() {
        output = shift.apply(position, output)?;
        uids.push(shift.uid());
    }
    Ok((output, uids))
}
