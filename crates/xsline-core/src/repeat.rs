//! Repetition decorators
//!
//! Each wraps one shift and applies it several times at the same position,
//! feeding every output back in as the next input. A failure on iteration
//! `k` is returned as `ShiftError::Repeated { iteration: k, .. }` and the
//! partial result is dropped.

use crate::document::Document;
use crate::error::{ShiftError, ShiftResult};
use crate::shift::{Shift, StEnvelope};
use std::sync::Arc;

/// Stop condition checked against the output of each application
pub type Predicate = dyn Fn(&Document) -> bool + Send + Sync;

/// Applies the inner shift until `stop` holds for its output.
///
/// The shift always runs at least once; `stop` is checked after every
/// application. There is no iteration cap: if `stop` never holds this
/// never returns. Wrap the inner shift in [`StBounded`] instead when a cap
/// is needed.
pub struct StRepeated {
    origin: StEnvelope,
    stop: Arc<Predicate>,
}

impl StRepeated {
    /// Repeat `shift` until `stop` holds for its output
    pub fn new<P>(shift: impl Shift + 'static, stop: P) -> Self
    where
        P: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        Self {
            origin: StEnvelope::new(shift),
            stop: Arc::new(stop),
        }
    }
}

impl Shift for StRepeated {
    fn uid(&self) -> String {
        self.origin.uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        let mut current = doc;
        let mut iteration = 0;
        loop {
            iteration += 1;
            current = self
                .origin
                .apply(position, current)
                .map_err(|e| e.at_iteration(iteration))?;
            if (self.stop)(&current) {
                tracing::trace!(target: "xsline", uid = %self.uid(), iteration, "predicate satisfied");
                return Ok(current);
            }
        }
    }
}

/// Applies the inner shift exactly `times` times
pub struct StBounded {
    origin: StEnvelope,
    times: usize,
}

impl StBounded {
    /// Apply `shift` exactly `times` times; zero is a configuration error
    pub fn new(shift: impl Shift + 'static, times: usize) -> ShiftResult<Self> {
        if times == 0 {
            return Err(ShiftError::Configuration(
                "bounded repetition needs at least one iteration".to_string(),
            ));
        }
        Ok(Self {
            origin: StEnvelope::new(shift),
            times,
        })
    }

    pub fn times(&self) -> usize {
        self.times
    }
}

impl Shift for StBounded {
    fn uid(&self) -> String {
        self.origin.uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        let mut current = doc;
        for iteration in 1..=self.times {
            current = self
                .origin
                .apply(position, current)
                .map_err(|e| e.at_iteration(iteration))?;
        }
        Ok(current)
    }
}

/// Applies the inner shift until its output equals its input
pub struct StEndless {
    origin: StEnvelope,
}

impl StEndless {
    /// Repeat `shift` until its output equals its input
    pub fn new(shift: impl Shift + 'static) -> Self {
        Self {
            origin: StEnvelope::new(shift),
        }
    }
}

impl Shift for StEndless {
    fn uid(&self) -> String {
        self.origin.uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        let mut current = doc;
        let mut iteration = 0;
        loop {
            iteration += 1;
            let next = self
                .origin
                .apply(position, current.clone())
                .map_err(|e| e.at_iteration(iteration))?;
            if next == current {
                tracing::trace!(target: "xsline", uid = %self.uid(), iteration, "fixed point reached");
                return Ok(next);
            }
            current = next;
        }
    }
}
