//! Per-shift tracing
//!
//! [`StLogged`] reports what one shift did to the document; [`TrLogged`]
//! wraps every shift of a train in it. Neither changes order, positions
//! or the documents themselves.

use crate::document::Document;
use crate::error::ShiftResult;
use crate::shift::{Shift, ShiftRef, StEnvelope};
use crate::train::{TrDefault, Train, TrainRef};
use std::sync::Arc;
use std::time::Instant;

/// Reports position, uid, timing and size change of the shift it wraps
pub struct StLogged {
    origin: StEnvelope,
}

impl StLogged {
    /// Wrap a shift
    pub fn new(shift: impl Shift + 'static) -> Self {
        Self {
            origin: StEnvelope::new(shift),
        }
    }

    /// Wrap a shift that is already shared
    pub fn from_ref(shift: ShiftRef) -> Self {
        Self {
            origin: StEnvelope::from_ref(shift),
        }
    }
}

impl Shift for StLogged {
    fn uid(&self) -> String {
        self.origin.uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        let start = Instant::now();
        let before = doc.clone();
        let result = self.origin.apply(position, doc);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(after) => {
                let changed = before != *after;
                tracing::debug!(
                    target: "xsline",
                    position,
                    uid = %self.uid(),
                    elapsed_ms,
                    size_before = before.size(),
                    size_after = after.size(),
                    changed,
                    "shift applied"
                );
                tracing::trace!(
                    target: "xsline",
                    position,
                    in_hash = %before.digest(),
                    out_hash = %after.digest(),
                    "shift digests"
                );
            }
            Err(err) => {
                tracing::debug!(
                    target: "xsline",
                    position,
                    uid = %self.uid(),
                    elapsed_ms,
                    error = %err,
                    "shift failed"
                );
            }
        }
        result
    }
}

/// A train whose shifts report themselves through [`StLogged`].
///
/// Wrappers are built while iterating, so two iterations yield equal
/// shifts in the same order but never the same `Arc` instances.
pub struct TrLogged {
    origin: TrainRef<ShiftRef>,
}

impl TrLogged {
    /// Logged train over an empty [`TrDefault`]
    pub fn new() -> Self {
        Self::around(TrDefault::new())
    }

    /// Log every shift of `origin`
    pub fn around(origin: impl Train<ShiftRef> + 'static) -> Self {
        Self {
            origin: Arc::new(origin),
        }
    }
}

impl Default for TrLogged {
    fn default() -> Self {
        Self::new()
    }
}

impl Train<ShiftRef> for TrLogged {
    fn with(&self, item: ShiftRef) -> TrainRef<ShiftRef> {
        Arc::new(Self {
            origin: self.origin.with(item),
        })
    }

    fn empty(&self) -> TrainRef<ShiftRef> {
        Arc::new(Self {
            origin: self.origin.empty(),
        })
    }

    fn iter(&self) -> Box<dyn Iterator<Item = ShiftRef> + '_> {
        Box::new(
            self.origin
                .iter()
                .map(|shift| Arc::new(StLogged::from_ref(shift)) as ShiftRef),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShiftError;
    use crate::lambda::StLambda;
    use crate::shift::ShiftExt;

    #[test]
    fn test_logged_is_transparent() {
        let shift = StLogged::new(StLambda::named("twice", |_, doc| {
            let text = doc.as_str().unwrap_or_default();
            Ok(Document::text(text.repeat(2)))
        }));
        assert_eq!(shift.uid(), "twice");
        let out = shift.apply(2, Document::text("ab")).unwrap();
        assert_eq!(out.as_str(), Some("abab"));
    }

    #[test]
    fn test_logged_passes_errors_through() {
        let shift = StLogged::new(StLambda::named("bad", |pos, _| {
            Err(ShiftError::transform("bad", pos, "nope"))
        }));
        let err = shift.apply(1, Document::text("x")).unwrap_err();
        assert_eq!(err, ShiftError::transform("bad", 1, "nope"));
    }

    #[test]
    fn test_logged_train_keeps_order_and_uids() {
        let train = TrLogged::new()
            .with(StLambda::named("a", |_, doc| Ok(doc)).into_ref())
            .with(StLambda::named("b", |_, doc| Ok(doc)).into_ref());
        let uids: Vec<String> = train.iter().map(|shift| shift.uid()).collect();
        assert_eq!(uids, vec!["a", "b"]);
        assert!(train.empty().is_empty());
    }

    #[test]
    fn test_logged_train_wraps_afresh_on_each_iteration() {
        let train = TrLogged::new().with(StLambda::named("a", |_, doc| Ok(doc)).into_ref());
        let first = train.items();
        let second = train.items();
        assert_eq!(first[0].uid(), second[0].uid());
        assert!(!Arc::ptr_eq(&first[0], &second[0]));
    }
}
