//! StSequence and StBefore: several shifts applied as a single one
use crate::document::Document;
use crate::error::ShiftResult;
use crate::runner::drive;
use crate::shift::{Shift, ShiftRef, StEnvelope};
use crate::train::{Train, TrainRef};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Runs the shifts of a train as one step of an outer pass.
///
/// Inner shifts see positions counted from zero inside the sequence, not
/// the position the sequence itself occupies.
pub struct StSequence {
    train: TrainRef<ShiftRef>,
    uid: OnceCell<String>,
}

impl StSequence {
    /// Treat `train` as a single shift
    pub fn new(train: impl Train<ShiftRef> + 'static) -> Self {
        Self {
            train: Arc::new(train),
            uid: OnceCell::new(),
        }
    }
}

impl Shift for StSequence {
    fn uid(&self) -> String {
        self.uid
            .get_or_init(|| {
                let uids: Vec<String> = self.train.iter().map(|shift| shift.uid()).collect();
                format!("seq({})", uids.join(", "))
            })
            .clone()
    }

    fn apply(&self, _position: usize, doc: Document) -> ShiftResult<Document> {
        drive(self.train.iter(), doc).map(|(output, _)| output)
    }
}

/// Runs `before` and then the wrapped shift, as one shift.
///
/// Reports the uid of the wrapped shift. Both run at the position the
/// decorator occupies.
pub struct StBefore {
    origin: StEnvelope,
    before: ShiftRef,
}

impl StBefore {
    /// Run `before` ahead of every application of `shift`
    pub fn new(shift: impl Shift + 'static, before: impl Shift + 'static) -> Self {
        Self {
            origin: StEnvelope::new(shift),
            before: Arc::new(before),
        }
    }
}

impl Shift for StBefore {
    fn uid(&self) -> String {
        self.origin.uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        let prepared = self.before.apply(position, doc)?;
        self.origin.apply(position, prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lambda::StLambda;
    use crate::runner::Xsline;
    use crate::shift::ShiftExt;
    use crate::train::TrDefault;

    fn mark(uid: &'static str) -> ShiftRef {
        StLambda::named(uid, move |pos, doc| {
            let text = doc.as_str().unwrap_or_default();
            Ok(Document::text(format!("{}{}{}", text, uid, pos)))
        })
        .into_ref()
    }

    #[test]
    fn test_sequence_uid_lists_inner_shifts() {
        let seq = StSequence::new(TrDefault::new().with(mark("a")).with(mark("b")));
        assert_eq!(seq.uid(), "seq(a, b)");
        assert_eq!(seq.uid(), seq.uid());
    }

    #[test]
    fn test_sequence_restarts_positions() {
        let inner = StSequence::new(TrDefault::new().with(mark("x")).with(mark("y")));
        let outer = TrDefault::new().with(mark("a")).with(inner.into_ref()).with(mark("b"));
        let out = Xsline::new(outer).pass(Document::text("")).unwrap();
        assert_eq!(out.as_str(), Some("a0x0y1b2"));
    }

    #[test]
    fn test_before_runs_first_at_same_position() {
        let shift = StBefore::new(
            StLambda::named("main", |pos, doc| {
                let text = doc.as_str().unwrap_or_default();
                Ok(Document::text(format!("{}main{}", text, pos)))
            }),
            StLambda::named("prep", |pos, doc| {
                let text = doc.as_str().unwrap_or_default();
                Ok(Document::text(format!("{}prep{}", text, pos)))
            }),
        );
        assert_eq!(shift.uid(), "main");
        let train = TrDefault::new().with(mark("a")).with(shift.into_ref());
        let report = Xsline::new(train).run(Document::text("")).unwrap();
        assert_eq!(report.output.as_str(), Some("a0prep1main1"));
        assert_eq!(report.uids, vec!["a", "main"]);
    }

    #[test]
    fn test_before_failure_skips_wrapped_shift() {
        let shift = StBefore::new(
            mark_shift("main"),
            StLambda::named("prep", |pos, _| {
                Err(crate::error::ShiftError::transform("prep", pos, "broken"))
            }),
        );
        let err = shift.apply(3, Document::text("")).unwrap_err();
        assert_eq!(err, crate::error::ShiftError::transform("prep", 3, "broken"));
    }

    fn mark_shift(uid: &'static str) -> StLambda {
        StLambda::named(uid, move |_, _| panic!("{} must not run", uid))
    }
}
