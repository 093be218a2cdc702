//! StLambda: a shift built from closures
use crate::document::Document;
use crate::error::{ShiftError, ShiftResult};
use crate::shift::Shift;
use once_cell::sync::OnceCell;

/// Uid reported when lazy derivation failed
pub const UNIDENTIFIED: &str = "unidentified";

type ApplyFn = dyn Fn(usize, Document) -> ShiftResult<Document> + Send + Sync;
type DeriveFn = dyn Fn() -> ShiftResult<String> + Send + Sync;

enum Uid {
    Fixed(String),
    Derived {
        derive: Box<DeriveFn>,
        cell: OnceCell<Result<String, ShiftError>>,
    },
}

/// A shift made of an apply closure and a uid.
///
/// Without an explicit uid, a synthetic `λ-<uuid>` is assigned at
/// construction. A derived uid is computed once, on the first call to
/// `uid()` or `apply()`, and cached for the life of the shift.
pub struct StLambda {
    uid: Uid,
    func: Box<ApplyFn>,
}

impl StLambda {
    /// Closure shift with a synthetic `λ-<uuid>` uid
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(usize, Document) -> ShiftResult<Document> + Send + Sync + 'static,
    {
        Self::named(format!("λ-{}", uuid::Uuid::new_v4()), func)
    }

    /// Closure shift with a fixed uid
    pub fn named<F>(uid: impl Into<String>, func: F) -> Self
    where
        F: Fn(usize, Document) -> ShiftResult<Document> + Send + Sync + 'static,
    {
        Self {
            uid: Uid::Fixed(uid.into()),
            func: Box::new(func),
        }
    }

    /// Closure that does not care about its position
    pub fn simple<F>(func: F) -> Self
    where
        F: Fn(Document) -> ShiftResult<Document> + Send + Sync + 'static,
    {
        Self::new(move |_, doc| func(doc))
    }

    /// Closure shift whose uid is computed by `derive` on first use
    pub fn derived<D, F>(derive: D, func: F) -> Self
    where
        D: Fn() -> ShiftResult<String> + Send + Sync + 'static,
        F: Fn(usize, Document) -> ShiftResult<Document> + Send + Sync + 'static,
    {
        Self {
            uid: Uid::Derived {
                derive: Box::new(derive),
                cell: OnceCell::new(),
            },
            func: Box::new(func),
        }
    }

    fn resolved(&self) -> Result<&str, &ShiftError> {
        match &self.uid {
            Uid::Fixed(uid) => Ok(uid.as_str()),
            Uid::Derived { derive, cell } => {
                let derived = cell.get_or_init(|| match derive() {
                    Ok(uid) => Ok(uid),
                    Err(ShiftError::Configuration(msg)) => Err(ShiftError::Configuration(msg)),
                    Err(other) => Err(ShiftError::Configuration(format!(
                        "cannot derive uid: {}",
                        other
                    ))),
                });
                derived.as_deref()
            }
        }
    }
}

impl Shift for StLambda {
    fn uid(&self) -> String {
        match self.resolved() {
            Ok(uid) => uid.to_string(),
            Err(_) => UNIDENTIFIED.to_string(),
        }
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        if let Err(err) = self.resolved() {
            return Err(err.clone());
        }
        (self.func)(position, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_synthetic_uid() {
        let lambda = StLambda::simple(Ok);
        let uid = lambda.uid();
        assert!(uid.starts_with("λ-"));
        assert_eq!(uid, lambda.uid());
        assert_ne!(uid, StLambda::simple(Ok).uid());
    }

    #[test]
    fn test_uid_from_ctor() {
        let uuid = uuid::Uuid::new_v4().to_string();
        let lambda = StLambda::named(uuid.clone(), |_, doc| Ok(doc));
        assert_eq!(lambda.uid(), uuid);
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let lambda = StLambda::named("boom", |pos, _| {
            Err(ShiftError::transform("boom", pos, "closed stream"))
        });
        let err = lambda.apply(3, Document::text("x")).unwrap_err();
        assert_eq!(err, ShiftError::transform("boom", 3, "closed stream"));
    }

    #[test]
    fn test_derived_uid_is_computed_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let lambda = StLambda::derived(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("derived".to_string())
            },
            |_, doc| Ok(doc),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(lambda.uid(), "derived");
        lambda.apply(0, Document::text("a")).unwrap();
        assert_eq!(lambda.uid(), "derived");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_derivation_surfaces_on_apply() {
        let lambda = StLambda::derived(
            || Err(ShiftError::not_found("id attribute")),
            |_, doc| Ok(doc),
        );
        assert_eq!(lambda.uid(), UNIDENTIFIED);
        let err = lambda.apply(0, Document::text("a")).unwrap_err();
        assert!(matches!(err, ShiftError::Configuration(_)));
    }
}
