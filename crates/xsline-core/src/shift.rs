//! Shift: the contract every pipeline step satisfies
use crate::document::Document;
use crate::error::ShiftResult;
use std::sync::Arc;

/// One named transformation step of a pipeline.
///
/// A shift is immutable once built. The runner hands it the zero-based
/// position it occupies in the current pass together with the document
/// produced by the previous shift; it returns a new document.
pub trait Shift: Send + Sync {
    /// Stable diagnostic identifier of this shift instance.
    ///
    /// Must be cheap and must not fail. Shifts whose id comes from an
    /// external definition report a fallback id here and raise the
    /// underlying problem from [`Shift::apply`].
    fn uid(&self) -> String;

    /// Transform `doc`, knowing this shift runs at `position`
    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document>;
}

/// Shared handle to any shift, the element type trains carry
pub type ShiftRef = Arc<dyn Shift>;

impl<S: Shift + ?Sized> Shift for Arc<S> {
    fn uid(&self) -> String {
        (**self).uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        (**self).apply(position, doc)
    }
}

impl<S: Shift + ?Sized> Shift for Box<S> {
    fn uid(&self) -> String {
        (**self).uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        (**self).apply(position, doc)
    }
}

/// Conversions available on every concrete shift
pub trait ShiftExt: Shift + Sized + 'static {
    /// Box into the shared handle trains carry
    fn into_ref(self) -> ShiftRef {
        Arc::new(self)
    }
}

impl<S: Shift + 'static> ShiftExt for S {}

/// Forwards both operations to the shift it owns.
///
/// Concrete decorators hold an envelope around the shift they build and
/// override nothing, or implement [`Shift`] themselves where they change
/// behaviour.
#[derive(Clone)]
pub struct StEnvelope {
    origin: ShiftRef,
}

impl StEnvelope {
    /// Envelope owning `shift`
    pub fn new(shift: impl Shift + 'static) -> Self {
        Self {
            origin: Arc::new(shift),
        }
    }

    /// Envelope around a shift that is already shared
    pub fn from_ref(origin: ShiftRef) -> Self {
        Self { origin }
    }

    /// The shift being forwarded to
    pub fn origin(&self) -> &ShiftRef {
        &self.origin
    }
}

impl Shift for StEnvelope {
    fn uid(&self) -> String {
        self.origin.uid()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        self.origin.apply(position, doc)
    }
}

impl std::fmt::Debug for StEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StEnvelope")
            .field("uid", &self.origin.uid())
            .finish()
    }
}
