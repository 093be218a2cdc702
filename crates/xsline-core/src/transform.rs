//! External transforms and the shifts that adapt them
//!
//! The engine never looks inside a transform. It only asks the transform
//! for the identifier its definition declares, and to run over a document.
//! Locating a transform by name is delegated to a [`ResourceLocator`].

use crate::document::Document;
use crate::error::{ShiftError, ShiftResult};
use crate::lambda::UNIDENTIFIED;
use crate::shift::Shift;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Error type engines report; only its message is kept
pub type TransformFailure = Box<dyn std::error::Error + Send + Sync>;

/// An opaque transform engine bound to one definition
pub trait Transform: Send + Sync {
    /// Identifier declared inside the definition, if any
    fn declared_id(&self) -> Option<String>;

    fn transform(&self, doc: &Document) -> Result<Document, TransformFailure>;
}

impl<T: Transform + ?Sized> Transform for Arc<T> {
    fn declared_id(&self) -> Option<String> {
        (**self).declared_id()
    }

    fn transform(&self, doc: &Document) -> Result<Document, TransformFailure> {
        (**self).transform(doc)
    }
}

/// Finds transform definitions by name
pub trait ResourceLocator: Send + Sync {
    /// `ResourceNotFound` when nothing is registered under `name`
    fn locate(&self, name: &str) -> ShiftResult<Arc<dyn Transform>>;
}

/// Adapts a [`Transform`] into a shift.
///
/// The uid is the id declared by the transform, inspected once on first
/// use. A transform that declares no id still constructs fine; it reports
/// `unidentified` as uid and fails every `apply` with `Configuration`.
pub struct StTransform {
    transform: Arc<dyn Transform>,
    uid: OnceCell<Option<String>>,
}

impl StTransform {
    /// Adapt an engine
    pub fn new(transform: impl Transform + 'static) -> Self {
        Self::from_arc(Arc::new(transform))
    }

    /// Adapt an engine that is already shared
    pub fn from_arc(transform: Arc<dyn Transform>) -> Self {
        Self {
            transform,
            uid: OnceCell::new(),
        }
    }

    fn declared(&self) -> ShiftResult<&str> {
        self.uid
            .get_or_init(|| self.transform.declared_id())
            .as_deref()
            .ok_or_else(|| ShiftError::Configuration("transform declares no id".to_string()))
    }
}

impl Shift for StTransform {
    fn uid(&self) -> String {
        self.declared().unwrap_or(UNIDENTIFIED).to_string()
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        let uid = self.declared()?;
        self.transform
            .transform(&doc)
            .map_err(|e| ShiftError::transform(uid, position, e.to_string()))
    }
}

/// A transform located by name on first use.
///
/// Lookup happens once; both a successful lookup and a failure are
/// cached, so `uid()` stays stable. Until the name resolves the uid is the
/// name itself.
pub struct StResource {
    name: String,
    locator: Arc<dyn ResourceLocator>,
    resolved: OnceCell<ShiftResult<StTransform>>,
}

impl StResource {
    /// A shift running the transform `locator` finds under `name`
    pub fn new(locator: Arc<dyn ResourceLocator>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator,
            resolved: OnceCell::new(),
        }
    }

    /// Name the transform is looked up by
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> &ShiftResult<StTransform> {
        self.resolved.get_or_init(|| {
            tracing::trace!(target: "xsline", resource = %self.name, "locating transform");
            self.locator.locate(&self.name).map(StTransform::from_arc)
        })
    }
}

impl Shift for StResource {
    fn uid(&self) -> String {
        match self.resolve() {
            Ok(shift) if shift.declared().is_ok() => shift.uid(),
            _ => self.name.clone(),
        }
    }

    fn apply(&self, position: usize, doc: Document) -> ShiftResult<Document> {
        match self.resolve() {
            Ok(shift) => shift.apply(position, doc),
            Err(err) => Err(err.clone()),
        }
    }
}
