//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShiftError {
    /// The transform definition a shift needs could not be located
    #[error("RESOURCE/{name}: not found")]
    ResourceNotFound { name: String },

    /// The transform rejected the document or failed internally
    #[error("TRANSFORM/{uid}@{position}: {message}")]
    Transform {
        uid: String,
        position: usize,
        message: String,
    },

    /// A shift could not finish its lazy setup (uid derivation, definition parsing)
    #[error("CONFIG/{0}")]
    Configuration(String),

    /// An inner shift failed on the given iteration (1-based) of a repetition
    #[error("REPEAT/{iteration}: {source}")]
    Repeated {
        iteration: usize,
        #[source]
        source: Box<ShiftError>,
    },
}

impl ShiftError {
    /// A transform failure of shift `uid` at `position`
    pub fn transform(uid: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::Transform {
            uid: uid.into(),
            position,
            message: message.into(),
        }
    }

    /// A lookup that found nothing under `name`
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    pub(crate) fn at_iteration(self, iteration: usize) -> Self {
        Self::Repeated {
            iteration,
            source: Box::new(self),
        }
    }

    /// The originating error, with repetition annotations peeled off
    pub fn root(&self) -> &ShiftError {
        match self {
            Self::Repeated { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type ShiftResult<T> = Result<T, ShiftError>;
