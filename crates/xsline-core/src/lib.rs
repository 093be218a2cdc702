//! Xsline Core: shifts, trains and the runner
//!
//! A pipeline is a [`Train`] of [`Shift`]s. [`Xsline`] passes a
//! [`Document`] through the train in order, handing every shift its
//! position and the output of the shift before it.
//!
//! ```text
//! Document → shift 0 → shift 1 → ... → shift N-1 → Document
//! ```
//!
//! # Example
//!
//! ```
//! use xsline_core::{Document, ShiftExt, StLambda, StRepeated, TrDefault, Train, Xsline};
//!
//! let train = TrDefault::new()
//!     .with(StLambda::named("trim", |_, doc| {
//!         Ok(Document::text(doc.as_str().unwrap_or_default().trim()))
//!     }).into_ref())
//!     .with(StRepeated::new(
//!         StLambda::named("brackets", |_, doc| {
//!             Ok(Document::text(format!("[{}]", doc.as_str().unwrap_or_default())))
//!         }),
//!         |doc| doc.as_str().map(|s| s.starts_with("[[")).unwrap_or(false),
//!     ).into_ref());
//!
//! let out = Xsline::new(train).pass(Document::text("  hi ")).unwrap();
//! assert_eq!(out.as_str(), Some("[[hi]]"));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod lambda;
pub mod logged;
pub mod positional;
pub mod repeat;
pub mod runner;
pub mod sequence;
pub mod shift;
pub mod train;
pub mod transform;

pub use config::XslineConfig;
pub use document::Document;
pub use error::{ShiftError, ShiftResult};
pub use lambda::StLambda;
pub use logged::{StLogged, TrLogged};
pub use positional::{Placement, TrAfter, TrBefore, TrPinned};
pub use repeat::{StBounded, StEndless, StRepeated};
pub use runner::{DiagnosticsSink, PassReport, TracingSink, Xsline};
pub use sequence::{StBefore, StSequence};
pub use shift::{Shift, ShiftExt, ShiftRef, StEnvelope};
pub use train::{TrDefault, TrJoined, TrMapped, Train, TrainRef};
pub use transform::{ResourceLocator, StResource, StTransform, Transform, TransformFailure};

/// Engine version
pub const XSLINE_VERSION: &str = env!("CARGO_PKG_VERSION");
