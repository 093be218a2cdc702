//! Trains that place a fixed item relative to the others
//!
//! Placement is decided while iterating, never while appending, so the
//! fixed item keeps its place however many `with` calls come later. Each of
//! these trains wraps an inner train; `with` and `empty` go to the inner
//! train and the fixed item survives both. Nested inside a [`TrJoined`],
//! they behave like any other child.
//!
//! [`TrJoined`]: crate::train::TrJoined

use crate::train::{TrDefault, Train, TrainRef};
use std::iter;
use std::sync::Arc;

/// Yields `after` right behind every item of the inner train
pub struct TrAfter<T> {
    origin: TrainRef<T>,
    after: T,
}

impl<T: Clone + Send + Sync + 'static> TrAfter<T> {
    /// An empty inner train followed by `after` per item
    pub fn new(after: T) -> Self {
        Self::around(TrDefault::new(), after)
    }

    /// Wrap `origin`, yielding `after` behind each of its items
    pub fn around(origin: impl Train<T> + 'static, after: T) -> Self {
        Self {
            origin: Arc::new(origin),
            after,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Train<T> for TrAfter<T> {
    fn with(&self, item: T) -> TrainRef<T> {
        Arc::new(Self {
            origin: self.origin.with(item),
            after: self.after.clone(),
        })
    }

    fn empty(&self) -> TrainRef<T> {
        Arc::new(Self {
            origin: self.origin.empty(),
            after: self.after.clone(),
        })
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(
            self.origin
                .iter()
                .flat_map(move |item| [item, self.after.clone()]),
        )
    }
}

/// Yields `before` right ahead of every item of the inner train
pub struct TrBefore<T> {
    origin: TrainRef<T>,
    before: T,
}

impl<T: Clone + Send + Sync + 'static> TrBefore<T> {
    /// An empty inner train preceded by `before` per item
    pub fn new(before: T) -> Self {
        Self::around(TrDefault::new(), before)
    }

    /// Wrap `origin`, yielding `before` ahead of each of its items
    pub fn around(origin: impl Train<T> + 'static, before: T) -> Self {
        Self {
            origin: Arc::new(origin),
            before,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Train<T> for TrBefore<T> {
    fn with(&self, item: T) -> TrainRef<T> {
        Arc::new(Self {
            origin: self.origin.with(item),
            before: self.before.clone(),
        })
    }

    fn empty(&self) -> TrainRef<T> {
        Arc::new(Self {
            origin: self.origin.empty(),
            before: self.before.clone(),
        })
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(
            self.origin
                .iter()
                .flat_map(move |item| [self.before.clone(), item]),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
}

/// Yields `pinned` once, ahead of or behind all other items.
///
/// Unlike [`TrAfter`] and [`TrBefore`], an empty inner train still yields
/// the pinned item.
pub struct TrPinned<T> {
    origin: TrainRef<T>,
    pinned: T,
    placement: Placement,
}

impl<T: Clone + Send + Sync + 'static> TrPinned<T> {
    /// Pin `pinned` ahead of an empty inner train
    pub fn first(pinned: T) -> Self {
        Self::around(TrDefault::new(), pinned, Placement::First)
    }

    /// Pin `pinned` behind an empty inner train
    pub fn last(pinned: T) -> Self {
        Self::around(TrDefault::new(), pinned, Placement::Last)
    }

    /// Wrap `origin` with `pinned` at `placement`
    pub fn around(origin: impl Train<T> + 'static, pinned: T, placement: Placement) -> Self {
        Self {
            origin: Arc::new(origin),
            pinned,
            placement,
        }
    }

    fn rebuild(&self, origin: TrainRef<T>) -> Self {
        Self {
            origin,
            pinned: self.pinned.clone(),
            placement: self.placement,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Train<T> for TrPinned<T> {
    fn with(&self, item: T) -> TrainRef<T> {
        Arc::new(self.rebuild(self.origin.with(item)))
    }

    fn empty(&self) -> TrainRef<T> {
        Arc::new(self.rebuild(self.origin.empty()))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        let pinned = iter::once(self.pinned.clone());
        match self.placement {
            Placement::First => Box::new(pinned.chain(self.origin.iter())),
            Placement::Last => Box::new(self.origin.iter().chain(pinned)),
        }
    }
}
