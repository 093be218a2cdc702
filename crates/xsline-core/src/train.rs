//! Trains: immutable ordered collections of shifts
//!
//! Every call that looks like a mutation (`with`, `empty`) returns a new
//! train and leaves the receiver untouched. Iterating the same train twice
//! yields the same items in the same order.

use std::sync::Arc;

/// Shared handle to any train
pub type TrainRef<T> = Arc<dyn Train<T>>;

/// An immutable ordered sequence of items, shifts in practice
pub trait Train<T>: Send + Sync {
    /// A new train with `item` appended
    fn with(&self, item: T) -> TrainRef<T>;

    /// A train of the same shape holding no items
    fn empty(&self) -> TrainRef<T>;

    /// Items in execution order
    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_>;

    fn items(&self) -> Vec<T> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.iter().count()
    }

    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<T, R: Train<T> + ?Sized> Train<T> for Arc<R> {
    fn with(&self, item: T) -> TrainRef<T> {
        (**self).with(item)
    }

    fn empty(&self) -> TrainRef<T> {
        (**self).empty()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        (**self).iter()
    }
}

/// Flat, append-only train
#[derive(Debug, Clone)]
pub struct TrDefault<T> {
    items: Vec<T>,
}

impl<T> TrDefault<T> {
    /// An empty train
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// A train holding `items` in the given order
    pub fn of(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Default for TrDefault<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Train<T> for TrDefault<T> {
    fn with(&self, item: T) -> TrainRef<T> {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        Arc::new(TrDefault { items })
    }

    fn empty(&self) -> TrainRef<T> {
        Arc::new(TrDefault::new())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.items.iter().cloned())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Chain of trains, appended to at its tail.
///
/// `with` goes to the last child (a joined train with no children grows a
/// single flat child). `empty` empties every child but keeps how many
/// there are and what kind they are. Children are only walked when the
/// joined train is iterated.
#[derive(Clone)]
pub struct TrJoined<T> {
    chain: Vec<TrainRef<T>>,
}

impl<T> TrJoined<T> {
    /// Join `chain` in order
    pub fn new(chain: Vec<TrainRef<T>>) -> Self {
        Self { chain }
    }

    /// The joined trains, in order
    pub fn children(&self) -> &[TrainRef<T>] {
        &self.chain
    }
}

impl<T: Clone + Send + Sync + 'static> TrJoined<T> {
    /// Same as [`Train::with`], keeping the concrete type
    pub fn appended(&self, item: T) -> Self {
        let mut chain = self.chain.clone();
        match chain.pop() {
            Some(last) => chain.push(last.with(item)),
            None => chain.push(TrDefault::new().with(item)),
        }
        Self { chain }
    }

    /// Same as [`Train::empty`], keeping the concrete type
    pub fn cleared(&self) -> Self {
        Self {
            chain: self.chain.iter().map(|train| train.empty()).collect(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Train<T> for TrJoined<T> {
    fn with(&self, item: T) -> TrainRef<T> {
        Arc::new(self.appended(item))
    }

    fn empty(&self) -> TrainRef<T> {
        Arc::new(self.cleared())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.chain.iter().flat_map(|train| train.iter()))
    }
}

type MapFn<T> = dyn Fn(T) -> T + Send + Sync;

/// Passes every item of the inner train through `map` while iterating.
///
/// `map` runs again on every iteration; items are equal between
/// iterations only as far as `map` is deterministic.
pub struct TrMapped<T> {
    origin: TrainRef<T>,
    map: Arc<MapFn<T>>,
}

impl<T> TrMapped<T> {
    /// Wrap `origin`, passing every item through `map`
    pub fn new<F>(origin: impl Train<T> + 'static, map: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            origin: Arc::new(origin),
            map: Arc::new(map),
        }
    }

    fn rebuild(&self, origin: TrainRef<T>) -> Self {
        Self {
            origin,
            map: self.map.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Train<T> for TrMapped<T> {
    fn with(&self, item: T) -> TrainRef<T> {
        Arc::new(self.rebuild(self.origin.with(item)))
    }

    fn empty(&self) -> TrainRef<T> {
        Arc::new(self.rebuild(self.origin.empty()))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        let map = &self.map;
        Box::new(self.origin.iter().map(move |item| map(item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(train: &dyn Train<&'static str>) -> String {
        train.iter().collect::<Vec<_>>().join("")
    }

    #[test]
    fn test_default_keeps_insertion_order() {
        let train = TrDefault::new().with("a").with("b").with("c");
        assert_eq!(letters(&*train), "abc");
        assert_eq!(letters(&*train), "abc");
        assert_eq!(train.len(), 3);
    }

    #[test]
    fn test_default_with_leaves_original_untouched() {
        let base = TrDefault::new().with("a");
        let longer = base.with("b");
        assert_eq!(letters(&*base), "a");
        assert_eq!(letters(&*longer), "ab");
    }

    #[test]
    fn test_default_allows_duplicates() {
        let train = TrDefault::of(vec!["a"]).with("a").with("a");
        assert_eq!(letters(&*train), "aaa");
    }

    #[test]
    fn test_default_empty() {
        let train = TrDefault::of(vec!["a", "b"]).empty();
        assert!(train.is_empty());
        assert_eq!(letters(&*train.with("z")), "z");
    }

    #[test]
    fn test_joined_routes_to_last_child() {
        let first: TrainRef<&str> = TrDefault::new().with("a");
        let second: TrainRef<&str> = TrDefault::new().with("b");
        let joined = TrJoined::new(vec![first.clone(), second.clone()]);

        let extended = joined.appended("x");
        assert_eq!(extended.children().len(), 2);
        assert_eq!(letters(&*extended.children()[0]), "a");
        assert_eq!(letters(&*extended.children()[1]), "bx");
        assert_eq!(letters(&extended), "abx");
        assert_eq!(letters(&joined), "ab");
        assert_eq!(letters(&*first), "a");
        assert_eq!(letters(&*second), "b");
    }

    #[test]
    fn test_joined_without_children_grows_one() {
        let joined: TrJoined<&str> = TrJoined::new(Vec::new());
        assert!(joined.is_empty());
        let extended = joined.appended("x");
        assert_eq!(extended.children().len(), 1);
        assert_eq!(letters(&*extended.children()[0]), "x");
    }

    #[test]
    fn test_joined_empty_preserves_shape() {
        let joined = TrJoined::new(vec![
            TrDefault::new().with("a").with("b"),
            TrDefault::new().with("c"),
        ]);
        let reset = joined.cleared();
        assert_eq!(reset.children().len(), 2);
        assert!(reset.children().iter().all(|child| child.is_empty()));
        assert!(joined.empty().is_empty());
        assert_eq!(letters(&*reset.children()[1].with("x")), "x");
        assert_eq!(letters(&reset.appended("x")), "x");
        assert_eq!(letters(&joined), "abc");
    }

    #[test]
    fn test_joined_nests() {
        let inner: TrainRef<&str> = Arc::new(TrJoined::new(vec![
            TrDefault::new().with("a"),
            TrDefault::new().with("b"),
        ]));
        let outer = TrJoined::new(vec![TrDefault::new().with("0"), inner]);
        let extended = outer.with("c");
        assert_eq!(letters(&*extended), "0abc");
    }

    #[test]
    fn test_mapped_applies_at_iteration() {
        let train = TrMapped::new(TrDefault::new(), |s: String| s.to_uppercase())
            .with("a".to_string())
            .with("b".to_string());
        assert_eq!(train.items(), vec!["A".to_string(), "B".to_string()]);
        assert!(train.empty().is_empty());
    }
}
