use std::hash::Hash;

use rustc_hash::FxHashSet;

/// A symbolic set delta: the elements added and the elements removed by
/// this transaction, kept disjoint at all times.
///
/// Removing an element that was added in the same transaction cancels the
/// addition instead of recording a removal, and adding an element that was
/// removed only un-removes it. The external world therefore never sees a
/// create-delete (or delete-recreate) pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiffSet<T: Eq + Hash> {
    added: FxHashSet<T>,
    removed: FxHashSet<T>,
}

impl<T: Eq + Hash> Default for DiffSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> DiffSet<T> {
    /// Empty sets do not allocate; construction is free.
    pub fn new() -> Self {
        Self {
            added: FxHashSet::default(),
            removed: FxHashSet::default(),
        }
    }

    /// Records `elem` as added. If the same transaction previously removed
    /// it, the removal is cancelled and the element does not enter the
    /// added set. Returns true if the element landed in `added`.
    pub fn add(&mut self, elem: T) -> bool {
        if self.removed.remove(&elem) {
            return false;
        }
        self.added.insert(elem);
        true
    }

    /// Records `elem` as removed. A pending addition is cancelled instead.
    /// Returns true if the call changed externally visible state, which is
    /// exactly when the caller must note the removal elsewhere (the shadow
    /// deletion sets rely on this).
    pub fn remove(&mut self, elem: T) -> bool {
        if self.added.remove(&elem) {
            return true;
        }
        self.removed.insert(elem)
    }

    /// Cancels a pending removal. Returns true if `elem` was removed.
    pub fn un_remove(&mut self, elem: &T) -> bool {
        self.removed.remove(elem)
    }

    /// Drops `elem` from both sides, erasing any trace of it.
    pub fn discard(&mut self, elem: &T) {
        self.added.remove(elem);
        self.removed.remove(elem);
    }

    pub fn add_all(&mut self, elems: impl IntoIterator<Item = T>) {
        for elem in elems {
            self.add(elem);
        }
    }

    pub fn remove_all(&mut self, elems: impl IntoIterator<Item = T>) {
        for elem in elems {
            self.remove(elem);
        }
    }

    pub fn is_added(&self, elem: &T) -> bool {
        self.added.contains(elem)
    }

    pub fn is_removed(&self, elem: &T) -> bool {
        self.removed.contains(elem)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &FxHashSet<T> {
        &self.added
    }

    pub fn removed(&self) -> &FxHashSet<T> {
        &self.removed
    }

    /// Emits every added element, then every removed element, stopping at
    /// the first error.
    pub fn accept<E>(
        &self,
        mut visit: impl FnMut(DiffEntry<'_, T>) -> Result<(), E>,
    ) -> Result<(), E> {
        for elem in &self.added {
            visit(DiffEntry::Added(elem))?;
        }
        for elem in &self.removed {
            visit(DiffEntry::Removed(elem))?;
        }
        Ok(())
    }

    /// Both sides filtered by `pred`.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> DiffSet<T>
    where
        T: Clone,
    {
        DiffSet {
            added: self.added.iter().filter(|e| pred(e)).cloned().collect(),
            removed: self.removed.iter().filter(|e| pred(e)).cloned().collect(),
        }
    }

    /// Lazily merges a committed sequence with this delta: committed
    /// elements not removed here, in their original order, followed by the
    /// added elements.
    pub fn augment<'a, I>(&'a self, committed: I) -> impl Iterator<Item = T> + 'a
    where
        I: Iterator<Item = T> + 'a,
        T: Clone,
    {
        committed
            .filter(move |elem| !self.removed.contains(elem))
            .chain(self.added.iter().cloned())
    }
}

/// One element of a delta as seen by [`DiffSet::accept`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiffEntry<'a, T> {
    Added(&'a T),
    Removed(&'a T),
}

/// Borrowed view of a delta that may not exist yet. Read APIs hand this
/// out instead of allocating an empty [`DiffSet`] per call.
#[derive(Debug)]
pub enum DiffView<'a, T: Eq + Hash> {
    Empty,
    Changes(&'a DiffSet<T>),
}

impl<T: Eq + Hash> Clone for DiffView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Eq + Hash> Copy for DiffView<'_, T> {}

impl<'a, T: Eq + Hash> DiffView<'a, T> {
    pub fn from_option(diff: Option<&'a DiffSet<T>>) -> Self {
        match diff {
            Some(d) if !d.is_empty() => DiffView::Changes(d),
            _ => DiffView::Empty,
        }
    }

    fn get(self) -> Option<&'a DiffSet<T>> {
        match self {
            DiffView::Empty => None,
            DiffView::Changes(d) => Some(d),
        }
    }

    pub fn is_empty(self) -> bool {
        self.get().is_none_or(|d| d.is_empty())
    }

    pub fn is_added(self, elem: &T) -> bool {
        self.get().is_some_and(|d| d.is_added(elem))
    }

    pub fn is_removed(self, elem: &T) -> bool {
        self.get().is_some_and(|d| d.is_removed(elem))
    }

    pub fn added(self) -> impl Iterator<Item = &'a T> {
        self.get().map(|d| d.added().iter()).into_iter().flatten()
    }

    pub fn removed(self) -> impl Iterator<Item = &'a T> {
        self.get().map(|d| d.removed().iter()).into_iter().flatten()
    }

    /// Owned copy of the underlying delta; empty when there is none.
    pub fn to_diff_set(self) -> DiffSet<T>
    where
        T: Clone,
    {
        self.get().cloned().unwrap_or_default()
    }

    /// See [`DiffSet::augment`]. An empty view passes the committed
    /// sequence through untouched.
    pub fn augment<I>(self, committed: I) -> impl Iterator<Item = T> + 'a
    where
        I: Iterator<Item = T> + 'a,
        T: Clone,
    {
        let diff = self.get();
        committed
            .filter(move |elem| diff.is_none_or(|d| !d.is_removed(elem)))
            .chain(
                diff.map(|d| d.added().iter())
                    .into_iter()
                    .flatten()
                    .cloned(),
            )
    }
}
