//! Reorderable list engine
//!
//! Pure planning: given one scope's siblings (sorted by order) and a move,
//! produce the renumbered list or say why nothing changes. Persistence is
//! the caller's job and must be skipped for `Plan::Unchanged`.

use estateflow_store::Ordered;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Drag and drop: remove at `from`, insert at `to`.
    /// Indices address the reorderable subset as displayed.
    ByPosition { from: usize, to: usize },
    /// Arrow buttons: swap with the neighbour
    Adjacent { id: String, direction: Direction },
}

/// Why a move produced no change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    SamePosition,
    Boundary,
    NotFound,
    FrozenTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Plan<T> {
    Reordered(Vec<T>),
    Unchanged(Unchanged),
}

/// Splits a scope into the reorderable subset and the trailing rest
pub struct ScopeFilter<T> {
    /// Elements taking part in the reorder
    pub include: fn(&T) -> bool,
    /// Elements that may not be dropped onto
    pub frozen_target: fn(&T) -> bool,
}

impl<T> Clone for ScopeFilter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ScopeFilter<T> {}

impl<T> std::fmt::Debug for ScopeFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeFilter").finish_non_exhaustive()
    }
}

impl<T> ScopeFilter<T> {
    /// Every element reorderable, none frozen
    pub fn all() -> Self {
        Self { include: |_| true, frozen_target: |_| false }
    }

    pub fn new(include: fn(&T) -> bool, frozen_target: fn(&T) -> bool) -> Self {
        Self { include, frozen_target }
    }

    pub fn includes(&self, item: &T) -> bool {
        (self.include)(item)
    }
}

impl<T> Default for ScopeFilter<T> {
    fn default() -> Self {
        Self::all()
    }
}

/// Plan `mv` over `items`, which must be sorted by order.
///
/// Excluded elements are appended after the reordered subset in their
/// current relative order, then the merged list is renumbered.
pub fn plan<T: Ordered>(items: &[T], mv: &Move, filter: &ScopeFilter<T>) -> Plan<T> {
    let (mut subset, rest): (Vec<T>, Vec<T>) = items.iter().cloned().partition(|item| filter.includes(item));

    match mv {
        Move::ByPosition { from, to } => {
            let (from, to) = (*from, *to);
            if from >= subset.len() || to >= subset.len() {
                return Plan::Unchanged(Unchanged::NotFound);
            }
            if from == to {
                return Plan::Unchanged(Unchanged::SamePosition);
            }
            if (filter.frozen_target)(&subset[to]) {
                return Plan::Unchanged(Unchanged::FrozenTarget);
            }
            let moved = subset.remove(from);
            subset.insert(to, moved);
        }
        Move::Adjacent { id, direction } => {
            let Some(index) = subset.iter().position(|item| item.id() == id) else {
                return Plan::Unchanged(Unchanged::NotFound);
            };
            let neighbour = match direction {
                Direction::Up if index == 0 => return Plan::Unchanged(Unchanged::Boundary),
                Direction::Up => index - 1,
                Direction::Down if index + 1 == subset.len() => return Plan::Unchanged(Unchanged::Boundary),
                Direction::Down => index + 1,
            };
            subset.swap(index, neighbour);
        }
    }

    subset.extend(rest);
    renumber(&mut subset);
    Plan::Reordered(subset)
}

/// Stable sort by order
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

/// Set every order to its index
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as i32);
    }
}

pub fn ordered_ids<T: Ordered>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

/// `planned` followed by the siblings in `current` it does not name.
///
/// A reorder is planned before earlier queued writes for the scope have
/// run; entries those writes added land at the back, where the store put
/// them.
pub fn settle_order<T: Ordered>(planned: &[String], current: &[T]) -> Vec<String> {
    let mut ids = planned.to_vec();
    ids.extend(
        current
            .iter()
            .filter(|item| !planned.iter().any(|id| id == item.id()))
            .map(|item| item.id().to_string()),
    );
    ids
}

/// Orders are exactly `0..n`
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    let mut orders: Vec<i32> = items.iter().map(|item| item.order()).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(index, order)| *order == index as i32)
}
