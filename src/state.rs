//! Local list state
//!
//! One ordered sibling list, shared between a controller and the write jobs
//! it issues. Every mutation bumps a generation counter so a failed write
//! can tell whether its snapshot is still the latest state.

use estateflow_store::Ordered;
use std::sync::{Arc, PoisonError, RwLock};

use crate::reorder::{renumber, sort_by_order};

#[derive(Debug)]
struct Inner<T> {
    items: Vec<T>,
    generation: u64,
}

/// Record of one local mutation
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    /// Items before the mutation
    pub snapshot: Vec<T>,
    /// Generation right after the mutation
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    inner: Arc<RwLock<Inner<T>>>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner { items: Vec::new(), generation: 0 })),
        }
    }
}

impl<T: Ordered> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).items.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).generation
    }

    /// Replace the whole list with fresh store data
    pub fn replace(&self, mut items: Vec<T>) {
        sort_by_order(&mut items);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.items = items;
        inner.generation += 1;
    }

    /// Mutate in place, returning the pre-mutation snapshot
    pub fn mutate(&self, f: impl FnOnce(&mut Vec<T>)) -> Mutation<T> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = inner.items.clone();
        f(&mut inner.items);
        inner.generation += 1;
        Mutation { snapshot, generation: inner.generation }
    }

    /// Append at the back
    pub fn push(&self, item: T) {
        self.mutate(|items| items.push(item));
    }

    /// Swap in the stored version of an item, if it is still listed
    pub fn update_item(&self, updated: T) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.items.iter_mut().find(|item| item.id() == updated.id()) {
            Some(item) => {
                *item = updated;
                true
            }
            None => false,
        }
    }

    /// Remove an item and close the gap
    pub fn remove(&self, id: &str) -> Mutation<T> {
        self.mutate(|items| {
            items.retain(|item| item.id() != id);
            renumber(items);
        })
    }

    /// Put `mutation.snapshot` back unless something changed the list since
    pub fn restore_if_current(&self, mutation: &Mutation<T>) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.generation != mutation.generation {
            return false;
        }
        inner.items = mutation.snapshot.clone();
        inner.generation += 1;
        true
    }
}
