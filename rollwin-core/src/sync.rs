use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::accumulator::Accumulator;
use crate::ring::RingAccumulator;
use crate::weight::{Reduction, Weight};

/// A [`RingAccumulator`] behind a reader/writer lock.
///
/// Inserts take the lock exclusively, queries share it. Every method takes
/// `&self`, so one instance can be shared through an `Arc` by any number of
/// producers and readers. Consecutive calls are not atomic with respect to
/// each other: an insert may land between `count()` and `sum()`.
#[derive(Debug)]
pub struct SynchronizedAccumulator {
    // Immutable after construction, read without locking.
    capacity: usize,
    ring: RwLock<RingAccumulator>,
}

impl SynchronizedAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self::from_ring(RingAccumulator::new(capacity))
    }

    pub fn from_ring(ring: RingAccumulator) -> Self {
        Self {
            capacity: ring.capacity(),
            ring: RwLock::new(ring),
        }
    }

    pub fn insert(&self, value: f64) {
        self.write().insert(value);
    }

    pub fn count(&self) -> usize {
        self.read().count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn reduce(&self, weight: Weight<'_>) -> Reduction {
        self.read().reduce(weight)
    }

    pub fn sum(&self) -> f64 {
        self.read().sum()
    }

    pub fn mean(&self) -> f64 {
        self.read().mean()
    }

    /// The emptiness check and the reduction observe the same snapshot.
    pub fn weighted_mean(&self, weight: Weight<'_>) -> f64 {
        self.read().weighted_mean(weight)
    }

    /// Copy of the present samples, oldest first.
    pub fn samples(&self) -> Vec<f64> {
        self.read().iter().collect()
    }

    /// Copy of the whole ring, so several statistics can be taken from one
    /// consistent state.
    pub fn snapshot(&self) -> RingAccumulator {
        self.read().clone()
    }

    pub fn into_inner(self) -> RingAccumulator {
        self.ring.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // The ring is consistent between any two statements of `insert`, so a
    // poisoned lock still guards valid state.
    fn read(&self) -> RwLockReadGuard<'_, RingAccumulator> {
        self.ring.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RingAccumulator> {
        self.ring.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Accumulator for SynchronizedAccumulator {
    fn insert(&mut self, value: f64) {
        SynchronizedAccumulator::insert(self, value)
    }

    fn count(&self) -> usize {
        SynchronizedAccumulator::count(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn reduce(&self, weight: Weight<'_>) -> Reduction {
        SynchronizedAccumulator::reduce(self, weight)
    }

    fn weighted_mean(&self, weight: Weight<'_>) -> f64 {
        SynchronizedAccumulator::weighted_mean(self, weight)
    }
}

/// Shared handles insert through `&self`, the same way `&File` implements `Write`.
impl Accumulator for &SynchronizedAccumulator {
    fn insert(&mut self, value: f64) {
        SynchronizedAccumulator::insert(self, value)
    }

    fn count(&self) -> usize {
        SynchronizedAccumulator::count(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn reduce(&self, weight: Weight<'_>) -> Reduction {
        SynchronizedAccumulator::reduce(self, weight)
    }

    fn weighted_mean(&self, weight: Weight<'_>) -> f64 {
        SynchronizedAccumulator::weighted_mean(self, weight)
    }
}

impl Extend<f64> for SynchronizedAccumulator {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        self.ring
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(iter);
    }
}

impl From<RingAccumulator> for SynchronizedAccumulator {
    fn from(ring: RingAccumulator) -> Self {
        Self::from_ring(ring)
    }
}
