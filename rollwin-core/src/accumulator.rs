use crate::ring::RingAccumulator;
use crate::weight::{Reduction, Weight};

/// Rolling statistics over the most recent `capacity()` samples.
///
/// Implemented by the bare [`RingAccumulator`] and by the lock-guarded
/// [`SynchronizedAccumulator`](crate::SynchronizedAccumulator), so callers can
/// pick either at construction time without touching call sites.
pub trait Accumulator {
    fn insert(&mut self, value: f64);

    fn insert_int(&mut self, value: i64) {
        self.insert(value as f64)
    }

    fn count(&self) -> usize;

    fn capacity(&self) -> usize;

    /// Weighted sum and weight total over the present samples, oldest first.
    fn reduce(&self, weight: Weight<'_>) -> Reduction;

    fn sum(&self) -> f64 {
        self.reduce(Weight::Equal).sum
    }

    fn mean(&self) -> f64 {
        self.weighted_mean(Weight::Equal)
    }

    /// Returns `0` for an empty window.
    fn weighted_mean(&self, weight: Weight<'_>) -> f64 {
        if self.count() == 0 {
            return 0.0;
        }

        self.reduce(weight).ratio()
    }
}

impl Accumulator for RingAccumulator {
    fn insert(&mut self, value: f64) {
        RingAccumulator::insert(self, value)
    }

    fn count(&self) -> usize {
        RingAccumulator::count(self)
    }

    fn capacity(&self) -> usize {
        RingAccumulator::capacity(self)
    }

    fn reduce(&self, weight: Weight<'_>) -> Reduction {
        RingAccumulator::reduce(self, weight)
    }
}

impl<A: Accumulator + ?Sized> Accumulator for Box<A> {
    fn insert(&mut self, value: f64) {
        (**self).insert(value)
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn reduce(&self, weight: Weight<'_>) -> Reduction {
        (**self).reduce(weight)
    }

    fn weighted_mean(&self, weight: Weight<'_>) -> f64 {
        (**self).weighted_mean(weight)
    }
}
