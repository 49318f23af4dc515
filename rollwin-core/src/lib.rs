//! Fixed-capacity rolling statistics: sum, mean and weighted mean over the
//! most recent samples of a stream.

mod accumulator;
mod ring;
mod sync;
pub mod weight;

pub use accumulator::Accumulator;
pub use ring::{MIN_CAPACITY, RingAccumulator};
pub use sync::SynchronizedAccumulator;
pub use weight::{Reduction, Weight, WeightPolicy};

/// Builds an accumulator, lock-guarded when `synchronized` is set.
pub fn create(capacity: usize, synchronized: bool) -> Box<dyn Accumulator + Send + Sync> {
    if synchronized {
        Box::new(SynchronizedAccumulator::new(capacity))
    } else {
        Box::new(RingAccumulator::new(capacity))
    }
}
