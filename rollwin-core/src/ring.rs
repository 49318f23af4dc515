use crate::weight::{Reduction, Weight};

pub const MIN_CAPACITY: usize = 2;

/// Fixed-capacity circular buffer of samples. Once every slot has been written
/// the oldest sample is overwritten in place by each insertion.
#[derive(Debug, Clone)]
pub struct RingAccumulator {
    buffer: Box<[f64]>,
    // Next slot to overwrite.
    head: usize,
    full: bool,
}

impl RingAccumulator {
    /// Capacities below [`MIN_CAPACITY`] are raised to it.
    pub fn new(capacity: usize) -> Self {
        let capacity = clamp_capacity(capacity);

        Self {
            buffer: vec![0.0; capacity].into_boxed_slice(),
            head: 0,
            full: false,
        }
    }

    pub fn insert(&mut self, value: f64) {
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.buffer.len();

        if self.head == 0 && !self.full {
            tracing::trace!(capacity = self.buffer.len(), "Window filled");
            self.full = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.full {
            self.buffer.len()
        } else {
            self.head
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Logically present samples, oldest first.
    pub fn iter(&self) -> impl '_ + Iterator<Item = f64> + Clone {
        let (older, newer): (&[f64], &[f64]) = if self.full {
            (&self.buffer[self.head..], &self.buffer[..self.head])
        } else {
            (&self.buffer[..self.head], &self.buffer[..0])
        };

        older.iter().chain(newer).copied()
    }

    pub fn reduce(&self, weight: Weight<'_>) -> Reduction {
        let n = self.count();

        if weight.is_equal() {
            return self
                .iter()
                .fold(Reduction::default(), |acc, value| acc.accumulate(1.0, value));
        }

        self.iter()
            .enumerate()
            .fold(Reduction::default(), |acc, (i, value)| acc.accumulate(weight.at(i, n), value))
    }
}

impl Extend<f64> for RingAccumulator {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

pub(crate) fn clamp_capacity(requested: usize) -> usize {
    if requested < MIN_CAPACITY {
        tracing::debug!(requested, "Window capacity raised to {MIN_CAPACITY}");
        MIN_CAPACITY
    } else {
        requested
    }
}
