use core::fmt;

/// Weight given to a sample during a reduction, as a function of its position
/// in the window (0 is the oldest sample) and the window population.
#[derive(Clone, Copy, Default)]
pub enum Weight<'a> {
    /// Every sample counts once. Reductions skip the callback entirely.
    #[default]
    Equal,
    By(&'a dyn Fn(usize, usize) -> f64),
}

pub const EQUAL: Weight<'static> = Weight::Equal;

pub const POSITIONAL: Weight<'static> = Weight::By(&positional);

/// Oldest sample weighs 1, each newer sample one more, the newest weighs `n`.
pub fn positional(i: usize, _n: usize) -> f64 {
    // The offset keeps the oldest sample in the result and the denominator non-zero.
    (i + 1) as f64
}

impl Weight<'_> {
    #[inline]
    pub fn at(&self, i: usize, n: usize) -> f64 {
        match self {
            Weight::Equal => 1.0,
            Weight::By(f) => f(i, n),
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Weight::Equal)
    }
}

impl<'a, F> From<&'a F> for Weight<'a>
    where
        F: Fn(usize, usize) -> f64,
{
    fn from(f: &'a F) -> Self {
        Weight::By(f)
    }
}

impl fmt::Debug for Weight<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Equal => write!(f, "Equal"),
            Weight::By(_) => write!(f, "By(..)"),
        }
    }
}

/// Predefined weight policies that can be named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WeightPolicy {
    #[default]
    Equal,
    Positional,
}

impl WeightPolicy {
    pub fn weight(self) -> Weight<'static> {
        match self {
            WeightPolicy::Equal => EQUAL,
            WeightPolicy::Positional => POSITIONAL,
        }
    }
}

/// Weighted sum and the matching weight total, left undivided so callers can
/// take either the plain sum or the weighted mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reduction {
    pub sum: f64,
    pub denominator: f64,
}

impl Reduction {
    #[inline]
    pub(crate) fn accumulate(self, weight: f64, value: f64) -> Self {
        Self {
            sum: self.sum + weight * value,
            denominator: self.denominator + weight,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.sum / self.denominator
    }
}
