// Running total/min/max for one numeric series, fed one value at a time.

use std::ops::Add;

use crate::models::GaugeSummary;

/// Numeric types a [`RunningAggregate`] can track.
pub trait Sample: Copy + PartialOrd + Add<Output = Self> + Default {
    fn as_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(impl Sample for $t {
            fn as_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_sample!(u64, i64, f64);

/// Folds one value into `(total, min, max)`.
///
/// Min/max are `None` until the first value arrives. After that a value only replaces an
/// extremum when it is strictly smaller (or larger); ties keep the existing one.
pub fn update<T: Sample>(
    total: T,
    min: Option<T>,
    max: Option<T>,
    value: T,
) -> (T, Option<T>, Option<T>) {
    let min = match min {
        Some(m) if value < m => Some(value),
        Some(m) => Some(m),
        None => Some(value),
    };
    let max = match max {
        Some(m) if value > m => Some(value),
        Some(m) => Some(m),
        None => Some(value),
    };
    (total + value, min, max)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningAggregate<T> {
    pub total: T,
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Sample> Default for RunningAggregate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> RunningAggregate<T> {
    pub fn new() -> Self {
        Self {
            total: T::default(),
            min: None,
            max: None,
        }
    }

    pub fn update(self, value: T) -> Self {
        let (total, min, max) = update(self.total, self.min, self.max, value);
        Self { total, min, max }
    }

    pub fn push(&mut self, value: T) {
        *self = self.update(value);
    }

    /// Average over `count` samples with min/max. `None` when nothing was pushed or `count` is 0.
    pub fn summary(&self, count: usize) -> Option<GaugeSummary<T>> {
        if count == 0 {
            return None;
        }
        Some(GaugeSummary {
            ave: self.total.as_f64() / count as f64,
            min: self.min?,
            max: self.max?,
        })
    }
}
