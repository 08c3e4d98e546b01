use super::*;

// ── Built-in aggregates ───────────────────────────────────────────────────────

/// Sum of an `i64` drawn from each item.
///
/// Deductible: subtraction is the exact inverse of addition.
pub struct SumAggregate<T, F> {
    value_fn: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F: Fn(&T) -> i64> SumAggregate<T, F> {
    pub fn new(value_fn: F) -> Self {
        Self {
            value_fn,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Send, F: Fn(&T) -> i64 + Send> FrameAggregate for SumAggregate<T, F> {
    type Item = T;
    type Acc = i64;
    type Output = i64;

    fn create_accumulator(&self) -> i64 {
        0
    }

    fn accumulate(&self, acc: i64, item: &T) -> i64 {
        acc + (self.value_fn)(item)
    }

    fn combine(&self, acc: i64, other: &i64) -> i64 {
        acc + other
    }

    fn finish(&self, acc: i64) -> i64 {
        acc
    }
}

impl<T: Send, F: Fn(&T) -> i64 + Send> DeductibleFrameAggregate for SumAggregate<T, F> {
    fn deduct(&self, acc: i64, other: &i64) -> i64 {
        acc - other
    }
}

/// Count of items. Deductible.
pub struct CountAggregate<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> CountAggregate<T> {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> Default for CountAggregate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> FrameAggregate for CountAggregate<T> {
    type Item = T;
    type Acc = i64;
    type Output = i64;

    fn create_accumulator(&self) -> i64 {
        0
    }

    fn accumulate(&self, acc: i64, _item: &T) -> i64 {
        acc + 1
    }

    fn combine(&self, acc: i64, other: &i64) -> i64 {
        acc + other
    }

    fn finish(&self, acc: i64) -> i64 {
        acc
    }
}

impl<T: Send> DeductibleFrameAggregate for CountAggregate<T> {
    fn deduct(&self, acc: i64, other: &i64) -> i64 {
        acc - other
    }
}

/// Arithmetic mean of an `i64` drawn from each item (ACC = (sum, count)).
///
/// Deductible: both components invert exactly.
pub struct AvgAggregate<T, F> {
    value_fn: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F: Fn(&T) -> i64> AvgAggregate<T, F> {
    pub fn new(value_fn: F) -> Self {
        Self {
            value_fn,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Send, F: Fn(&T) -> i64 + Send> FrameAggregate for AvgAggregate<T, F> {
    type Item = T;
    type Acc = (i64, i64);
    type Output = f64;

    fn create_accumulator(&self) -> (i64, i64) {
        (0, 0)
    }

    fn accumulate(&self, acc: (i64, i64), item: &T) -> (i64, i64) {
        (acc.0 + (self.value_fn)(item), acc.1 + 1)
    }

    fn combine(&self, acc: (i64, i64), other: &(i64, i64)) -> (i64, i64) {
        (acc.0 + other.0, acc.1 + other.1)
    }

    fn finish(&self, acc: (i64, i64)) -> f64 {
        if acc.1 == 0 {
            0.0
        } else {
            acc.0 as f64 / acc.1 as f64
        }
    }
}

impl<T: Send, F: Fn(&T) -> i64 + Send> DeductibleFrameAggregate for AvgAggregate<T, F> {
    fn deduct(&self, acc: (i64, i64), other: &(i64, i64)) -> (i64, i64) {
        (acc.0 - other.0, acc.1 - other.1)
    }
}

/// Minimum of an `i64` drawn from each item.
///
/// Not deductible (min has no inverse), so sliding windows recompute from
/// scratch. The accumulator is `None` until the first item.
pub struct MinAggregate<T, F> {
    value_fn: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F: Fn(&T) -> i64> MinAggregate<T, F> {
    pub fn new(value_fn: F) -> Self {
        Self {
            value_fn,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Send, F: Fn(&T) -> i64 + Send> FrameAggregate for MinAggregate<T, F> {
    type Item = T;
    type Acc = Option<i64>;
    type Output = i64;

    fn create_accumulator(&self) -> Option<i64> {
        None
    }

    fn accumulate(&self, acc: Option<i64>, item: &T) -> Option<i64> {
        let v = (self.value_fn)(item);
        Some(acc.map_or(v, |m| m.min(v)))
    }

    fn combine(&self, acc: Option<i64>, other: &Option<i64>) -> Option<i64> {
        match (acc, other) {
            (Some(a), Some(b)) => Some(a.min(*b)),
            (a, b) => a.or(*b),
        }
    }

    fn finish(&self, acc: Option<i64>) -> i64 {
        acc.unwrap_or(i64::MAX)
    }
}

/// Maximum of an `i64` drawn from each item. Not deductible.
pub struct MaxAggregate<T, F> {
    value_fn: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F: Fn(&T) -> i64> MaxAggregate<T, F> {
    pub fn new(value_fn: F) -> Self {
        Self {
            value_fn,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Send, F: Fn(&T) -> i64 + Send> FrameAggregate for MaxAggregate<T, F> {
    type Item = T;
    type Acc = Option<i64>;
    type Output = i64;

    fn create_accumulator(&self) -> Option<i64> {
        None
    }

    fn accumulate(&self, acc: Option<i64>, item: &T) -> Option<i64> {
        let v = (self.value_fn)(item);
        Some(acc.map_or(v, |m| m.max(v)))
    }

    fn combine(&self, acc: Option<i64>, other: &Option<i64>) -> Option<i64> {
        match (acc, other) {
            (Some(a), Some(b)) => Some(a.max(*b)),
            (a, b) => a.or(*b),
        }
    }

    fn finish(&self, acc: Option<i64>) -> i64 {
        acc.unwrap_or(i64::MIN)
    }
}
