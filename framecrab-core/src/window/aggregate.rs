use super::*;

// ── FrameAggregate ────────────────────────────────────────────────────────────

/// Incremental per-frame aggregation.
///
/// The accumulator is updated on each incoming item, so only `O(1)` state is
/// kept per `(frame, key)` pair. Accumulators for adjacent frames are folded
/// together with [`combine`](Self::combine) when a window spans several
/// frames.
///
/// # Contract
///
/// - [`create_accumulator`](Self::create_accumulator) must be deterministic
///   and its result equality-stable: the operator captures one empty
///   accumulator at construction and compares against it by value for the
///   lifetime of the operator. Equality must be content-based.
/// - [`combine`](Self::combine) must be associative and commutative over
///   non-empty frames.
/// - [`finish`](Self::finish) must be pure.
pub trait FrameAggregate: Send {
    /// Input item type.
    type Item;
    /// Accumulator type. Compared by value equality against the empty
    /// accumulator for sliding-state hygiene, and serialized in snapshots.
    type Acc: StreamData + PartialEq;
    /// Finished result type.
    type Output;

    /// Create a fresh (empty) accumulator.
    fn create_accumulator(&self) -> Self::Acc;

    /// Fold one item into the accumulator. May mutate and return `acc` or
    /// return a fresh value; the caller uses only the returned value.
    fn accumulate(&self, acc: Self::Acc, item: &Self::Item) -> Self::Acc;

    /// Fold another accumulator into `acc`. Used both to combine per-frame
    /// accumulators into a window and, on the incremental path, to add the
    /// window's leading frame.
    fn combine(&self, acc: Self::Acc, other: &Self::Acc) -> Self::Acc;

    /// Convert the final accumulator into the window result.
    fn finish(&self, acc: Self::Acc) -> Self::Output;
}

// ── DeductibleFrameAggregate ──────────────────────────────────────────────────

/// A [`FrameAggregate`] whose `combine` has an inverse.
///
/// Supplying a deduct enables incremental sliding-window maintenance: instead
/// of recombining every frame of the window on each emission, the operator
/// keeps a running window accumulator, combines the leading frame in and
/// deducts the trailing frame out.
///
/// # Contract
///
/// `deduct(combine(x, y), y)` must equal `x` by value equality.
pub trait DeductibleFrameAggregate: FrameAggregate {
    /// Remove `other`'s contribution from `acc`.
    fn deduct(&self, acc: Self::Acc, other: &Self::Acc) -> Self::Acc;
}
