use super::*;

// ── SlidingWindowState ────────────────────────────────────────────────────────

/// Running per-key accumulator over the currently emitted window, maintained
/// incrementally by combining the leading frame in and deducting the trailing
/// frame out.
///
/// Invariant: never contains an entry whose accumulator equals the empty
/// accumulator; such entries are dropped so the state stays proportional to
/// the keys actually present in the live window.
#[derive(Debug, Clone)]
pub struct SlidingWindowState<K, A> {
    accumulators: HashMap<K, A>,
}

impl<K, A> SlidingWindowState<K, A>
where
    K: Eq + Hash + Clone,
    A: PartialEq,
{
    pub fn new() -> Self {
        Self {
            accumulators: HashMap::new(),
        }
    }

    /// Apply a patch frame. For every `(key, value)` in `patch_frame`, the
    /// stored accumulator (or `None` for an absent key) and `value` are
    /// passed to `op`; the result replaces the stored accumulator, unless it
    /// equals `empty`, in which case the entry is removed. A missing patch
    /// frame is a no-op.
    pub fn patch<F>(&mut self, patch_frame: Option<&HashMap<K, A>>, empty: &A, mut op: F)
    where
        F: FnMut(Option<A>, &A) -> A,
    {
        let Some(frame) = patch_frame else {
            return;
        };
        for (key, value) in frame {
            let current = self.accumulators.remove(key);
            let result = op(current, value);
            if result != *empty {
                self.accumulators.insert(key.clone(), result);
            }
        }
    }

    /// Read-only view of the live per-key accumulators.
    pub fn as_map(&self) -> &HashMap<K, A> {
        &self.accumulators
    }

    /// Number of keys present in the live window.
    pub fn key_count(&self) -> usize {
        self.accumulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulators.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&K, &A)> {
        self.accumulators.iter()
    }

    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (K, A)>) -> Self {
        Self {
            accumulators: entries.into_iter().collect(),
        }
    }
}

impl<K, A> Default for SlidingWindowState<K, A>
where
    K: Eq + Hash + Clone,
    A: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}
