use serde::{Deserialize, Serialize};

use super::*;

// ── WindowOperator ────────────────────────────────────────────────────────────

/// Frame-based windowing operator.
///
/// Accepts [`StreamElement<T>`] elements (items + progress markers) and emits
/// [`StreamElement<WindowFrame<K, R>>`] elements when markers complete
/// windows.
///
/// # Processing model
///
/// - **Items**: assigned to their frame by `frame_seq_fn` and folded into a
///   per-`(frame, key)` accumulator. Items never produce output directly.
/// - **Markers**: emit one result row per key for every window between the
///   emission cursor and the marker's frame, in ascending frame order, then
///   re-emit the marker downstream so it reaches consumers strictly after
///   all results it bounds. Each emitted frame's trailing-edge frame is
///   evicted from the store once its results are produced.
///
/// Window computation is tumbling (the frame itself), incremental (combine
/// the leading frame into a running window, deduct the trailing frame out;
/// requires [`DeductibleFrameAggregate`]) or from-scratch (recombine every
/// frame of the window).
///
/// A single instance is single-owner: the host invokes `process` serially and
/// parallelism comes from running independent keyed instances.
pub struct WindowOperator<T, K, G, SF, KF>
where
    G: FrameAggregate<Item = T>,
{
    definition: WindowDefinition,
    aggregate: G,
    frame_seq_fn: SF,
    key_fn: KF,
    frames: FrameStore<K, G::Acc>,
    sliding: SlidingWindowState<K, G::Acc>,
    /// Emission cursor. `None` until the first marker that finds data.
    next_frame_seq_to_emit: Option<FrameSeq>,
    /// Captured once at construction; compared by value to detect absence.
    empty_acc: G::Acc,
    deduct: Option<fn(&G, G::Acc, &G::Acc) -> G::Acc>,
    _phantom: std::marker::PhantomData<T>,
}

#[derive(Serialize, Deserialize)]
struct WindowOperatorSnapshot<K, A> {
    frame_entries: Vec<(FrameSeq, Vec<(K, A)>)>,
    sliding_entries: Vec<(K, A)>,
    next_frame_seq_to_emit: Option<FrameSeq>,
}

impl<T, K, G, SF, KF> WindowOperator<T, K, G, SF, KF>
where
    K: StreamData + Eq + Hash,
    G: FrameAggregate<Item = T>,
    SF: Fn(&T) -> FrameSeq + Send,
    KF: Fn(&T) -> K + Send,
{
    /// Create an operator without incremental maintenance. Sliding windows
    /// are recomputed from scratch on every emission.
    ///
    /// - `frame_seq_fn`: extracts the pre-assigned frame sequence from an item
    /// - `key_fn`: extracts the grouping key from an item
    pub fn new(definition: WindowDefinition, aggregate: G, frame_seq_fn: SF, key_fn: KF) -> Self {
        let empty_acc = aggregate.create_accumulator();
        Self {
            definition,
            aggregate,
            frame_seq_fn,
            key_fn,
            frames: FrameStore::new(),
            sliding: SlidingWindowState::new(),
            next_frame_seq_to_emit: None,
            empty_acc,
            deduct: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Create an operator with the incremental "combine leading / deduct
    /// trailing" fast path.
    ///
    /// A tumbling definition never reads the running window, so it gets the
    /// same behavior as [`new`](Self::new).
    pub fn with_deduct(
        definition: WindowDefinition,
        aggregate: G,
        frame_seq_fn: SF,
        key_fn: KF,
    ) -> Self
    where
        G: DeductibleFrameAggregate,
    {
        let mut operator = Self::new(definition, aggregate, frame_seq_fn, key_fn);
        if !definition.is_tumbling() {
            let deduct: fn(&G, G::Acc, &G::Acc) -> G::Acc = G::deduct;
            operator.deduct = Some(deduct);
        }
        operator
    }

    /// Process one stream element and return any output produced.
    ///
    /// - Items are buffered into their frame; output is always empty.
    /// - Markers emit every window they complete, frames in ascending order,
    ///   the marker itself last.
    pub fn process(
        &mut self,
        element: StreamElement<T>,
    ) -> Result<Vec<StreamElement<WindowFrame<K, G::Output>>>> {
        match element {
            StreamElement::Item(item) => {
                self.accumulate_item(item);
                Ok(Vec::new())
            }
            StreamElement::Marker(marker) => Ok(self.on_marker(marker)),
        }
    }

    fn accumulate_item(&mut self, item: T) {
        let frame_seq = (self.frame_seq_fn)(&item);
        let key = (self.key_fn)(&item);
        let aggregate = &self.aggregate;
        self.frames.upsert(frame_seq, key, |acc| {
            aggregate.accumulate(
                acc.unwrap_or_else(|| aggregate.create_accumulator()),
                &item,
            )
        });
    }

    fn on_marker(&mut self, marker: ProgressMarker) -> Vec<StreamElement<WindowFrame<K, G::Output>>> {
        let range_start = match self.next_frame_seq_to_emit {
            Some(seq) => seq,
            None => {
                let Some(min_seq) = self.frames.min_frame_seq() else {
                    // No data yet: forward the marker, keep the cursor
                    // uninitialized so a later marker starts from real data.
                    return vec![StreamElement::Marker(marker)];
                };
                // First marker acted upon. Starting from the lowest frame on
                // record means the first emitted window covers at most one
                // existing frame, so the running window builds up correctly
                // from empty.
                let start = min_seq.min(marker.seq);
                tracing::debug!(cursor = start, marker = marker.seq, "emission cursor initialized");
                start
            }
        };
        let range_end = self.definition.higher_frame_seq(marker.seq);
        // The cursor only ever advances; a regressing marker emits nothing.
        self.next_frame_seq_to_emit = Some(range_end.max(range_start));

        let mut output = Vec::new();
        let mut frame_seq = range_start;
        while frame_seq < range_end {
            self.emit_window(frame_seq, &mut output);
            self.complete_window(frame_seq);
            frame_seq += self.definition.frame_length();
        }
        output.push(StreamElement::Marker(marker));
        output
    }

    /// Compute the window at `frame_seq` and push one row per key.
    fn emit_window(
        &mut self,
        frame_seq: FrameSeq,
        output: &mut Vec<StreamElement<WindowFrame<K, G::Output>>>,
    ) {
        if self.definition.is_tumbling() {
            // The window is the frame itself and is read exactly once, so it
            // can be taken out of the store directly.
            if let Some(frame) = self.frames.evict(frame_seq) {
                for (key, acc) in frame {
                    output.push(StreamElement::Item(WindowFrame::new(
                        frame_seq,
                        key,
                        self.aggregate.finish(acc),
                    )));
                }
            }
            return;
        }

        if self.deduct.is_some() {
            // Fold the leading-edge frame into the running window. The frame
            // stays in the store until it becomes the trailing edge.
            let aggregate = &self.aggregate;
            self.sliding
                .patch(self.frames.get(frame_seq), &self.empty_acc, |acc, value| {
                    aggregate.combine(
                        acc.unwrap_or_else(|| aggregate.create_accumulator()),
                        value,
                    )
                });
            for (key, acc) in self.sliding.entries() {
                output.push(StreamElement::Item(WindowFrame::new(
                    frame_seq,
                    key.clone(),
                    self.aggregate.finish(acc.clone()),
                )));
            }
            return;
        }

        // No deduct: recombine every frame of the window.
        let mut window: HashMap<K, G::Acc> = HashMap::new();
        let lo = frame_seq - self.definition.window_length() + self.definition.frame_length();
        let mut seq = lo;
        while seq <= frame_seq {
            if let Some(frame) = self.frames.get(seq) {
                for (key, acc) in frame {
                    let current = window.remove(key);
                    let combined = self.aggregate.combine(
                        current.unwrap_or_else(|| self.aggregate.create_accumulator()),
                        acc,
                    );
                    window.insert(key.clone(), combined);
                }
            }
            seq += self.definition.frame_length();
        }
        for (key, acc) in window {
            output.push(StreamElement::Item(WindowFrame::new(
                frame_seq,
                key,
                self.aggregate.finish(acc),
            )));
        }
    }

    /// Runs once per emitted frame, after its rows have been produced: evict
    /// the trailing-edge frame and, on the incremental path, deduct it from
    /// the running window.
    fn complete_window(&mut self, frame_seq: FrameSeq) {
        let trailing =
            frame_seq - self.definition.window_length() + self.definition.frame_length();
        let evicted = self.frames.evict(trailing);
        if let Some(deduct) = self.deduct {
            let aggregate = &self.aggregate;
            self.sliding
                .patch(evicted.as_ref(), &self.empty_acc, |acc, value| {
                    deduct(
                        aggregate,
                        acc.unwrap_or_else(|| aggregate.create_accumulator()),
                        value,
                    )
                });
        }
    }

    /// Number of frames currently buffered in the store.
    pub fn stored_frame_count(&self) -> usize {
        self.frames.frame_count()
    }

    /// The smallest frame sequence still buffered, if any.
    pub fn min_stored_frame_seq(&self) -> Option<FrameSeq> {
        self.frames.min_frame_seq()
    }

    /// Number of keys in the running window (always 0 outside the
    /// incremental path).
    pub fn sliding_key_count(&self) -> usize {
        self.sliding.key_count()
    }

    /// The next frame sequence the operator will emit, once initialized.
    pub fn emission_cursor(&self) -> Option<FrameSeq> {
        self.next_frame_seq_to_emit
    }

    /// Snapshot buffered frames, the running window and the emission cursor.
    pub fn snapshot_state(&self) -> Result<Vec<u8>> {
        let snapshot = WindowOperatorSnapshot {
            frame_entries: self
                .frames
                .iter()
                .map(|(seq, frame)| {
                    (
                        *seq,
                        frame
                            .iter()
                            .map(|(k, a)| (k.clone(), a.clone()))
                            .collect::<Vec<_>>(),
                    )
                })
                .collect(),
            sliding_entries: self
                .sliding
                .entries()
                .map(|(k, a)| (k.clone(), a.clone()))
                .collect(),
            next_frame_seq_to_emit: self.next_frame_seq_to_emit,
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Restore state written by [`snapshot_state`](Self::snapshot_state).
    /// Empty input restores the pristine state.
    pub fn restore_state(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            self.frames = FrameStore::new();
            self.sliding = SlidingWindowState::new();
            self.next_frame_seq_to_emit = None;
            return Ok(());
        }

        let snapshot: WindowOperatorSnapshot<K, G::Acc> = bincode::deserialize(data)?;
        let mut frames = FrameStore::new();
        for (seq, entries) in snapshot.frame_entries {
            frames.insert_frame(seq, entries.into_iter().collect());
        }
        self.frames = frames;
        self.sliding = SlidingWindowState::from_entries(snapshot.sliding_entries);
        self.next_frame_seq_to_emit = snapshot.next_frame_seq_to_emit;
        Ok(())
    }
}
