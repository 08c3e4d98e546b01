use super::*;

// ── WindowDefinition ──────────────────────────────────────────────────────

#[test]
fn test_definition_sliding() {
    let def = WindowDefinition::sliding(1_000, 4_000).unwrap();
    assert_eq!(def.frame_length(), 1_000);
    assert_eq!(def.window_length(), 4_000);
    assert_eq!(def.frames_per_window(), 4);
    assert!(!def.is_tumbling());
}

#[test]
fn test_definition_tumbling() {
    let def = WindowDefinition::tumbling(500).unwrap();
    assert_eq!(def.window_length(), 500);
    assert_eq!(def.frames_per_window(), 1);
    assert!(def.is_tumbling());
}

#[test]
fn test_definition_rejects_bad_lengths() {
    assert!(WindowDefinition::sliding(0, 1_000).is_err());
    assert!(WindowDefinition::sliding(-5, 10).is_err());
    assert!(WindowDefinition::sliding(1_000, 0).is_err());
    // Not a multiple of the frame length.
    assert!(WindowDefinition::sliding(1_000, 2_500).is_err());
}

#[test]
fn test_higher_frame_seq() {
    let def = WindowDefinition::tumbling(5).unwrap();
    // Strictly greater, even from an aligned sequence.
    assert_eq!(def.higher_frame_seq(10), 15);
    assert_eq!(def.higher_frame_seq(12), 15);
    assert_eq!(def.higher_frame_seq(14), 15);
}

#[test]
fn test_higher_frame_seq_negative() {
    let def = WindowDefinition::tumbling(5).unwrap();
    // Floor division keeps negative sequences on the grid.
    assert_eq!(def.higher_frame_seq(-12), -10);
    assert_eq!(def.higher_frame_seq(-10), -5);
    assert_eq!(def.higher_frame_seq(-1), 0);
}

// ── FrameStore ────────────────────────────────────────────────────────────

#[test]
fn test_frame_store_upsert_accumulates() {
    let mut store: FrameStore<String, i64> = FrameStore::new();
    store.upsert(10, "a".to_string(), |acc| acc.unwrap_or(0) + 1);
    store.upsert(10, "a".to_string(), |acc| acc.unwrap_or(0) + 1);
    store.upsert(10, "b".to_string(), |acc| acc.unwrap_or(0) + 5);

    let frame = store.get(10).unwrap();
    assert_eq!(frame.get("a"), Some(&2));
    assert_eq!(frame.get("b"), Some(&5));
    assert_eq!(store.frame_count(), 1);
}

#[test]
fn test_frame_store_evict() {
    let mut store: FrameStore<String, i64> = FrameStore::new();
    store.upsert(10, "a".to_string(), |_| 1);
    let evicted = store.evict(10).unwrap();
    assert_eq!(evicted.get("a"), Some(&1));
    assert!(store.get(10).is_none());
    assert!(store.evict(10).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_frame_store_min_frame_seq() {
    let mut store: FrameStore<String, i64> = FrameStore::new();
    assert_eq!(store.min_frame_seq(), None);
    store.upsert(30, "a".to_string(), |_| 1);
    store.upsert(10, "a".to_string(), |_| 1);
    store.upsert(20, "a".to_string(), |_| 1);
    assert_eq!(store.min_frame_seq(), Some(10));
    store.evict(10);
    assert_eq!(store.min_frame_seq(), Some(20));
}

// ── SlidingWindowState ────────────────────────────────────────────────────

#[test]
fn test_sliding_state_patch_adds_entries() {
    let mut state: SlidingWindowState<String, i64> = SlidingWindowState::new();
    let mut frame = HashMap::new();
    frame.insert("a".to_string(), 3i64);
    frame.insert("b".to_string(), 4i64);

    state.patch(Some(&frame), &0, |acc, v| acc.unwrap_or(0) + v);
    assert_eq!(state.key_count(), 2);
    assert_eq!(state.as_map().get("a"), Some(&3));

    // Patching the same frame again folds on top of the current value.
    state.patch(Some(&frame), &0, |acc, v| acc.unwrap_or(0) + v);
    assert_eq!(state.as_map().get("a"), Some(&6));
}

#[test]
fn test_sliding_state_patch_missing_frame_is_noop() {
    let mut state: SlidingWindowState<String, i64> = SlidingWindowState::new();
    state.patch(None, &0, |acc, v| acc.unwrap_or(0) + v);
    assert!(state.is_empty());
}

#[test]
fn test_sliding_state_drops_empty_results() {
    let mut state: SlidingWindowState<String, i64> = SlidingWindowState::new();
    let mut frame = HashMap::new();
    frame.insert("a".to_string(), 7i64);

    state.patch(Some(&frame), &0, |acc, v| acc.unwrap_or(0) + v);
    assert_eq!(state.key_count(), 1);

    // Deducting the same contribution brings the value back to empty; the
    // entry must be removed, not stored as zero.
    state.patch(Some(&frame), &0, |acc, v| acc.unwrap_or(0) - v);
    assert!(state.is_empty());
}

// ── Built-in aggregates ───────────────────────────────────────────────────

#[test]
fn test_sum_aggregate() {
    let agg = SumAggregate::new(|v: &i64| *v);
    let acc = agg.accumulate(agg.create_accumulator(), &5);
    let acc = agg.accumulate(acc, &3);
    assert_eq!(acc, 8);
    assert_eq!(agg.combine(acc, &2), 10);
    assert_eq!(agg.deduct(10, &3), 7);
    assert_eq!(agg.finish(7), 7);
}

#[test]
fn test_count_aggregate() {
    let agg: CountAggregate<String> = CountAggregate::new();
    let acc = agg.accumulate(agg.create_accumulator(), &"x".to_string());
    let acc = agg.accumulate(acc, &"y".to_string());
    assert_eq!(acc, 2);
    assert_eq!(agg.deduct(agg.combine(acc, &3), &3), 2);
}

#[test]
fn test_avg_aggregate() {
    let agg = AvgAggregate::new(|v: &i64| *v);
    let acc = agg.accumulate(agg.create_accumulator(), &10);
    let acc = agg.accumulate(acc, &20);
    assert_eq!(acc, (30, 2));
    assert!((agg.finish(acc) - 15.0).abs() < 1e-9);
    // Empty window yields 0.0 rather than dividing by zero.
    assert_eq!(agg.finish(agg.create_accumulator()), 0.0);
}

#[test]
fn test_min_max_aggregate() {
    let min = MinAggregate::new(|v: &i64| *v);
    let acc = min.accumulate(min.create_accumulator(), &5);
    let acc = min.accumulate(acc, &3);
    assert_eq!(min.finish(acc), 3);
    // Combining with an untouched accumulator keeps the present side.
    assert_eq!(min.combine(Some(3), &None), Some(3));
    assert_eq!(min.combine(None, &Some(9)), Some(9));

    let max = MaxAggregate::new(|v: &i64| *v);
    let acc = max.accumulate(max.create_accumulator(), &5);
    let acc = max.accumulate(acc, &9);
    assert_eq!(max.finish(acc), 9);
}
