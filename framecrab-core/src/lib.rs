//! # FrameCrab Core
//!
//! Frame-based sliding-window aggregation for keyed event streams.
//!
//! Upstream assigns every item to a fixed-length *frame* (a discrete time
//! bucket identified by a frame sequence number) and interleaves the item
//! stream with progress markers. The [`window::WindowOperator`] buffers
//! per-frame, per-key accumulators and, on each marker, emits one result row
//! per key for every window of frames the marker completes. Windows are
//! tumbling or sliding, with an optional incremental "combine leading /
//! deduct trailing" fast path when the aggregation has an inverse.
//!
//! - [`types`] — Stream envelope types: [`StreamElement`](types::StreamElement),
//!   [`ProgressMarker`](types::ProgressMarker), [`WindowFrame`](types::WindowFrame),
//!   and the [`StreamData`](types::StreamData) trait bound.
//! - [`window`] — The windowing operator and its parts:
//!   [`WindowDefinition`](window::WindowDefinition),
//!   [`FrameAggregate`](window::FrameAggregate),
//!   [`WindowOperator`](window::WindowOperator).

pub mod types;
pub mod window;
