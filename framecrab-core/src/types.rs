use serde::{Deserialize, Serialize};

/// Frame sequence number. Items are pre-assigned to exactly one frame by the
/// upstream stage; the operator only preserves the sequences it is handed.
pub type FrameSeq = i64;

/// Progress marker: no further item with frame sequence <= `seq` will arrive.
///
/// Receiving a marker authorizes emission of every window that the marker
/// completes. Markers are assumed monotone non-decreasing; a regressing
/// marker produces no output beyond its own forwarding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgressMarker {
    pub seq: FrameSeq,
}

impl ProgressMarker {
    /// Create a new marker at the given frame sequence.
    pub fn new(seq: FrameSeq) -> Self {
        Self { seq }
    }
}

impl std::fmt::Display for ProgressMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProgressMarker({})", self.seq)
    }
}

/// One emitted window result: the aggregation of `key` over the window whose
/// leading frame is `frame_seq`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowFrame<K, R> {
    pub frame_seq: FrameSeq,
    pub key: K,
    pub result: R,
}

impl<K, R> WindowFrame<K, R> {
    pub fn new(frame_seq: FrameSeq, key: K, result: R) -> Self {
        Self {
            frame_seq,
            key,
            result,
        }
    }
}

/// The unit flowing through a windowing stage: data items interleaved with
/// progress markers. The same envelope is used on both sides; the output
/// carries [`WindowFrame`] records where the input carried raw items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StreamElement<T> {
    /// User data item.
    Item(T),
    /// Progress marker, forwarded downstream after the results it bounds.
    Marker(ProgressMarker),
}

impl<T> StreamElement<T> {
    /// Create an item element.
    pub fn item(value: T) -> Self {
        Self::Item(value)
    }

    /// Create a marker element at the given frame sequence.
    pub fn marker(seq: FrameSeq) -> Self {
        Self::Marker(ProgressMarker::new(seq))
    }

    /// Return true if this element is a progress marker.
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }
}

/// Trait bound for types that can flow through the stream.
/// All user data types must satisfy this.
pub trait StreamData: Send + Clone + Serialize + for<'de> Deserialize<'de> + 'static {}

// Blanket implementation: any type satisfying the bounds is StreamData.
impl<T> StreamData for T where T: Send + Clone + Serialize + for<'de> Deserialize<'de> + 'static {}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
