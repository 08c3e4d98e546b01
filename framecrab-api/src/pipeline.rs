use std::hash::Hash;
use std::marker::PhantomData;

use anyhow::Result;

use framecrab_core::types::{FrameSeq, StreamData, StreamElement, WindowFrame};
use framecrab_core::window::{
    DeductibleFrameAggregate, FrameAggregate, WindowDefinition, WindowOperator,
};

/// A bounded sequence of stream elements.
///
/// Created by [`WindowEnvironment::from_elements`](crate::environment::WindowEnvironment::from_elements).
/// Call [`key_by`](Self::key_by) to choose the grouping key.
pub struct BoundedSource<T>
where
    T: StreamData,
{
    pub(crate) job_name: String,
    pub(crate) elements: Vec<StreamElement<T>>,
}

impl<T> BoundedSource<T>
where
    T: StreamData,
{
    /// Choose the grouping key, returning a [`KeyedSource`].
    pub fn key_by<K, KF>(self, key_fn: KF) -> KeyedSource<T, K, KF>
    where
        K: StreamData + Eq + Hash,
        KF: Fn(&T) -> K + Send,
    {
        KeyedSource {
            job_name: self.job_name,
            elements: self.elements,
            key_fn,
            _phantom: PhantomData,
        }
    }
}

/// A keyed bounded source. Call [`frames`](Self::frames) to attach the window
/// geometry and the frame-sequence extractor.
pub struct KeyedSource<T, K, KF>
where
    T: StreamData,
{
    job_name: String,
    elements: Vec<StreamElement<T>>,
    key_fn: KF,
    _phantom: PhantomData<K>,
}

impl<T, K, KF> KeyedSource<T, K, KF>
where
    T: StreamData,
    K: StreamData + Eq + Hash,
    KF: Fn(&T) -> K + Send,
{
    /// Attach the window definition and the extractor for the pre-assigned
    /// frame sequence of each item.
    pub fn frames<SF>(self, definition: WindowDefinition, frame_seq_fn: SF) -> FramedSource<T, K, SF, KF>
    where
        SF: Fn(&T) -> FrameSeq + Send,
    {
        FramedSource {
            job_name: self.job_name,
            elements: self.elements,
            definition,
            frame_seq_fn,
            key_fn: self.key_fn,
            _phantom: PhantomData,
        }
    }
}

/// A keyed, framed bounded source. Pick an aggregate to obtain an executable
/// [`WindowJob`].
pub struct FramedSource<T, K, SF, KF>
where
    T: StreamData,
{
    job_name: String,
    elements: Vec<StreamElement<T>>,
    definition: WindowDefinition,
    frame_seq_fn: SF,
    key_fn: KF,
    _phantom: PhantomData<K>,
}

impl<T, K, SF, KF> FramedSource<T, K, SF, KF>
where
    T: StreamData,
    K: StreamData + Eq + Hash,
    SF: Fn(&T) -> FrameSeq + Send,
    KF: Fn(&T) -> K + Send,
{
    /// Aggregate each window with `aggregate`. Sliding windows are recomputed
    /// from scratch on every emission.
    pub fn aggregate<G>(self, aggregate: G) -> WindowJob<T, K, G, SF, KF>
    where
        G: FrameAggregate<Item = T>,
    {
        WindowJob {
            job_name: self.job_name,
            elements: self.elements,
            operator: WindowOperator::new(
                self.definition,
                aggregate,
                self.frame_seq_fn,
                self.key_fn,
            ),
        }
    }

    /// Aggregate each window with `aggregate`, using its inverse for
    /// incremental sliding-window maintenance.
    pub fn aggregate_with_deduct<G>(self, aggregate: G) -> WindowJob<T, K, G, SF, KF>
    where
        G: DeductibleFrameAggregate<Item = T>,
    {
        WindowJob {
            job_name: self.job_name,
            elements: self.elements,
            operator: WindowOperator::with_deduct(
                self.definition,
                aggregate,
                self.frame_seq_fn,
                self.key_fn,
            ),
        }
    }
}

/// An executable bounded windowed-aggregation job.
///
/// Created by [`FramedSource::aggregate`] or
/// [`FramedSource::aggregate_with_deduct`].
pub struct WindowJob<T, K, G, SF, KF>
where
    G: FrameAggregate<Item = T>,
{
    job_name: String,
    elements: Vec<StreamElement<T>>,
    operator: WindowOperator<T, K, G, SF, KF>,
}

impl<T, K, G, SF, KF> WindowJob<T, K, G, SF, KF>
where
    T: StreamData,
    K: StreamData + Eq + Hash,
    G: FrameAggregate<Item = T>,
    SF: Fn(&T) -> FrameSeq + Send,
    KF: Fn(&T) -> K + Send,
{
    /// Feed every element through the operator in order and collect the
    /// output sequence: window rows interleaved with forwarded markers.
    pub fn execute(mut self) -> Result<Vec<StreamElement<WindowFrame<K, G::Output>>>> {
        tracing::debug!(
            job = %self.job_name,
            elements = self.elements.len(),
            "executing bounded window job"
        );
        let mut output = Vec::new();
        for element in self.elements {
            output.extend(self.operator.process(element)?);
        }
        tracing::debug!(job = %self.job_name, outputs = output.len(), "job finished");
        Ok(output)
    }
}
