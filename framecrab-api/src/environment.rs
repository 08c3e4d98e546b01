use framecrab_core::types::{StreamData, StreamElement};

use crate::pipeline::BoundedSource;

/// The entry point for building a bounded windowed-aggregation job.
///
/// Create an environment, add the element sequence via
/// [`from_elements`](Self::from_elements), then chain
/// [`key_by`](BoundedSource::key_by), [`frames`](crate::pipeline::KeyedSource::frames)
/// and an aggregate.
pub struct WindowEnvironment {
    job_name: String,
}

impl WindowEnvironment {
    /// Create a new environment for a job with the given name.
    pub fn new(job_name: &str) -> Self {
        Self {
            job_name: job_name.to_string(),
        }
    }

    /// Add a bounded source of items interleaved with progress markers.
    pub fn from_elements<T, I>(&self, elements: I) -> BoundedSource<T>
    where
        T: StreamData,
        I: IntoIterator<Item = StreamElement<T>>,
    {
        BoundedSource {
            job_name: self.job_name.clone(),
            elements: elements.into_iter().collect(),
        }
    }
}
