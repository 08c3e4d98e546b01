//! # FrameCrab API
//!
//! Construction and driver layer for FrameCrab windowed aggregation.
//!
//! Build a bounded job fluently: name the job, hand it the element sequence,
//! key it, frame it, pick an aggregate, execute:
//!
//! ```
//! use framecrab_api::environment::WindowEnvironment;
//! use framecrab_core::types::StreamElement;
//! use framecrab_core::window::{SumAggregate, WindowDefinition};
//!
//! let out = WindowEnvironment::new("doc-sum")
//!     .from_elements(vec![
//!         StreamElement::item((10i64, "a".to_string(), 2i64)),
//!         StreamElement::marker(10),
//!     ])
//!     .key_by(|e: &(i64, String, i64)| e.1.clone())
//!     .frames(
//!         WindowDefinition::tumbling(1).unwrap(),
//!         |e: &(i64, String, i64)| e.0,
//!     )
//!     .aggregate(SumAggregate::new(|e: &(i64, String, i64)| e.2))
//!     .execute()
//!     .unwrap();
//! assert_eq!(out.len(), 2); // one row + the forwarded marker
//! ```

pub mod environment;
pub mod pipeline;
