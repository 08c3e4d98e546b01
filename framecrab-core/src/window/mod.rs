use std::collections::HashMap;
use std::hash::Hash;

use anyhow::Result;

use crate::types::{FrameSeq, ProgressMarker, StreamData, StreamElement, WindowFrame};

mod aggregate;
mod aggregates;
mod definition;
mod frame_store;
mod operator;
mod sliding;

pub use aggregate::*;
pub use aggregates::*;
pub use definition::*;
pub use frame_store::*;
pub use operator::*;
pub use sliding::*;

#[cfg(test)]
#[path = "tests/window_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/operator_tests.rs"]
mod operator_tests;
