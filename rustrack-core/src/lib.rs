//! rustrack-core: Core types for curvature-based track reconstruction.
//!
//! This crate provides the passive data model shared by the algorithms:
//! contiguous point buffers, directed segments, the scoring configuration
//! and the sparse segment-interaction matrix.
//!

pub mod config;
pub mod error;
pub mod points;
pub mod segment;
pub mod sparse;

pub use config::CurvatureConfig;
pub use error::{Error, Result};
pub use points::PointBatch;
pub use segment::{segments_from_pairs, AdjacencyPair, Segment};
pub use sparse::InteractionMatrix;
