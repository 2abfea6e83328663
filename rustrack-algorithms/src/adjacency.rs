//! Segment adjacency detection.
//!
//! Two segments are adjacent when the first ends at the hit where the
//! second starts. Segments are grouped by start hit once, then each
//! segment's end hit is looked up in that index, so the cost is linear in
//! the number of segments plus the number of pairs found.

use crate::index::StartIndex;
use rayon::prelude::*;
use rustrack_core::{AdjacencyPair, Segment};

/// Segment count above which the lookup pass runs on the rayon pool.
const PARALLEL_SEGMENT_THRESHOLD: usize = 16_384;

/// Finds every ordered pair `(i, j)`, `i != j`, with `segments[i].end == segments[j].start`.
///
/// Pairs are returned grouped by `i` in ascending order; within a group,
/// `j` follows segment order. A self-loop segment never pairs with itself.
pub fn segment_adjacent_pairs(segments: &[Segment]) -> Vec<AdjacencyPair> {
    adjacent_pairs(segments, true)
}

/// [`segment_adjacent_pairs`] with the rayon pass switched by `parallel`.
pub(crate) fn adjacent_pairs(segments: &[Segment], parallel: bool) -> Vec<AdjacencyPair> {
    if segments.is_empty() {
        return Vec::new();
    }
    let index = StartIndex::build(segments);
    let successors = |(i, segment): (usize, &Segment)| {
        index
            .starting_at(segment.end)
            .iter()
            .filter(move |&&j| j != i)
            .map(move |&j| AdjacencyPair::new(i, j))
    };

    if parallel && segments.len() >= PARALLEL_SEGMENT_THRESHOLD {
        segments
            .par_iter()
            .enumerate()
            .flat_map_iter(successors)
            .collect()
    } else {
        segments.iter().enumerate().flat_map(successors).collect()
    }
}
