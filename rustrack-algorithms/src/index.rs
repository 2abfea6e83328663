//! Hit-keyed index for chain lookup.

use rustrack_core::Segment;
use std::collections::HashMap;

/// Multi-map from hit index to the segments that start at that hit.
///
/// Looking up a segment's end hit yields every segment that continues it,
/// without scanning the whole segment list.
#[derive(Debug, Default, Clone)]
pub struct StartIndex {
    by_start: HashMap<usize, Vec<usize>>,
}

impl StartIndex {
    /// Index every segment of `segments` by its start hit.
    #[must_use]
    pub fn build(segments: &[Segment]) -> Self {
        let mut by_start: HashMap<usize, Vec<usize>> = HashMap::with_capacity(segments.len());
        for (segment_idx, segment) in segments.iter().enumerate() {
            by_start.entry(segment.start).or_default().push(segment_idx);
        }
        Self { by_start }
    }

    /// Segments starting at `hit`, in insertion order.
    #[must_use]
    pub fn starting_at(&self, hit: usize) -> &[usize] {
        self.by_start.get(&hit).map_or(&[][..], Vec::as_slice)
    }
}
