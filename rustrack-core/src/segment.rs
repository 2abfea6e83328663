//! Segment and adjacency-pair types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Directed candidate link between two hits, referenced by hit index.
///
/// A segment's identity is its position in the segment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Index of the hit the segment leaves from.
    pub start: usize,
    /// Index of the hit the segment arrives at.
    pub end: usize,
}

impl Segment {
    /// Creates a new segment.
    #[inline]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for Segment {
    #[inline]
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<[usize; 2]> for Segment {
    #[inline]
    fn from([start, end]: [usize; 2]) -> Self {
        Self::new(start, end)
    }
}

/// Ordered pair of segment indices forming a two-edge chain.
///
/// Segment `first` ends at the hit where segment `second` starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjacencyPair {
    /// Index of the incoming segment.
    pub first: usize,
    /// Index of the outgoing segment.
    pub second: usize,
}

impl AdjacencyPair {
    /// Creates a new adjacency pair.
    #[inline]
    #[must_use]
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

impl From<(usize, usize)> for AdjacencyPair {
    #[inline]
    fn from((first, second): (usize, usize)) -> Self {
        Self::new(first, second)
    }
}

/// Converts `(start, end)` tuples into segments.
#[must_use]
pub fn segments_from_pairs(pairs: &[(usize, usize)]) -> Vec<Segment> {
    pairs.iter().copied().map(Segment::from).collect()
}
