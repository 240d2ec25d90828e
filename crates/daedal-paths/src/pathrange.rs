use daedal_core::{Point, Range};

// ---------------------------------------------------------------------------
// Internal node storage for A* searches
// ---------------------------------------------------------------------------

/// Per-cell search state, stored in a flat array indexed by cell.
///
/// `generation` stamps the search that last wrote the node; entries from
/// earlier searches are stale and treated as never visited.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for use in `BinaryHeap`.
///
/// Entries pop lowest `f` first. Ties on `f` are broken by `seq`, the order
/// of insertion into the open set (earlier wins), which makes the search
/// fully deterministic: identical inputs always return the identical path.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct HeapEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u32,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then smallest seq.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Coordinator for pathfinding queries on a grid rectangle.
///
/// `PathRange` owns the node array and scratch buffers so that repeated
/// queries incur no allocations after the first use. Searches never share
/// state with each other: a generation counter bumped at the start of every
/// query invalidates all nodes lazily.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = Range::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idx_point_round_trip() {
        let pr = PathRange::new(Range::new(2, 3, 8, 9));
        for p in pr.range().iter() {
            let i = pr.idx(p).unwrap();
            assert_eq!(pr.point(i), p);
        }
    }

    #[test]
    fn idx_out_of_range_is_none() {
        let pr = PathRange::new(Range::new(0, 0, 5, 5));
        assert!(pr.idx(Point::new(-1, 0)).is_none());
        assert!(pr.idx(Point::new(5, 0)).is_none());
        assert!(pr.idx(Point::new(0, 5)).is_none());
    }

    #[test]
    fn heap_entry_orders_by_f_then_insertion() {
        use std::collections::BinaryHeap;
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { idx: 0, f: 5, seq: 0 });
        heap.push(HeapEntry { idx: 1, f: 3, seq: 1 });
        heap.push(HeapEntry { idx: 2, f: 3, seq: 2 });
        heap.push(HeapEntry { idx: 3, f: 7, seq: 3 });
        // Lowest f first; equal f resolves to the earlier insertion.
        assert_eq!(heap.pop().unwrap().idx, 1);
        assert_eq!(heap.pop().unwrap().idx, 2);
        assert_eq!(heap.pop().unwrap().idx, 0);
        assert_eq!(heap.pop().unwrap().idx, 3);
    }
}
