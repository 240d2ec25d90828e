use std::collections::BinaryHeap;

use daedal_core::Point;

use crate::PathRange;
use crate::pathrange::HeapEntry;
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range. `None` is an expected outcome, not an
    /// error: callers that need to distinguish configuration mistakes (an
    /// endpoint out of bounds or on a wall) must screen for them before
    /// searching.
    ///
    /// The open set uses lazy deletion: rediscovering a node with a cheaper g
    /// pushes a duplicate heap entry, and popped entries whose node is
    /// already closed with an equal-or-better g are skipped. Ties on f
    /// resolve by insertion order into the open set, so equal-cost inputs
    /// always reproduce the same path.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        // Initialise the start node.
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = pather.estimate(from, to);
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut seq: u32 = 0;
        let mut open: BinaryHeap<HeapEntry> = BinaryHeap::new();
        open.push(HeapEntry {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                // A node already visited this search is only reopened for a
                // strictly better g; equal-or-worse routes are dropped.
                if n.generation == cur_gen && tentative_g >= n.g {
                    continue;
                }

                n.generation = cur_gen;
                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(np, to);
                n.parent = ci;
                n.open = true;

                seq += 1;
                open.push(HeapEntry {
                    idx: ni,
                    f: n.f,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        // Reconstruct path by walking parents goal → start, then reverse.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::traits::{Pather, WeightedPather};
    use daedal_core::Range;

    /// Test map over string rows: '#' is a wall, anything else is open.
    struct CharMap {
        rows: Vec<&'static str>,
    }

    impl CharMap {
        fn new(rows: Vec<&'static str>) -> Self {
            Self { rows }
        }

        fn open(&self, p: Point) -> bool {
            if p.y < 0 || p.y as usize >= self.rows.len() {
                return false;
            }
            let row = self.rows[p.y as usize].as_bytes();
            if p.x < 0 || p.x as usize >= row.len() {
                return false;
            }
            row[p.x as usize] != b'#'
        }

        fn range(&self) -> Range {
            Range::new(0, 0, self.rows[0].len() as i32, self.rows.len() as i32)
        }
    }

    impl Pather for CharMap {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_4() {
                if self.open(n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for CharMap {
        fn cost(&self, _from: Point, _to: Point) -> i32 {
            1
        }
    }

    impl AstarPather for CharMap {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    fn assert_valid_path(map: &CharMap, path: &[Point], from: Point, to: Point) {
        assert_eq!(*path.first().unwrap(), from);
        assert_eq!(*path.last().unwrap(), to);
        for w in path.windows(2) {
            let d = w[1] - w[0];
            assert_eq!(d.x.abs() + d.y.abs(), 1, "step {} -> {}", w[0], w[1]);
        }
        for &p in path {
            assert!(map.open(p), "path crosses wall at {p}");
        }
    }

    #[test]
    fn open_grid_shortest_length() {
        let map = CharMap::new(vec![".....", ".....", ".....", ".....", "....."]);
        let mut pr = PathRange::new(map.range());
        let from = Point::new(0, 0);
        let to = Point::new(4, 4);
        let path = pr.astar_path(&map, from, to).unwrap();
        // Manhattan distance 8 → 9 cells including both endpoints.
        assert_eq!(path.len(), 9);
        assert_valid_path(&map, &path, from, to);
    }

    #[test]
    fn path_threads_the_only_gap() {
        let map = CharMap::new(vec![".....", ".....", "##.##", ".....", "....."]);
        let mut pr = PathRange::new(map.range());
        let path = pr.astar_path(&map, Point::new(0, 0), Point::new(0, 4)).unwrap();
        assert!(path.contains(&Point::new(2, 2)));
        assert_valid_path(&map, &path, Point::new(0, 0), Point::new(0, 4));
    }

    #[test]
    fn detour_is_still_shortest() {
        let map = CharMap::new(vec![
            "..#..", //
            "..#..", //
            "..#..", //
            ".....", //
            ".....",
        ]);
        let mut pr = PathRange::new(map.range());
        let path = pr.astar_path(&map, Point::new(0, 0), Point::new(4, 0)).unwrap();
        // Around the wall: down 3, across 4 (through the gap row), up 3.
        assert_eq!(path.len(), 11);
        assert_valid_path(&map, &path, Point::new(0, 0), Point::new(4, 0));
    }

    #[test]
    fn unreachable_returns_none() {
        let map = CharMap::new(vec!["..#..", "..#..", "..#..", "..#..", "..#.."]);
        let mut pr = PathRange::new(map.range());
        assert!(pr.astar_path(&map, Point::new(0, 0), Point::new(4, 4)).is_none());
    }

    #[test]
    fn same_start_and_goal() {
        let map = CharMap::new(vec!["...", "...", "..."]);
        let mut pr = PathRange::new(map.range());
        let p = Point::new(1, 1);
        assert_eq!(pr.astar_path(&map, p, p), Some(vec![p]));
    }

    #[test]
    fn out_of_range_endpoint_is_none() {
        let map = CharMap::new(vec!["...", "...", "..."]);
        let mut pr = PathRange::new(map.range());
        assert!(pr.astar_path(&map, Point::new(-1, 0), Point::new(2, 2)).is_none());
        assert!(pr.astar_path(&map, Point::new(0, 0), Point::new(3, 3)).is_none());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let map = CharMap::new(vec![".....", ".#.#.", ".....", ".#.#.", "....."]);
        let mut pr = PathRange::new(map.range());
        let from = Point::new(0, 0);
        let to = Point::new(4, 4);
        let first = pr.astar_path(&map, from, to).unwrap();
        for _ in 0..3 {
            assert_eq!(pr.astar_path(&map, from, to).unwrap(), first);
        }
        // A fresh PathRange agrees too.
        let mut fresh = PathRange::new(map.range());
        assert_eq!(fresh.astar_path(&map, from, to).unwrap(), first);
    }

    #[test]
    fn queries_do_not_leak_between_searches() {
        let map = CharMap::new(vec![".....", ".....", "##.##", ".....", "....."]);
        let mut pr = PathRange::new(map.range());
        let blocked = CharMap::new(vec![".....", ".....", "#####", ".....", "....."]);
        // Reachable on the gapped map...
        assert!(pr.astar_path(&map, Point::new(0, 0), Point::new(0, 4)).is_some());
        // ...and still correctly unreachable on the sealed one afterwards.
        assert!(
            pr.astar_path(&blocked, Point::new(0, 0), Point::new(0, 4))
                .is_none()
        );
    }
}
