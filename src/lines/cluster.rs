//! Proximity clustering of polar lines.
//!
//! Two lines are *near* when both their distance and angle differ by less
//! than the configured thresholds. Near pairs are merged transitively, so a
//! cluster is a connected component of the near-relation graph. Lines that
//! are near to nothing end up as singleton clusters.

use crate::error::FrameError;
use crate::types::Line;
use log::debug;
use serde::{Deserialize, Serialize};

/// Thresholds of the near relation.
///
/// The angle difference is the plain difference of the stored angles; lines
/// on opposite sides of the `0/π` wrap are not considered near.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityThresholds {
    /// Maximum |Δdistance| in pixels (exclusive).
    pub distance: f64,
    /// Maximum |Δangle| in radians (exclusive).
    pub angle: f64,
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self {
            distance: 500.0,
            angle: std::f64::consts::PI / 18.0,
        }
    }
}

impl ProximityThresholds {
    #[inline]
    pub fn are_near(&self, a: &Line, b: &Line) -> bool {
        (a.distance - b.distance).abs() < self.distance && (a.angle - b.angle).abs() < self.angle
    }
}

/// Disjoint-set forest with path compression and union by size.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets holding `a` and `b`. Returns `false` when they were
    /// already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    pub fn set_size(&mut self, x: usize) -> usize {
        let r = self.find(x);
        self.size[r]
    }
}

/// Groups lines into border clusters.
///
/// The result partitions `0..lines.len()`: each index appears in exactly one
/// group. Multi-line groups come first, ordered by their smallest member,
/// followed by the singleton groups of lines that had no near neighbour.
/// Members are ascending within a group.
pub fn cluster_lines(lines: &[Line], thresholds: &ProximityThresholds) -> Vec<Vec<usize>> {
    let n = lines.len();
    if n == 0 {
        return Vec::new();
    }

    let mut dsu = DisjointSet::new(n);
    let mut near_pairs = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if thresholds.are_near(&lines[i], &lines[j]) {
                near_pairs += 1;
                dsu.union(i, j);
            }
        }
    }

    // Slot per root, in order of first (smallest) member.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut residual: Vec<usize> = Vec::new();
    for i in 0..n {
        if dsu.set_size(i) == 1 {
            residual.push(i);
            continue;
        }
        let root = dsu.find(i);
        let slot = match slot_of_root[root] {
            Some(s) => s,
            None => {
                groups.push(Vec::new());
                slot_of_root[root] = Some(groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].push(i);
    }

    let merged = groups.len();
    groups.extend(residual.into_iter().map(|i| vec![i]));
    debug!(
        "cluster: lines={} near_pairs={} merged_groups={} singletons={}",
        n,
        near_pairs,
        merged,
        groups.len() - merged
    );
    groups
}

/// Rejects clusterings with more groups than a frame can have.
///
/// A large group count means the detector picked up map content rather than
/// only frame edges; the parameters need tuning.
pub fn ensure_group_limit(groups: &[Vec<usize>], max_groups: usize) -> Result<(), FrameError> {
    if groups.len() > max_groups {
        return Err(FrameError::TooManyGroups {
            groups: groups.len(),
            max: max_groups,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(raw: &[(f64, f64)]) -> Vec<Line> {
        raw.iter().map(|&(d, a)| Line::new(d, a)).collect()
    }

    fn assert_partition(groups: &[Vec<usize>], n: usize) {
        let mut seen = vec![false; n];
        for g in groups {
            assert!(!g.is_empty(), "empty group in {:?}", groups);
            for &i in g {
                assert!(i < n, "index {i} out of range");
                assert!(!seen[i], "index {i} appears twice in {:?}", groups);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "missing index in {:?}", groups);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(cluster_lines(&[], &ProximityThresholds::default()).is_empty());
    }

    #[test]
    fn distant_lines_stay_singletons() {
        let ls = lines(&[(50.0, 0.0), (450.0, 1.5708), (1200.0, 0.0)]);
        let groups = cluster_lines(&ls, &ProximityThresholds::default());
        assert_eq!(groups, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn near_pairs_merge_into_two_groups() {
        let ls = lines(&[(100.0, 0.0), (100.3, 0.05), (400.0, 1.57), (402.0, 1.60)]);
        let groups = cluster_lines(&ls, &ProximityThresholds::default());
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn merge_is_transitive() {
        // 0~1 and 1~2 but 0 and 2 are 800 px apart.
        let ls = lines(&[(0.0, 0.0), (400.0, 0.0), (800.0, 0.0)]);
        let groups = cluster_lines(&ls, &ProximityThresholds::default());
        assert_eq!(groups, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn residual_singletons_follow_merged_groups() {
        let ls = lines(&[(3000.0, 1.0), (10.0, 0.0), (12.0, 0.01)]);
        let groups = cluster_lines(&ls, &ProximityThresholds::default());
        assert_eq!(groups, vec![vec![1, 2], vec![0]]);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let t = ProximityThresholds::default();
        assert!(!t.are_near(&Line::new(0.0, 0.0), &Line::new(500.0, 0.0)));
        assert!(!t.are_near(&Line::new(0.0, 0.0), &Line::new(0.0, t.angle)));
        assert!(t.are_near(&Line::new(0.0, 0.0), &Line::new(499.9, 0.1)));
    }

    #[test]
    fn group_limit_is_enforced() {
        let groups: Vec<Vec<usize>> = (0..11).map(|i| vec![i]).collect();
        assert_eq!(
            ensure_group_limit(&groups, 10),
            Err(FrameError::TooManyGroups { groups: 11, max: 10 })
        );
        assert!(ensure_group_limit(&groups[..10], 10).is_ok());
    }

    #[test]
    fn disjoint_set_tracks_sizes() {
        let mut dsu = DisjointSet::new(5);
        assert!(dsu.union(0, 1));
        assert!(dsu.union(3, 1));
        assert!(!dsu.union(0, 3));
        assert_eq!(dsu.set_size(3), 3);
        assert_eq!(dsu.set_size(2), 1);
        assert_eq!(dsu.find(0), dsu.find(3));
    }

    proptest! {
        #[test]
        fn prop_groups_partition_indices(
            raw in prop::collection::vec((-3000.0..3000.0f64, 0.0..std::f64::consts::PI), 0..40)
        ) {
            let ls: Vec<Line> = raw.iter().map(|&(d, a)| Line::new(d, a)).collect();
            let groups = cluster_lines(&ls, &ProximityThresholds::default());
            assert_partition(&groups, ls.len());
        }

        #[test]
        fn prop_singletons_have_no_near_neighbour(
            raw in prop::collection::vec((-3000.0..3000.0f64, 0.0..std::f64::consts::PI), 1..40)
        ) {
            let t = ProximityThresholds::default();
            let ls: Vec<Line> = raw.iter().map(|&(d, a)| Line::new(d, a)).collect();
            for g in cluster_lines(&ls, &t) {
                if g.len() == 1 {
                    let i = g[0];
                    for (j, other) in ls.iter().enumerate() {
                        prop_assert!(i == j || !t.are_near(&ls[i], other));
                    }
                } else {
                    // Every member is near to at least one other member.
                    for &i in &g {
                        prop_assert!(g.iter().any(|&j| j != i && t.are_near(&ls[i], &ls[j])));
                    }
                }
            }
        }
    }
}
