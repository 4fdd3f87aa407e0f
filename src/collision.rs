//! Consolidation of pairwise rear-end overlaps into groups of touching vehicles.

use crate::data::CollisionGroup;
use std::collections::BTreeMap;

/// A disjoint-set forest over the indices `0..len`, with path compression
/// and union by size.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    /// Finds the representative of the set containing `idx`.
    pub fn find(&mut self, idx: usize) -> usize {
        let mut root = idx;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut idx = idx;
        while self.parent[idx] != root {
            let next = self.parent[idx];
            self.parent[idx] = root;
            idx = next;
        }
        root
    }

    /// Merges the sets containing `a` and `b`.
    /// Returns `false` if they were already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        let (big, small) = if self.size[a] >= self.size[b] {
            (a, b)
        } else {
            (b, a)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

/// Merges raw collision pairs into maximal connected groups.
///
/// Indices that appear in no pair are not reported. Groups are returned in
/// order of their smallest member.
pub fn consolidate_collisions(pairs: &[(usize, usize)]) -> Vec<CollisionGroup> {
    let len = match pairs.iter().map(|&(a, b)| usize::max(a, b)).max() {
        Some(max) => max + 1,
        None => return vec![],
    };

    let mut sets = DisjointSet::new(len);
    for &(a, b) in pairs {
        sets.union(a, b);
    }

    let mut groups: BTreeMap<usize, CollisionGroup> = BTreeMap::new();
    for &(a, b) in pairs {
        for idx in [a, b] {
            let root = sets.find(idx);
            groups.entry(root).or_default().insert(idx);
        }
    }

    let mut groups: Vec<_> = groups.into_values().collect();
    groups.sort_by_key(|group| group.iter().next().copied());
    groups
}
