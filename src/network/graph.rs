//! Network: a simple undirected graph keyed by integer node id

use serde::{Deserialize, Serialize};

/// Undirected graph over nodes `0..n` with insertion-ordered adjacency lists.
///
/// No self-loops and no parallel edges are ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    adjacency: Vec<Vec<usize>>,
}

impl Network {
    /// `n` isolated nodes
    pub fn empty(n: usize) -> Self {
        Self { adjacency: vec![Vec::new(); n] }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.adjacency.len()
    }

    /// Neighbors of `node` in the order their edges were added
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).contains(&v)
    }

    /// Add `u -- v`. Self-loops, duplicates and unknown nodes are ignored;
    /// returns whether an edge was inserted.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        let n = self.node_count();
        if u == v || u >= n || v >= n || self.has_edge(u, v) {
            return false;
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        true
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if !self.has_edge(u, v) {
            return false;
        }
        self.adjacency[u].retain(|&x| x != v);
        self.adjacency[v].retain(|&x| x != u);
        true
    }

    /// Every edge once as `(u, v)` with `u < v`.
    ///
    /// Nodes are visited in ascending order and each node's neighbors in
    /// adjacency order; this is the order games are played in.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (u, nbrs) in self.adjacency.iter().enumerate() {
            edges.extend(nbrs.iter().filter(|&&v| v > u).map(|&v| (u, v)));
        }
        edges
    }

    /// `node` followed by its neighbors
    pub fn closed_neighborhood(&self, node: usize) -> Vec<usize> {
        let mut pool = Vec::with_capacity(self.degree(node) + 1);
        pool.push(node);
        pool.extend_from_slice(self.neighbors(node));
        pool
    }
}
