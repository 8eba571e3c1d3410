//! Append-only tree store shared by the sampling-based planners
//!
//! Nodes live in a flat arena and refer to their parent by index, so the
//! tree is cache-friendly to scan and cannot form reference cycles.
//! Rewiring mutates `parent` and `cost` in place; nodes are never removed.

use crate::common::State;

/// Tree node: a state, a parent link, and the accumulated path length from
/// the root along parent links.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: State,
    pub parent: Option<usize>,
    pub cost: f64,
}

impl Node {
    pub fn new(state: State, parent: Option<usize>, cost: f64) -> Self {
        Node { state, parent, cost }
    }
}

/// Arena of tree nodes with linear nearest-neighbor and radius queries.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Tree containing only the root at `state` with cost 0.
    pub fn with_root(state: State) -> Self {
        Tree {
            nodes: vec![Node::new(state, None, 0.0)],
        }
    }

    /// Append a node and return its index.
    pub fn add(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Index of the node nearest to `state` by Euclidean distance.
    ///
    /// Ties break to the first node scanned, which keeps the planners
    /// deterministic under a fixed seed.
    pub fn nearest(&self, state: &State) -> usize {
        let mut min_dist = f64::INFINITY;
        let mut min_index = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            let dist = node.state.distance_from(state);
            if dist < min_dist {
                min_dist = dist;
                min_index = i;
            }
        }
        min_index
    }

    /// Indices of all nodes strictly within `radius` of `state`.
    pub fn near_indices(&self, state: &State, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                if node.state.distance_from(state) < radius {
                    Some(i)
                } else {
                    None
                }
            })
            .collect()
    }
}
