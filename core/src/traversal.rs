use indexmap::IndexMap;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId, TraversalDirection};

/// Depth-first spanning forest of a graph.
///
/// `tree` holds every visited node exactly once, keyed in input order, with
/// its tree-edge children in discovery order. Back, forward and cross edges
/// are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfsTree {
    pub tree: IndexMap<String, Vec<String>>,
    /// Component roots in the order each walk started. The first is the
    /// requested start node.
    pub roots: Vec<String>,
    /// Pre-order: every node in the order it was first reached.
    pub discovery_order: Vec<String>,
}

impl DfsTree {
    pub fn children(&self, node: &str) -> Option<&[String]> {
        self.tree.get(node).map(|v| v.as_slice())
    }

    /// All tree edges as `(parent, child)`, parents in tree order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tree.iter().flat_map(|(parent, children)| {
            children
                .iter()
                .map(move |child| (parent.as_str(), child.as_str()))
        })
    }

    pub fn is_root(&self, node: &str) -> bool {
        self.roots.iter().any(|r| r == node)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Iterate neighbors according to a traversal direction filter.
///
/// Uses boolean flags so the same concrete iterator type serves every
/// direction, which lets traversal frames live in a plain `Vec`.
fn iter_neighbors(
    graph: &Graph,
    node: NodeId,
    dir: TraversalDirection,
) -> impl Iterator<Item = NodeId> + '_ {
    let (use_out, use_inc) = match dir {
        TraversalDirection::Outgoing => (true, false),
        TraversalDirection::Incoming => (false, true),
        TraversalDirection::Both => (true, true),
    };

    let out_iter = graph
        .neighbors_out(node)
        .iter()
        .copied()
        .filter(move |_| use_out);

    let in_iter = graph
        .neighbors_in(node)
        .iter()
        .copied()
        .filter(move |_| use_inc);

    out_iter.chain(in_iter)
}

/// Full depth-first traversal producing a spanning forest.
///
/// Starts at `start` (or the first node of the input when `None`). Once
/// everything reachable is exhausted, restarts from the next unvisited node
/// in input order until every node is covered.
///
/// Walks with an explicit stack of `(node, neighbor iterator)` frames, so the
/// discovery order matches the recursive formulation without its depth limit.
pub fn dfs_forest(
    graph: &Graph,
    start: Option<&str>,
    direction: TraversalDirection,
) -> Result<DfsTree> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let root = match start {
        Some(name) => graph
            .node_id(name)
            .ok_or_else(|| GraphError::UnknownStartNode(name.to_string()))?,
        None => 0,
    };

    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut children: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    let mut discovery: Vec<NodeId> = Vec::with_capacity(n);
    let mut roots: Vec<NodeId> = Vec::new();

    for candidate in std::iter::once(root).chain(0..n) {
        if visited[candidate] {
            continue;
        }
        roots.push(candidate);
        walk(
            graph,
            candidate,
            direction,
            &mut visited,
            &mut children,
            &mut discovery,
        );
    }

    debug!(
        nodes = n,
        edges = graph.edge_count(),
        components = roots.len(),
        %direction,
        "dfs traversal complete"
    );

    let name = |id: NodeId| graph.node_name(id).unwrap_or_default().to_string();

    let tree: IndexMap<String, Vec<String>> = children
        .iter()
        .enumerate()
        .map(|(id, kids)| (name(id), kids.iter().map(|&k| name(k)).collect::<Vec<_>>()))
        .collect();

    Ok(DfsTree {
        tree,
        roots: roots.into_iter().map(name).collect(),
        discovery_order: discovery.into_iter().map(name).collect(),
    })
}

/// Depth-first walk of one component from `start`.
fn walk(
    graph: &Graph,
    start: NodeId,
    direction: TraversalDirection,
    visited: &mut [bool],
    children: &mut [Vec<NodeId>],
    discovery: &mut Vec<NodeId>,
) {
    visited[start] = true;
    discovery.push(start);
    let mut stack = vec![(start, iter_neighbors(graph, start, direction))];

    while let Some((node, neighbors)) = stack.last_mut() {
        let node = *node;
        match neighbors.next() {
            Some(next) if !visited[next] => {
                visited[next] = true;
                children[node].push(next);
                discovery.push(next);
                stack.push((next, iter_neighbors(graph, next, direction)));
            }
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }
}
