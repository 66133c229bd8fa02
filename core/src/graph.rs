use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::error::GraphError;

/// Interned node index. Indices follow first appearance in the input, so
/// iterating `0..node_count()` walks nodes in input order.
pub type NodeId = usize;

/// Which edges a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalDirection {
    /// Follow edges as written in the adjacency list.
    #[default]
    Outgoing,
    /// Follow edges backwards (neighbor to node).
    Incoming,
    /// Follow both, outgoing first. Treats the input as undirected.
    Both,
}

impl FromStr for TraversalDirection {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" => Ok(TraversalDirection::Outgoing),
            "incoming" | "in" => Ok(TraversalDirection::Incoming),
            "both" => Ok(TraversalDirection::Both),
            _ => Err(GraphError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalDirection::Outgoing => "outgoing",
            TraversalDirection::Incoming => "incoming",
            TraversalDirection::Both => "both",
        };
        f.write_str(name)
    }
}

/// In-memory adjacency list with interned node names.
///
/// Edges are stored bidirectionally — `outgoing[a]` lists a's neighbors in
/// input order, `incoming[b]` lists the nodes naming b, in the order those
/// edges were added. A node is *declared* once it has its own record;
/// nodes only ever seen as neighbors stay undeclared.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    names: IndexSet<String>,
    outgoing: Vec<Vec<NodeId>>,
    incoming: Vec<Vec<NodeId>>,
    declared: Vec<bool>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(node, neighbors)` records, in order.
    pub fn from_adjacency<I, S, N>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: AsRef<str>,
        N: IntoIterator<Item = S>,
    {
        let mut graph = Graph::new();
        for (node, neighbors) in records {
            let from = graph.declare_node(node.as_ref());
            for neighbor in neighbors {
                let to = graph.intern_node(neighbor.as_ref());
                graph.add_edge(from, to);
            }
        }
        graph
    }

    /// Intern a node name, returning its index. Does not mark it declared.
    pub fn intern_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.names.get_index_of(name) {
            return id;
        }
        let (id, _) = self.names.insert_full(name.to_string());
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.declared.push(false);
        id
    }

    /// Intern a node and mark it as having its own adjacency record.
    pub fn declare_node(&mut self, name: &str) -> NodeId {
        let id = self.intern_node(name);
        self.declared[id] = true;
        id
    }

    /// Add a directed edge. Also inserts into the incoming adjacency list.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.outgoing[from].push(to);
        self.incoming[to].push(from);
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get_index_of(name)
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.names.get_index(id).map(String::as_str)
    }

    pub fn is_declared(&self, id: NodeId) -> bool {
        self.declared.get(id).copied().unwrap_or(false)
    }

    pub fn neighbors_out(&self, id: NodeId) -> &[NodeId] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn neighbors_in(&self, id: NodeId) -> &[NodeId] {
        self.incoming.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Nodes in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.names.iter().enumerate().map(|(id, name)| (id, name.as_str()))
    }

    /// Nodes referenced as neighbors that never got a record of their own.
    pub fn undeclared(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.names.len()).filter(|&id| !self.declared[id])
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
