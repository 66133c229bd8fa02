use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, traversing or rendering a graph.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A malformed adjacency record, text or JSON. `line` is 1-based.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("graph is empty")]
    EmptyGraph,

    #[error("node {neighbor:?} (neighbor of {node:?}) has no adjacency record")]
    DanglingNeighbor { node: String, neighbor: String },

    #[error("start node {0:?} not found in graph")]
    UnknownStartNode(String),

    #[error("unsupported format {0:?} (expected one of: text, dot)")]
    UnknownFormat(String),

    #[error("invalid direction {0:?} (expected one of: outgoing, incoming, both)")]
    UnknownDirection(String),

    #[error("unsupported input format {0:?} (expected one of: auto, text, json)")]
    UnknownInputFormat(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
