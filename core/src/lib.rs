//! dfs-viz-core: depth-first spanning forests over adjacency lists.
//!
//! Parses line-oriented (or JSON) adjacency lists into an interned graph,
//! walks it depth-first with an explicit stack, and renders the resulting
//! tree as plain text or Graphviz DOT. No file output lives here; the
//! `dfs-viz` binary owns that.

mod error;
mod graph;
mod parse;
mod render;
mod traversal;

pub use error::{GraphError, Result};
pub use graph::{Graph, NodeId, TraversalDirection};
pub use parse::{load_graph, parse_adjacency, parse_json, validate_graph, InputFormat};
pub use render::{render_dot, render_text, OutputFormat};
pub use traversal::{dfs_forest, DfsTree};
