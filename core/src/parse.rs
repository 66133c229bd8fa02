//! Adjacency-list loaders.
//!
//! Text records are `node neighbor neighbor ...`, one per line. Blank lines
//! and `#` comments are skipped; anything else that cannot be a record is a
//! hard error, never a silent skip.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};

/// How the input file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON for `.json` paths, text otherwise.
    #[default]
    Auto,
    Text,
    Json,
}

impl InputFormat {
    /// Resolve `Auto` against a file path.
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Json
                } else {
                    InputFormat::Text
                }
            }
            other => other,
        }
    }
}

impl FromStr for InputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "text" | "txt" => Ok(InputFormat::Text),
            "json" => Ok(InputFormat::Json),
            _ => Err(GraphError::UnknownInputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Auto => "auto",
            InputFormat::Text => "text",
            InputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

fn has_control_char(token: &str) -> bool {
    token.chars().any(char::is_control)
}

/// Parse whitespace-separated adjacency records.
pub fn parse_adjacency(input: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    let mut record_lines: HashMap<NodeId, usize> = HashMap::new();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(node) = tokens.next() else {
            continue;
        };
        let neighbors: Vec<&str> = tokens.collect();

        if let Some(bad) = std::iter::once(node)
            .chain(neighbors.iter().copied())
            .find(|t| has_control_char(t))
        {
            return Err(GraphError::Parse {
                line: line_no,
                message: format!("token {bad:?} contains a control character"),
            });
        }

        let from = graph.declare_node(node);
        if let Some(first) = record_lines.insert(from, line_no) {
            return Err(GraphError::Parse {
                line: line_no,
                message: format!("duplicate record for node {node:?} (first defined on line {first})"),
            });
        }

        for neighbor in neighbors {
            let to = graph.intern_node(neighbor);
            graph.add_edge(from, to);
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed text adjacency list"
    );
    Ok(graph)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonNodeId {
    Name(String),
    Number(serde_json::Number),
}

impl JsonNodeId {
    fn into_name(self) -> String {
        match self {
            JsonNodeId::Name(s) => s,
            JsonNodeId::Number(n) => n.to_string(),
        }
    }
}

/// JSON adjacency records in document order.
///
/// Deserialized through a map visitor rather than a map type so that a
/// repeated key is rejected instead of silently replacing the earlier record.
struct JsonRecords(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for JsonRecords {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(JsonRecordsVisitor)
    }
}

struct JsonRecordsVisitor;

impl<'de> Visitor<'de> for JsonRecordsVisitor {
    type Value = JsonRecords;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping node ids to arrays of neighbor ids")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(node) = map.next_key::<String>()? {
            if has_control_char(&node) {
                return Err(de::Error::custom(format!(
                    "token {node:?} contains a control character"
                )));
            }
            if !seen.insert(node.clone()) {
                return Err(de::Error::custom(format!(
                    "duplicate record for node {node:?}"
                )));
            }

            let neighbors: Vec<String> = map
                .next_value::<Vec<JsonNodeId>>()?
                .into_iter()
                .map(JsonNodeId::into_name)
                .collect();
            if let Some(bad) = neighbors.iter().find(|n| has_control_char(n)) {
                return Err(de::Error::custom(format!(
                    "token {bad:?} contains a control character"
                )));
            }
            records.push((node, neighbors));
        }
        Ok(JsonRecords(records))
    }
}

/// Parse a JSON object of `node -> [neighbors]`. Key order is kept.
///
/// Shape errors, repeated keys and bad tokens all surface as
/// [`GraphError::Parse`] carrying the line serde_json stopped on.
pub fn parse_json(input: &str) -> Result<Graph> {
    let JsonRecords(records) = serde_json::from_str(input).map_err(|err| {
        let full = err.to_string();
        let position = format!(" at line {} column {}", err.line(), err.column());
        let message = full.strip_suffix(&position).unwrap_or(&full).to_string();
        GraphError::Parse {
            line: err.line(),
            message,
        }
    })?;

    let graph = Graph::from_adjacency(records);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed json adjacency list"
    );
    Ok(graph)
}

/// Basic structural checks before traversal.
///
/// An empty graph is always rejected. Neighbors without a record of their
/// own are kept as leaves with a warning, or rejected when `strict`.
pub fn validate_graph(graph: &Graph, strict: bool) -> Result<()> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    for id in graph.undeclared() {
        let neighbor = graph.node_name(id).unwrap_or_default();
        let node = graph
            .neighbors_in(id)
            .first()
            .and_then(|&from| graph.node_name(from))
            .unwrap_or_default();
        if strict {
            return Err(GraphError::DanglingNeighbor {
                node: node.to_string(),
                neighbor: neighbor.to_string(),
            });
        }
        warn!(node, neighbor, "neighbor has no adjacency record, treating it as a leaf");
    }
    Ok(())
}

/// Read and parse a graph file in one go.
pub fn load_graph(path: &Path, format: InputFormat) -> Result<Graph> {
    let input = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            GraphError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GraphError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    match format.resolve(path) {
        InputFormat::Json => parse_json(&input),
        _ => parse_adjacency(&input),
    }
}
