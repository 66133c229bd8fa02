use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::GraphError;
use crate::traversal::DfsTree;

/// Output representation of a DFS tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `node -> child, child` lines.
    #[default]
    Text,
    /// Graphviz DOT digraph.
    Dot,
}

impl OutputFormat {
    pub fn render(self, tree: &DfsTree) -> String {
        match self {
            OutputFormat::Text => render_text(tree),
            OutputFormat::Dot => render_dot(tree),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(GraphError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Dot => "dot",
        })
    }
}

/// One line per node in tree order. Childless nodes end at the arrow.
pub fn render_text(tree: &DfsTree) -> String {
    let mut out = String::new();
    for (node, children) in &tree.tree {
        if children.is_empty() {
            let _ = writeln!(out, "{node} ->");
        } else {
            let _ = writeln!(out, "{node} -> {}", children.join(", "));
        }
    }
    out
}

/// Graphviz digraph with one statement per tree edge.
///
/// Roots with no children get a bare node statement; every other node
/// already shows up as the head of its parent's edge.
pub fn render_dot(tree: &DfsTree) -> String {
    let mut out = String::from("digraph {\n");
    for (node, children) in &tree.tree {
        if children.is_empty() {
            if tree.is_root(node) {
                let _ = writeln!(out, "  {};", quote_dot(node));
            }
            continue;
        }
        for child in children {
            let _ = writeln!(out, "  {} -> {};", quote_dot(node), quote_dot(child));
        }
    }
    out.push_str("}\n");
    out
}

/// DOT quoted-string identifier.
fn quote_dot(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
