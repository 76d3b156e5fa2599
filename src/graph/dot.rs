//! DOT text output.

use super::{EdgeKind, Graph, NodeKind, ROOT_NODE};
use std::fmt;

impl Graph {
    /// Print the graph in DOT format.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        writeln!(f, "  graph [rankdir=TB]")?;
        writeln!(f)?;
        writeln!(f, "  {ROOT_NODE} [label=\"\", shape=plaintext]")?;
        if let Some(first) = self.nodes.first() {
            writeln!(f, "  {ROOT_NODE} -> {}", first.id)?;
        }
        writeln!(f)?;

        writeln!(f, "  // nodes")?;
        for node in &self.nodes {
            let shape = match node.kind {
                NodeKind::State => "box",
                NodeKind::Action => "oval",
            };
            writeln!(
                f,
                "  {} [label=\"{}\", shape={}]",
                node.id,
                escape(&node.label),
                shape
            )?;
        }
        writeln!(f)?;

        writeln!(f, "  // links")?;
        for edge in &self.edges {
            match edge.kind {
                EdgeKind::Source => writeln!(f, "  {} -> {} [arrowhead=none]", edge.from, edge.to)?,
                EdgeKind::Target => writeln!(f, "  {} -> {}", edge.from, edge.to)?,
            }
        }
        writeln!(f, "}}")
    }
}

fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
