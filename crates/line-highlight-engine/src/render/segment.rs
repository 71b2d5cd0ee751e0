use crate::nodes::Node;

/// The inline nodes of one rendered line, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalLine {
    pub nodes: Vec<Node>,
}

impl LogicalLine {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenated visible text of the line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.push_text_content(&mut out);
        }
        out
    }
}

/// Splits a block's inline nodes into logical lines on [`Node::Break`].
///
/// Every break terminates the line accumulated so far, even when it is empty.
/// Nodes after the last break form a final line if there are any. An empty
/// input yields no lines.
pub fn segment_lines(nodes: &[Node]) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for node in nodes {
        match node {
            Node::Break => lines.push(LogicalLine::new(std::mem::take(&mut current))),
            other => current.push(other.clone()),
        }
    }
    if !current.is_empty() {
        lines.push(LogicalLine::new(current));
    }

    lines
}
