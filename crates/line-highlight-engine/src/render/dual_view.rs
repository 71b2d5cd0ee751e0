use std::ops::Range;

use crate::grammar::{ColorTag, contains_marker, marker_token};
use crate::nodes::{Block, Element, Node};

use super::extract::{MarkerMatch, extract_marker};
use super::segment::{LogicalLine, segment_lines};

pub const BLOCK_CONTAINER_CLASS: &str = "hl-block-container";
pub const BLOCK_CLASS: &str = "hl-block";
pub const INLINE_CONTAINER_CLASS: &str = "hl-inline-container";
pub const INLINE_MARKER_CLASS: &str = "hl-inline-marker";

/// The two renderings of one logical line.
///
/// Reading view shows the block fragment, live view the inline fragment; the
/// stylesheet hides the other one. An unmarked line renders the same in both
/// views so its nodes are emitted once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedLinePair {
    Plain(Vec<Node>),
    Highlighted {
        color: ColorTag,
        block: Element,
        inline: Element,
    },
}

impl RenderedLinePair {
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            RenderedLinePair::Plain(nodes) => nodes,
            RenderedLinePair::Highlighted { block, inline, .. } => {
                vec![Node::Element(block), Node::Element(inline)]
            }
        }
    }
}

/// Where the marker token lives inside a line's node tree.
struct RunLocation {
    /// Child indices from the line's top level down to the text run.
    path: Vec<usize>,
    /// Offset of the run's first byte in the line's flattened text.
    start: usize,
    text: String,
}

/// Finds the text run that wholly contains `token`. Returns `None` when the
/// token is split across runs or sits inside inline code.
fn locate_run(
    nodes: &[Node],
    token: &Range<usize>,
    offset: &mut usize,
    path: &mut Vec<usize>,
) -> Option<RunLocation> {
    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => {
                let start = *offset;
                *offset += text.len();
                if start <= token.start && token.end <= *offset {
                    let mut run_path = path.clone();
                    run_path.push(i);
                    return Some(RunLocation {
                        path: run_path,
                        start,
                        text: text.clone(),
                    });
                }
            }
            Node::Break => {}
            Node::Element(el) if el.tag == "code" => {
                *offset += text_len(&el.children);
            }
            Node::Element(el) => {
                path.push(i);
                let found = locate_run(&el.children, token, offset, path);
                path.pop();
                if found.is_some() {
                    return found;
                }
            }
        }
        if *offset > token.start {
            return None;
        }
    }
    None
}

fn text_len(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => text.len(),
            Node::Break => 0,
            Node::Element(el) => text_len(&el.children),
        })
        .sum()
}

/// Replaces the node at `path` with `replacement` (possibly empty).
fn splice_run(nodes: &mut Vec<Node>, path: &[usize], replacement: Vec<Node>) {
    match path {
        [] => {}
        [i] => {
            if *i < nodes.len() {
                nodes.splice(*i..*i + 1, replacement);
            }
        }
        [i, rest @ ..] => {
            if let Some(Node::Element(el)) = nodes.get_mut(*i) {
                splice_run(&mut el.children, rest, replacement);
            }
        }
    }
}

fn non_empty_text(parts: impl IntoIterator<Item = Node>) -> Vec<Node> {
    parts
        .into_iter()
        .filter(|n| !matches!(n, Node::Text(t) if t.is_empty()))
        .collect()
}

fn highlight_style(color: ColorTag) -> String {
    format!(
        "background:{};border-radius:0.25em;",
        color.highlight().css()
    )
}

/// The pill shown in place of the marker in live view.
pub fn marker_pill(color: ColorTag) -> Element {
    Element::new("span")
        .with_class(INLINE_MARKER_CLASS)
        .with_style(format!("background:{};color:#666;", color.highlight().css()))
        .with_child(Node::text(marker_token(color)))
}

/// Builds both fragments for a line whose marker was found at `found`.
fn highlight_line(line: &LogicalLine, found: &MarkerMatch) -> Option<RenderedLinePair> {
    let run = locate_run(&line.nodes, &found.token, &mut 0, &mut Vec::new())?;

    let strip_start = found.strip_start.max(run.start) - run.start;
    let token_start = found.token.start - run.start;
    let token_end = found.token.end - run.start;

    let mut stripped = line.nodes.clone();
    splice_run(
        &mut stripped,
        &run.path,
        non_empty_text([Node::text(&run.text[..strip_start])]),
    );

    let mut with_pill = line.nodes.clone();
    splice_run(
        &mut with_pill,
        &run.path,
        non_empty_text([
            Node::text(&run.text[..token_start]),
            Node::Element(marker_pill(found.color)),
            Node::text(&run.text[token_end..]),
        ]),
    );

    let block = Element::new("span").with_class(BLOCK_CONTAINER_CLASS).with_child(
        Element::new("span")
            .with_class(BLOCK_CLASS)
            .with_style(highlight_style(found.color))
            .with_children(stripped),
    );
    let inline = Element::new("span")
        .with_class(INLINE_CONTAINER_CLASS)
        .with_children(with_pill);

    Some(RenderedLinePair::Highlighted {
        color: found.color,
        block,
        inline,
    })
}

/// Renders one logical line into its block/inline pair.
pub fn render_line(line: &LogicalLine) -> RenderedLinePair {
    extract_marker(line)
        .and_then(|found| highlight_line(line, &found))
        .unwrap_or_else(|| RenderedLinePair::Plain(line.nodes.clone()))
}

fn already_rendered(nodes: &[Node]) -> bool {
    nodes.iter().any(|n| match n {
        Node::Element(el) => el.has_class(BLOCK_CONTAINER_CLASS) || el.has_class(INLINE_CONTAINER_CLASS),
        _ => false,
    })
}

/// Render hook for one block. Prose blocks get their lines rewritten into
/// block/inline pairs; every other kind is left untouched. Returns whether
/// any line carried a marker.
pub fn process_block(block: &mut Block) -> bool {
    if !block.kind.is_prose() {
        log::trace!("Skipping non-prose block {:?}", block.kind);
        return false;
    }
    if already_rendered(&block.children) {
        log::trace!("Block already carries highlight fragments");
        return false;
    }
    if !contains_marker(&block.text_content()) {
        return false;
    }

    let lines = segment_lines(&block.children);
    let mut highlighted = false;
    let mut children = Vec::with_capacity(block.children.len());

    for (i, line) in lines.iter().enumerate() {
        let pair = render_line(line);
        highlighted |= matches!(pair, RenderedLinePair::Highlighted { .. });
        children.extend(pair.into_nodes());
        if i + 1 != lines.len() {
            children.push(Node::Break);
        }
    }
    if matches!(block.children.last(), Some(Node::Break)) {
        children.push(Node::Break);
    }

    block.children = children;
    highlighted
}

/// Render hook for a whole rendered document.
pub fn process_blocks(blocks: &mut [Block]) {
    let highlighted = blocks
        .iter_mut()
        .map(process_block)
        .filter(|&changed| changed)
        .count();
    log::debug!(
        "Processed {} blocks, {} with highlighted lines",
        blocks.len(),
        highlighted
    );
}
