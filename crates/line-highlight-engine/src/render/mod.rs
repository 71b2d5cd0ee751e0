//! Line segmentation, marker extraction and dual-view rendering.
//!
//! The render hook ([`process_blocks`]) takes the blocks produced by a
//! rendering pipeline, splits each prose block into logical lines on explicit
//! breaks, looks for a trailing `%hl-<colour>%` marker on each line, and
//! replaces a marked line with two fragments: a background-highlighted block
//! fragment and an inline fragment with a marker pill. Which one is visible is
//! up to the stylesheet of the surrounding view (see [`crate::style`]).

pub mod dual_view;
pub mod extract;
pub mod markdown;
pub mod segment;

pub use dual_view::{RenderedLinePair, marker_pill, process_block, process_blocks, render_line};
pub use extract::{MarkerMatch, extract_marker, extract_marker_from_text};
pub use markdown::render_markdown;
pub use segment::{LogicalLine, segment_lines};

use crate::nodes::{Block, Node};

/// Markdown rendered for the reading view, with the render hook applied.
pub fn render_reading_view(source: &str) -> Vec<Block> {
    let mut blocks = render_markdown(source);
    process_blocks(&mut blocks);
    blocks
}

/// One processed single-line block per source line, for the live view where
/// every source line sits next to its gutter number.
pub fn render_live_lines(source: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = source
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let children = if line.is_empty() {
                Vec::new()
            } else {
                vec![Node::text(line)]
            };
            Block::paragraph(children)
        })
        .collect();
    process_blocks(&mut blocks);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_lines_follow_source_lines() {
        let blocks = render_live_lines("a\n\nb %hl-red%\n");

        assert_eq!(blocks.len(), 4);
        assert!(blocks[1].children.is_empty());
        assert_eq!(blocks[2].children.len(), 2);
        assert!(blocks[3].children.is_empty());
    }

    #[test]
    fn reading_view_skips_code() {
        let blocks = render_reading_view("```\ncode %hl-red%\n```\n\ntext %hl-red%\n");

        assert_eq!(blocks[0].text_content(), "code %hl-red%");
        assert_eq!(blocks[1].children.len(), 2);
    }
}
