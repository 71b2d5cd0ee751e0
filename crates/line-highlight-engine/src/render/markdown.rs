//! Markdown to rendered blocks, using pulldown-cmark.
//!
//! This is the host side of the render hook: it produces the node tree that
//! [`process_blocks`](super::process_blocks) rewrites. Every source line break
//! inside a paragraph becomes a [`Node::Break`], so each source line is its own
//! logical line.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::nodes::{Block, BlockKind, Element, Node};

/// Parses markdown into top-level blocks.
pub fn render_markdown(source: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(source, options) {
        builder.event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<(BlockKind, Vec<Node>)>,
    /// Open inline (and table) elements, innermost last.
    open: Vec<Element>,
    /// One entry per open list: whether it is ordered.
    lists: Vec<bool>,
    quote_depth: usize,
    in_table_head: bool,
}

impl BlockBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                self.push_node(Node::Element(
                    Element::new("code").with_child(Node::text(code.as_ref())),
                ));
            }
            Event::InlineHtml(html) if is_line_break_tag(&html) => self.push_node(Node::Break),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak | Event::HardBreak => self.push_node(Node::Break),
            Event::Rule => {
                self.flush();
                self.blocks
                    .push(Block::new(BlockKind::ThematicBreak, Vec::new()));
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => match self.current_kind() {
                Some(BlockKind::ListItem { .. }) | Some(BlockKind::BlockQuote) => {
                    if self.current_has_content() {
                        self.push_node(Node::Break);
                    }
                }
                _ => self.begin(self.implicit_kind()),
            },
            Tag::Heading { level, .. } => self.begin(BlockKind::Heading(level as u8)),
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
                if self.quote_depth == 1 {
                    self.begin(BlockKind::BlockQuote);
                }
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.begin(BlockKind::CodeBlock { lang });
            }
            Tag::HtmlBlock => self.begin(BlockKind::Html),
            Tag::List(start) => {
                if matches!(self.current_kind(), Some(BlockKind::ListItem { .. })) {
                    self.flush();
                }
                self.lists.push(start.is_some());
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                let ordered = self.lists.last().copied().unwrap_or(false);
                self.begin(BlockKind::ListItem { depth, ordered });
            }
            Tag::Table(_) => self.begin(BlockKind::Table),
            Tag::TableHead => {
                self.in_table_head = true;
                self.open.push(Element::new("tr"));
            }
            Tag::TableRow => self.open.push(Element::new("tr")),
            Tag::TableCell => {
                let cell = if self.in_table_head { "th" } else { "td" };
                self.open.push(Element::new(cell));
            }
            Tag::Emphasis => self.open_inline(Element::new("em")),
            Tag::Strong => self.open_inline(Element::new("strong")),
            Tag::Strikethrough => self.open_inline(Element::new("del")),
            Tag::Link { dest_url, .. } => {
                self.open_inline(Element::new("a").with_attr("href", dest_url.as_ref()));
            }
            Tag::Image { dest_url, .. } => {
                self.open_inline(Element::new("img").with_attr("src", dest_url.as_ref()));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if matches!(self.current_kind(), Some(BlockKind::Paragraph)) {
                    self.flush();
                }
            }
            TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::Table => self.flush(),
            TagEnd::HtmlBlock => {
                if let Some((kind, children)) = self.current.as_mut()
                    && *kind == BlockKind::Html
                {
                    let raw: String = children.iter().map(Node::text_content).collect();
                    let lowered = raw.trim_start().to_ascii_lowercase();
                    if lowered.starts_with("<style") {
                        *kind = BlockKind::Style;
                    } else if lowered.starts_with("<script") {
                        *kind = BlockKind::Script;
                    }
                }
                self.flush();
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.flush();
                }
            }
            TagEnd::Item => {
                if matches!(self.current_kind(), Some(BlockKind::ListItem { .. })) {
                    self.flush();
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.close_inline();
            }
            TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link => self.close_inline(),
            TagEnd::Image => {
                if let Some(mut img) = self.open.pop() {
                    let alt: String = img.children.iter().map(Node::text_content).collect();
                    img.children.clear();
                    self.push_node(Node::Element(img.with_attr("alt", alt)));
                }
            }
            _ => {}
        }
    }

    fn current_kind(&self) -> Option<&BlockKind> {
        self.current.as_ref().map(|(kind, _)| kind)
    }

    fn current_has_content(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(_, children)| !children.is_empty())
    }

    fn begin(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some((kind, Vec::new()));
    }

    fn open_inline(&mut self, el: Element) {
        self.ensure_block();
        self.open.push(el);
    }

    fn close_inline(&mut self) {
        if let Some(el) = self.open.pop() {
            self.push_node(Node::Element(el));
        }
    }

    fn implicit_kind(&self) -> BlockKind {
        if self.quote_depth > 0 {
            BlockKind::BlockQuote
        } else {
            BlockKind::Paragraph
        }
    }

    /// Inline content outside any block (e.g. after a nested list closed its
    /// parent item) starts a paragraph.
    fn ensure_block(&mut self) {
        if self.current.is_none() {
            self.current = Some((self.implicit_kind(), Vec::new()));
        }
    }

    fn target(&mut self) -> &mut Vec<Node> {
        let kind = self.implicit_kind();
        if let Some(el) = self.open.last_mut() {
            return &mut el.children;
        }
        &mut self.current.get_or_insert_with(|| (kind, Vec::new())).1
    }

    fn push_text(&mut self, text: &str) {
        let target = self.target();
        if let Some(Node::Text(last)) = target.last_mut() {
            last.push_str(text);
        } else {
            target.push(Node::text(text));
        }
    }

    fn push_node(&mut self, node: Node) {
        self.target().push(node);
    }

    fn flush(&mut self) {
        while !self.open.is_empty() {
            self.close_inline();
        }
        if let Some((kind, mut children)) = self.current.take() {
            if matches!(kind, BlockKind::CodeBlock { .. })
                && let Some(Node::Text(code)) = children.last_mut()
                && code.ends_with('\n')
            {
                code.pop();
            }
            self.blocks.push(Block::new(kind, children));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// `<br>`, `<br/>` and `<br />`, any case.
fn is_line_break_tag(html: &str) -> bool {
    let tag = html.trim();
    let Some(inner) = tag.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
        return false;
    };
    inner.trim_end_matches('/').trim().eq_ignore_ascii_case("br")
}
