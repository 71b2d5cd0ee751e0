//! Rendered node tree handed to the render hook.
//!
//! A [`Block`] is one top-level rendered element (paragraph, heading, list
//! item...). Its children are inline [`Node`]s: text runs, explicit line
//! breaks and nested elements.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// An inline node inside a rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of text.
    Text(String),
    /// An explicit line break separating logical lines.
    Break,
    /// A nested element such as `em`, `code` or `span`.
    Element(Element),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// Visible text of this node, descending into nested elements.
    /// Breaks contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text_content(&mut out);
        out
    }

    pub(crate) fn push_text_content(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Break => {}
            Node::Element(el) => {
                for child in &el.children {
                    child.push_text_content(out);
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&encode_text(t)),
            Node::Break => out.push_str("<br>"),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// A nested element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_style(self, style: impl Into<String>) -> Self {
        self.with_attr("style", style)
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Value of the first attribute with this name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Kind of a top-level rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    ListItem { depth: usize, ordered: bool },
    BlockQuote,
    CodeBlock { lang: Option<String> },
    Table,
    ThematicBreak,
    Html,
    Style,
    Script,
}

impl BlockKind {
    /// Prose blocks hold lines of text that may carry markers. Everything else
    /// is left alone by the render hook.
    pub fn is_prose(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph
                | BlockKind::Heading(_)
                | BlockKind::ListItem { .. }
                | BlockKind::BlockQuote
        )
    }
}

/// One top-level rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub children: Vec<Node>,
}

impl Block {
    pub fn new(kind: BlockKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(BlockKind::Paragraph, children)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text_content(&mut out);
        }
        out
    }

    /// Number of explicit line breaks directly inside this block.
    pub fn break_count(&self) -> usize {
        self.children
            .iter()
            .filter(|n| matches!(n, Node::Break))
            .count()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_children(&self, out: &mut String) {
        for child in &self.children {
            child.write_html(out);
        }
    }

    fn write_html(&self, out: &mut String) {
        match &self.kind {
            BlockKind::Paragraph => wrap(out, "<p>", "</p>", |o| self.write_children(o)),
            BlockKind::Heading(level) => {
                let level = (*level).clamp(1, 6);
                out.push_str(&format!("<h{level}>"));
                self.write_children(out);
                out.push_str(&format!("</h{level}>"));
            }
            BlockKind::ListItem { depth, .. } => {
                if *depth == 0 {
                    out.push_str("<li>");
                } else {
                    out.push_str(&format!("<li class=\"hl-depth-{depth}\">"));
                }
                self.write_children(out);
                out.push_str("</li>");
            }
            BlockKind::BlockQuote => wrap(out, "<blockquote><p>", "</p></blockquote>", |o| {
                self.write_children(o)
            }),
            BlockKind::CodeBlock { lang } => {
                match lang {
                    Some(lang) => out.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        encode_double_quoted_attribute(lang)
                    )),
                    None => out.push_str("<pre><code>"),
                }
                out.push_str(&encode_text(&self.text_content()));
                out.push_str("</code></pre>");
            }
            BlockKind::Table => wrap(out, "<table>", "</table>", |o| self.write_children(o)),
            BlockKind::ThematicBreak => out.push_str("<hr>"),
            BlockKind::Html | BlockKind::Style | BlockKind::Script => {
                out.push_str("<pre class=\"hl-raw-html\">");
                out.push_str(&encode_text(&self.text_content()));
                out.push_str("</pre>");
            }
        }
    }
}

fn wrap(out: &mut String, open: &str, close: &str, body: impl FnOnce(&mut String)) {
    out.push_str(open);
    body(out);
    out.push_str(close);
}

/// Serialize a rendered document, grouping consecutive list items into lists.
pub fn render_document_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut open_list: Option<bool> = None;

    for block in blocks {
        let ordered = match block.kind {
            BlockKind::ListItem { ordered, .. } => Some(ordered),
            _ => None,
        };
        if open_list.is_some() && open_list != ordered {
            close_list(&mut out, open_list.take());
        }
        if let Some(ordered) = ordered
            && open_list.is_none()
        {
            out.push_str(if ordered { "<ol>" } else { "<ul>" });
            open_list = Some(ordered);
        }
        block.write_html(&mut out);
    }
    close_list(&mut out, open_list);
    out
}

fn close_list(out: &mut String, list: Option<bool>) {
    match list {
        Some(true) => out.push_str("</ol>"),
        Some(false) => out.push_str("</ul>"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_content_descends_into_elements() {
        let node = Node::Element(
            Element::new("em")
                .with_child(Node::text("a"))
                .with_child(Element::new("strong").with_child(Node::text("b"))),
        );
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn html_escapes_text_and_attributes() {
        let el = Element::new("a")
            .with_attr("href", "x\"y")
            .with_child(Node::text("<b> & co"));
        assert_eq!(
            Node::from(el).to_html(),
            "<a href=\"x&quot;y\">&lt;b&gt; &amp; co</a>"
        );
    }

    #[test]
    fn has_class_matches_whole_words() {
        let el = Element::new("span").with_class("hl-palette-dot clear");
        assert!(el.has_class("clear"));
        assert!(el.has_class("hl-palette-dot"));
        assert!(!el.has_class("hl-palette"));
    }

    #[test]
    fn list_items_are_grouped() {
        let blocks = vec![
            Block::paragraph(vec![Node::text("intro")]),
            Block::new(
                BlockKind::ListItem {
                    depth: 0,
                    ordered: false,
                },
                vec![Node::text("one")],
            ),
            Block::new(
                BlockKind::ListItem {
                    depth: 1,
                    ordered: false,
                },
                vec![Node::text("two")],
            ),
            Block::new(BlockKind::ThematicBreak, vec![]),
        ];
        assert_eq!(
            render_document_html(&blocks),
            "<p>intro</p><ul><li>one</li><li class=\"hl-depth-1\">two</li></ul><hr>"
        );
    }

    #[test]
    fn only_prose_blocks_are_eligible() {
        assert!(BlockKind::Paragraph.is_prose());
        assert!(BlockKind::Heading(2).is_prose());
        assert!(BlockKind::BlockQuote.is_prose());
        assert!(!BlockKind::CodeBlock { lang: None }.is_prose());
        assert!(!BlockKind::Table.is_prose());
        assert!(!BlockKind::Style.is_prose());
        assert!(!BlockKind::Script.is_prose());
    }
}
