//! Turns source lines into styled terminal lines for either view.

use line_highlight_config::DefaultView;
use line_highlight_engine::grammar::Rgb;
use line_highlight_engine::render::{LogicalLine, RenderedLinePair, render_line};
use line_highlight_engine::render::dual_view::INLINE_MARKER_CLASS;
use line_highlight_engine::{ColorTag, Node};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Reading,
    Live,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Reading => ViewMode::Live,
            ViewMode::Live => ViewMode::Reading,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Reading => "Reading",
            ViewMode::Live => "Live",
        }
    }
}

impl From<DefaultView> for ViewMode {
    fn from(view: DefaultView) -> Self {
        match view {
            DefaultView::Reading => ViewMode::Reading,
            DefaultView::Live => ViewMode::Live,
        }
    }
}

pub fn rgb(color: Rgb) -> Color {
    let Rgb(r, g, b) = color;
    Color::Rgb(r, g, b)
}

fn highlight_style(color: ColorTag) -> Style {
    Style::default().bg(rgb(color.highlight())).fg(Color::Black)
}

fn pill_style(color: ColorTag) -> Style {
    Style::default()
        .bg(rgb(color.highlight()))
        .fg(Color::Rgb(0x66, 0x66, 0x66))
}

/// Live fragment children: text stays raw, the marker becomes a pill.
fn inline_spans(nodes: &[Node], color: ColorTag, spans: &mut Vec<Span<'static>>) {
    for node in nodes {
        match node {
            Node::Text(text) => spans.push(Span::raw(text.clone())),
            Node::Break => {}
            Node::Element(el) if el.has_class(INLINE_MARKER_CLASS) => {
                let token = Node::Element(el.clone()).text_content();
                spans.push(Span::styled(format!(" {token} "), pill_style(color)));
            }
            Node::Element(el) => inline_spans(&el.children, color, spans),
        }
    }
}

/// One source line as it appears in `view`.
pub fn source_line(text: &str, view: ViewMode) -> Line<'static> {
    let text = text.strip_suffix('\r').unwrap_or(text);
    let line = LogicalLine::new(vec![Node::text(text)]);

    match render_line(&line) {
        RenderedLinePair::Plain(_) => Line::raw(text.to_string()),
        RenderedLinePair::Highlighted { color, block, .. } if view == ViewMode::Reading => {
            let stripped = Node::Element(block).text_content();
            Line::from(Span::styled(stripped, highlight_style(color)))
        }
        RenderedLinePair::Highlighted { color, inline, .. } => {
            let mut spans = Vec::new();
            inline_spans(&inline.children, color, &mut spans);
            Line::from(spans)
        }
    }
}

/// Width of the gutter column for a document with `line_count` lines.
pub fn gutter_width(line_count: usize) -> u16 {
    let digits = line_count.max(1).to_string().len();
    u16::try_from(digits + 1).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn unmarked_line_is_the_same_in_both_views() {
        assert_eq!(
            source_line("just text", ViewMode::Reading),
            source_line("just text", ViewMode::Live)
        );
    }

    #[test]
    fn reading_view_hides_the_marker() {
        let line = source_line("Remember this! %hl-yellow%", ViewMode::Reading);

        assert_eq!(texts(&line), vec!["Remember this!"]);
        assert_eq!(line.spans[0].style.bg, Some(Color::Rgb(255, 250, 205)));
    }

    #[test]
    fn live_view_shows_a_pill() {
        let line = source_line("Remember this! %hl-yellow%", ViewMode::Live);

        assert_eq!(texts(&line), vec!["Remember this! ", " %hl-yellow% "]);
        assert_eq!(line.spans[0].style, Style::default());
        assert_eq!(line.spans[1].style.bg, Some(Color::Rgb(255, 250, 205)));
    }

    #[test]
    fn carriage_return_is_not_shown() {
        let line = source_line("a %hl-red%\r", ViewMode::Reading);
        assert_eq!(texts(&line), vec!["a"]);
    }

    #[test]
    fn gutter_fits_the_largest_line_number() {
        assert_eq!(gutter_width(0), 2);
        assert_eq!(gutter_width(9), 2);
        assert_eq!(gutter_width(10), 3);
        assert_eq!(gutter_width(1234), 5);
    }

    #[test]
    fn toggling_switches_views() {
        assert_eq!(ViewMode::Live.toggled(), ViewMode::Reading);
        assert_eq!(ViewMode::from(DefaultView::Live), ViewMode::Live);
    }
}
