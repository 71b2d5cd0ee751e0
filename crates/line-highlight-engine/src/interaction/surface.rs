//! How a host describes the element under a click.

use std::time::Instant;

/// Class of a single line-number cell in the gutter.
pub const GUTTER_ELEMENT_CLASS: &str = "hl-gutter-element";
/// Class of the gutter column holding the line-number cells.
pub const LINE_NUMBERS_CLASS: &str = "hl-line-numbers";
/// Class of the editable (live) view container.
pub const LIVE_VIEW_CLASS: &str = "hl-live-view";
/// Class of the read-only (reading) view container.
pub const READING_VIEW_CLASS: &str = "hl-reading-view";

/// Screen-space bounds of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// One element on the path from a click target to the root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementInfo {
    pub classes: Vec<String>,
    /// Visible text content.
    pub text: String,
    pub bounds: Rect,
}

impl ElementInfo {
    pub fn new(classes: &[&str]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Descriptor for a gutter cell showing `line_number`.
    pub fn gutter_cell(line_number: usize, bounds: Rect) -> Self {
        Self::new(&[GUTTER_ELEMENT_CLASS])
            .with_text(line_number.to_string())
            .with_bounds(bounds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// A click as seen by the host.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub button: MouseButton,
    /// The target element first, then each ancestor up to the root.
    pub path: Vec<ElementInfo>,
    pub at: Instant,
}

impl ClickEvent {
    pub fn primary(path: Vec<ElementInfo>, at: Instant) -> Self {
        Self {
            button: MouseButton::Primary,
            path,
            at,
        }
    }

    /// Standard path for a click on a live-view gutter cell.
    pub fn on_live_gutter(line_number: usize, bounds: Rect, at: Instant) -> Self {
        Self::primary(
            vec![
                ElementInfo::gutter_cell(line_number, bounds),
                ElementInfo::new(&[LINE_NUMBERS_CLASS]),
                ElementInfo::new(&[LIVE_VIEW_CLASS]),
            ],
            at,
        )
    }
}

/// A gutter cell hit by a click, with its position in the click path.
#[derive(Debug, Clone, PartialEq)]
pub struct GutterHit<'a> {
    pub cell: &'a ElementInfo,
    pub index: usize,
}

/// Walks up from the target to the nearest gutter cell whose parent is the
/// line-number column.
pub fn find_gutter_cell(path: &[ElementInfo]) -> Option<GutterHit<'_>> {
    let index = path
        .iter()
        .position(|el| el.has_class(GUTTER_ELEMENT_CLASS))?;
    let parent = path.get(index + 1)?;
    parent.has_class(LINE_NUMBERS_CLASS).then(|| GutterHit {
        cell: &path[index],
        index,
    })
}

/// True if some ancestor past `from` is a live-view container.
pub fn inside_live_view(path: &[ElementInfo], from: usize) -> bool {
    path.iter().skip(from).any(|el| el.has_class(LIVE_VIEW_CLASS))
}

/// Parses gutter text as a one-based line number. Only ASCII digits count.
pub fn parse_line_number(text: &str) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
