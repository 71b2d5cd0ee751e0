use std::time::{Duration, Instant};

use crate::editing::{EditOutcome, set_line_marker};
use crate::grammar::ColorTag;
use crate::host::{ActiveDocument, DocumentStore};
use crate::io::IoError;

use super::palette::{PALETTE_OFFSET_X, PALETTE_OFFSET_Y, Palette, PaletteChoice, palette_entries};
use super::surface::{ClickEvent, MouseButton, find_gutter_cell, inside_live_view, parse_line_number};

/// Clicks closer than this to the one that opened the palette do not close it.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(20);

/// Whether the host should let a click continue to its normal handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Propagate,
    Consumed,
}

/// A marker edit requested from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRequest {
    pub line_index: isize,
    pub color: Option<ColorTag>,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    PaletteOpen { palette: Palette, opened_at: Instant },
}

/// Gutter click → palette → marker edit.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: State,
    grace: Duration,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE)
    }
}

impl InteractionController {
    pub fn new(grace: Duration) -> Self {
        Self {
            state: State::Idle,
            grace,
        }
    }

    /// The open palette, if any.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.state {
            State::Idle => None,
            State::PaletteOpen { palette, .. } => Some(palette),
        }
    }

    pub fn is_open(&self) -> bool {
        self.palette().is_some()
    }

    /// Handles a click anywhere in the host.
    ///
    /// A click after the grace period closes an open palette. A primary click
    /// on a numeric live-view gutter cell opens a palette for that line and is
    /// consumed; everything else propagates.
    pub fn handle_click(&mut self, event: &ClickEvent) -> ClickOutcome {
        if let State::PaletteOpen { opened_at, .. } = &self.state
            && event.at.saturating_duration_since(*opened_at) >= self.grace
        {
            log::debug!("Closing palette on outside click");
            self.state = State::Idle;
        }

        if event.button != MouseButton::Primary {
            return ClickOutcome::Propagate;
        }
        let Some(hit) = find_gutter_cell(&event.path) else {
            return ClickOutcome::Propagate;
        };
        if !inside_live_view(&event.path, hit.index) {
            return ClickOutcome::Propagate;
        }
        let Some(line_number) = parse_line_number(&hit.cell.text) else {
            log::trace!("Ignoring gutter cell {:?}", hit.cell.text);
            return ClickOutcome::Propagate;
        };
        let Ok(line_number) = isize::try_from(line_number) else {
            return ClickOutcome::Propagate;
        };

        let bounds = hit.cell.bounds;
        let palette = Palette {
            line_index: line_number - 1,
            left: bounds.right + PALETTE_OFFSET_X,
            top: bounds.top - PALETTE_OFFSET_Y,
            entries: palette_entries(),
        };
        log::debug!("Opening palette for line {line_number}");
        self.state = State::PaletteOpen {
            palette,
            opened_at: event.at,
        };
        ClickOutcome::Consumed
    }

    /// Closes the palette without editing anything.
    pub fn dismiss(&mut self) {
        self.state = State::Idle;
    }

    /// Closes the palette and returns the edit it asks for. `None` if no
    /// palette was open.
    pub fn select(&mut self, choice: PaletteChoice) -> Option<MarkerRequest> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::PaletteOpen { palette, .. } => Some(MarkerRequest {
                line_index: palette.line_index,
                color: choice.color(),
            }),
        }
    }

    /// Closes the palette and applies the choice to the active document.
    pub fn apply_selection<S, A>(
        &mut self,
        choice: PaletteChoice,
        store: &S,
        active: &A,
    ) -> Result<Option<EditOutcome>, IoError>
    where
        S: DocumentStore,
        A: ActiveDocument<Handle = S::Handle>,
    {
        let Some(request) = self.select(choice) else {
            return Ok(None);
        };
        set_line_marker(store, active, request.line_index, request.color).map(Some)
    }
}
