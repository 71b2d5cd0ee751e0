//! Gutter click handling for the live view.
//!
//! The host reports clicks as [`ClickEvent`]s; a click on a numeric gutter
//! cell inside the live view opens a [`Palette`] for that line, and a palette
//! choice is turned into a marker edit. At most one palette is open at a time.

pub mod controller;
pub mod palette;
pub mod surface;

pub use controller::{ClickOutcome, DEFAULT_GRACE, InteractionController, MarkerRequest};
pub use palette::{CLEAR_GLYPH, CLEAR_TITLE, Palette, PaletteChoice, palette_entries};
pub use surface::{ClickEvent, ElementInfo, MouseButton, Rect};
