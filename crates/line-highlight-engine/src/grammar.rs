//! Marker grammar: the fixed colour palette and the `%hl-<colour>%` token.
//!
//! Everything that knows about colours (the regexes, the stylesheet, the
//! palette UI, parsing) derives from [`PALETTE`]. Adding a colour means adding
//! a [`ColorTag`] variant and one palette row.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Prefix of every marker token.
pub const MARKER_PREFIX: &str = "%hl-";
/// Suffix of every marker token.
pub const MARKER_SUFFIX: &str = "%";

/// An RGB colour used for highlight backgrounds and palette swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS functional notation, e.g. `rgb(255, 250, 205)`.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }

    /// Upper-case hex notation, e.g. `#FFD600`.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// A highlight colour from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Yellow,
    Red,
    Pink,
    Green,
    Blue,
    Purple,
    Gray,
}

/// One palette row.
#[derive(Debug, Clone, Copy)]
pub struct ColorSpec {
    pub tag: ColorTag,
    pub name: &'static str,
    /// Soft background used for highlighted lines and marker pills.
    pub highlight: Rgb,
    /// Vivid colour used for the palette swatch.
    pub swatch: Rgb,
}

/// The palette, in canonical order.
pub const PALETTE: [ColorSpec; 7] = [
    ColorSpec {
        tag: ColorTag::Yellow,
        name: "yellow",
        highlight: Rgb(255, 250, 205),
        swatch: Rgb(0xFF, 0xD6, 0x00),
    },
    ColorSpec {
        tag: ColorTag::Red,
        name: "red",
        highlight: Rgb(255, 237, 237),
        swatch: Rgb(0xFF, 0x17, 0x44),
    },
    ColorSpec {
        tag: ColorTag::Pink,
        name: "pink",
        highlight: Rgb(255, 235, 247),
        swatch: Rgb(0xF5, 0x00, 0xA3),
    },
    ColorSpec {
        tag: ColorTag::Green,
        name: "green",
        highlight: Rgb(228, 248, 236),
        swatch: Rgb(0x00, 0xC8, 0x53),
    },
    ColorSpec {
        tag: ColorTag::Blue,
        name: "blue",
        highlight: Rgb(233, 245, 254),
        swatch: Rgb(0x29, 0x79, 0xFF),
    },
    ColorSpec {
        tag: ColorTag::Purple,
        name: "purple",
        highlight: Rgb(249, 239, 253),
        swatch: Rgb(0xAA, 0x00, 0xFF),
    },
    ColorSpec {
        tag: ColorTag::Gray,
        name: "gray",
        highlight: Rgb(241, 242, 244),
        swatch: Rgb(0x61, 0x61, 0x61),
    },
];

impl ColorTag {
    /// All colours in canonical palette order.
    pub const ALL: [ColorTag; 7] = [
        ColorTag::Yellow,
        ColorTag::Red,
        ColorTag::Pink,
        ColorTag::Green,
        ColorTag::Blue,
        ColorTag::Purple,
        ColorTag::Gray,
    ];

    /// The palette row for this colour.
    pub fn spec(self) -> &'static ColorSpec {
        // PALETTE is declared in the same order as the enum.
        &PALETTE[self as usize]
    }

    /// Canonical lower-case name.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn highlight(self) -> Rgb {
        self.spec().highlight
    }

    pub fn swatch(self) -> Rgb {
        self.spec().swatch
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown highlight colour: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for ColorTag {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(s))
            .map(|spec| spec.tag)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// The canonical token for a colour, e.g. `%hl-yellow%`.
pub fn marker_token(color: ColorTag) -> String {
    format!("{MARKER_PREFIX}{}{MARKER_SUFFIX}", color.name())
}

fn color_alternation() -> String {
    PALETTE
        .iter()
        .map(|spec| regex::escape(spec.name))
        .collect::<Vec<_>>()
        .join("|")
}

/// Matches a marker token anywhere in a string. Group 1 is the colour name.
pub static MARKER_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "(?i){}({}){}",
        regex::escape(MARKER_PREFIX),
        color_alternation(),
        regex::escape(MARKER_SUFFIX)
    );
    Regex::new(&pattern).expect("marker pattern is built from fixed palette names")
});

/// Matches a marker token at the end of a line, trailing whitespace allowed.
/// Group 1 is the colour name.
pub static MARKER_AT_LINE_END: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i){}({}){}\s*$",
        regex::escape(MARKER_PREFIX),
        color_alternation(),
        regex::escape(MARKER_SUFFIX)
    );
    Regex::new(&pattern).expect("marker pattern is built from fixed palette names")
});

/// True if the text contains a marker token anywhere, trailing or not.
pub fn contains_marker(text: &str) -> bool {
    MARKER_ANYWHERE.is_match(text)
}
