#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] is one character position of the grid. Wide characters occupy
//! their head cell plus [`Cell::CONTINUATION`] cells to the right.

/// A straight-alpha RGBA color packed into a `u32` (`0xRRGGBBAA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#rrggbb` (the `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

bitflags::bitflags! {
    /// Cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0000_0010;
        /// Italic text.
        const ITALIC    = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE = 0b0000_1000;
        /// Reverse video (swap fg/bg).
        const REVERSE   = 0b0010_0000;
    }
}

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character shown, `None` for an empty cell.
    pub ch: Option<char>,
    /// Trailing half of a wide character drawn to the left.
    pub continuation: bool,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Empty cell: white foreground, transparent background.
    pub const EMPTY: Self = Self {
        ch: None,
        continuation: false,
        fg: PackedRgba::WHITE,
        bg: PackedRgba::TRANSPARENT,
        flags: StyleFlags::empty(),
    };

    /// Placeholder occupying the right half of a wide character.
    pub const CONTINUATION: Self = Self {
        ch: None,
        continuation: true,
        ..Self::EMPTY
    };

    /// Cell showing `c` with default colors.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self {
            ch: Some(c),
            ..Self::EMPTY
        }
    }

    /// Whether nothing is drawn here.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ch.is_none() && !self.continuation
    }

    /// Whether this cell is the tail of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// Set the style flags.
    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(PackedRgba::from_hex("#ff0000"), Some(PackedRgba::RED));
        assert_eq!(PackedRgba::from_hex("000000"), Some(PackedRgba::BLACK));
        assert_eq!(PackedRgba::from_hex("#ff00"), None);
        assert_eq!(PackedRgba::from_hex("#gg0000"), None);
        assert_eq!(PackedRgba::from_hex("#ééé"), None);
    }

    #[test]
    fn empty_and_continuation() {
        assert!(Cell::default().is_empty());
        assert!(!Cell::CONTINUATION.is_empty());
        assert!(Cell::CONTINUATION.is_continuation());
        assert!(!Cell::from_char('a').is_empty());
    }
}
