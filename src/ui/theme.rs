//! Theme system
//!
//! Provides:
//! - Theme struct with all UI colors
//! - Built-in presets (rose, darkwall, nord, gruvbox)
//! - Hex color parsing for accent overrides

use ratatui::style::Color;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Background for the selected card and rating
    pub selection_bg: Color,
    /// Text color for the selected card and rating
    pub selection_fg: Color,
    /// Accent color (focused borders, chosen rating)
    pub accent: Color,
    /// Unselected rating buttons
    pub button_bg: Color,
    /// Dimmed text (placeholders, hints)
    pub dimmed: Color,
    /// Unfocused borders
    pub dimmed_alt: Color,
    /// Validation and save errors
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::rose()
    }
}

impl Theme {
    /// Rose theme - default, pink on slate
    pub fn rose() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),       // #111827
            foreground: Color::Rgb(243, 244, 246),    // #f3f4f6
            selection_bg: Color::Rgb(55, 65, 81),     // #374151
            selection_fg: Color::Rgb(255, 255, 255),  // #ffffff
            accent: Color::Rgb(244, 114, 182),        // #f472b6 (pink-400)
            button_bg: Color::Rgb(80, 36, 62),        // #50243e
            dimmed: Color::Rgb(156, 163, 175),        // #9ca3af
            dimmed_alt: Color::Rgb(75, 85, 99),       // #4b5563
            error: Color::Rgb(239, 68, 68),           // #ef4444
        }
    }

    /// Darkwall theme
    pub fn darkwall() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),       // #0d1116
            foreground: Color::Rgb(229, 234, 241),    // #e5eaf1
            selection_bg: Color::Rgb(20, 28, 42),     // #141c2a
            selection_fg: Color::Rgb(229, 234, 241),  // #e5eaf1
            accent: Color::Rgb(180, 83, 9),           // #b45309 (amber)
            button_bg: Color::Rgb(38, 30, 22),        // #261e16
            dimmed: Color::Rgb(156, 163, 175),        // #9ca3af
            dimmed_alt: Color::Rgb(107, 114, 128),    // #6b7280
            error: Color::Rgb(239, 68, 68),           // #ef4444
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),       // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),    // #eceff4 (nord6)
            selection_bg: Color::Rgb(67, 76, 94),     // #434c5e (nord2)
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4 (nord6)
            accent: Color::Rgb(136, 192, 208),        // #88c0d0 (nord8)
            button_bg: Color::Rgb(59, 66, 82),        // #3b4252 (nord1)
            dimmed: Color::Rgb(216, 222, 233),        // #d8dee9 (nord4)
            dimmed_alt: Color::Rgb(76, 86, 106),      // #4c566a (nord3)
            error: Color::Rgb(191, 97, 106),          // #bf616a (nord11)
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),       // #282828 (bg)
            foreground: Color::Rgb(235, 219, 178),    // #ebdbb2 (fg)
            selection_bg: Color::Rgb(60, 56, 54),     // #3c3836 (bg1)
            selection_fg: Color::Rgb(235, 219, 178),  // #ebdbb2 (fg)
            accent: Color::Rgb(215, 153, 33),         // #d79921 (yellow)
            button_bg: Color::Rgb(80, 73, 69),        // #504945 (bg2)
            dimmed: Color::Rgb(168, 153, 132),        // #a89984 (gray)
            dimmed_alt: Color::Rgb(146, 131, 116),    // #928374 (gray)
            error: Color::Rgb(204, 36, 29),           // #cc241d (red)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "rose" | "default" => Some(Self::rose()),
            "darkwall" => Some(Self::darkwall()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }

    /// Replace the accent color
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');

    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| ColorError::InvalidHex)
    };

    match s.len() {
        // #rgb -> #rrggbb
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    InvalidLength,
    InvalidHex,
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidLength => write!(f, "invalid color length (expected 3 or 6 hex chars)"),
            ColorError::InvalidHex => write!(f, "invalid hex character"),
        }
    }
}

impl std::error::Error for ColorError {}
