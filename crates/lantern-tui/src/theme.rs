//! Terminal color theme
//!
//! Dark terminals get the palette of the original prototype; light
//! terminals a washed-out equivalent. Manual override with --light or
//! LANTERN_LIGHT_BG=1.

use ratatui::style::Color;

/// Color theme for the terminal UI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // General UI text
    pub text: Color,
    pub text_dim: Color,
    /// Section headers, accent text
    pub accent: Color,
    /// Default border color
    pub border: Color,
    /// Battle overlay border
    pub border_danger: Color,
    /// Healthy end of an HP bar
    pub good: Color,
    /// Hurt end of an HP bar
    pub bad: Color,
    pub gold: Color,

    // Corridor view
    pub view_sky: Color,
    pub view_floor: Color,
    pub view_side: Color,
    pub view_front: Color,
    pub view_gate: Color,
    pub view_slat: Color,
    pub view_guide: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::White,
            border_danger: Color::Red,
            good: Color::Green,
            bad: Color::Red,
            gold: Color::Yellow,
            view_sky: Color::Rgb(11, 15, 20),
            view_floor: Color::Rgb(21, 27, 35),
            view_side: Color::Rgb(21, 32, 43),
            view_front: Color::Rgb(25, 39, 52),
            view_gate: Color::Rgb(43, 58, 75),
            view_slat: Color::Rgb(59, 78, 99),
            view_guide: Color::Rgb(90, 100, 112),
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::Gray,
            accent: Color::Blue,
            border: Color::Black,
            border_danger: Color::Red,
            good: Color::Green,
            bad: Color::Red,
            gold: Color::Rgb(140, 100, 0),
            view_sky: Color::Rgb(225, 230, 236),
            view_floor: Color::Rgb(205, 212, 220),
            view_side: Color::Rgb(168, 180, 192),
            view_front: Color::Rgb(150, 164, 178),
            view_gate: Color::Rgb(120, 136, 154),
            view_slat: Color::Rgb(96, 112, 130),
            view_guide: Color::Rgb(130, 140, 152),
        }
    }

    /// Pick a theme: explicit flag, then LANTERN_LIGHT_BG, then dark
    pub fn detect(force_light: bool) -> Self {
        if force_light || std::env::var("LANTERN_LIGHT_BG").is_ok_and(|v| v == "1") {
            Self::light()
        } else {
            Self::dark()
        }
    }
}
