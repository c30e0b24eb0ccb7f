//! Color theme and glyphs for the Tally TUI.
//!
//! Uses a Kanagawa Wave subset by default with an optional high-contrast
//! override; the celebration color is the palette's success green.

use ratatui::style::{Color, Modifier, Style};

use tally_core::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray
    pub const TEXT_DISABLED: Color = Color::Rgb(113, 124, 124); // katanaGray

    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow

    pub const SUCCESS: Color = GREEN;
    pub const WARNING: Color = YELLOW;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            primary: colors::PRIMARY,
            success: colors::SUCCESS,
            warning: colors::WARNING,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            primary: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }
}

/// Decorative glyphs with an ASCII-only fallback.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub celebration: &'static str,
    pub bullet: &'static str,
}

const UNICODE_GLYPHS: Glyphs = Glyphs {
    celebration: "\u{2605}", // ★
    bullet: "\u{2022}",      // •
};

const ASCII_GLYPHS: Glyphs = Glyphs {
    celebration: "*",
    bullet: "-",
};

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        ASCII_GLYPHS
    } else {
        UNICODE_GLYPHS
    }
}

/// Style helpers shared by the draw functions.
pub mod styles {
    use super::{Modifier, Palette, Style};

    /// The score readout: bold, switching to success green while celebrating.
    #[must_use]
    pub fn score(palette: &Palette, celebrating: bool) -> Style {
        let fg = if celebrating {
            palette.success
        } else {
            palette.text_primary
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    /// A control hint, dimmed while its control is disabled.
    #[must_use]
    pub fn control(palette: &Palette, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(palette.text_primary)
        } else {
            Style::default()
                .fg(palette.text_disabled)
                .add_modifier(Modifier::CROSSED_OUT)
        }
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_select_palette_and_glyphs() {
        let plain = UiOptions::default();
        assert_eq!(glyphs(plain).celebration, "\u{2605}");

        let ascii = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        assert_eq!(glyphs(ascii).celebration, "*");

        let contrast = UiOptions {
            high_contrast: true,
            ..UiOptions::default()
        };
        assert_eq!(palette(contrast).success, Color::Green);
        assert_eq!(palette(plain).success, colors::GREEN);
    }

    #[test]
    fn celebrating_score_uses_success_color() {
        let palette = Palette::standard();
        assert_eq!(styles::score(&palette, true).fg, Some(palette.success));
        assert_eq!(styles::score(&palette, false).fg, Some(palette.text_primary));
    }
}
