//! Color theme and glyphs for the Turnstile TUI.
//!
//! Uses a Kanagawa Wave subset with an ASCII-only glyph fallback.

use ratatui::style::Color;

use turnstile_types::LockLevel;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const ACCENT: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const SUCCESS: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const WARNING: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ERROR: Color = Color::Rgb(255, 93, 98); // peachRed
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

#[must_use]
pub fn palette() -> Palette {
    Palette {
        bg_dark: colors::BG_DARK,
        bg_panel: colors::BG_PANEL,
        bg_border: colors::BG_BORDER,
        text_primary: colors::TEXT_PRIMARY,
        text_muted: colors::TEXT_MUTED,
        accent: colors::ACCENT,
        success: colors::SUCCESS,
        warning: colors::WARNING,
        error: colors::ERROR,
    }
}

/// Icon set, with an ASCII fallback for terminals without wide glyph support.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub locked: &'static str,
    pub unlocked: &'static str,
    spinner: &'static [&'static str],
}

const UNICODE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_SPINNER: &[&str] = &["|", "/", "-", "\\"];

#[must_use]
pub fn glyphs(ascii_only: bool) -> Glyphs {
    if ascii_only {
        Glyphs {
            locked: "[*]",
            unlocked: "[ ]",
            spinner: ASCII_SPINNER,
        }
    } else {
        Glyphs {
            locked: "🔒",
            unlocked: "🔓",
            spinner: UNICODE_SPINNER,
        }
    }
}

impl Glyphs {
    /// Spinner frame for the given tick.
    #[must_use]
    pub fn spinner_frame(&self, tick: u64) -> &'static str {
        let index = (tick / 2) as usize % self.spinner.len();
        self.spinner[index]
    }

    /// Lock badge glyph for the given level.
    #[must_use]
    pub const fn lock_glyph(&self, level: LockLevel) -> &'static str {
        match level {
            LockLevel::None => self.unlocked,
            LockLevel::Cancellable | LockLevel::Exclusive => self.locked,
        }
    }
}

impl Palette {
    /// Badge color for the given lock level.
    #[must_use]
    pub const fn lock_color(&self, level: LockLevel) -> Color {
        match level {
            LockLevel::None => self.success,
            LockLevel::Cancellable => self.warning,
            LockLevel::Exclusive => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_cycles_through_all_frames() {
        let glyphs = glyphs(true);
        let frames: Vec<&str> = (0..8).map(|tick| glyphs.spinner_frame(tick)).collect();
        assert_eq!(frames, vec!["|", "|", "/", "/", "-", "-", "\\", "\\"]);
    }

    #[test]
    fn ascii_glyphs_stay_ascii() {
        let glyphs = glyphs(true);
        assert!(glyphs.locked.is_ascii());
        assert!(glyphs.unlocked.is_ascii());
        assert_eq!(glyphs.lock_glyph(LockLevel::Exclusive), "[*]");
        assert_eq!(glyphs.lock_glyph(LockLevel::None), "[ ]");
    }
}
