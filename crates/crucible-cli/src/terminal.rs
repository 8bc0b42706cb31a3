//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the path map and
//! solve reports.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse green for the start cell.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse magenta for the finish cell.
    pub const TAG_FINISH: &str = "\x1b[1;7;35m";

    /// Bright bold white for headings and costs.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for cells off the path.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for path steps.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for successful verification.
    pub const GREEN: &str = "\x1b[32m";
    /// Red for unreachable cells.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_finish: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_finish: colors::TAG_FINISH,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_finish: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            red: "",
        }
    }

    /// Colored unless the environment or `--no-color` says otherwise.
    #[must_use]
    pub fn resolve(no_color: bool) -> Self {
        if !no_color && supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
