//! Terminal styling and color utilities.
//!
//! ANSI escape codes for the route listing, plus detection of whether the
//! current terminal should receive them.

use metroroute_lib::RoadCategory;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse red for highway legs.
    pub const TAG_HIGHWAY: &str = "\x1b[1;7;31m";
    /// Bold reverse cyan for primary legs.
    pub const TAG_PRIMARY: &str = "\x1b[1;7;36m";
    /// Bold reverse yellow for secondary legs.
    pub const TAG_SECONDARY: &str = "\x1b[1;7;33m";
    /// Bold reverse green for tertiary legs.
    pub const TAG_TERTIARY: &str = "\x1b[1;7;32m";

    /// Bright bold white for location names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements.
    pub const GRAY: &str = "\x1b[90m";
    /// Orange (256-color) for warnings.
    pub const ORANGE: &str = "\x1b[38;5;208m";
}

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_highway: &'static str,
    pub tag_primary: &'static str,
    pub tag_secondary: &'static str,
    pub tag_tertiary: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub orange: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_highway: colors::TAG_HIGHWAY,
            tag_primary: colors::TAG_PRIMARY,
            tag_secondary: colors::TAG_SECONDARY,
            tag_tertiary: colors::TAG_TERTIARY,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            orange: colors::ORANGE,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_highway: "",
            tag_primary: "",
            tag_secondary: "",
            tag_tertiary: "",
            white_bold: "",
            gray: "",
            orange: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Tag color for a road category.
    #[must_use]
    pub fn category(&self, category: RoadCategory) -> &'static str {
        match category {
            RoadCategory::Highway => self.tag_highway,
            RoadCategory::Primary => self.tag_primary,
            RoadCategory::Secondary => self.tag_secondary,
            RoadCategory::Tertiary => self.tag_tertiary,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
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
