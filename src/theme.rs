//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeSection};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeSection` via [`resolve_theme`].
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub tree_fg: Color,
    pub dir_fg: Color,
    pub file_fg: Color,
    pub focused_bg: Color,
    pub focused_fg: Color,
    pub selected_bg: Color,
    pub highlight_bg: Color,
    pub favorite_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub border_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub info_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),     // #cdd6f4 (text)
        dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),     // #cdd6f4
        focused_bg: Color::Rgb(69, 71, 90),     // #45475a (surface1)
        focused_fg: Color::Rgb(205, 214, 244),  // #cdd6f4
        selected_bg: Color::Rgb(49, 50, 68),    // #313244 (surface0)
        highlight_bg: Color::Rgb(62, 59, 38),   // muted yellow wash
        favorite_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        status_bg: Color::Rgb(30, 30, 46),      // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),
        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        info_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)
    }
}

/// Light theme — complementary Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),       // #4c4f69 (text)
        dir_fg: Color::Rgb(30, 102, 245),       // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),
        focused_bg: Color::Rgb(204, 208, 218),  // #ccd0da (surface1)
        focused_fg: Color::Rgb(76, 79, 105),
        selected_bg: Color::Rgb(220, 224, 232), // #dce0e8
        highlight_bg: Color::Rgb(250, 240, 202),
        favorite_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        status_bg: Color::Rgb(230, 233, 239),  // #e6e9ef (mantle)
        status_fg: Color::Rgb(76, 79, 105),
        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        warning_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        info_fg: Color::Rgb(30, 102, 245),    // #1e66f5 (blue)
        accent_fg: Color::Rgb(136, 57, 239),  // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),    // #9ca0b0 (overlay0)
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Parse a `#rrggbb` hex string into a Color.
fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn apply_overrides(mut colors: ThemeColors, custom: &ThemeColorsConfig) -> ThemeColors {
    let set = |slot: &mut Color, value: &Option<String>| {
        if let Some(color) = value.as_deref().and_then(parse_hex) {
            *slot = color;
        }
    };
    set(&mut colors.tree_fg, &custom.tree_fg);
    set(&mut colors.dir_fg, &custom.dir_fg);
    set(&mut colors.file_fg, &custom.file_fg);
    set(&mut colors.focused_bg, &custom.focused_bg);
    set(&mut colors.focused_fg, &custom.focused_fg);
    set(&mut colors.selected_bg, &custom.selected_bg);
    set(&mut colors.highlight_bg, &custom.highlight_bg);
    set(&mut colors.favorite_fg, &custom.favorite_fg);
    set(&mut colors.status_bg, &custom.status_bg);
    set(&mut colors.status_fg, &custom.status_fg);
    set(&mut colors.border_fg, &custom.border_fg);
    colors
}

/// Resolve the runtime palette from the theme config section.
///
/// "custom" starts from the dark palette and applies overrides; unknown
/// scheme names fall back to dark.
pub fn resolve_theme(section: &ThemeSection) -> ThemeColors {
    let base = match section.scheme.as_deref() {
        Some("light") => light_theme(),
        _ => dark_theme(),
    };
    match &section.custom {
        Some(custom) => apply_overrides(base, custom),
        None => base,
    }
}
