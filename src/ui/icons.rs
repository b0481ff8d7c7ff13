//! Icon identifier to terminal glyph mapping.
//!
//! Catalog and control icons are symbolic names. The terminal has no icon font
//! guarantee, so each known name maps to a single-width Unicode symbol and
//! anything else falls back to [`FALLBACK`].

/// Glyph used for unknown icon names.
pub const FALLBACK: char = '•';

/// Resolves an icon name to a single-width glyph.
#[must_use]
pub fn glyph(name: &str) -> char {
    match name {
        // Rail
        "dashboard" | "space_dashboard" => '▦',
        "task_alt" | "check_circle" => '✓',
        "settings" | "tune" => '⚙',
        "person" => '☺',

        // Rows
        "add" => '+',
        "filter_alt" => '⊻',
        "schedule" | "clock_loader_40" => '◷',
        "flag_2" => '⚑',
        "inventory_2" => '▤',
        "trending_up" => '↗',
        "finance" => '$',
        "ios_share" => '⇪',
        "backup" => '⟲',
        "integration_instructions" => '⌘',
        "notifications" => '♪',
        "palette" => '◐',
        "visibility" => '◉',
        "shield" | "lock" => '⛨',
        "key" => '⚷',

        // Controls
        "expand_more" => '▸',
        "expand_less" => '▾',
        "dark_mode" => '☾',
        "light_mode" => '☀',
        "left_panel_close" => '«',
        "left_panel_open" => '»',
        "search" => '⌕',

        _ => FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown() {
        assert_eq!(glyph("add"), '+');
        assert_eq!(glyph("dark_mode"), '☾');
        assert_eq!(glyph("no_such_icon"), FALLBACK);
    }
}
