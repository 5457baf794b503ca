//! Styling constants shared across views.

use crossterm::style::Color;

/// Title bar text on a green banner
pub const TITLE_FG: Color = Color::Rgb {
    r: 255,
    g: 253,
    b: 245,
};
pub const TITLE_BG: Color = Color::Rgb {
    r: 37,
    g: 160,
    b: 101,
};

/// Key labels in the info panel
pub const LABEL: Color = Color::Rgb {
    r: 4,
    g: 181,
    b: 117,
};

/// Panel and map borders
pub const BORDER: Color = Color::AnsiValue(63);

/// De-emphasized help text
pub const SUBTLE: Color = Color::AnsiValue(241);

/// Map dots: faint for water, bright for land, green for the marker
pub const WATER: Color = Color::AnsiValue(237);
pub const LAND: Color = Color::AnsiValue(252);
pub const MARKER: Color = Color::Rgb {
    r: 4,
    g: 181,
    b: 117,
};
