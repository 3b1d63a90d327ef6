//! Display labels for the non-glyph keys of the kana keyboard.
//!
//! Enter, Space and Backspace are carried as sentinel chars in the keyboard
//! table and in input handling; everything that renders them goes through
//! these helpers.

/// Sentinel char for Backspace.
pub const BACKSPACE: char = '\x08';
/// Sentinel char for Enter.
pub const ENTER: char = '\n';
/// Physical space bar.
pub const SPACE: char = ' ';
/// Physical Shift key, only ever shown, never typed.
pub const SHIFT_LABEL: &str = "Shift";

/// Human-readable name for a sentinel key. Returns `""` for printable keys.
pub fn key_display_name(ch: char) -> &'static str {
    match ch {
        BACKSPACE => "Backspace",
        ENTER => "Enter",
        SPACE => "Space",
        _ => "",
    }
}

/// Legend printed on a physical key cap: the sentinel name or the
/// upper-cased key.
pub fn key_cap(ch: char) -> String {
    match key_display_name(ch) {
        "" => ch.to_uppercase().to_string(),
        name => name.to_string(),
    }
}
