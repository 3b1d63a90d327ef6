use ratatui::style::Color;

/// Fixed palette for every screen, stored as hex so it reads like a theme
/// file.
#[derive(Clone, Debug, Default)]
pub struct Theme {
    pub colors: ThemeColors,
}

#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub bg: &'static str,
    pub fg: &'static str,
    pub text_correct: &'static str,
    pub text_incorrect: &'static str,
    pub text_incorrect_bg: &'static str,
    pub text_partial: &'static str,
    pub text_pending: &'static str,
    pub text_cursor_bg: &'static str,
    pub text_cursor_fg: &'static str,
    pub hint_key: &'static str,
    pub accent: &'static str,
    pub border: &'static str,
    pub header_bg: &'static str,
    pub header_fg: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e",
            fg: "#cdd6f4",
            text_correct: "#a6e3a1",
            text_incorrect: "#f38ba8",
            text_incorrect_bg: "#45273a",
            text_partial: "#fab387",
            text_pending: "#6c7086",
            text_cursor_bg: "#f5e0dc",
            text_cursor_fg: "#1e1e2e",
            hint_key: "#f9e2af",
            accent: "#89b4fa",
            border: "#45475a",
            header_bg: "#313244",
            header_fg: "#cdd6f4",
            error: "#f38ba8",
            warning: "#f9e2af",
            success: "#a6e3a1",
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(self.text_incorrect_bg) }
    pub fn text_partial(&self) -> Color { Self::parse_color(self.text_partial) }
    pub fn text_pending(&self) -> Color { Self::parse_color(self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(self.text_cursor_fg) }
    pub fn hint_key(&self) -> Color { Self::parse_color(self.hint_key) }
    pub fn accent(&self) -> Color { Self::parse_color(self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(self.header_fg) }
    pub fn error(&self) -> Color { Self::parse_color(self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(self.success) }
}
