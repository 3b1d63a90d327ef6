use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use kare::session::TypingSession;

use crate::ui::theme::{Theme, ThemeColors};

/// Placeholder for numbers that have no data yet.
pub const NO_DATA: &str = "\u{2013}";

pub fn format_wpm(wpm: Option<f64>) -> String {
    wpm.map_or_else(|| NO_DATA.to_string(), |w| format!("{w:.0}"))
}

pub fn format_accuracy(accuracy: Option<f64>) -> String {
    accuracy.map_or_else(|| NO_DATA.to_string(), |a| format!("{a:.1}%"))
}

pub fn accuracy_color(colors: &ThemeColors, accuracy: Option<f64>) -> Color {
    match accuracy {
        Some(a) if a >= 95.0 => colors.success(),
        Some(a) if a >= 85.0 => colors.warning(),
        Some(_) => colors.error(),
        None => colors.text_pending(),
    }
}

pub struct StatsSidebar<'a> {
    session: &'a TypingSession,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(session: &'a TypingSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let metrics = self.session.metrics();

        let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.fg()));

        let lines = vec![
            Line::from(vec![
                label("WPM: "),
                Span::styled(format_wpm(metrics.wpm), Style::default().fg(colors.accent())),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Accuracy: "),
                Span::styled(
                    format_accuracy(metrics.accuracy),
                    Style::default().fg(accuracy_color(colors, metrics.accuracy)),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Progress: "),
                Span::styled(
                    format!("{:.0}%", self.session.progress() * 100.0),
                    Style::default().fg(colors.accent()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Keystrokes: "),
                Span::styled(
                    self.session.total_keystrokes().to_string(),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(vec![
                label("Errors:     "),
                Span::styled(
                    self.session.error_count().to_string(),
                    Style::default().fg(colors.error()),
                ),
            ]),
            Line::from(vec![
                label("Mistakes:   "),
                Span::styled(
                    self.session.total_error_events().to_string(),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Time: "),
                Span::styled(
                    format!("{:.1}s", self.session.elapsed_secs_at(Instant::now())),
                    Style::default().fg(colors.fg()),
                ),
            ]),
        ];

        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
