use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use kare::kana::{is_separator, romaji::romanize};
use kare::session::{Letter, LetterState, TypingSession};

use crate::ui::theme::Theme;

/// Shown in place of the full-width separator so it stays visible.
const SEPARATOR_DISPLAY: &str = "\u{2423} ";

pub struct TypingArea<'a> {
    session: &'a TypingSession,
    show_romaji: bool,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a TypingSession, show_romaji: bool, theme: &'a Theme) -> Self {
        Self {
            session,
            show_romaji,
            theme,
        }
    }
}

fn letter_display(letter: &Letter) -> String {
    if is_separator(letter.glyph) {
        SEPARATOR_DISPLAY.to_string()
    } else {
        letter.glyph.to_string()
    }
}

/// Index of the word holding the cursor, counting separators already passed.
fn current_word_index(target: &[char], input_len: usize) -> usize {
    let cursor = input_len.min(target.len());
    target[..cursor].iter().filter(|&&ch| is_separator(ch)).count()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let letter_spans: Vec<Span> = self
            .session
            .letters()
            .iter()
            .map(|letter| {
                let style = match letter.state {
                    LetterState::Correct => Style::default().fg(colors.text_correct()),
                    LetterState::Wrong => Style::default()
                        .fg(colors.text_incorrect())
                        .bg(colors.text_incorrect_bg())
                        .add_modifier(Modifier::UNDERLINED),
                    LetterState::Partial => Style::default()
                        .fg(colors.text_partial())
                        .add_modifier(Modifier::UNDERLINED),
                    LetterState::Current => Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                    LetterState::Next => Style::default().fg(colors.text_pending()),
                };
                Span::styled(letter_display(letter), style)
            })
            .collect();

        let mut lines = vec![Line::from(letter_spans)];

        if self.show_romaji {
            let target = self.session.target();
            let current = current_word_index(target, self.session.input().len());
            let romaji_spans: Vec<Span> = self
                .session
                .target_text()
                .split(is_separator)
                .enumerate()
                .flat_map(|(i, word)| {
                    let style = if i == current {
                        Style::default().fg(colors.accent())
                    } else {
                        Style::default().fg(colors.text_pending())
                    };
                    let gap = if i == 0 { "" } else { "  " };
                    [Span::raw(gap), Span::styled(romanize(word), style)]
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(romaji_spans));
        }

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_separator_is_visible() {
        let letter = Letter {
            glyph: '\u{3000}',
            state: LetterState::Next,
        };
        assert_eq!(letter_display(&letter), SEPARATOR_DISPLAY);

        let letter = Letter {
            glyph: 'か',
            state: LetterState::Correct,
        };
        assert_eq!(letter_display(&letter), "か");
    }

    #[test]
    fn test_current_word_index() {
        let target = chars("あい\u{3000}うえ\u{3000}お");
        assert_eq!(current_word_index(&target, 0), 0);
        assert_eq!(current_word_index(&target, 2), 0);
        assert_eq!(current_word_index(&target, 3), 1);
        assert_eq!(current_word_index(&target, 6), 2);
        assert_eq!(current_word_index(&target, 99), 2);
    }

    #[test]
    fn test_renders_without_panicking_on_tiny_area() {
        let session = TypingSession::new("かぎ\u{3000}あめ");
        let theme = Theme::default();
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        TypingArea::new(&session, true, &theme).render(area, &mut buf);
    }
}
