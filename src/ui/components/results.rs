use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use kare::session::result::{Score, TestResult};
use kare::session::{LetterState, TypingSession};

use crate::ui::components::stats_sidebar::{accuracy_color, format_accuracy};
use crate::ui::theme::Theme;

pub struct ResultsPanel<'a> {
    result: &'a TestResult,
    session: &'a TypingSession,
    theme: &'a Theme,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(result: &'a TestResult, session: &'a TypingSession, theme: &'a Theme) -> Self {
        Self {
            result,
            session,
            theme,
        }
    }
}

fn speed_text(result: &TestResult) -> String {
    match result.wpm() {
        Some(wpm) => format!("{wpm:.0} WPM"),
        None => "INVALID".to_string(),
    }
}

fn score_text(result: &TestResult) -> String {
    match Score::try_from(result) {
        Ok(score) => format!("Score {:.0} wpm @ {:.0}%", score.wpm, score.acc * 100.0),
        Err(err) => format!("Not scored: {err}"),
    }
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Test Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let speed_style = if self.result.is_valid() {
            Style::default().fg(colors.accent())
        } else {
            Style::default().fg(colors.error())
        };
        Paragraph::new(Line::from(Span::styled(
            speed_text(self.result),
            speed_style.add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let accuracy = Some(self.result.accuracy());
        let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.fg()));
        let stats = vec![
            Line::from(vec![
                label("  Accuracy:   "),
                Span::styled(
                    format_accuracy(accuracy),
                    Style::default()
                        .fg(accuracy_color(colors, accuracy))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("  Time:       "),
                Span::raw(format!("{:.1}s", self.result.elapsed_secs())),
            ]),
            Line::from(vec![
                label("  Keystrokes: "),
                Span::raw(self.session.total_keystrokes().to_string()),
            ]),
            Line::from(vec![
                label("  Mistakes:   "),
                Span::styled(
                    self.session.total_error_events().to_string(),
                    Style::default().fg(if self.session.total_error_events() == 0 {
                        colors.success()
                    } else {
                        colors.error()
                    }),
                ),
            ]),
        ];
        Paragraph::new(stats).render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("  {}", score_text(self.result)),
            Style::default().fg(colors.text_pending()),
        )))
        .render(layout[2], buf);

        // Target over typed, with wrong glyphs marked on the typed row.
        let target_line = Line::from(Span::styled(
            self.session.target_text(),
            Style::default().fg(colors.fg()),
        ));
        let typed_spans: Vec<Span> = self
            .session
            .letters()
            .iter()
            .map(|letter| {
                let style = match letter.state {
                    LetterState::Wrong => Style::default()
                        .fg(colors.text_incorrect())
                        .add_modifier(Modifier::UNDERLINED),
                    _ => Style::default().fg(colors.text_correct()),
                };
                Span::styled(letter.glyph.to_string(), style)
            })
            .collect();
        Paragraph::new(vec![target_line, Line::from(typed_spans)])
            .block(
                Block::bordered()
                    .title(" Target / Typed ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .wrap(Wrap { trim: false })
            .render(layout[3], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [Enter/r] New test  ", Style::default().fg(colors.accent())),
            Span::styled("[Tab] Same text  ", Style::default().fg(colors.accent())),
            Span::styled("[q/Esc] Quit", Style::default().fg(colors.accent())),
        ]))
        .render(layout[4], buf);
    }
}
