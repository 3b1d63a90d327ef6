use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use kare::keyboard::display::{ENTER, SHIFT_LABEL, SPACE, key_cap};
use kare::keyboard::{KanaKeyboard, KeyPosition, KeyToken, PhysicalKey};

use crate::ui::theme::Theme;

const KEY_WIDTH: u16 = 5;
const ROW_OFFSETS: &[u16] = &[0, 2, 3, 7, 14];
const SPACE_BAR_WIDTH: u16 = 32;
/// Enter is the last key on its row, so it can spill past the grid.
const ENTER_WIDTH: u16 = 6;
/// Rows plus borders.
pub const DIAGRAM_HEIGHT: u16 = 7;

pub struct KeyboardDiagram<'a> {
    keyboard: &'a KanaKeyboard,
    hint: Option<KeyPosition>,
    theme: &'a Theme,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(keyboard: &'a KanaKeyboard, hint: &KeyToken, theme: &'a Theme) -> Self {
        Self {
            keyboard,
            hint: keyboard.locate(hint),
            theme,
        }
    }
}

/// Legend for a key. The hinted key shows its shifted glyph when the hint
/// needs Shift.
fn key_label(key: &PhysicalKey, shifted: bool) -> String {
    if key.key == ENTER || key.key == SPACE {
        return key_cap(key.key);
    }
    let glyph = match (&key.output, key.shifted) {
        (_, Some(s)) if shifted => s,
        (KeyToken::Glyph(g), _) => *g,
        _ => return key_cap(key.key),
    };
    format!(" {glyph} ")
}

/// Columns drawn for a key cap.
fn cell_width(key: char) -> u16 {
    match key {
        SPACE => SPACE_BAR_WIDTH,
        ENTER => ENTER_WIDTH,
        _ => KEY_WIDTH - 1,
    }
}

fn is_home_key(key: char) -> bool {
    key == 'f' || key == 'j'
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" かな ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < self.keyboard.rows.len() as u16 || inner.width < 40 {
            return;
        }

        let idle = Style::default().fg(colors.fg()).bg(colors.header_bg());
        let hinted = Style::default()
            .fg(colors.bg())
            .bg(colors.hint_key())
            .add_modifier(Modifier::BOLD);

        for (row_idx, row) in self.keyboard.rows.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            let offset = ROW_OFFSETS.get(row_idx).copied().unwrap_or(0);

            for (col_idx, key) in row.iter().enumerate() {
                let x = inner.x + offset + col_idx as u16 * KEY_WIDTH;
                let width = cell_width(key.key);
                if x + width > inner.x + inner.width {
                    break;
                }

                let hint = self
                    .hint
                    .filter(|pos| pos.row == row_idx && pos.col == col_idx);
                let mut style = if hint.is_some() { hinted } else { idle };
                if is_home_key(key.key) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }

                let label = key_label(key, hint.is_some_and(|pos| pos.shifted));
                let padded = format!("{label:^w$}", w = width as usize);
                buf.set_stringn(x, y, &padded, width as usize, style);
            }
        }

        // Shift sits left of the bottom kana row.
        let shift_row = inner.y + 3;
        let shift_style = if self.hint.is_some_and(|pos| pos.shifted) {
            hinted
        } else {
            idle
        };
        buf.set_stringn(inner.x, shift_row, SHIFT_LABEL, 6, shift_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_label_plain_and_shifted() {
        let kb = KanaKeyboard::jis_kana();
        let z = kb.physical_key('z').unwrap();
        assert_eq!(key_label(z, false), " つ ");
        assert_eq!(key_label(z, true), " っ ");

        let t = kb.physical_key('t').unwrap();
        assert_eq!(key_label(t, true), " か ");
    }

    #[test]
    fn test_key_label_sentinels() {
        let kb = KanaKeyboard::jis_kana();
        assert_eq!(key_label(kb.physical_key(ENTER).unwrap(), false), "Enter");
        assert_eq!(key_label(kb.physical_key(SPACE).unwrap(), false), "Space");
    }

    #[test]
    fn test_sentinel_caps_fit_their_cells() {
        for key in [ENTER, SPACE] {
            assert!(cell_width(key) as usize >= key_cap(key).len());
        }
    }

    #[test]
    fn test_enter_label_is_drawn_whole() {
        let kb = KanaKeyboard::jis_kana();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, DIAGRAM_HEIGHT);
        let mut buf = Buffer::empty(area);
        KeyboardDiagram::new(kb, &KeyToken::Empty, &theme).render(area, &mut buf);

        let home_row: String = (0..area.width).map(|x| buf[(x, 3)].symbol()).collect();
        assert!(home_row.contains("Enter"), "home row: {home_row:?}");
    }

    #[test]
    fn test_hint_resolves_to_position() {
        let kb = KanaKeyboard::jis_kana();
        let theme = Theme::default();
        let diagram = KeyboardDiagram::new(kb, &KeyToken::Glyph('ゃ'), &theme);
        let pos = diagram.hint.unwrap();
        assert!(pos.shifted);
        assert_eq!(kb.key_at(pos).unwrap().key, '7');

        let diagram = KeyboardDiagram::new(kb, &KeyToken::Empty, &theme);
        assert!(diagram.hint.is_none());
    }

    #[test]
    fn test_renders_into_buffer() {
        let kb = KanaKeyboard::jis_kana();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, DIAGRAM_HEIGHT);
        let mut buf = Buffer::empty(area);
        KeyboardDiagram::new(kb, &KeyToken::Enter, &theme).render(area, &mut buf);
        assert_eq!(buf[(1, 4)].symbol(), "S");
    }
}
