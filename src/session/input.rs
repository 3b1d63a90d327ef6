//! Kana input method: turns physical key presses into input snapshots.
//!
//! Voicing marks are separate keystrokes that fold into the glyph before
//! them, so a mark changes the last glyph instead of growing the input.

use std::time::Instant;

use crate::kana::{self, Diacritic, JP_SPACE, compose, decompose, is_separator};
use crate::keyboard::display::BACKSPACE;
use crate::keyboard::hint::KeyToken;
use crate::keyboard::model::KanaKeyboard;
use crate::session::typing::{TestState, TypingSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Glyph(char),
    Diacritic(Diacritic),
    Separator,
    /// Word confirmation (Enter or the end of an IME composition).
    Enter,
    Backspace,
}

/// Maps a character reported by a US-layout terminal back to its physical
/// key, with whether Shift produced it.
fn us_physical_key(ch: char) -> (char, bool) {
    let base = match ch {
        '~' => '`',
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        c if c.is_ascii_uppercase() => c.to_ascii_lowercase(),
        c => return (c, false),
    };
    (base, true)
}

fn action_for_glyph(glyph: char) -> InputAction {
    if let Some(diacritic) = Diacritic::from_mark(glyph) {
        InputAction::Diacritic(diacritic)
    } else if is_separator(glyph) {
        InputAction::Separator
    } else {
        InputAction::Glyph(glyph)
    }
}

/// Resolves a key press. Physical keys go through the kana table; kana
/// already composed by a host IME are taken as they are.
pub fn action_for_key(keyboard: &KanaKeyboard, key: char, shift: bool) -> Option<InputAction> {
    if key == BACKSPACE {
        return Some(InputAction::Backspace);
    }

    let (physical, implied_shift) = us_physical_key(key);
    if let Some(output) = keyboard.output_for(physical, shift || implied_shift) {
        return match output {
            KeyToken::Enter => Some(InputAction::Enter),
            KeyToken::Glyph(glyph) => Some(action_for_glyph(glyph)),
            KeyToken::Empty => None,
        };
    }

    if key.is_ascii() {
        None
    } else {
        Some(action_for_glyph(key))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    /// New input snapshot.
    Replace(String),
    ConfirmWord,
    Ignored,
}

/// Applies `action` to the current input. Glyphs that would run past
/// `target_len` are ignored; folding a mark into the last glyph never is.
pub fn apply(input: &[char], action: InputAction, target_len: usize) -> Edit {
    let has_room = input.len() < target_len;
    let appended = |glyph: char| {
        if !has_room {
            return Edit::Ignored;
        }
        let mut next: String = input.iter().collect();
        next.push(glyph);
        Edit::Replace(kana::normalize(&next))
    };

    match action {
        InputAction::Enter => Edit::ConfirmWord,
        InputAction::Backspace => match input.split_last() {
            Some((_, rest)) => Edit::Replace(rest.iter().collect()),
            None => Edit::Ignored,
        },
        InputAction::Separator => appended(JP_SPACE),
        InputAction::Glyph(glyph) => appended(glyph),
        InputAction::Diacritic(diacritic) => {
            let folded = input.split_last().and_then(|(&last, rest)| {
                let composed = compose(decompose(last).base, diacritic)?;
                (composed != last).then(|| rest.iter().chain([&composed]).collect::<String>())
            });
            match (folded, diacritic.mark()) {
                (Some(next), _) => Edit::Replace(next),
                (None, Some(mark)) => appended(mark),
                (None, None) => Edit::Ignored,
            }
        }
    }
}

/// Runs one action against the session. Returns the state after the action
/// when it changed anything.
pub fn process_action(
    session: &mut TypingSession,
    action: InputAction,
    now: Instant,
) -> Option<TestState> {
    match apply(session.input(), action, session.target().len()) {
        Edit::Replace(next) => Some(session.update_input(&next, now)),
        Edit::ConfirmWord => {
            session.confirm_word();
            Some(session.state())
        }
        Edit::Ignored => None,
    }
}
