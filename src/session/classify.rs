use crate::kana::{MatchResult, match_glyph};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterState {
    Correct,
    Wrong,
    /// Cursor position.
    Current,
    /// Right base, voicing mark pending.
    Partial,
    /// Not reached yet.
    Next,
}

/// One rendered cell of the target line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    /// Glyph to draw: the target glyph, or the mistyped one for `Wrong`.
    pub glyph: char,
    pub state: LetterState,
}

/// Per-glyph render state for the whole target line, one entry per target
/// glyph. Typed glyphs past the end of the target are not represented.
pub fn classify(target: &[char], input: &[char]) -> Vec<Letter> {
    target
        .iter()
        .enumerate()
        .map(|(i, &expected)| match input.get(i) {
            Some(&typed) => match match_glyph(typed, expected) {
                MatchResult::Match => Letter {
                    glyph: expected,
                    state: LetterState::Correct,
                },
                MatchResult::Mismatch => Letter {
                    glyph: typed,
                    state: LetterState::Wrong,
                },
                MatchResult::Partial => Letter {
                    glyph: expected,
                    state: LetterState::Partial,
                },
            },
            None if i == input.len() => Letter {
                glyph: expected,
                state: LetterState::Current,
            },
            None => Letter {
                glyph: expected,
                state: LetterState::Next,
            },
        })
        .collect()
}
