use crate::kana::{Diacritic, decompose, is_separator};

/// Outcome of comparing one typed glyph with its target glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchResult {
    Match,
    Mismatch,
    /// Right base, voicing mark still pending on one side.
    Partial,
}

/// Compares a typed glyph against a target glyph.
///
/// Symmetric in its arguments. Separators only match other separators, with
/// ASCII space standing in for the ideographic space.
pub fn match_glyph(typed: char, target: char) -> MatchResult {
    if is_separator(typed) || is_separator(target) {
        return if is_separator(typed) && is_separator(target) {
            MatchResult::Match
        } else {
            MatchResult::Mismatch
        };
    }

    let typed = decompose(typed);
    let target = decompose(target);
    if typed.base != target.base {
        return MatchResult::Mismatch;
    }

    match (typed.diacritic, target.diacritic) {
        (Diacritic::Plain, Diacritic::Plain) => MatchResult::Match,
        (Diacritic::Plain, _) | (_, Diacritic::Plain) => MatchResult::Partial,
        (a, b) if a == b => MatchResult::Match,
        _ => MatchResult::Mismatch,
    }
}
