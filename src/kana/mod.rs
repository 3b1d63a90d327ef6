//! Kana glyph model: voicing decomposition, glyph matching and romaji readings.
//!
//! A glyph is a single `char`. Every hiragana, both spacing voicing marks and
//! the word separator are single code points, so per-`char` indexing lines up
//! with what the user sees.

pub mod matcher;
pub mod romaji;

use icu_normalizer::ComposingNormalizerBorrowed;

pub use matcher::{MatchResult, match_glyph};

/// Ideographic space joining words in a target text.
pub const JP_SPACE: char = '\u{3000}';
/// Spacing voiced mark (dakuten), as printed on the keyboard.
pub const VOICED_MARK: char = '\u{309B}';
/// Spacing semi-voiced mark (handakuten), as printed on the keyboard.
pub const SEMI_VOICED_MARK: char = '\u{309C}';

const COMBINING_VOICED_MARK: char = '\u{3099}';
const COMBINING_SEMI_VOICED_MARK: char = '\u{309A}';

/// Voicing marker attached to a kana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diacritic {
    Voiced,
    SemiVoiced,
    /// No marker.
    Plain,
}

impl Diacritic {
    /// The keyboard glyph that applies this marker.
    pub fn mark(self) -> Option<char> {
        match self {
            Diacritic::Voiced => Some(VOICED_MARK),
            Diacritic::SemiVoiced => Some(SEMI_VOICED_MARK),
            Diacritic::Plain => None,
        }
    }

    /// Recognizes both the spacing and combining forms of a mark.
    pub fn from_mark(ch: char) -> Option<Self> {
        match ch {
            VOICED_MARK | COMBINING_VOICED_MARK => Some(Diacritic::Voiced),
            SEMI_VOICED_MARK | COMBINING_SEMI_VOICED_MARK => Some(Diacritic::SemiVoiced),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposition {
    pub base: char,
    pub diacritic: Diacritic,
}

fn voiced_base(ch: char) -> Option<char> {
    let base = match ch {
        'が' => 'か',
        'ぎ' => 'き',
        'ぐ' => 'く',
        'げ' => 'け',
        'ご' => 'こ',
        'ざ' => 'さ',
        'じ' => 'し',
        'ず' => 'す',
        'ぜ' => 'せ',
        'ぞ' => 'そ',
        'だ' => 'た',
        'ぢ' => 'ち',
        'づ' => 'つ',
        'で' => 'て',
        'ど' => 'と',
        'ば' => 'は',
        'び' => 'ひ',
        'ぶ' => 'ふ',
        'べ' => 'へ',
        'ぼ' => 'ほ',
        'ゔ' => 'う',
        _ => return None,
    };
    Some(base)
}

fn semi_voiced_base(ch: char) -> Option<char> {
    let base = match ch {
        'ぱ' => 'は',
        'ぴ' => 'ひ',
        'ぷ' => 'ふ',
        'ぺ' => 'へ',
        'ぽ' => 'ほ',
        _ => return None,
    };
    Some(base)
}

/// Splits a glyph into its unvoiced base and voicing marker.
///
/// Total: glyphs outside the voicing tables come back as their own base with
/// [`Diacritic::Plain`].
pub fn decompose(glyph: char) -> Decomposition {
    if let Some(base) = voiced_base(glyph) {
        Decomposition {
            base,
            diacritic: Diacritic::Voiced,
        }
    } else if let Some(base) = semi_voiced_base(glyph) {
        Decomposition {
            base,
            diacritic: Diacritic::SemiVoiced,
        }
    } else {
        Decomposition {
            base: glyph,
            diacritic: Diacritic::Plain,
        }
    }
}

/// Inverse of [`decompose`]. `None` when `base` has no form with `diacritic`.
pub fn compose(base: char, diacritic: Diacritic) -> Option<char> {
    let composed = match (diacritic, base) {
        (Diacritic::Plain, _) => return Some(base),
        (Diacritic::Voiced, 'か') => 'が',
        (Diacritic::Voiced, 'き') => 'ぎ',
        (Diacritic::Voiced, 'く') => 'ぐ',
        (Diacritic::Voiced, 'け') => 'げ',
        (Diacritic::Voiced, 'こ') => 'ご',
        (Diacritic::Voiced, 'さ') => 'ざ',
        (Diacritic::Voiced, 'し') => 'じ',
        (Diacritic::Voiced, 'す') => 'ず',
        (Diacritic::Voiced, 'せ') => 'ぜ',
        (Diacritic::Voiced, 'そ') => 'ぞ',
        (Diacritic::Voiced, 'た') => 'だ',
        (Diacritic::Voiced, 'ち') => 'ぢ',
        (Diacritic::Voiced, 'つ') => 'づ',
        (Diacritic::Voiced, 'て') => 'で',
        (Diacritic::Voiced, 'と') => 'ど',
        (Diacritic::Voiced, 'は') => 'ば',
        (Diacritic::Voiced, 'ひ') => 'び',
        (Diacritic::Voiced, 'ふ') => 'ぶ',
        (Diacritic::Voiced, 'へ') => 'べ',
        (Diacritic::Voiced, 'ほ') => 'ぼ',
        (Diacritic::Voiced, 'う') => 'ゔ',
        (Diacritic::SemiVoiced, 'は') => 'ぱ',
        (Diacritic::SemiVoiced, 'ひ') => 'ぴ',
        (Diacritic::SemiVoiced, 'ふ') => 'ぷ',
        (Diacritic::SemiVoiced, 'へ') => 'ぺ',
        (Diacritic::SemiVoiced, 'ほ') => 'ぽ',
        _ => return None,
    };
    Some(composed)
}

/// True for the word separator and anything typed in its place.
pub fn is_separator(ch: char) -> bool {
    ch == JP_SPACE || ch == ' '
}

/// NFC-normalizes raw input so a base followed by a combining mark becomes a
/// single precomposed glyph.
pub fn normalize(input: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(input)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MARKED: &str = "がぎぐげござじずぜぞだぢづでどばびぶべぼゔぱぴぷぺぽ";

    #[test]
    fn voiced_glyph_splits_to_base() {
        assert_eq!(
            decompose('が'),
            Decomposition {
                base: 'か',
                diacritic: Diacritic::Voiced
            }
        );
        assert_eq!(decompose('ど').base, 'と');
    }

    #[test]
    fn semi_voiced_glyph_splits_to_base() {
        assert_eq!(
            decompose('ぱ'),
            Decomposition {
                base: 'は',
                diacritic: Diacritic::SemiVoiced
            }
        );
    }

    #[test]
    fn unknown_glyph_is_its_own_base() {
        for ch in ['あ', 'か', 'ん', 'a', JP_SPACE, VOICED_MARK] {
            assert_eq!(
                decompose(ch),
                Decomposition {
                    base: ch,
                    diacritic: Diacritic::Plain
                }
            );
        }
    }

    #[test]
    fn bases_have_no_further_diacritic() {
        for ch in ALL_MARKED.chars() {
            let base = decompose(ch).base;
            assert_eq!(decompose(base).diacritic, Diacritic::Plain, "{ch}");
            assert_eq!(decompose(base).base, base);
        }
    }

    #[test]
    fn compose_inverts_decompose() {
        for ch in ALL_MARKED.chars() {
            let d = decompose(ch);
            assert_eq!(compose(d.base, d.diacritic), Some(ch), "{ch}");
        }
    }

    #[test]
    fn compose_rejects_impossible_forms() {
        assert_eq!(compose('か', Diacritic::SemiVoiced), None);
        assert_eq!(compose('あ', Diacritic::Voiced), None);
        assert_eq!(compose('あ', Diacritic::Plain), Some('あ'));
    }

    #[test]
    fn marks_round_trip() {
        assert_eq!(Diacritic::from_mark(VOICED_MARK), Some(Diacritic::Voiced));
        assert_eq!(Diacritic::from_mark('\u{309A}'), Some(Diacritic::SemiVoiced));
        assert_eq!(Diacritic::from_mark('か'), None);
        assert_eq!(Diacritic::Voiced.mark(), Some(VOICED_MARK));
        assert_eq!(Diacritic::Plain.mark(), None);
    }

    #[test]
    fn normalize_folds_combining_marks() {
        assert_eq!(normalize("か\u{3099}"), "が");
        assert_eq!(normalize("は\u{309A}し"), "ぱし");
        assert_eq!(normalize("かな"), "かな");
    }
}
