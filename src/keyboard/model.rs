use std::sync::OnceLock;

use crate::kana::{JP_SPACE, MatchResult, SEMI_VOICED_MARK, VOICED_MARK, match_glyph};
use crate::keyboard::display::{ENTER, SPACE};
use crate::keyboard::hint::KeyToken;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalKey {
    /// Physical key, with `'\n'` for Enter and `' '` for the space bar.
    pub key: char,
    pub output: KeyToken,
    pub shifted: Option<char>,
}

impl PhysicalKey {
    fn kana(key: char, kana: char) -> Self {
        Self {
            key,
            output: KeyToken::Glyph(kana),
            shifted: None,
        }
    }

    fn kana_shifted(key: char, kana: char, shifted: char) -> Self {
        Self {
            key,
            output: KeyToken::Glyph(kana),
            shifted: Some(shifted),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPosition {
    pub row: usize,
    pub col: usize,
    pub shifted: bool,
}

/// JIS kana assignments on a US physical keyboard.
#[derive(Clone, Debug)]
pub struct KanaKeyboard {
    pub rows: Vec<Vec<PhysicalKey>>,
}

impl KanaKeyboard {
    /// Shared, process-wide table.
    pub fn jis_kana() -> &'static KanaKeyboard {
        static TABLE: OnceLock<KanaKeyboard> = OnceLock::new();
        TABLE.get_or_init(Self::build_jis_kana)
    }

    fn build_jis_kana() -> Self {
        use PhysicalKey as K;

        Self {
            rows: vec![
                vec![
                    K::kana('`', 'ろ'),
                    K::kana('1', 'ぬ'),
                    K::kana('2', 'ふ'),
                    K::kana_shifted('3', 'あ', 'ぁ'),
                    K::kana_shifted('4', 'う', 'ぅ'),
                    K::kana_shifted('5', 'え', 'ぇ'),
                    K::kana_shifted('6', 'お', 'ぉ'),
                    K::kana_shifted('7', 'や', 'ゃ'),
                    K::kana_shifted('8', 'ゆ', 'ゅ'),
                    K::kana_shifted('9', 'よ', 'ょ'),
                    K::kana_shifted('0', 'わ', 'を'),
                    K::kana_shifted('-', 'ほ', 'ー'),
                    K::kana('=', 'へ'),
                ],
                vec![
                    K::kana('q', 'た'),
                    K::kana('w', 'て'),
                    K::kana_shifted('e', 'い', 'ぃ'),
                    K::kana('r', 'す'),
                    K::kana('t', 'か'),
                    K::kana('y', 'ん'),
                    K::kana('u', 'な'),
                    K::kana('i', 'に'),
                    K::kana('o', 'ら'),
                    K::kana('p', 'せ'),
                    K::kana_shifted('[', VOICED_MARK, '「'),
                    K::kana_shifted(']', SEMI_VOICED_MARK, '」'),
                    K::kana('\\', 'む'),
                ],
                vec![
                    K::kana('a', 'ち'),
                    K::kana('s', 'と'),
                    K::kana('d', 'し'),
                    K::kana('f', 'は'),
                    K::kana('g', 'き'),
                    K::kana('h', 'く'),
                    K::kana('j', 'ま'),
                    K::kana('k', 'の'),
                    K::kana('l', 'り'),
                    K::kana(';', 'れ'),
                    K::kana('\'', 'け'),
                    PhysicalKey {
                        key: ENTER,
                        output: KeyToken::Enter,
                        shifted: None,
                    },
                ],
                vec![
                    K::kana_shifted('z', 'つ', 'っ'),
                    K::kana('x', 'さ'),
                    K::kana('c', 'そ'),
                    K::kana('v', 'ひ'),
                    K::kana('b', 'こ'),
                    K::kana('n', 'み'),
                    K::kana('m', 'も'),
                    K::kana_shifted(',', 'ね', '、'),
                    K::kana_shifted('.', 'る', '。'),
                    K::kana_shifted('/', 'め', '・'),
                ],
                vec![K::kana(SPACE, JP_SPACE)],
            ],
        }
    }

    /// Finds the key producing `token`. Unshifted outputs are scanned before
    /// shifted ones, first match wins.
    pub fn locate(&self, token: &KeyToken) -> Option<KeyPosition> {
        let produces = |output: &KeyToken| match (token, output) {
            (KeyToken::Enter, KeyToken::Enter) => true,
            (KeyToken::Glyph(want), KeyToken::Glyph(have)) => {
                match_glyph(*want, *have) == MatchResult::Match
            }
            _ => false,
        };

        let unshifted = self.positions().find(|&(_, _, key)| produces(&key.output));
        if let Some((row, col, _)) = unshifted {
            return Some(KeyPosition {
                row,
                col,
                shifted: false,
            });
        }

        let KeyToken::Glyph(want) = token else {
            return None;
        };
        self.positions()
            .find(|&(_, _, key)| {
                key.shifted
                    .is_some_and(|s| match_glyph(*want, s) == MatchResult::Match)
            })
            .map(|(row, col, _)| KeyPosition {
                row,
                col,
                shifted: true,
            })
    }

    /// What pressing `key` (optionally with Shift) produces. Shift on a key
    /// without a shifted glyph falls back to the plain output.
    pub fn output_for(&self, key: char, shifted: bool) -> Option<KeyToken> {
        let physical = self.physical_key(key)?;
        match physical.shifted {
            Some(glyph) if shifted => Some(KeyToken::Glyph(glyph)),
            _ => Some(physical.output.clone()),
        }
    }

    pub fn physical_key(&self, key: char) -> Option<&PhysicalKey> {
        self.rows.iter().flatten().find(|k| k.key == key)
    }

    pub fn key_at(&self, position: KeyPosition) -> Option<&PhysicalKey> {
        self.rows.get(position.row)?.get(position.col)
    }

    /// True when some key (shifted or not) types `glyph`.
    pub fn can_type(&self, glyph: char) -> bool {
        self.locate(&KeyToken::Glyph(glyph)).is_some()
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize, &PhysicalKey)> {
        self.rows.iter().enumerate().flat_map(|(row, keys)| {
            keys.iter()
                .enumerate()
                .map(move |(col, key)| (row, col, key))
        })
    }
}
