use crate::kana::{JP_SPACE, MatchResult, decompose, is_separator, match_glyph};

/// What the keyboard diagram should highlight next.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// Nothing to highlight.
    Empty,
    Glyph(char),
    /// Word confirmation before a separator.
    Enter,
}

/// Comparison of the most recently typed glyph with its target, if any.
pub fn last_match(target: &[char], input: &[char]) -> Option<MatchResult> {
    let idx = input.len().checked_sub(1)?;
    let expected = *target.get(idx)?;
    Some(match_glyph(input[idx], expected))
}

/// Resolves the next key to press.
///
/// A pending voicing mark on the previous glyph takes priority. A separator
/// takes two steps: Enter to confirm the word, then the space bar. Voiced
/// targets hint their unvoiced base, since the mark is its own keystroke.
pub fn next_key(
    target: &[char],
    input_len: usize,
    last: Option<MatchResult>,
    pressed_enter: bool,
) -> KeyToken {
    if input_len > target.len() {
        return KeyToken::Empty;
    }

    if last == Some(MatchResult::Partial) {
        let previous = input_len.checked_sub(1).and_then(|i| target.get(i));
        if let Some(&previous) = previous {
            return match decompose(previous).diacritic.mark() {
                Some(mark) => KeyToken::Glyph(mark),
                // Typed a mark the target doesn't have; nothing useful to hint.
                None => KeyToken::Empty,
            };
        }
    }

    let Some(&current) = target.get(input_len) else {
        return KeyToken::Empty;
    };

    if is_separator(current) {
        return if pressed_enter {
            KeyToken::Glyph(JP_SPACE)
        } else {
            KeyToken::Enter
        };
    }

    KeyToken::Glyph(decompose(current).base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::{SEMI_VOICED_MARK, VOICED_MARK};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn hint_for(target: &str, input: &str, pressed_enter: bool) -> KeyToken {
        let target = chars(target);
        let input = chars(input);
        next_key(
            &target,
            input.len(),
            last_match(&target, &input),
            pressed_enter,
        )
    }

    #[test]
    fn first_glyph_is_hinted_before_typing() {
        assert_eq!(hint_for("あい", "", false), KeyToken::Glyph('あ'));
    }

    #[test]
    fn voiced_target_hints_its_base() {
        assert_eq!(hint_for("かがみ", "か", false), KeyToken::Glyph('か'));
        assert_eq!(hint_for("ぱん", "", false), KeyToken::Glyph('は'));
    }

    #[test]
    fn partial_glyph_hints_the_pending_mark() {
        assert_eq!(hint_for("がっこう", "か", false), KeyToken::Glyph(VOICED_MARK));
        assert_eq!(hint_for("ぱん", "は", false), KeyToken::Glyph(SEMI_VOICED_MARK));
    }

    #[test]
    fn partial_on_final_glyph_still_hints_the_mark() {
        assert_eq!(hint_for("かぎ", "かき", false), KeyToken::Glyph(VOICED_MARK));
    }

    #[test]
    fn extra_mark_on_plain_target_hints_nothing() {
        assert_eq!(hint_for("かき", "が", false), KeyToken::Empty);
    }

    #[test]
    fn separator_needs_enter_then_space() {
        let target = "あ\u{3000}い";
        assert_eq!(hint_for(target, "あ", false), KeyToken::Enter);
        assert_eq!(hint_for(target, "あ", true), KeyToken::Glyph(JP_SPACE));
    }

    #[test]
    fn nothing_hinted_past_the_end() {
        assert_eq!(hint_for("あ", "あ", false), KeyToken::Empty);
        assert_eq!(hint_for("あ", "あい", false), KeyToken::Empty);
        assert_eq!(hint_for("", "", false), KeyToken::Empty);
    }

    #[test]
    fn last_match_needs_both_sides() {
        assert_eq!(last_match(&chars("あ"), &[]), None);
        assert_eq!(last_match(&chars("あ"), &chars("あい")), None);
        assert_eq!(
            last_match(&chars("が"), &chars("か")),
            Some(MatchResult::Partial)
        );
    }
}
