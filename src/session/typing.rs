use std::time::Instant;

use tracing::debug;

use crate::kana::{MatchResult, match_glyph};
use crate::keyboard::hint::{self, KeyToken};
use crate::session::classify::{self, Letter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestState {
    NotStarted,
    InProgress,
    Done,
}

/// Derived numbers for the results display. `None` means "no data yet".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub accuracy: Option<f64>,
    pub wpm: Option<f64>,
    pub elapsed_secs: f64,
}

/// A single typing test over one target text.
///
/// All mutation goes through [`TypingSession::update_input`] and
/// [`TypingSession::confirm_word`]; a restart replaces the whole value.
#[derive(Clone, Debug)]
pub struct TypingSession {
    target: Vec<char>,
    input: Vec<char>,
    error_count: usize,
    total_error_events: usize,
    total_keystrokes: usize,
    started_at: Option<Instant>,
    last_update_at: Option<Instant>,
    pressed_enter: bool,
}

/// Indices whose comparison is a mismatch, plus any input past the target.
/// A pending voicing mark is only forgiven on the last typed glyph; once the
/// cursor has moved on the mark can no longer be added.
fn count_errors(target: &[char], input: &[char]) -> usize {
    let last = input.len().saturating_sub(1);
    input
        .iter()
        .enumerate()
        .filter(|&(i, &typed)| match target.get(i) {
            Some(&expected) => match match_glyph(typed, expected) {
                MatchResult::Match => false,
                MatchResult::Partial => i < last,
                MatchResult::Mismatch => true,
            },
            None => true,
        })
        .count()
}

impl TypingSession {
    pub fn new(text: &str) -> Self {
        Self {
            target: text.chars().collect(),
            input: Vec::new(),
            error_count: 0,
            total_error_events: 0,
            total_keystrokes: 0,
            started_at: None,
            last_update_at: None,
            pressed_enter: false,
        }
    }

    /// Fresh session over the same text.
    pub fn restarted(&self) -> Self {
        Self {
            target: self.target.clone(),
            ..Self::new("")
        }
    }

    /// Applies a new input snapshot observed at `now` and returns the
    /// resulting lifecycle state.
    pub fn update_input(&mut self, input: &str, now: Instant) -> TestState {
        let before = self.state();
        let input: Vec<char> = input.chars().collect();

        let error_count = count_errors(&self.target, &input);
        if error_count > self.error_count {
            self.total_error_events += 1;
        }
        self.error_count = error_count;

        if input.len() > self.input.len() {
            self.total_keystrokes += 1;
        }

        if self.started_at.is_none() && self.input.is_empty() && !input.is_empty() {
            self.started_at = Some(now);
        }
        self.last_update_at = Some(now);
        self.pressed_enter = false;
        self.input = input;

        let after = self.state();
        if after != before {
            debug!(from = ?before, to = ?after, "typing test state changed");
        }
        after
    }

    /// Enter or the end of an IME composition: the current word is confirmed
    /// and the separator may be typed.
    pub fn confirm_word(&mut self) {
        self.pressed_enter = true;
    }

    pub fn state(&self) -> TestState {
        if self.target.is_empty() || self.input.is_empty() {
            return TestState::NotStarted;
        }
        if self.input.len() == self.target.len() && self.last_match() == Some(MatchResult::Match)
        {
            return TestState::Done;
        }
        TestState::InProgress
    }

    pub fn is_done(&self) -> bool {
        self.state() == TestState::Done
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn total_error_events(&self) -> usize {
        self.total_error_events
    }

    pub fn total_keystrokes(&self) -> usize {
        self.total_keystrokes
    }

    pub fn pressed_enter(&self) -> bool {
        self.pressed_enter
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.last_update_at) {
            (Some(start), Some(last)) => last.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Elapsed time as a running clock: measured up to `now` while the test
    /// is in progress, otherwise the same as [`TypingSession::elapsed_secs`].
    pub fn elapsed_secs_at(&self, now: Instant) -> f64 {
        match (self.state(), self.started_at) {
            (TestState::InProgress, Some(start)) => {
                now.saturating_duration_since(start).as_secs_f64()
            }
            _ => self.elapsed_secs(),
        }
    }

    /// Share of keystrokes that did not introduce a new error, in percent.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_keystrokes == 0 {
            return None;
        }
        let clean = self.total_keystrokes.saturating_sub(self.total_error_events);
        Some(clean as f64 / self.total_keystrokes as f64 * 100.0)
    }

    /// Keystrokes minus standing errors, in five-glyph words per minute.
    pub fn wpm(&self) -> Option<f64> {
        let elapsed = self.elapsed_secs();
        if self.total_keystrokes == 0 || elapsed <= 0.0 {
            return None;
        }
        let net = self.total_keystrokes as f64 - self.error_count as f64;
        Some((net / 5.0 / (elapsed / 60.0)).max(0.0))
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            accuracy: self.accuracy(),
            wpm: self.wpm(),
            elapsed_secs: self.elapsed_secs(),
        }
    }

    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        (self.input.len() as f64 / self.target.len() as f64).min(1.0)
    }

    pub fn last_match(&self) -> Option<MatchResult> {
        hint::last_match(&self.target, &self.input)
    }

    pub fn letters(&self) -> Vec<Letter> {
        classify::classify(&self.target, &self.input)
    }

    pub fn next_key(&self) -> KeyToken {
        hint::next_key(
            &self.target,
            self.input.len(),
            self.last_match(),
            self.pressed_enter,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn type_prefixes(session: &mut TypingSession, text: &str, start: Instant, step_ms: u64) {
        let chars: Vec<char> = text.chars().collect();
        for n in 1..=chars.len() {
            let snapshot: String = chars[..n].iter().collect();
            session.update_input(&snapshot, start + Duration::from_millis(step_ms * n as u64));
        }
    }

    #[test]
    fn test_new_session() {
        let session = TypingSession::new("あいう");
        assert_eq!(session.target().len(), 3);
        assert_eq!(session.state(), TestState::NotStarted);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_metrics_without_keystrokes_are_absent() {
        let session = TypingSession::new("あいう");
        let metrics = session.metrics();
        assert_eq!(metrics.accuracy, None);
        assert_eq!(metrics.wpm, None);
        assert_eq!(metrics.elapsed_secs, 0.0);
    }

    #[test]
    fn test_clean_run_through_five_glyphs() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいうえお");
        type_prefixes(&mut session, "あいうえお", t0, 200);

        assert_eq!(session.total_keystrokes(), 5);
        assert_eq!(session.total_error_events(), 0);
        assert_eq!(session.error_count(), 0);
        assert_eq!(session.state(), TestState::Done);
        assert_eq!(session.accuracy(), Some(100.0));
    }

    #[test]
    fn test_clean_run_on_longer_target_is_in_progress() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいうえおか");
        type_prefixes(&mut session, "あいうえお", t0, 200);
        assert_eq!(session.total_keystrokes(), 5);
        assert_eq!(session.state(), TestState::InProgress);
    }

    #[test]
    fn test_pending_mark_on_last_glyph_is_not_done() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("かが");
        session.update_input("か", t0);
        let state = session.update_input("かか", t0 + Duration::from_millis(100));
        assert_eq!(state, TestState::InProgress);
        assert_eq!(session.error_count(), 0);

        let state = session.update_input("かが", t0 + Duration::from_millis(200));
        assert_eq!(state, TestState::Done);
        // Folding the mark in does not grow the input.
        assert_eq!(session.total_keystrokes(), 2);
    }

    #[test]
    fn test_skipped_marks_count_once_passed() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("がぎぐき");
        type_prefixes(&mut session, "かきくき", t0, 100);

        assert_eq!(session.error_count(), 3);
        assert_eq!(session.total_error_events(), 3);
        assert_eq!(session.total_keystrokes(), 4);
        assert_eq!(session.accuracy(), Some(25.0));
    }

    #[test]
    fn test_pending_mark_on_cursor_glyph_is_forgiven() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("がぎ");
        session.update_input("か", t0);
        assert_eq!(session.error_count(), 0);
        session.update_input("かき", t0);
        assert_eq!(session.error_count(), 1);
        session.update_input("か", t0);
        assert_eq!(session.error_count(), 0);
        session.update_input("が", t0);
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_wrong_last_glyph_is_not_done() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あい");
        session.update_input("あ", t0);
        assert_eq!(session.update_input("あう", t0), TestState::InProgress);
    }

    #[test]
    fn test_error_events_count_occurrences() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいう");
        session.update_input("あ", t0);
        session.update_input("あか", t0);
        assert_eq!(session.error_count(), 1);
        assert_eq!(session.total_error_events(), 1);

        // Typing on top of a standing error does not count it again.
        session.update_input("あかう", t0);
        assert_eq!(session.total_error_events(), 1);

        session.update_input("あか", t0);
        session.update_input("あ", t0);
        assert_eq!(session.error_count(), 0);
        session.update_input("あさ", t0);
        assert_eq!(session.total_error_events(), 2);
        assert_eq!(session.total_keystrokes(), 4);
    }

    #[test]
    fn test_deletions_are_not_keystrokes() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいう");
        session.update_input("あ", t0);
        session.update_input("あい", t0);
        session.update_input("あ", t0);
        session.update_input("", t0);
        assert_eq!(session.total_keystrokes(), 2);
        assert_eq!(session.state(), TestState::NotStarted);
    }

    #[test]
    fn test_start_time_is_set_once() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいう");
        session.update_input("あ", t0);
        session.update_input("", t0 + Duration::from_secs(1));
        session.update_input("あ", t0 + Duration::from_secs(2));
        assert_eq!(session.started_at(), Some(t0));
        assert!((session.elapsed_secs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_wpm_from_elapsed_time() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいうえおかきくけこ");
        session.update_input("あ", t0);
        // Ten keystrokes over six seconds: 2 words in 0.1 min.
        let chars: Vec<char> = "あいうえおかきくけこ".chars().collect();
        for n in 2..=10 {
            let snapshot: String = chars[..n].iter().collect();
            session.update_input(&snapshot, t0 + Duration::from_millis(6000 * (n as u64 - 1) / 9));
        }
        let wpm = session.wpm().unwrap();
        assert!((wpm - 20.0).abs() < 1e-6, "wpm = {wpm}");
    }

    #[test]
    fn test_running_clock_follows_now_until_done() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あい");
        assert_eq!(session.elapsed_secs_at(t0 + Duration::from_secs(5)), 0.0);

        session.update_input("あ", t0);
        let later = t0 + Duration::from_secs(3);
        assert!((session.elapsed_secs_at(later) - 3.0).abs() < 1e-9);
        assert_eq!(session.elapsed_secs(), 0.0);

        session.update_input("あい", t0 + Duration::from_secs(4));
        let much_later = t0 + Duration::from_secs(60);
        assert!((session.elapsed_secs_at(much_later) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_instant_has_no_wpm() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あい");
        session.update_input("あ", t0);
        assert_eq!(session.wpm(), None);
        assert_eq!(session.accuracy(), Some(100.0));
    }

    #[test]
    fn test_accuracy_stays_in_bounds() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あいうえ");
        for (n, snapshot) in ["か", "", "さ", "", "た", "", "な"].iter().enumerate() {
            session.update_input(snapshot, t0 + Duration::from_millis(n as u64 * 50));
        }
        let acc = session.accuracy().unwrap();
        assert!((0.0..=100.0).contains(&acc));
        assert_eq!(acc, 0.0);
    }

    #[test]
    fn test_input_change_clears_enter() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あ\u{3000}い");
        session.update_input("あ", t0);
        assert_eq!(session.next_key(), KeyToken::Enter);
        session.confirm_word();
        assert!(session.pressed_enter());
        assert_eq!(session.next_key(), KeyToken::Glyph('\u{3000}'));
        session.update_input("あ\u{3000}", t0);
        assert!(!session.pressed_enter());
        assert_eq!(session.next_key(), KeyToken::Glyph('い'));
    }

    #[test]
    fn test_overflow_counts_as_error_and_never_done() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あ");
        session.update_input("あ", t0);
        assert!(session.is_done());
        assert_eq!(session.update_input("あい", t0), TestState::InProgress);
        assert_eq!(session.error_count(), 1);
    }

    #[test]
    fn test_empty_target_never_starts() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("");
        assert_eq!(session.update_input("あ", t0), TestState::NotStarted);
        assert!(session.letters().is_empty());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_restarted_keeps_text_only() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("あい");
        session.update_input("か", t0);
        let fresh = session.restarted();
        assert_eq!(fresh.target_text(), "あい");
        assert_eq!(fresh.total_keystrokes(), 0);
        assert_eq!(fresh.total_error_events(), 0);
        assert_eq!(fresh.started_at(), None);
    }
}
