use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use kare::config::Config;
use kare::generator::WordList;
use kare::keyboard::KanaKeyboard;
use kare::session::input::{self, InputAction};
use kare::session::result::{Score, TestResult};
use kare::session::{TestState, TypingSession};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Result,
}

pub struct App {
    pub screen: AppScreen,
    pub session: TypingSession,
    pub last_result: Option<TestResult>,
    pub theme: Theme,
    pub config: Config,
    pub keyboard: &'static KanaKeyboard,
    pub should_quit: bool,
    word_list: WordList,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, word_list: WordList) -> Self {
        Self::with_rng(config, word_list, SmallRng::from_entropy())
    }

    pub fn with_rng(config: Config, word_list: WordList, rng: SmallRng) -> Self {
        let mut app = Self {
            screen: AppScreen::Typing,
            session: TypingSession::new(""),
            last_result: None,
            theme: Theme::default(),
            config,
            keyboard: KanaKeyboard::jis_kana(),
            should_quit: false,
            word_list,
            rng,
        };
        app.start_test();
        app
    }

    pub fn word_list(&self) -> &WordList {
        &self.word_list
    }

    /// Fresh text from the word list.
    pub fn start_test(&mut self) {
        let text = self
            .word_list
            .compose_text(&mut self.rng, self.config.word_count);
        info!(
            words = self.config.word_count,
            glyphs = text.chars().count(),
            "starting test"
        );
        self.session = TypingSession::new(&text);
        self.last_result = None;
        self.screen = AppScreen::Typing;
    }

    /// Same text, cleared progress.
    pub fn restart_test(&mut self) {
        debug!("restarting test");
        self.session = self.session.restarted();
        self.last_result = None;
        self.screen = AppScreen::Typing;
    }

    /// Feeds one key press to the session. `key` is the character the
    /// terminal reported; `shift` whether Shift was held.
    pub fn type_key(&mut self, key: char, shift: bool) {
        let Some(action) = input::action_for_key(self.keyboard, key, shift) else {
            return;
        };
        self.apply_action(action, Instant::now());
    }

    pub fn apply_action(&mut self, action: InputAction, now: Instant) {
        if self.screen != AppScreen::Typing {
            return;
        }
        if input::process_action(&mut self.session, action, now) == Some(TestState::Done) {
            self.finish_test();
        }
    }

    fn finish_test(&mut self) {
        let Some(result) = TestResult::from_session(&self.session) else {
            return;
        };

        info!(
            valid = result.is_valid(),
            wpm = result.wpm(),
            accuracy = result.accuracy(),
            elapsed_secs = result.elapsed_secs(),
            keystrokes = self.session.total_keystrokes(),
            "test finished"
        );
        match Score::try_from(&result) {
            Ok(score) => debug!(wpm = score.wpm, acc = score.acc, "score accepted"),
            Err(err) => warn!(%err, "score rejected"),
        }

        self.last_result = Some(result);
        self.screen = AppScreen::Result;
    }
}
