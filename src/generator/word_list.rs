use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::generator::cache::{self, DiskCache};
use crate::kana::{JP_SPACE, decompose};
use crate::keyboard::model::KanaKeyboard;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

pub const BUNDLED_LIST: &str = "japanese_hiragana.json";

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("bundled word list {0} is missing")]
    MissingAsset(String),
    #[error("word list is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("failed to parse word list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word list {0:?} has no typeable words")]
    Empty(String),
}

/// On-disk shape shared with monkeytype language files.
#[derive(Debug, Serialize, Deserialize)]
struct WordListFile {
    #[serde(default)]
    name: String,
    words: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct WordList {
    name: String,
    words: Vec<String>,
}

impl WordList {
    pub fn new(name: &str, words: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            words,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, WordListError> {
        let file: WordListFile = serde_json::from_str(json)?;
        let words = file
            .words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Ok(Self {
            name: file.name,
            words,
        })
    }

    pub fn bundled() -> Result<Self, WordListError> {
        let file = WordAssets::get(BUNDLED_LIST)
            .ok_or_else(|| WordListError::MissingAsset(BUNDLED_LIST.to_string()))?;
        let content = std::str::from_utf8(file.data.as_ref())?;
        Self::from_json(content)
    }

    /// Downloaded list when enabled and reachable (cached on disk), otherwise
    /// the bundled one. Only typeable words are kept.
    pub fn load(config: &Config, keyboard: &KanaKeyboard) -> Result<Self, WordListError> {
        let mut list = if config.word_list_downloads_enabled {
            Self::downloaded(&config.word_list_url).unwrap_or_else(|| {
                warn!(url = %config.word_list_url, "falling back to bundled word list");
                Self::bundled()
            })?
        } else {
            Self::bundled()?
        };

        let total = list.len();
        list.retain_typeable(keyboard);
        if list.is_empty() {
            return Err(WordListError::Empty(list.name));
        }
        info!(name = %list.name, words = list.len(), dropped = total - list.len(), "word list loaded");
        Ok(list)
    }

    fn downloaded(url: &str) -> Option<Result<Self, WordListError>> {
        let cache = DiskCache::new("words");
        let cached = cache.as_ref().and_then(|c| c.get(url));
        let json = match cached {
            Some(json) => json,
            None => {
                let json = cache::fetch_url(url)?;
                if let Some(cache) = &cache {
                    cache.put(url, &json);
                }
                json
            }
        };

        match Self::from_json(&json) {
            Ok(list) => Some(Ok(list)),
            Err(err) => {
                warn!(url, %err, "downloaded word list is unusable");
                None
            }
        }
    }

    /// Drops words containing a glyph the keyboard cannot produce.
    pub fn retain_typeable(&mut self, keyboard: &KanaKeyboard) {
        self.words
            .retain(|w| w.chars().all(|c| keyboard.can_type(decompose(c).base)));
    }

    /// Target text of `word_count` words joined by the ideographic space.
    ///
    /// Takes a random contiguous window of the list and shuffles it; a list
    /// shorter than `word_count` is used whole, in order.
    pub fn compose_text<R: Rng>(&self, rng: &mut R, word_count: usize) -> String {
        let separator = JP_SPACE.to_string();
        if self.words.len() < word_count {
            return self.words.join(&separator);
        }

        let span = self.words.len() - word_count;
        let start = rng.gen_range(0..=span);
        let mut window: Vec<&str> = self.words[start..start + word_count]
            .iter()
            .map(String::as_str)
            .collect();
        window.shuffle(rng);
        window.join(&separator)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
