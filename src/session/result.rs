use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::typing::TypingSession;

/// Results under this accuracy (percent) are shown but never submitted.
pub const MIN_VALID_ACCURACY: f64 = 30.0;
pub const MIN_SUBMITTED_WPM: f64 = 1.0;
pub const MAX_SUBMITTED_WPM: f64 = 300.0;
/// Accuracy bounds for a submitted score, as fractions.
pub const MIN_SUBMITTED_ACCURACY: f64 = 0.2;
pub const MAX_SUBMITTED_ACCURACY: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TestResult {
    Valid {
        wpm: f64,
        accuracy: f64,
        elapsed_secs: f64,
        keystrokes: usize,
        timestamp: DateTime<Utc>,
    },
    Invalid {
        accuracy: f64,
        elapsed_secs: f64,
        keystrokes: usize,
        timestamp: DateTime<Utc>,
    },
}

impl TestResult {
    /// Snapshot of a finished session; `None` until the session is done.
    pub fn from_session(session: &TypingSession) -> Option<Self> {
        if !session.is_done() {
            return None;
        }
        Some(Self::classify(
            session.accuracy().unwrap_or(0.0),
            session.wpm().unwrap_or(0.0),
            session.elapsed_secs(),
            session.total_keystrokes(),
            Utc::now(),
        ))
    }

    pub fn classify(
        accuracy: f64,
        wpm: f64,
        elapsed_secs: f64,
        keystrokes: usize,
        timestamp: DateTime<Utc>,
    ) -> Self {
        if accuracy < MIN_VALID_ACCURACY {
            TestResult::Invalid {
                accuracy,
                elapsed_secs,
                keystrokes,
                timestamp,
            }
        } else {
            TestResult::Valid {
                wpm,
                accuracy,
                elapsed_secs,
                keystrokes,
                timestamp,
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TestResult::Valid { .. })
    }

    pub fn accuracy(&self) -> f64 {
        match self {
            TestResult::Valid { accuracy, .. } | TestResult::Invalid { accuracy, .. } => *accuracy,
        }
    }

    pub fn wpm(&self) -> Option<f64> {
        match self {
            TestResult::Valid { wpm, .. } => Some(*wpm),
            TestResult::Invalid { .. } => None,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self {
            TestResult::Valid { elapsed_secs, .. } | TestResult::Invalid { elapsed_secs, .. } => {
                *elapsed_secs
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("accuracy {0:.1}% is below the {min}% needed to submit", min = MIN_VALID_ACCURACY)]
    InvalidResult(f64),
    #[error("{0:.1} wpm is below the minimum of {min}", min = MIN_SUBMITTED_WPM)]
    WpmTooLow(f64),
    #[error("{0:.1} wpm is above {max}; are you even human?", max = MAX_SUBMITTED_WPM)]
    WpmTooHigh(f64),
    #[error(
        "accuracy {0:.2} is outside {min}..={max}",
        min = MIN_SUBMITTED_ACCURACY,
        max = MAX_SUBMITTED_ACCURACY
    )]
    AccuracyOutOfRange(f64),
}

/// The pair handed to score persistence. `acc` is a fraction, not a percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub wpm: f64,
    pub acc: f64,
}

impl TryFrom<&TestResult> for Score {
    type Error = ScoreError;

    fn try_from(result: &TestResult) -> Result<Self, Self::Error> {
        let TestResult::Valid { wpm, accuracy, .. } = *result else {
            return Err(ScoreError::InvalidResult(result.accuracy()));
        };

        if wpm < MIN_SUBMITTED_WPM {
            return Err(ScoreError::WpmTooLow(wpm));
        }
        if wpm > MAX_SUBMITTED_WPM {
            return Err(ScoreError::WpmTooHigh(wpm));
        }

        let acc = accuracy / 100.0;
        if !(MIN_SUBMITTED_ACCURACY..=MAX_SUBMITTED_ACCURACY).contains(&acc) {
            return Err(ScoreError::AccuracyOutOfRange(acc));
        }

        Ok(Score { wpm, acc })
    }
}
