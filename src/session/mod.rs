pub mod classify;
pub mod input;
pub mod result;
pub mod typing;

pub use classify::{Letter, LetterState, classify};
pub use typing::{Metrics, TestState, TypingSession};
