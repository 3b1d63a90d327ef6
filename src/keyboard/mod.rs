pub mod display;
pub mod hint;
pub mod model;

pub use hint::{KeyToken, last_match, next_key};
pub use model::{KanaKeyboard, KeyPosition, PhysicalKey};
