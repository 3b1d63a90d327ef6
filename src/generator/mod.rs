pub mod cache;
pub mod word_list;

pub use word_list::{WordList, WordListError};
