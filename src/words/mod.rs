mod store;
mod word;

pub use store::{SqliteWordStore, WordStore};
pub use word::{MAX_WORD_LEN, ValidatedWord, WordEntry, WordForm, fold_case};
