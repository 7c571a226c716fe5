//! Spanish (Colombia) rendering of amounts and dates.

pub mod formatting;
pub mod numbers;

pub use formatting::{due_date_sentence, group_thousands, long_date, money_mcte};
pub use numbers::{AmountInWords, UnsupportedMagnitude, WORDS_LIMIT, amount_to_words, number_to_words};
