//! Number words used in spoken clock times
//!
//! Resolution is a plain sum over the words of a phrase, so "twenty-five"
//! and "twenty five" both give 25. Nonsense compounds such as "two two"
//! still sum (to 4); range checks are left to the grammar rule that asked.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Closed vocabulary of number words
pub static NUMBER_WORDS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("zero", 0);
    map.insert("oh", 0);
    map.insert("one", 1);
    map.insert("two", 2);
    map.insert("three", 3);
    map.insert("four", 4);
    map.insert("five", 5);
    map.insert("six", 6);
    map.insert("seven", 7);
    map.insert("eight", 8);
    map.insert("nine", 9);
    map.insert("ten", 10);
    map.insert("eleven", 11);
    map.insert("twelve", 12);
    map.insert("thirteen", 13);
    map.insert("fourteen", 14);
    map.insert("fifteen", 15);
    map.insert("sixteen", 16);
    map.insert("seventeen", 17);
    map.insert("eighteen", 18);
    map.insert("nineteen", 19);
    map.insert("twenty", 20);
    map.insert("thirty", 30);
    map.insert("forty", 40);
    map.insert("fifty", 50);
    map
});

/// Resolve a number word or compound ("seven", "twenty-five", "oh five").
///
/// Returns `None` if the phrase is empty or any word is outside the
/// vocabulary.
pub fn parse_number_word(phrase: &str) -> Option<u32> {
    let phrase = phrase.replace('-', " ");
    let phrase = phrase.trim();
    if let Some(value) = NUMBER_WORDS.get(phrase) {
        return Some(*value);
    }

    let mut words = phrase.split_whitespace().peekable();
    words.peek()?;
    words.try_fold(0u32, |sum, word| NUMBER_WORDS.get(word).and_then(|v| sum.checked_add(*v)))
}

/// Resolve a minute phrase: "quarter" / "a quarter" is 15, "half" is 30,
/// anything else goes through [`parse_number_word`].
pub fn parse_minute_word(phrase: &str) -> Option<u32> {
    match phrase {
        "quarter" | "a quarter" => Some(15),
        "half" => Some(30),
        _ => parse_number_word(phrase),
    }
}

fn parse_digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Anything too long for u32 is certainly out of range
    Some(token.parse().unwrap_or(u32::MAX))
}

/// Hour token written either in digits or in words
pub fn resolve_hour_token(token: &str) -> Option<u32> {
    parse_digits(token).or_else(|| parse_number_word(token))
}

/// Minute token written either in digits or in words
pub fn resolve_minute_token(token: &str) -> Option<u32> {
    parse_digits(token).or_else(|| parse_minute_word(token))
}
