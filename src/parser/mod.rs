//! Clock-time parser module
//!
//! Turns free-text English clock times ("quarter past three", "3:15 pm",
//! "noon", "twenty to five") into a [`CanonicalTime`].

pub mod grammar;
pub mod normalizer;
pub mod numbers;
pub mod traits;

use crate::clock::CanonicalTime;
use log::debug;
use serde::Serialize;

pub use normalizer::{normalize, Utterance};
pub use traits::GrammarRule;

/// Why a guess could not be read as a clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum TimeParseError {
    #[error("Guess is empty")]
    #[serde(rename = "empty")]
    Empty,
    #[error("Hour is out of range")]
    #[serde(rename = "bad-hour")]
    BadHour,
    #[error("Minute is out of range")]
    #[serde(rename = "bad-min")]
    BadMinute,
    #[error("Not a recognized time expression")]
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl TimeParseError {
    /// Wire code, as used in API responses
    pub fn code(&self) -> &'static str {
        match self {
            TimeParseError::Empty => "empty",
            TimeParseError::BadHour => "bad-hour",
            TimeParseError::BadMinute => "bad-min",
            TimeParseError::Unrecognized => "unrecognized",
        }
    }
}

/// Either a canonical time or the reason there is none
pub type ParseOutcome = Result<CanonicalTime, TimeParseError>;

/// Parse an English clock time.
///
/// Never panics; every input yields either a canonical time or a
/// [`TimeParseError`].
pub fn parse(text: &str) -> ParseOutcome {
    let utterance = Utterance::new(text);
    debug!("Parsing time guess: '{}' -> '{}'", text, utterance.text);

    if utterance.is_empty() {
        return Err(TimeParseError::Empty);
    }
    grammar::match_rules(&utterance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Meridiem;
    use pretty_assertions::assert_eq;

    fn time(hour12: u32, minute: u32, meridiem: Option<Meridiem>) -> CanonicalTime {
        CanonicalTime { hour12, minute, meridiem }
    }

    #[test]
    fn test_parse_basic_phrases() {
        assert_eq!(parse("quarter past three"), Ok(time(3, 15, None)));
        assert_eq!(parse("quarter to three"), Ok(time(2, 45, None)));
        assert_eq!(parse("half past twelve"), Ok(time(12, 30, None)));
        assert_eq!(parse("noon"), Ok(time(12, 0, Some(Meridiem::Pm))));
        assert_eq!(parse("midnight"), Ok(time(12, 0, Some(Meridiem::Am))));
        assert_eq!(parse("3:15 pm"), Ok(time(3, 15, Some(Meridiem::Pm))));
        assert_eq!(parse("15:15"), Ok(time(3, 15, None)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(TimeParseError::Empty));
        assert_eq!(parse("   "), Err(TimeParseError::Empty));
        assert_eq!(parse("thirteen o'clock"), Err(TimeParseError::BadHour));
        assert_eq!(parse("xyz"), Err(TimeParseError::Unrecognized));
    }

    #[test]
    fn test_error_codes_match_serde() {
        for error in [
            TimeParseError::Empty,
            TimeParseError::BadHour,
            TimeParseError::BadMinute,
            TimeParseError::Unrecognized,
        ] {
            assert_eq!(serde_json::to_value(error).unwrap(), serde_json::json!(error.code()));
        }
    }
}
