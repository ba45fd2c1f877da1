//! Grammar rule trait
//!
//! A rule is split into a structural recognizer and a builder. The matcher
//! stops at the first rule whose recognizer fires, whatever the builder then
//! decides, so a range error in a matched rule is final.

use super::normalizer::Utterance;
use super::ParseOutcome;
use regex::Captures;

pub trait GrammarRule: Send + Sync {
    /// Short name used in debug logs
    fn name(&self) -> &'static str;

    /// Structural match against the utterance
    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>>;

    /// Turn a structural match into a canonical time or a typed failure
    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome;
}
