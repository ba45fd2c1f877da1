//! Input normalization and AM/PM extraction
//!
//! Every guess passes through [`normalize`] first. The result is wrapped in an
//! [`Utterance`], which also carries the text with any AM/PM marker removed
//! (the "core" string the word-based grammar rules look at) and the marker
//! itself as the ambient meridiem.

use crate::clock::Meridiem;
use once_cell::sync::Lazy;
use regex::Regex;

static AM_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(am|a m)\b").unwrap());
static PM_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(pm|p m)\b").unwrap());
static ANY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(a\s?m|p\s?m)\b").unwrap());

/// Lowercase, drop every period ("a.m." -> "am"), collapse runs of
/// whitespace and trim.
pub fn normalize(input: &str) -> String {
    collapse_whitespace(&input.to_lowercase().replace('.', ""))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Find a standalone AM/PM marker and strip all markers from the text.
///
/// Returns the core string and the ambient meridiem. When both markers are
/// present PM wins.
pub fn extract_meridiem(normalized: &str) -> (String, Option<Meridiem>) {
    let ambient = if PM_MARKER.is_match(normalized) {
        Some(Meridiem::Pm)
    } else if AM_MARKER.is_match(normalized) {
        Some(Meridiem::Am)
    } else {
        None
    };

    let core = collapse_whitespace(&ANY_MARKER.replace_all(normalized, ""));
    (core, ambient)
}

/// A normalized guess, ready for the grammar rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    /// Full normalized text, markers included
    pub text: String,
    /// Text with AM/PM markers removed
    pub core: String,
    pub ambient: Option<Meridiem>,
}

impl Utterance {
    pub fn new(input: &str) -> Self {
        let text = normalize(input);
        let (core, ambient) = extract_meridiem(&text);
        Self { text, core, ambient }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
