//! Ordered grammar rules for spoken and written clock times
//!
//! Rules are tried in the order of [`RULES`]. The first rule that recognizes
//! the utterance decides the outcome, including range failures.

use super::normalizer::Utterance;
use super::numbers::{parse_number_word, resolve_hour_token, resolve_minute_token};
use super::traits::GrammarRule;
use super::{ParseOutcome, TimeParseError};
use crate::clock::{to_hour12, CanonicalTime, Meridiem};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SPECIAL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(midnight|noon)$").unwrap());
static COLON_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[:.](\d{2})\s*(am|pm|a m|p m)?\b").unwrap());
static HOUR_WITH_MERIDIEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(am|pm|a m|p m)\b").unwrap());
static O_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z0-9-]+(?:\s+[a-z0-9-]+)*?)\s+o['’ ]?clock$").unwrap());
static FRACTION_PAST_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(half|quarter|a quarter)\s+(past|to)\s+([a-z-]+)$").unwrap()
});
static MINUTES_PAST_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:[a-z-]+\s+)*?[a-z-]+|\d+)\s+(past|to)\s+([a-z-]+|\d+)$").unwrap()
});
static HOUR_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z-]+|\d+)\s+([a-z-]+|\d+)$").unwrap());
static BARE_HOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z-]+|\d{1,2})$").unwrap());

/// The rule table, in priority order
pub static RULES: &[&dyn GrammarRule] = &[
    &SpecialWord,
    &ColonTime,
    &HourWithMeridiem,
    &OClock,
    &FractionPastTo,
    &MinutesPastTo,
    &HourMinute,
    &BareHour,
];

/// Run the rule table over a non-empty utterance
pub fn match_rules(utterance: &Utterance) -> ParseOutcome {
    for rule in RULES {
        if let Some(captures) = rule.recognize(utterance) {
            debug!("Rule '{}' matched '{}'", rule.name(), utterance.text);
            return rule.build(&captures, utterance);
        }
    }
    debug!("No rule matched '{}'", utterance.text);
    Err(TimeParseError::Unrecognized)
}

fn dial_hour(value: Option<u32>) -> Result<u32, TimeParseError> {
    value.filter(|hour| *hour <= 12).ok_or(TimeParseError::BadHour)
}

fn minute_of_hour(value: Option<u32>) -> Result<u32, TimeParseError> {
    value.filter(|minute| *minute <= 59).ok_or(TimeParseError::BadMinute)
}

/// "<minutes> past <hour>" or "<minutes> to <hour>"
fn relative_to_hour(
    minutes: u32,
    hour: u32,
    direction: &str,
    meridiem: Option<Meridiem>,
) -> ParseOutcome {
    if direction == "past" {
        return Ok(CanonicalTime::new(hour, minutes, meridiem));
    }
    // "zero to three" would land on minute 60
    if minutes == 0 {
        return Err(TimeParseError::BadMinute);
    }
    Ok(CanonicalTime::new(to_hour12(hour) - 1, 60 - minutes, meridiem))
}

/// "midnight" and "noon"
pub struct SpecialWord;

impl GrammarRule for SpecialWord {
    fn name(&self) -> &'static str {
        "midnight-noon"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        SPECIAL_WORD.captures(&utterance.core)
    }

    fn build(&self, captures: &Captures<'_>, _utterance: &Utterance) -> ParseOutcome {
        let meridiem = if &captures[1] == "midnight" { Meridiem::Am } else { Meridiem::Pm };
        Ok(CanonicalTime::new(12, 0, Some(meridiem)))
    }
}

/// "3:15", "15:15", "3:15pm", "3:15 p m"
pub struct ColonTime;

impl GrammarRule for ColonTime {
    fn name(&self) -> &'static str {
        "colon-time"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        COLON_TIME.captures(&utterance.core)
    }

    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome {
        let hour = captures[1]
            .parse::<u32>()
            .ok()
            .filter(|hour| *hour <= 23)
            .ok_or(TimeParseError::BadHour)?;
        let minute = minute_of_hour(captures[2].parse::<u32>().ok())?;
        let meridiem = captures
            .get(3)
            .and_then(|marker| Meridiem::from_marker(marker.as_str()))
            .or(utterance.ambient);
        Ok(CanonicalTime::new(hour % 12, minute, meridiem))
    }
}

/// "3pm", "at 11am"; a spaced "3 pm" loses its marker to the ambient meridiem
/// and is picked up by [`BareHour`]
pub struct HourWithMeridiem;

impl GrammarRule for HourWithMeridiem {
    fn name(&self) -> &'static str {
        "hour-meridiem"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        HOUR_WITH_MERIDIEM.captures(&utterance.core)
    }

    fn build(&self, captures: &Captures<'_>, _utterance: &Utterance) -> ParseOutcome {
        let hour = captures[1]
            .parse::<u32>()
            .ok()
            .filter(|hour| (1..=12).contains(hour))
            .ok_or(TimeParseError::BadHour)?;
        let meridiem = Meridiem::from_marker(&captures[2]);
        Ok(CanonicalTime::new(hour, 0, meridiem))
    }
}

/// "seven o'clock", "twelve oclock"
pub struct OClock;

impl GrammarRule for OClock {
    fn name(&self) -> &'static str {
        "o-clock"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        O_CLOCK
            .captures(&utterance.core)
            .filter(|captures| resolve_hour_token(&captures[1]).is_some())
    }

    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome {
        let hour = dial_hour(resolve_hour_token(&captures[1]))?;
        Ok(CanonicalTime::new(hour, 0, utterance.ambient))
    }
}

/// "half past five", "a quarter to nine"
pub struct FractionPastTo;

impl GrammarRule for FractionPastTo {
    fn name(&self) -> &'static str {
        "fraction-past-to"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        FRACTION_PAST_TO.captures(&utterance.core)
    }

    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome {
        let hour = dial_hour(parse_number_word(&captures[3]))?;
        let minutes = if &captures[1] == "half" { 30 } else { 15 };
        relative_to_hour(minutes, hour, &captures[2], utterance.ambient)
    }
}

/// "ten past four", "twenty-five to 6", "5 past 3"
pub struct MinutesPastTo;

impl GrammarRule for MinutesPastTo {
    fn name(&self) -> &'static str {
        "minutes-past-to"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        MINUTES_PAST_TO.captures(&utterance.core).filter(|captures| {
            resolve_minute_token(&captures[1]).is_some()
                && resolve_hour_token(&captures[3]).is_some()
        })
    }

    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome {
        let minutes = minute_of_hour(resolve_minute_token(&captures[1]))?;
        let hour = dial_hour(resolve_hour_token(&captures[3]))?;
        relative_to_hour(minutes, hour, &captures[2], utterance.ambient)
    }
}

/// "three fifteen", "twelve oh-five"
pub struct HourMinute;

impl GrammarRule for HourMinute {
    fn name(&self) -> &'static str {
        "hour-minute"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        HOUR_MINUTE.captures(&utterance.core).filter(|captures| {
            resolve_hour_token(&captures[1]).is_some()
                && resolve_minute_token(&captures[2]).is_some()
        })
    }

    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome {
        let hour = dial_hour(resolve_hour_token(&captures[1]))?;
        let minute = minute_of_hour(resolve_minute_token(&captures[2]))?;
        Ok(CanonicalTime::new(hour, minute, utterance.ambient))
    }
}

/// "three", "twelve"
pub struct BareHour;

impl GrammarRule for BareHour {
    fn name(&self) -> &'static str {
        "bare-hour"
    }

    fn recognize<'u>(&self, utterance: &'u Utterance) -> Option<Captures<'u>> {
        BARE_HOUR
            .captures(&utterance.core)
            .filter(|captures| resolve_hour_token(&captures[1]).is_some())
    }

    fn build(&self, captures: &Captures<'_>, utterance: &Utterance) -> ParseOutcome {
        let hour = dial_hour(resolve_hour_token(&captures[1]))?;
        Ok(CanonicalTime::new(hour, 0, utterance.ambient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn first_rule(input: &str) -> Option<&'static str> {
        let utterance = Utterance::new(input);
        RULES.iter().find(|rule| rule.recognize(&utterance).is_some()).map(|rule| rule.name())
    }

    #[test]
    fn test_rule_priority() {
        assert_eq!(first_rule("noon"), Some("midnight-noon"));
        assert_eq!(first_rule("3:15 pm"), Some("colon-time"));
        assert_eq!(first_rule("3pm"), Some("hour-meridiem"));
        assert_eq!(first_rule("three o'clock"), Some("o-clock"));
        assert_eq!(first_rule("half past three"), Some("fraction-past-to"));
        assert_eq!(first_rule("ten past three"), Some("minutes-past-to"));
        assert_eq!(first_rule("three fifteen"), Some("hour-minute"));
        assert_eq!(first_rule("three"), Some("bare-hour"));
        assert_eq!(first_rule("what time"), None);
    }

    #[test]
    fn test_colon_time_wins_over_hour_meridiem() {
        // Both numeric rules could see "3:15pm"; the colon rule is earlier
        assert_eq!(first_rule("3:15pm"), Some("colon-time"));
    }

    #[test]
    fn test_fused_hour_matches_inside_sentence() {
        assert_eq!(first_rule("11am"), Some("hour-meridiem"));
        assert_eq!(first_rule("at 3pm"), Some("hour-meridiem"));
        assert_eq!(first_rule("3 pm"), Some("bare-hour"));

        let time = match_rules(&Utterance::new("it's 7pm")).unwrap();
        assert_eq!(time, CanonicalTime::new(7, 0, Some(Meridiem::Pm)));

        // A spaced marker is extracted first, so the word rule still applies
        let time = match_rules(&Utterance::new("quarter past 3 pm")).unwrap();
        assert_eq!(time, CanonicalTime::new(3, 15, Some(Meridiem::Pm)));

        let time = match_rules(&Utterance::new("quarter past 3pm")).unwrap();
        assert_eq!(time, CanonicalTime::new(3, 0, Some(Meridiem::Pm)));
    }

    #[test]
    fn test_range_failure_does_not_fall_through() {
        let utterance = Utterance::new("25:00");
        assert_eq!(match_rules(&utterance), Err(TimeParseError::BadHour));

        let utterance = Utterance::new("3:75");
        assert_eq!(match_rules(&utterance), Err(TimeParseError::BadMinute));

        let utterance = Utterance::new("13pm");
        assert_eq!(match_rules(&utterance), Err(TimeParseError::BadHour));
    }

    #[test]
    fn test_keyword_rules_need_number_tokens() {
        assert_eq!(match_rules(&Utterance::new("half past lunch")), Err(TimeParseError::BadHour));
        assert_eq!(first_rule("lots past three"), None);
        assert_eq!(first_rule("ten past lunch"), None);
        assert_eq!(first_rule("it is ten past three"), None);
        assert_eq!(first_rule("lunch o'clock"), None);
        assert_eq!(first_rule("quarter past three o'clock"), None);

        // Known number words still reach the range check
        assert_eq!(match_rules(&Utterance::new("thirteen o'clock")), Err(TimeParseError::BadHour));
        assert_eq!(
            match_rules(&Utterance::new("fifty-nine-ten past two")),
            Err(TimeParseError::BadMinute)
        );
    }

    #[test]
    fn test_bare_hour_digits_are_short() {
        // "3.15" loses its period during normalization
        assert_eq!(first_rule("3.15"), None);
        assert_eq!(match_rules(&Utterance::new("24")), Err(TimeParseError::BadHour));
    }

    #[test]
    fn test_unresolvable_words_fall_through() {
        assert_eq!(first_rule("hello world"), None);
        assert_eq!(match_rules(&Utterance::new("hello world")), Err(TimeParseError::Unrecognized));
    }

    #[test]
    fn test_zero_to_is_rejected() {
        assert_eq!(match_rules(&Utterance::new("zero to three")), Err(TimeParseError::BadMinute));
    }

    #[test]
    fn test_to_wraps_from_one_to_twelve() {
        let time = match_rules(&Utterance::new("quarter to one")).unwrap();
        assert_eq!((time.hour12, time.minute), (12, 45));

        let time = match_rules(&Utterance::new("ten to zero")).unwrap();
        assert_eq!((time.hour12, time.minute), (11, 50));
    }
}
