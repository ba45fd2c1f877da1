//! Canonical 12-hour clock time and the guess/target equivalence check.

use crate::round::Round;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AM/PM marker attached to a canonical time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Meridiem of a 24-hour clock hour
    pub fn of_hour24(hour24: u32) -> Self {
        if hour24 < 12 { Meridiem::Am } else { Meridiem::Pm }
    }

    /// Parse a normalized marker such as "am", "p m" or "pm"
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.replace(' ', "").as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed guess or a formatted target.
///
/// `hour12` is always in `1..=12` (midnight and noon both collapse to 12) and
/// `minute` in `0..=59`. Values are only built through [`CanonicalTime::new`],
/// which folds hour 0 into 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalTime {
    pub hour12: u32,
    pub minute: u32,
    pub meridiem: Option<Meridiem>,
}

impl CanonicalTime {
    /// Build a canonical time from an hour already known to be in `0..=12`.
    ///
    /// Hour 0 becomes 12. Callers validate ranges before calling.
    pub(crate) fn new(hour: u32, minute: u32, meridiem: Option<Meridiem>) -> Self {
        debug_assert!(hour <= 12 && minute <= 59);
        Self { hour12: to_hour12(hour), minute, meridiem }
    }

    /// Format a target the way the game announces it ("3:15 pm")
    pub fn from_target(round: &Round) -> Self {
        Self {
            hour12: round.hour12(),
            minute: round.minute,
            meridiem: Some(Meridiem::of_hour24(round.hour)),
        }
    }
}

impl fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour12, self.minute)?;
        if let Some(meridiem) = self.meridiem {
            write!(f, " {}", meridiem)?;
        }
        Ok(())
    }
}

/// Fold any hour onto the 12-hour dial; 0 and 12 both read as 12.
pub fn to_hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Decide whether a guess names the target time.
///
/// Only the dial position counts: the meridiem of the guess is never
/// consulted, so "3:15" matches both 03:15 and 15:15.
pub fn is_correct(guess: &CanonicalTime, target_hour24: u32, target_minute: u32) -> bool {
    guess.minute == target_minute && guess.hour12 == to_hour12(target_hour24)
}
