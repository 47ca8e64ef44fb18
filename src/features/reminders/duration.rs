//! Compound duration parsing and display
//!
//! Durations are written as `5w3d12h30m30s`: an all-optional sequence of
//! `<count><unit>` tokens in strictly descending unit order, each unit at
//! most once. Every unit below weeks is a remainder, so the caller must
//! normalize: `90m` is rejected, `1h30m` is required. The whole input must
//! match; anything left over fails the parse.

use std::sync::OnceLock;

use regex::Regex;

use super::ReminderError;

/// Descending unit table shared by parsing and display.
const CONVERSIONS: [(&str, u64); 5] = [
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

// Weeks are a single digit (durations stay under 10 weeks); days cap at 6,
// hours at 23, minutes and seconds at 59.
static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?P<weeks>\d)w)?(?:(?P<days>[0-6])d)?(?:(?P<hours>2[0-3]|1\d|\d)h)?(?:(?P<minutes>[1-5]\d|\d)m)?(?:(?P<seconds>[1-5]\d|\d)s)?$",
        )
        .expect("duration pattern is a valid regex")
    })
}

/// A parsed reminder duration, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderDuration {
    seconds: u64,
}

impl ReminderDuration {
    /// Parse a compound duration string.
    ///
    /// A duration totalling zero seconds (e.g. `0s`) is valid and means
    /// "deliver now"; an empty or non-matching string is
    /// [`ReminderError::InvalidFormat`].
    pub fn parse(text: &str) -> Result<Self, ReminderError> {
        let caps = duration_re()
            .captures(text)
            .ok_or(ReminderError::InvalidFormat)?;

        // The all-optional pattern matches the empty string; that is not a
        // duration.
        if caps.get(0).map_or(true, |m| m.as_str().is_empty()) {
            return Err(ReminderError::InvalidFormat);
        }

        let field = |name: &str| {
            caps.name(name)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };

        let seconds = field("weeks") * 604_800
            + field("days") * 86_400
            + field("hours") * 3_600
            + field("minutes") * 60
            + field("seconds");

        Ok(ReminderDuration { seconds })
    }

    /// Total length in seconds.
    pub fn seconds(self) -> u64 {
        self.seconds
    }

    /// Whether this duration calls for immediate delivery.
    pub fn is_immediate(self) -> bool {
        self.seconds == 0
    }

    /// Human-readable form, e.g. `1 hour 30 minutes`.
    pub fn display(self) -> String {
        display_seconds(self.seconds)
    }
}

/// Greedy descending-unit breakdown of a raw second count.
///
/// Works for any count, not just parsed durations; the list command uses it
/// for remaining-time countdowns. Zero-count units are omitted, so zero
/// seconds yields an empty breakdown.
pub fn breakdown(seconds: u64) -> Vec<(u64, &'static str)> {
    let mut remaining = seconds;
    let mut parts = Vec::new();
    for (unit, unit_seconds) in CONVERSIONS {
        let count = remaining / unit_seconds;
        if count > 0 {
            remaining -= count * unit_seconds;
            parts.push((count, unit));
        }
    }
    parts
}

/// Render a second count as `5 weeks 3 days 12 hours 30 minutes 30 seconds`.
pub fn display_seconds(seconds: u64) -> String {
    breakdown(seconds)
        .into_iter()
        .map(|(count, unit)| {
            if count == 1 {
                format!("{count} {unit}")
            } else {
                format!("{count} {unit}s")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
