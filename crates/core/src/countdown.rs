//! Time left until the local day rolls over, with localized labels.

use std::str::FromStr;

use chrono::{Days, NaiveDateTime};
use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Locale {
    #[default]
    Bengali,
    English,
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bn" | "bengali" | "bangla" => Ok(Locale::Bengali),
            "en" | "english" => Ok(Locale::English),
            other => Err(CoreError::Validation(format!(
                "Unknown locale '{other}'. Must be one of: bn, en"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Whole hours/minutes/seconds from `now` to the next local midnight.
pub fn until_midnight(now: NaiveDateTime) -> Countdown {
    let total = now
        .date()
        .checked_add_days(Days::new(1))
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .map(|midnight| (midnight - now).num_seconds())
        .unwrap_or(0);

    Countdown {
        hours: total / 3600,
        minutes: (total % 3600) / 60,
        seconds: total % 60,
    }
}

impl Countdown {
    pub fn render(&self, locale: Locale) -> String {
        let (h, m, s) = match locale {
            Locale::Bengali => ("ঘণ্টা", "মিনিট", "সেকেন্ড"),
            Locale::English => ("hours", "minutes", "seconds"),
        };
        format!(
            "{:02} {h} {:02} {m} {:02} {s}",
            self.hours, self.minutes, self.seconds
        )
    }
}
