//! ISO-8601 durations (`P1Y2DT3H4M5.006S`).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A calendar-aware duration as carried in API payloads.
///
/// Components are kept as written; nothing is normalised (`PT90M` stays
/// ninety minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsoDuration {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl IsoDuration {
    pub fn new(
        years: u32,
        weeks: u32,
        days: u32,
        hours: u32,
        minutes: u32,
        seconds: u32,
        milliseconds: u32,
    ) -> Self {
        Self {
            years,
            months: 0,
            weeks,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    pub fn with_months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    pub fn is_zero(&self) -> bool {
        *self == IsoDuration::default()
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        for (amount, designator) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if amount > 0 {
                write!(f, "{amount}{designator}")?;
            }
        }
        if self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.milliseconds == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        if self.hours > 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{}M", self.minutes)?;
        }
        if self.milliseconds > 0 {
            let fraction = format!("{:03}", self.milliseconds);
            write!(f, "{}.{}S", self.seconds, fraction.trim_end_matches('0'))?;
        } else if self.seconds > 0 {
            write!(f, "{}S", self.seconds)?;
        }
        Ok(())
    }
}

impl FromStr for IsoDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFormat {
            value: s.to_string(),
            target: "isoduration",
        };
        let body = s.strip_prefix('P').ok_or_else(invalid)?;
        let mut duration = IsoDuration::default();
        let mut in_time = false;
        let mut seen_component = false;
        // Index of the last designator, enforcing Y M W D / H M S order.
        let mut last_slot = 0usize;
        let mut digits = String::new();

        for ch in body.chars() {
            match ch {
                'T' if !in_time && digits.is_empty() => {
                    in_time = true;
                    last_slot = 4;
                }
                '0'..='9' | '.' => digits.push(ch),
                _ => {
                    let slot = match (in_time, ch) {
                        (false, 'Y') => 1,
                        (false, 'M') => 2,
                        (false, 'W') => 3,
                        (false, 'D') => 4,
                        (true, 'H') => 5,
                        (true, 'M') => 6,
                        (true, 'S') => 7,
                        _ => return Err(invalid()),
                    };
                    if slot <= last_slot || digits.is_empty() {
                        return Err(invalid());
                    }
                    if slot == 7 {
                        let (whole, fraction) = match digits.split_once('.') {
                            Some((whole, fraction)) => (whole, fraction),
                            None => (digits.as_str(), ""),
                        };
                        duration.seconds = whole.parse().map_err(|_| invalid())?;
                        if !fraction.is_empty() {
                            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                                return Err(invalid());
                            }
                            let millis: String =
                                fraction.chars().chain("000".chars()).take(3).collect();
                            duration.milliseconds = millis.parse().map_err(|_| invalid())?;
                        }
                    } else {
                        let amount: u32 = digits.parse().map_err(|_| invalid())?;
                        match slot {
                            1 => duration.years = amount,
                            2 => duration.months = amount,
                            3 => duration.weeks = amount,
                            4 => duration.days = amount,
                            5 => duration.hours = amount,
                            _ => duration.minutes = amount,
                        }
                    }
                    digits.clear();
                    last_slot = slot;
                    seen_component = true;
                }
            }
        }

        if !digits.is_empty() || !seen_component {
            return Err(invalid());
        }
        Ok(duration)
    }
}
