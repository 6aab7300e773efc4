use chrono::{DateTime, FixedOffset, TimeZone};

pub const DEFAULT_TARGET_RFC3339: &str = "2026-02-17T00:00:00+07:00";
const VIETNAM_UTC_OFFSET_SECS: i32 = 7 * 3600;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Text shown in the four clock cells once the target has passed.
pub const ARRIVED_FIELDS: [&str; 4] = ["🎉", "Chúc", "Mừng", "Tết!"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownDisplay {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Arrived,
}

impl CountdownDisplay {
    /// Exact integer decomposition of a positive millisecond difference.
    pub fn from_remaining_ms(remaining_ms: i64) -> Self {
        if remaining_ms <= 0 {
            return CountdownDisplay::Arrived;
        }
        CountdownDisplay::Remaining {
            days: remaining_ms / MS_PER_DAY,
            hours: (remaining_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Cell texts for days/hours/minutes/seconds, zero-padded to two digits.
    pub fn fields(&self) -> [String; 4] {
        match *self {
            CountdownDisplay::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => [
                format!("{:02}", days),
                format!("{:02}", hours),
                format!("{:02}", minutes),
                format!("{:02}", seconds),
            ],
            CountdownDisplay::Arrived => ARRIVED_FIELDS.map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    target: DateTime<FixedOffset>,
}

impl Countdown {
    pub fn new(target: DateTime<FixedOffset>) -> Self {
        Self { target }
    }

    /// Midnight starting Tết 2026, Vietnam time (UTC+7).
    pub fn default_target() -> Option<Self> {
        FixedOffset::east_opt(VIETNAM_UTC_OFFSET_SECS)?
            .with_ymd_and_hms(2026, 2, 17, 0, 0, 0)
            .single()
            .map(Self::new)
    }

    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self::new)
    }

    #[inline]
    pub fn target(&self) -> DateTime<FixedOffset> {
        self.target
    }

    pub fn display_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> CountdownDisplay {
        let remaining = self.target.signed_duration_since(now);
        CountdownDisplay::from_remaining_ms(remaining.num_milliseconds())
    }

    /// Same as `display_at` for a Unix epoch timestamp such as `Date.now()`.
    pub fn display_at_epoch_ms(&self, now_ms: f64) -> CountdownDisplay {
        let remaining = self.target.timestamp_millis() - now_ms.floor() as i64;
        CountdownDisplay::from_remaining_ms(remaining)
    }
}
