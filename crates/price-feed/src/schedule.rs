//! Daily wall-clock schedule

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use std::fmt;
use std::str::FromStr;

use crate::error::FeedError;

/// Run once a day at `hour:minute` local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    time: NaiveTime,
}

impl DailySchedule {
    /// Build from hour and minute; `None` if out of range
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { time })
    }

    /// Parse `"HH:MM"`
    pub fn parse(s: &str) -> crate::Result<Self> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| FeedError::Schedule(s.to_string()))?;

        let hour: u32 = h.parse().map_err(|_| FeedError::Schedule(s.to_string()))?;
        let minute: u32 = m.parse().map_err(|_| FeedError::Schedule(s.to_string()))?;

        Self::at(hour, minute).ok_or_else(|| FeedError::Schedule(s.to_string()))
    }

    /// Next occurrence strictly after `after`, in the same time zone.
    ///
    /// If the wall-clock time falls into a DST gap on some day, that day
    /// fires an hour later; if it is ambiguous, the earlier instant is used.
    pub fn next_occurrence<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = after.timezone();
        let mut date = after.date_naive();

        loop {
            let naive = date.and_time(self.time);
            let candidate = tz
                .from_local_datetime(&naive)
                .earliest()
                .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest());

            if let Some(candidate) = candidate {
                if candidate > *after {
                    return candidate;
                }
            }

            date = match date.succ_opt() {
                Some(next) => next,
                None => return after.clone() + Duration::days(1),
            };
        }
    }

    /// How long to wait from `now` until the next occurrence
    pub fn duration_until<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> std::time::Duration {
        let next = self.next_occurrence(now);
        (next - now.clone()).to_std().unwrap_or_default()
    }
}

impl Default for DailySchedule {
    /// 03:00
    fn default() -> Self {
        Self {
            time: NaiveTime::default() + Duration::hours(3),
        }
    }
}

impl FromStr for DailySchedule {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DailySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format("%H:%M"))
    }
}
