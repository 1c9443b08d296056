//! Trading-day calendar oracle and date roll-forward.
//!
//! The engines never decide on their own whether a date trades; they ask a
//! [`TradingCalendar`]. Any `Fn(NaiveDate) -> bool` closure is a calendar, and
//! [`HolidayCalendar`] covers the common weekends-plus-holidays case.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{error, warn};

use crate::error::CalendarStale;

/// Consecutive non-trading days the roll-forward tolerates before giving up.
pub const MAX_ROLL_DAYS: u32 = 15;

/// Oracle over calendar dates. Must be safe to query from several threads.
pub trait TradingCalendar: Send + Sync {
    fn is_trading_day(&self, date: NaiveDate) -> bool;
}

impl<F> TradingCalendar for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

/// Weekends closed (unless listed as extra trading days), holidays closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    #[serde(default = "default_true")]
    pub weekends_closed: bool,
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub extra_trading_days: BTreeSet<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self {
            weekends_closed: true,
            holidays: BTreeSet::new(),
            extra_trading_days: BTreeSet::new(),
        }
    }
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self { holidays: holidays.into_iter().collect(), ..Self::default() }
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }
}

impl TradingCalendar for HolidayCalendar {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        if self.extra_trading_days.contains(&date) {
            return true;
        }
        if self.holidays.contains(&date) {
            return false;
        }
        !(self.weekends_closed && matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
    }
}

/// First trading day on or after `date`.
///
/// Gives up after [`MAX_ROLL_DAYS`] consecutive non-trading days and reports
/// the fallback (`date` plus one day) in the error.
pub fn roll_forward(calendar: &dyn TradingCalendar, date: NaiveDate) -> Result<NaiveDate, CalendarStale> {
    let mut cursor = date;
    for _ in 0..=MAX_ROLL_DAYS {
        if calendar.is_trading_day(cursor) {
            return Ok(cursor);
        }
        cursor += Duration::days(1);
    }
    Err(CalendarStale {
        start: date,
        fallback: cursor - Duration::days(i64::from(MAX_ROLL_DAYS)),
        max_days: MAX_ROLL_DAYS,
    })
}

/// [`roll_forward`], recovering from a stale calendar with its fallback date.
pub fn roll_to_trading_day(calendar: &dyn TradingCalendar, date: NaiveDate) -> NaiveDate {
    match roll_forward(calendar, date) {
        Ok(d) => d,
        Err(stale) => {
            error!(
                start = %stale.start,
                fallback = %stale.fallback,
                max_days = stale.max_days,
                "no trading day found; trading calendar needs updating"
            );
            stale.fallback
        }
    }
}

/// Last trading day of the week containing `date`, scanning Friday back
/// towards `date` itself.
///
/// Never leaves the ISO week and never returns a date before `date`. A
/// weekend `date` (a calendar with weekend trading days) comes back
/// unchanged.
pub fn roll_to_week_end(calendar: &dyn TradingCalendar, date: NaiveDate) -> NaiveDate {
    let weekday = i64::from(date.weekday().number_from_monday());
    if weekday > 5 {
        return date;
    }
    for target in (1..=5_i64).rev() {
        if target == weekday {
            return date;
        }
        let candidate = date + Duration::days(target - weekday);
        if calendar.is_trading_day(candidate) {
            return candidate;
        }
    }
    warn!(%date, "no trading day in week; keeping date");
    date
}
