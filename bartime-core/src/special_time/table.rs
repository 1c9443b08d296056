use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

use crate::domain::SECONDS_PER_DAY;

/// A bar cutover: a second-of-day on the tick's calendar day or the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cutover {
    /// Second of its own day, always `< 86_400`.
    pub second_of_day: u32,
    /// The cutover falls on the calendar day after the tick.
    pub next_day: bool,
    /// Reaching this cutover advances the trading date to the next trading day.
    pub cross_day: bool,
}

impl Cutover {
    pub const fn at(hour: u32, minute: u32) -> Self {
        Self { second_of_day: hour * 3600 + minute * 60, next_day: false, cross_day: false }
    }

    pub const fn next_day(hour: u32, minute: u32) -> Self {
        Self { second_of_day: hour * 3600 + minute * 60, next_day: true, cross_day: false }
    }

    /// Mark as the table's cross-day cutover.
    pub const fn crossing(self) -> Self {
        Self { cross_day: true, ..self }
    }

    /// Position on a two-day axis measured from the tick's midnight.
    pub fn offset_secs(&self) -> u32 {
        if self.next_day {
            self.second_of_day + SECONDS_PER_DAY
        } else {
            self.second_of_day
        }
    }

    pub(crate) fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + Duration::seconds(i64::from(self.second_of_day))
    }
}

impl fmt::Display for Cutover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.second_of_day / 3600;
        let m = self.second_of_day % 3600 / 60;
        write!(f, "{h:02}:{m:02}")?;
        if self.next_day {
            f.write_str("+1")?;
        }
        if self.cross_day {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Exclusive lower bound of a table's search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LowerBound {
    /// Every time of day is above the bound.
    Open,
    /// Ticks must be strictly after this second-of-day (usually a session open).
    After(u32),
}

/// Ordered, non-periodic bar cutovers for one product/interval/session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialTimeTable {
    pub lower: LowerBound,
    pub cutovers: &'static [Cutover],
}

impl SpecialTimeTable {
    pub const fn after(hour: u32, minute: u32, cutovers: &'static [Cutover]) -> Self {
        Self { lower: LowerBound::After(hour * 3600 + minute * 60), cutovers }
    }

    pub const fn open(cutovers: &'static [Cutover]) -> Self {
        Self { lower: LowerBound::Open, cutovers }
    }

    /// The designated cross-day cutover, if the table has one.
    pub fn cross_day(&self) -> Option<&Cutover> {
        self.cutovers.iter().find(|c| c.cross_day)
    }

    /// Last cutover on the two-day axis, in seconds.
    pub fn upper_secs(&self) -> Option<u32> {
        self.cutovers.last().map(Cutover::offset_secs)
    }
}

impl fmt::Display for SpecialTimeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            LowerBound::Open => f.write_str("(open")?,
            LowerBound::After(secs) => write!(f, "({:02}:{:02}", secs / 3600, secs % 3600 / 60)?,
        }
        for c in self.cutovers {
            write!(f, ", {c}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_day_offset_extends_past_midnight() {
        assert_eq!(Cutover::at(15, 0).offset_secs(), 54_000);
        assert_eq!(Cutover::next_day(10, 0).offset_secs(), 122_400);
        assert_eq!(Cutover::next_day(0, 0).offset_secs(), 86_400);
    }

    #[test]
    fn crossing_keeps_time() {
        let c = Cutover::at(9, 30).crossing();
        assert!(c.cross_day);
        assert_eq!(c.second_of_day, 34_200);
        assert!(!c.next_day);
    }

    #[test]
    fn display_is_readable() {
        static CUTS: [Cutover; 2] = [Cutover::at(15, 0), Cutover::next_day(11, 15).crossing()];
        let table = SpecialTimeTable::after(9, 0, &CUTS);
        assert_eq!(table.to_string(), "(09:00, 15:00, 11:15+1*]");
        assert_eq!(table.cross_day(), Some(&CUTS[1]));
        assert_eq!(table.upper_secs(), Some(126_900));
    }
}
