//! Boundary engine for markets without exchange session quirks.
//!
//! Pure clock arithmetic: no special tables, no trading calendar. Hour bars
//! sit on a grid shifted by a constant open offset, daily bars close at a
//! fixed time of day.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::domain::{IntervalSpec, IntervalUnit, SECONDS_PER_DAY};
use crate::error::BoundaryError;
use crate::periodic::{next_hour_boundary, next_minute_boundary, next_second_boundary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericBoundaryEngine {
    /// Offset of the hour grid from midnight, in `0..86_400` seconds.
    open_offset_secs: i64,
    close_time: NaiveTime,
}

impl Default for GenericBoundaryEngine {
    fn default() -> Self {
        Self { open_offset_secs: 0, close_time: NaiveTime::MIN }
    }
}

impl GenericBoundaryEngine {
    /// The open offset must be non-negative and shorter than one day.
    pub fn new(open_offset: Duration, close_time: NaiveTime) -> Result<Self, BoundaryError> {
        let open_offset_secs = open_offset.num_seconds();
        if !(0..i64::from(SECONDS_PER_DAY)).contains(&open_offset_secs) {
            return Err(BoundaryError::InvalidOpenOffset { seconds: open_offset_secs });
        }
        Ok(Self { open_offset_secs, close_time })
    }

    pub fn open_offset(&self) -> Duration {
        Duration::seconds(self.open_offset_secs)
    }

    pub fn close_time(&self) -> NaiveTime {
        self.close_time
    }

    pub fn next_bar(
        &self,
        tick: NaiveDateTime,
        interval: IntervalSpec,
    ) -> Result<NaiveDateTime, BoundaryError> {
        let length = interval.length();
        match interval.unit() {
            IntervalUnit::Second => Ok(next_second_boundary(tick, length)),
            IntervalUnit::Minute => Ok(next_minute_boundary(tick, length)),
            IntervalUnit::Hour => Ok(next_hour_boundary(tick, length, self.open_offset())),
            IntervalUnit::Daily => {
                let close = tick.date().and_time(self.close_time);
                if tick > close {
                    Ok(close + Duration::days(1))
                } else {
                    Ok(close)
                }
            }
            unit => Err(BoundaryError::UnsupportedInterval(unit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn seconds_and_minutes_are_periodic() {
        let e = GenericBoundaryEngine::default();
        assert_eq!(e.next_bar(at(9, 0, 0), IntervalSpec::seconds(15).unwrap()).unwrap(), at(9, 0, 15));
        assert_eq!(e.next_bar(at(9, 3, 0), IntervalSpec::minutes(5).unwrap()).unwrap(), at(9, 5, 0));
    }

    #[test]
    fn hour_grid_shifted_by_open() {
        let e = GenericBoundaryEngine::new(Duration::hours(8), hm(16, 0)).unwrap();
        let four = IntervalSpec::hours(4).unwrap();
        assert_eq!(e.next_bar(at(9, 15, 0), four).unwrap(), at(12, 0, 0));
        assert_eq!(e.next_bar(at(13, 0, 0), four).unwrap(), at(16, 0, 0));
    }

    #[test]
    fn half_hour_open_stays_on_clock_hours() {
        let e = GenericBoundaryEngine::new(Duration::minutes(30), NaiveTime::MIN).unwrap();
        let hour = IntervalSpec::hours(1).unwrap();
        assert_eq!(e.next_bar(at(10, 40, 0), hour).unwrap(), at(11, 0, 0));
    }

    #[test]
    fn daily_cutover_rolls_after_close() {
        let e = GenericBoundaryEngine::new(Duration::zero(), hm(16, 0)).unwrap();
        assert_eq!(e.next_bar(at(10, 0, 0), IntervalSpec::daily()).unwrap(), at(16, 0, 0));
        assert_eq!(e.next_bar(at(16, 0, 0), IntervalSpec::daily()).unwrap(), at(16, 0, 0));
        assert_eq!(
            e.next_bar(at(16, 0, 1), IntervalSpec::daily()).unwrap(),
            at(16, 0, 0) + Duration::days(1)
        );
    }

    #[test]
    fn default_daily_closes_at_midnight() {
        let e = GenericBoundaryEngine::default();
        assert_eq!(
            e.next_bar(at(10, 0, 0), IntervalSpec::daily()).unwrap(),
            at(0, 0, 0) + Duration::days(1)
        );
    }

    #[test]
    fn open_offset_must_fit_in_a_day() {
        assert_eq!(
            GenericBoundaryEngine::new(Duration::days(1), NaiveTime::MIN),
            Err(BoundaryError::InvalidOpenOffset { seconds: 86_400 })
        );
        assert_eq!(
            GenericBoundaryEngine::new(Duration::minutes(-30), NaiveTime::MIN),
            Err(BoundaryError::InvalidOpenOffset { seconds: -1_800 })
        );
        assert_eq!(
            GenericBoundaryEngine::new(Duration::days(365), NaiveTime::MIN),
            Err(BoundaryError::InvalidOpenOffset { seconds: 31_536_000 })
        );
        let e = GenericBoundaryEngine::new(Duration::seconds(86_399), hm(15, 0)).unwrap();
        assert_eq!(e.open_offset(), Duration::seconds(86_399));
        assert_eq!(e.close_time(), hm(15, 0));
    }

    #[test]
    fn weekly_not_supported() {
        let e = GenericBoundaryEngine::default();
        assert_eq!(
            e.next_bar(at(10, 0, 0), IntervalSpec::weekly()),
            Err(BoundaryError::UnsupportedInterval(IntervalUnit::Weekly))
        );
    }
}
