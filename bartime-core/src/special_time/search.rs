//! Locate the next cutover in a special-time table.

use chrono::{Duration, NaiveDateTime, Timelike};

use super::table::{Cutover, LowerBound, SpecialTimeTable};
use crate::calendar::{roll_to_trading_day, TradingCalendar};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Microseconds since the tick's local midnight.
pub fn micros_of_day(t: NaiveDateTime) -> i64 {
    i64::from(t.num_seconds_from_midnight()) * MICROS_PER_SECOND
        + i64::from(t.nanosecond() / 1_000)
}

fn secs_to_micros(secs: u32) -> i64 {
    i64::from(secs) * MICROS_PER_SECOND
}

/// Next cutover at or after `tick`.
///
/// Returns `None` when the tick lies outside `(lower, last cutover]`; minute
/// dispatch falls back to the periodic grid in that case. A tick exactly on a
/// cutover closes that bar and gets the cutover itself back.
pub fn find_next_cutover(
    tick: NaiveDateTime,
    table: &SpecialTimeTable,
    calendar: &dyn TradingCalendar,
) -> Option<NaiveDateTime> {
    let micros = micros_of_day(tick);
    let above_lower = match table.lower {
        LowerBound::Open => true,
        LowerBound::After(secs) => micros > secs_to_micros(secs),
    };
    if !above_lower || micros > secs_to_micros(table.upper_secs()?) {
        return None;
    }

    let cutover = table
        .cutovers
        .iter()
        .find(|c| micros <= secs_to_micros(c.offset_secs()))?;
    Some(land(tick, cutover, calendar))
}

/// Place `cutover` relative to the tick's calendar day.
fn land(tick: NaiveDateTime, cutover: &Cutover, calendar: &dyn TradingCalendar) -> NaiveDateTime {
    let mut date = tick.date();
    if cutover.next_day {
        date += Duration::days(1);
    }
    if cutover.cross_day {
        date = roll_to_trading_day(calendar, date);
    }
    cutover.on(date)
}

/// Cyclic fallback for session-end tables: a tick before the window closes at
/// that day's session open, a tick past the last cutover at the next day's.
///
/// Used by daily and weekly bars, where every tick must land somewhere.
pub fn wrap_to_session_open(tick: NaiveDateTime, table: &SpecialTimeTable) -> Option<NaiveDateTime> {
    let micros = micros_of_day(tick);
    let anchor = match table.lower {
        LowerBound::After(secs) => Cutover { second_of_day: secs, next_day: false, cross_day: false },
        LowerBound::Open => *table.cutovers.first()?,
    };
    let mut date = tick.date();
    if micros > secs_to_micros(anchor.second_of_day) {
        date += Duration::days(1);
    }
    Some(anchor.on(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductCategory, SessionShape};
    use crate::special_time::{resolve, TableUnit};
    use chrono::{Datelike, NaiveDate, Weekday};

    fn weekdays_only(d: NaiveDate) -> bool {
        !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, micro)
            .unwrap()
    }

    fn table(
        category: ProductCategory,
        unit: TableUnit,
        length: u32,
        shape: Option<SessionShape>,
    ) -> &'static SpecialTimeTable {
        resolve(category, unit, length, shape).unwrap()
    }

    #[test]
    fn micros_of_day_counts_subseconds() {
        assert_eq!(micros_of_day(at(2024, 6, 14, 0, 0, 1, 5)), 1_000_005);
        assert_eq!(micros_of_day(at(2024, 6, 14, 13, 59, 59, 999_999)), 50_399_999_999);
    }

    #[test]
    fn inclusive_scan() {
        let t = table(ProductCategory::StockIndex, TableUnit::Hour, 1, None);
        let cal = &weekdays_only;
        assert_eq!(
            find_next_cutover(at(2024, 6, 14, 13, 59, 59, 999_999), t, cal),
            Some(at(2024, 6, 14, 14, 0, 0, 0))
        );
        assert_eq!(
            find_next_cutover(at(2024, 6, 14, 14, 0, 0, 0), t, cal),
            Some(at(2024, 6, 14, 14, 0, 0, 0))
        );
        assert_eq!(
            find_next_cutover(at(2024, 6, 14, 14, 0, 0, 1), t, cal),
            Some(at(2024, 6, 14, 15, 0, 0, 0))
        );
    }

    #[test]
    fn outside_window_is_no_match() {
        let t = table(ProductCategory::StockIndex, TableUnit::Hour, 1, None);
        let cal = &weekdays_only;
        // Exactly on the lower bound is outside (exclusive)
        assert_eq!(find_next_cutover(at(2024, 6, 14, 9, 30, 0, 0), t, cal), None);
        assert_eq!(find_next_cutover(at(2024, 6, 14, 15, 0, 0, 1), t, cal), None);
    }

    #[test]
    fn next_day_entry_advances_date() {
        let t = table(ProductCategory::Commodity, TableUnit::Hour, 1, Some(SessionShape::NightUntil0100));
        let cal = &weekdays_only;
        // Wednesday 23:30 -> Thursday 00:00
        assert_eq!(
            find_next_cutover(at(2024, 6, 12, 23, 30, 0, 0), t, cal),
            Some(at(2024, 6, 13, 0, 0, 0, 0))
        );
    }

    #[test]
    fn cross_day_entry_rolls_over_weekend() {
        let t = table(ProductCategory::Commodity, TableUnit::Hour, 3, Some(SessionShape::NightUntil2300));
        let cal = &weekdays_only;
        // Friday 21:30 night session -> Saturday 10:00 -> Monday 10:00
        assert_eq!(
            find_next_cutover(at(2024, 6, 14, 21, 30, 0, 0), t, cal),
            Some(at(2024, 6, 17, 10, 0, 0, 0))
        );
    }

    #[test]
    fn same_day_cross_entry_rolls_from_saturday() {
        let t = table(ProductCategory::Commodity, TableUnit::Hour, 1, Some(SessionShape::NightUntil0230));
        let cal = &weekdays_only;
        // Saturday 02:10 belongs to Friday's night session -> Monday 09:30
        assert_eq!(
            find_next_cutover(at(2024, 6, 15, 2, 10, 0, 0), t, cal),
            Some(at(2024, 6, 17, 9, 30, 0, 0))
        );
        // A weekday morning stays put
        assert_eq!(
            find_next_cutover(at(2024, 6, 11, 2, 10, 0, 0), t, cal),
            Some(at(2024, 6, 11, 9, 30, 0, 0))
        );
    }

    #[test]
    fn wrap_before_and_after_window() {
        let t = table(ProductCategory::StockIndex, TableUnit::Daily, 1, None);
        assert_eq!(
            wrap_to_session_open(at(2024, 6, 14, 15, 30, 0, 0), t),
            Some(at(2024, 6, 15, 9, 30, 0, 0))
        );
        assert_eq!(
            wrap_to_session_open(at(2024, 6, 14, 9, 0, 0, 0), t),
            Some(at(2024, 6, 14, 9, 30, 0, 0))
        );
    }
}
