//! Periodic grid alignment for second, minute and hour bars.
//!
//! Every function returns the first grid line strictly after the input. A
//! grid that does not divide its parent unit evenly restarts at the top of the
//! next parent unit (7-second bars close at :07, :14, ... :56, then :00).

use chrono::{Duration, NaiveDateTime, Timelike};

/// Drop everything below whole seconds.
pub(crate) fn truncate_to_second(t: NaiveDateTime) -> NaiveDateTime {
    t - Duration::nanoseconds(i64::from(t.nanosecond()))
}

fn truncate_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    let t = truncate_to_second(t);
    t - Duration::seconds(i64::from(t.second()))
}

fn truncate_to_hour(t: NaiveDateTime) -> NaiveDateTime {
    let t = truncate_to_minute(t);
    t - Duration::minutes(i64::from(t.minute()))
}

/// Steps from `value` to the next multiple of `interval`, capped at `cap`.
fn steps_to_next_multiple(value: u32, interval: u32, cap: u32) -> i64 {
    let next = value + (interval - value % interval);
    i64::from(next.min(cap) - value)
}

/// Next `interval`-second boundary strictly after `t`.
///
/// `interval` must be non-zero; [`IntervalSpec`](crate::domain::IntervalSpec)
/// guarantees that for engine callers.
pub fn next_second_boundary(t: NaiveDateTime, interval: u32) -> NaiveDateTime {
    let base = truncate_to_second(t);
    base + Duration::seconds(steps_to_next_multiple(base.second(), interval, 60))
}

/// Next `interval`-minute boundary strictly after `t`.
pub fn next_minute_boundary(t: NaiveDateTime, interval: u32) -> NaiveDateTime {
    let base = truncate_to_minute(t);
    base + Duration::minutes(steps_to_next_multiple(base.minute(), interval, 60))
}

/// Next `interval`-hour boundary strictly after `t` on a grid shifted by
/// `offset` from midnight (a market whose day starts at 08:00 uses 8 hours).
///
/// `t` is truncated to its clock hour before the offset is removed, so the
/// result always sits on a whole clock hour; a sub-hour offset only shifts
/// which hours count as multiples of `interval`.
pub fn next_hour_boundary(t: NaiveDateTime, interval: u32, offset: Duration) -> NaiveDateTime {
    let base = truncate_to_hour(t);
    let shifted = base - offset;
    base + Duration::hours(steps_to_next_multiple(shifted.hour(), interval, 24))
}
