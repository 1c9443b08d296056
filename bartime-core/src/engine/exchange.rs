//! Boundary engine for exchange-traded futures.
//!
//! Dispatch per interval unit:
//!
//! - Second: periodic grid
//! - Minute: category special table when the tick falls inside it, else periodic grid
//! - Hour: category/session-shape special table, no periodic fallback
//! - Daily: session-end table, then roll to a trading day
//! - Weekly: daily result, then roll to the week's last trading day

use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::calendar::{roll_to_trading_day, roll_to_week_end, TradingCalendar};
use crate::domain::{IntervalSpec, IntervalUnit, ProductCategory, SessionSchedule, SessionShape};
use crate::error::BoundaryError;
use crate::periodic::{next_minute_boundary, next_second_boundary};
use crate::special_time::{
    find_next_cutover, micros_of_day, resolve, wrap_to_session_open, SpecialTimeTable, TableUnit,
};

/// Next-bar computation for futures products, backed by a trading calendar.
///
/// Holds no mutable state; share one instance freely across threads.
#[derive(Clone)]
pub struct ExchangeBoundaryEngine {
    calendar: Arc<dyn TradingCalendar>,
}

impl fmt::Debug for ExchangeBoundaryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeBoundaryEngine").finish_non_exhaustive()
    }
}

impl ExchangeBoundaryEngine {
    pub fn new(calendar: Arc<dyn TradingCalendar>) -> Self {
        Self { calendar }
    }

    pub fn builder() -> ExchangeEngineBuilder {
        ExchangeEngineBuilder::default()
    }

    pub fn calendar(&self) -> &dyn TradingCalendar {
        self.calendar.as_ref()
    }

    /// Close time of the bar `tick` belongs to.
    ///
    /// `Ok(None)` means an hour-bar tick lies outside every window of its
    /// table (a tick outside trading hours).
    pub fn next_bar(
        &self,
        tick: NaiveDateTime,
        interval: IntervalSpec,
        category: ProductCategory,
        schedule: &SessionSchedule,
    ) -> Result<Option<NaiveDateTime>, BoundaryError> {
        // A tick exactly at a session open starts the new bar.
        let tick = if schedule.is_open_instant(micros_of_day(tick)) {
            trace!(%tick, "tick at session open, nudging forward");
            tick + Duration::microseconds(1)
        } else {
            tick
        };
        let length = interval.length();

        match interval.unit() {
            IntervalUnit::Second => Ok(Some(next_second_boundary(tick, length))),
            IntervalUnit::Minute => Ok(Some(self.minute_bar(tick, length, category, schedule))),
            IntervalUnit::Hour => self.hour_bar(tick, length, category, schedule),
            IntervalUnit::Daily => self.daily_bar(tick, category).map(Some),
            IntervalUnit::Weekly => {
                let daily = self.daily_bar(tick, category)?;
                let week_end = roll_to_week_end(self.calendar(), daily.date());
                Ok(Some(week_end.and_time(daily.time())))
            }
            unit @ (IntervalUnit::Month | IntervalUnit::Year) => {
                Err(BoundaryError::UnsupportedInterval(unit))
            }
        }
    }

    fn minute_bar(
        &self,
        tick: NaiveDateTime,
        length: u32,
        category: ProductCategory,
        schedule: &SessionSchedule,
    ) -> NaiveDateTime {
        table_for(IntervalUnit::Minute, category, length, schedule.shape())
            .and_then(|table| find_next_cutover(tick, table, self.calendar()))
            .unwrap_or_else(|| next_minute_boundary(tick, length))
    }

    fn hour_bar(
        &self,
        tick: NaiveDateTime,
        length: u32,
        category: ProductCategory,
        schedule: &SessionSchedule,
    ) -> Result<Option<NaiveDateTime>, BoundaryError> {
        let shape = schedule.shape();
        let table = table_for(IntervalUnit::Hour, category, length, shape).ok_or(
            BoundaryError::UnmappedSessionShape { category, length, shape },
        )?;
        let next = find_next_cutover(tick, table, self.calendar());
        if next.is_none() {
            debug!(%tick, %category, length, "tick outside hour table window");
        }
        Ok(next)
    }

    fn daily_bar(
        &self,
        tick: NaiveDateTime,
        category: ProductCategory,
    ) -> Result<NaiveDateTime, BoundaryError> {
        let table = table_for(IntervalUnit::Daily, category, 1, None).ok_or(
            BoundaryError::UnmappedSessionShape { category, length: 1, shape: None },
        )?;
        let close = find_next_cutover(tick, table, self.calendar())
            .or_else(|| wrap_to_session_open(tick, table))
            .unwrap_or(tick);
        let date = roll_to_trading_day(self.calendar(), close.date());
        Ok(date.and_time(close.time()))
    }
}

/// Special-time table for an interval unit, if that unit has tables at all.
fn table_for(
    unit: IntervalUnit,
    category: ProductCategory,
    length: u32,
    shape: Option<SessionShape>,
) -> Option<&'static SpecialTimeTable> {
    TableUnit::for_interval(unit).and_then(|table_unit| resolve(category, table_unit, length, shape))
}

/// Builds an [`ExchangeBoundaryEngine`]; the calendar is mandatory.
#[derive(Default)]
pub struct ExchangeEngineBuilder {
    calendar: Option<Arc<dyn TradingCalendar>>,
}

impl ExchangeEngineBuilder {
    pub fn calendar(mut self, calendar: impl TradingCalendar + 'static) -> Self {
        self.calendar = Some(Arc::new(calendar));
        self
    }

    pub fn shared_calendar(mut self, calendar: Arc<dyn TradingCalendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn build(self) -> Result<ExchangeBoundaryEngine, BoundaryError> {
        self.calendar
            .map(ExchangeBoundaryEngine::new)
            .ok_or(BoundaryError::CalendarUnavailable)
    }
}
