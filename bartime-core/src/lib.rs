//! Bartime Core — next-bar boundary computation for exchange tick streams.
//!
//! Given a tick timestamp and a bar interval, find the instant at which the
//! tick's bar closes:
//! - Periodic second/minute/hour grids
//! - Exchange special-time tables for lunch breaks, session closes and
//!   night sessions that cross midnight
//! - Trading-day roll-forward and week alignment against an injected calendar
//! - A generic clock-only engine for markets without session quirks
//! - TOML market configuration (calendar plus per-product sessions)

pub mod calendar;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod periodic;
pub mod special_time;

pub use calendar::{HolidayCalendar, TradingCalendar};
pub use config::{ConfigError, MarketConfig};
pub use domain::{IntervalSpec, IntervalUnit, ProductCategory, SessionSchedule, SessionShape};
pub use engine::{ExchangeBoundaryEngine, GenericBoundaryEngine};
pub use error::{BoundaryError, CalendarStale};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engines and their inputs can cross threads.
    ///
    /// Tick handlers commonly fan out across worker threads sharing one
    /// engine. If any type loses Send + Sync, the build breaks here.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<ExchangeBoundaryEngine>();
        require_sync::<ExchangeBoundaryEngine>();
        require_send::<GenericBoundaryEngine>();
        require_sync::<GenericBoundaryEngine>();
        require_send::<HolidayCalendar>();
        require_sync::<HolidayCalendar>();
        require_send::<SessionSchedule>();
        require_sync::<SessionSchedule>();
        require_send::<IntervalSpec>();
        require_sync::<IntervalSpec>();
        require_send::<MarketConfig>();
        require_sync::<MarketConfig>();
        require_send::<special_time::SpecialTimeTable>();
        require_sync::<special_time::SpecialTimeTable>();
    }

    /// Architecture contract: the engine reads its calendar through a shared
    /// reference only, so one calendar can back many engines.
    #[test]
    fn engines_can_share_one_calendar() {
        let calendar: std::sync::Arc<dyn TradingCalendar> =
            std::sync::Arc::new(HolidayCalendar::new());
        let a = ExchangeBoundaryEngine::new(calendar.clone());
        let b = ExchangeBoundaryEngine::new(calendar);
        let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            a.calendar().is_trading_day(day),
            b.calendar().is_trading_day(day)
        );
    }
}
