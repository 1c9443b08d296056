//! Domain types: intervals, product categories, session schedules.

pub mod interval;
pub mod product;
pub mod session;

pub use interval::{IntervalParseError, IntervalSpec, IntervalUnit};
pub use product::{product_id_from_symbol, ProductCategory};
pub use session::{Session, SessionSchedule, SessionShape, SECONDS_PER_DAY};
