//! Exchange-specific bar cutovers: keyed tables and the search over them.

pub mod search;
pub mod table;
pub mod tables;

pub use search::{find_next_cutover, micros_of_day, wrap_to_session_open};
pub use table::{Cutover, LowerBound, SpecialTimeTable};
pub use tables::{all_tables, resolve, TableEntry, TableKey, TableUnit};
