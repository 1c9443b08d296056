//! Boundary engines: the exchange engine (special tables plus trading
//! calendar) and the generic clock-only engine.

pub mod exchange;
pub mod generic;

pub use exchange::{ExchangeBoundaryEngine, ExchangeEngineBuilder};
pub use generic::GenericBoundaryEngine;
