//! Domain types for the RXD engine.

pub mod bar;
pub mod decision;
pub mod instrument;
pub mod position;

pub use bar::{Bar, Sample};
pub use decision::{Direction, ProtectiveDistances, TradeDecision};
pub use instrument::{Instrument, InstrumentError};
pub use position::PositionState;
