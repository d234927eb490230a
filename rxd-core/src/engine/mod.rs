//! Replay engine: paper execution and the sequential bar loop.

pub mod broker;
pub mod session;

pub use broker::{ClosedTrade, ExecutionPort, Fill, FillReason, PaperBroker};
pub use session::{run_session, SessionEvent, SessionReport, SessionSummary};
