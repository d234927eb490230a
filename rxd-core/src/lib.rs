//! RXD Core: perceptron scorers, confirmation filters and the decision engine.
//!
//! This crate contains:
//! - Domain types (bars, samples, decisions, instruments, position view)
//! - Rolling state: LWMA chains and shift-indexed history buffers
//! - Three perceptron scorers (supervisor, long, short)
//! - Filter bank over precomputed classical indicators
//! - Mode-selected decision multiplexer and protective order sizing
//! - `RxdStrategy`, which wires the above into a per-bar step
//! - A paper broker and sequential replay session

pub mod config;
pub mod data;
pub mod decision;
pub mod domain;
pub mod engine;
pub mod error;
pub mod filters;
pub mod history;
pub mod indicators;
pub mod perceptron;
pub mod protective;
pub mod strategy;
pub mod wma;

pub use config::{ExecutionConfig, StrategyConfig};
pub use decision::{DecisionMode, DecisionMultiplexer, Scores};
pub use error::{ConfigError, DataError, ExecutionError};
pub use strategy::RxdStrategy;
