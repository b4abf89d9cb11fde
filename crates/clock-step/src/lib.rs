//! Stimulus and expectation runner for the BCD clock.
//!
//! A [`Scenario`] is a list of phases, each holding one control word (which
//! may contain unknown bits) for a number of cycles and then checking the
//! packed output words.

pub mod error;
pub mod logic;
pub mod runner;
pub mod scenario;

pub use error::ScenarioError;
pub use logic::{LogicWord, LogicWordError};
pub use runner::{Check, CheckOutcome, PhaseReport, Report, run};
pub use scenario::{ControlPreset, Expect, Phase, Scenario};
