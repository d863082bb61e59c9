//! Stepped sort execution engine
//!
//! This module runs a sorting algorithm over an integer buffer on a worker
//! thread, one paced step at a time:
//! - [`buffer`]: the buffer being sorted and its comparison markers
//! - [`algorithms`]: the six sorts, written against the [`StepHost`] trait
//! - [`pacing`]: the tunable step delay and the cancellation token
//! - [`controller`]: worker lifecycle, buffer ownership, run reports
//! - [`errors`]: engine error types
//!
//! # Execution Model
//!
//! An algorithm mutates the buffer and calls [`StepHost::step`] after every
//! comparison. The worker's host publishes a [`Snapshot`], sleeps for the
//! step delay and polls the cancellation flag before returning control.
//! Renderers only ever see published snapshots.
//!
//! [`StepHost`]: algorithms::StepHost
//! [`StepHost::step`]: algorithms::StepHost::step
//! [`Snapshot`]: crate::snapshot::Snapshot

pub mod algorithms;
pub mod buffer;
pub mod controller;
pub mod errors;
pub mod pacing;

pub use algorithms::Algorithm;
pub use controller::{RunController, RunOutcome, RunReport, RunStatus};
pub use errors::EngineError;
