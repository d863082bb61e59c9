//! # Introduction
//!
//! dsviz animates classic data structures in the terminal. Its core is a
//! stepped sort engine: an algorithm runs on a worker thread, pausing after
//! every comparison so each intermediate state can be drawn, and can be
//! stopped at any step. Linked list, stack and queue views sit alongside it
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Command → RunController → worker (Algorithm + StepHost) → Snapshots → TUI
//! ```
//!
//! 1. [`engine`]: the shared buffer, the six sorting algorithms, pacing and
//!    cancellation, and the [`engine::RunController`] that owns the worker.
//! 2. [`snapshot`]: immutable copies of the buffer published once per step
//!    and read by the renderer without blocking the worker.
//! 3. [`structures`]: linked list, stack and queue edited on the UI thread.
//! 4. [`config`] and [`logging`]: startup settings and file-backed tracing.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Bubble, Selection, Insertion, Merge, Quick (Lomuto partition) and Heap
//! sort, each yielding once per comparison.

pub mod config;
pub mod engine;
pub mod logging;
pub mod snapshot;
pub mod structures;
pub mod ui;
