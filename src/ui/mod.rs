//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, the keyboard event loop, view selection
//!   and field editing
//! - **[`panes`]**: stateless render functions for each view (sorting, linked
//!   list, stack, queue) and the status bar
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`RunController`] and call [`App::run`] to start the event loop. The UI
//! thread only ever reads sort state through published snapshots.
//!
//! [`RunController`]: crate::engine::RunController
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
