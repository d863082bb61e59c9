//! TUI pane rendering modules
//!
//! One module per view plus the status bar.
//!
//! # Pane Modules
//!
//! - [`sorting`]: algorithm controls and the bar chart of the latest snapshot
//! - [`linked_list`]: nodes and links with their positions
//! - [`stack`]: stack cells, top first
//! - [`queue`]: queue cells, front to rear
//! - [`status`]: Status bar with keybindings and run state
//! - `utils`: Shared helpers for blocks, fields and key hints
//!
//! Each pane module exports a `render_*` function and a `*RenderData` struct
//! borrowing whatever the pane needs from the app for one frame.

mod utils;

pub mod linked_list;
pub mod queue;
pub mod sorting;
pub mod stack;
pub mod status;

// Re-export render functions for convenience
pub use linked_list::{render_list_pane, ListRenderData};
pub use queue::{render_queue_pane, QueueRenderData};
pub use sorting::{render_sorting_pane, SortingRenderData};
pub use stack::{render_stack_pane, StackRenderData};
pub use status::{render_status_bar, StatusRenderData};
