//! Data structures edited directly from the UI thread
//!
//! This module provides the three non-sorting views' models:
//! - [`linked_list`]: singly linked list with position-indexed insert/delete
//! - [`stack`]: LIFO stack
//! - [`queue`]: FIFO queue
//!
//! None of these are shared with a worker; every mutation happens on the
//! thread that renders them.

pub mod linked_list;
pub mod queue;
pub mod stack;

pub use linked_list::LinkedList;
pub use queue::Queue;
pub use stack::Stack;

use thiserror::Error;

/// Errors from position-indexed operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Position past the end of the structure
    #[error("position {position} is out of bounds (length {len})")]
    PositionOutOfBounds { position: usize, len: usize },

    /// Removal from an empty structure
    #[error("the list is empty")]
    Empty,
}
