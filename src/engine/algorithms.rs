//! The six sorting procedures, written as sequences of atomic steps
//!
//! An algorithm never sleeps and never decides whether to keep going. It
//! mutates the [`SortBuffer`] handed out by its [`StepHost`], points the
//! markers at what it just touched and calls [`StepHost::step`]. The host
//! decides what a step costs (publish a snapshot, wait out the delay) and
//! whether the run continues. Loop heads additionally call
//! [`StepHost::checkpoint`] so that a stop is noticed between steps.
//!
//! Both calls return `Err(Halt::Cancelled)` once a stop was requested; the
//! procedures propagate it with `?` and leave the buffer as it is. The only
//! repair made on the way out is in insertion sort, which puts the key it
//! was carrying back into the hole it had opened, so that a stopped run
//! still holds a permutation of its input.

use super::buffer::SortBuffer;
use super::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why an algorithm stopped before exhausting its steps
#[derive(Debug)]
pub enum Halt {
    /// A stop was requested
    Cancelled,
    /// The algorithm broke an invariant of the buffer
    Fault(EngineError),
}

impl From<EngineError> for Halt {
    fn from(err: EngineError) -> Self {
        Halt::Fault(err)
    }
}

/// The environment an algorithm runs in
pub trait StepHost {
    /// The buffer being sorted
    fn buffer(&mut self) -> &mut SortBuffer;

    /// A step just finished: markers point at what it touched
    fn step(&mut self) -> Result<(), Halt>;

    /// Poll for cancellation without counting a step
    fn checkpoint(&mut self) -> Result<(), Halt>;
}

/// Returned when parsing an algorithm name fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown algorithm '{0}' (expected bubble, selection, insertion, merge, quick or heap)")]
pub struct UnknownAlgorithm(pub String);

/// Catalog of available sorts, in selector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Stable position in the selector
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
        }
    }

    /// Next entry in the selector, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.ordinal() + 1) % Self::ALL.len()]
    }

    /// Previous entry in the selector, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.ordinal() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Sort the host's buffer in ascending order, one step at a time
    pub fn run<H: StepHost>(self, host: &mut H) -> Result<(), Halt> {
        match self {
            Algorithm::Bubble => bubble_sort(host),
            Algorithm::Selection => selection_sort(host),
            Algorithm::Insertion => insertion_sort(host),
            Algorithm::Merge => merge_sort(host),
            Algorithm::Quick => quick_sort(host),
            Algorithm::Heap => heap_sort(host),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key
            .strip_suffix("sort")
            .map(|k| k.trim_end_matches(['-', '_', ' ']))
            .unwrap_or(&key);
        match key {
            "bubble" => Ok(Algorithm::Bubble),
            "selection" => Ok(Algorithm::Selection),
            "insertion" => Ok(Algorithm::Insertion),
            "merge" => Ok(Algorithm::Merge),
            "quick" => Ok(Algorithm::Quick),
            "heap" => Ok(Algorithm::Heap),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

// ========== Bubble ==========

fn bubble_sort<H: StepHost>(host: &mut H) -> Result<(), Halt> {
    let n = host.buffer().len();
    for i in 0..n {
        host.checkpoint()?;
        for j in 0..n - i - 1 {
            host.checkpoint()?;
            let buf = host.buffer();
            buf.set_markers(j, j + 1)?;
            if buf.compare(j, j + 1)? == Ordering::Greater {
                buf.swap(j, j + 1)?;
            }
            host.step()?;
        }
    }
    Ok(())
}

// ========== Selection ==========

fn selection_sort<H: StepHost>(host: &mut H) -> Result<(), Halt> {
    let n = host.buffer().len();
    for i in 0..n {
        let mut min = i;
        host.checkpoint()?;
        for j in i + 1..n {
            host.checkpoint()?;
            let buf = host.buffer();
            buf.set_markers(min, j)?;
            if buf.compare(j, min)? == Ordering::Less {
                min = j;
            }
            host.step()?;
        }
        if min != i {
            host.buffer().swap(i, min)?;
        }
    }
    Ok(())
}

// ========== Insertion ==========

fn insertion_sort<H: StepHost>(host: &mut H) -> Result<(), Halt> {
    let n = host.buffer().len();
    for i in 1..n {
        host.checkpoint()?;
        let key = host.buffer().get(i)?;
        host.buffer().mark_first(i)?;

        let mut hole = i;
        let shifted = shift_greater(host, &mut hole, key);
        // The key goes back into the hole even if the shift was cut short
        host.buffer().set(hole, key)?;
        shifted?;

        host.buffer().clear_markers();
    }
    Ok(())
}

/// Move every element greater than `key` one slot right, opening a hole
fn shift_greater<H: StepHost>(host: &mut H, hole: &mut usize, key: i32) -> Result<(), Halt> {
    while *hole > 0 && host.buffer().compare_with(*hole - 1, key)? == Ordering::Greater {
        host.checkpoint()?;
        let buf = host.buffer();
        buf.mark_second(*hole - 1)?;
        let moved = buf.get(*hole - 1)?;
        buf.set(*hole, moved)?;
        *hole -= 1;
        host.step()?;
    }
    Ok(())
}

// ========== Merge ==========

fn merge_sort<H: StepHost>(host: &mut H) -> Result<(), Halt> {
    let n = host.buffer().len();
    if n == 0 {
        return Ok(());
    }
    merge_split(host, 0, n - 1)
}

fn merge_split<H: StepHost>(host: &mut H, left: usize, right: usize) -> Result<(), Halt> {
    host.checkpoint()?;
    if left >= right {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    merge_split(host, left, mid)?;
    merge_split(host, mid + 1, right)?;
    merge_runs(host, left, mid, right)
}

/// Merge `left..=mid` with `mid+1..=right` through a scratch vector.
///
/// Nothing is written back until both runs are consumed, so a stop in the
/// middle leaves the range untouched.
fn merge_runs<H: StepHost>(
    host: &mut H,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<(), Halt> {
    let mut merged = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (left, mid + 1);

    while i <= mid && j <= right {
        let buf = host.buffer();
        buf.set_markers(i, j)?;
        if buf.compare(i, j)? != Ordering::Greater {
            merged.push(buf.get(i)?);
            i += 1;
        } else {
            merged.push(buf.get(j)?);
            j += 1;
        }
        host.step()?;
    }

    while i <= mid {
        let buf = host.buffer();
        buf.mark_only(i)?;
        merged.push(buf.get(i)?);
        i += 1;
        host.step()?;
    }

    while j <= right {
        let buf = host.buffer();
        buf.clear_markers();
        buf.mark_second(j)?;
        merged.push(buf.get(j)?);
        j += 1;
        host.step()?;
    }

    let buf = host.buffer();
    for (offset, value) in merged.into_iter().enumerate() {
        buf.set(left + offset, value)?;
    }
    Ok(())
}

// ========== Quick ==========

fn quick_sort<H: StepHost>(host: &mut H) -> Result<(), Halt> {
    let n = host.buffer().len();
    if n == 0 {
        return Ok(());
    }
    quick_range(host, 0, n - 1)
}

fn quick_range<H: StepHost>(host: &mut H, low: usize, high: usize) -> Result<(), Halt> {
    host.checkpoint()?;
    if low < high {
        let pivot = partition(host, low, high)?;
        if pivot > low {
            quick_range(host, low, pivot - 1)?;
        }
        quick_range(host, pivot + 1, high)?;
    }
    Ok(())
}

/// Lomuto partition around the last element; returns the pivot's final slot
fn partition<H: StepHost>(host: &mut H, low: usize, high: usize) -> Result<usize, Halt> {
    // Next slot for an element smaller than the pivot
    let mut store = low;
    for j in low..high {
        host.checkpoint()?;
        let buf = host.buffer();
        buf.set_markers(j, high)?;
        if buf.compare(j, high)? == Ordering::Less {
            buf.swap(store, j)?;
            store += 1;
        }
        host.step()?;
    }
    host.buffer().swap(store, high)?;
    Ok(store)
}

// ========== Heap ==========

fn heap_sort<H: StepHost>(host: &mut H) -> Result<(), Halt> {
    let n = host.buffer().len();

    for root in (0..n / 2).rev() {
        host.checkpoint()?;
        sift_down(host, n, root)?;
    }

    for end in (0..n).rev() {
        host.checkpoint()?;
        let buf = host.buffer();
        buf.swap(0, end)?;
        buf.set_markers(0, end)?;
        host.step()?;
        sift_down(host, end, 0)?;
    }
    Ok(())
}

/// Restore the max-heap property below `root` within the first `size` slots
fn sift_down<H: StepHost>(host: &mut H, size: usize, root: usize) -> Result<(), Halt> {
    host.checkpoint()?;
    let buf = host.buffer();
    let left = 2 * root + 1;
    let right = 2 * root + 2;
    let mut largest = root;

    buf.mark_first(root)?;
    if left < size && buf.compare(left, largest)? == Ordering::Greater {
        largest = left;
    }
    buf.mark_second(largest)?;
    if right < size && buf.compare(right, largest)? == Ordering::Greater {
        largest = right;
    }

    if largest != root {
        buf.swap(root, largest)?;
        host.step()?;
        sift_down(host, size, largest)?;
    }
    Ok(())
}
