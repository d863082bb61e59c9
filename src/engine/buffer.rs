//! The integer buffer a sort works on, plus its comparison markers
//!
//! - [`SortBuffer`]: the values, bounds-checked reads and writes, and a
//!   running comparison count
//! - [`Markers`]: the (at most two) indices currently being compared
//!
//! Every indexed operation is checked against the current length and
//! returns [`EngineError::InvalidIndex`] instead of panicking, so a faulty
//! algorithm aborts its own run without taking the worker thread down.

use super::errors::EngineError;
use std::cmp::Ordering;

/// The pair of "currently compared" indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    pub first: Option<usize>,
    pub second: Option<usize>,
}

impl Markers {
    pub const NONE: Markers = Markers {
        first: None,
        second: None,
    };

    /// Check if neither marker is set
    pub fn is_clear(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// Check if `index` is highlighted by either marker
    pub fn contains(&self, index: usize) -> bool {
        self.first == Some(index) || self.second == Some(index)
    }

    /// Check that every set marker is a valid index for a buffer of `len`
    pub fn within(&self, len: usize) -> bool {
        self.first.is_none_or(|i| i < len) && self.second.is_none_or(|i| i < len)
    }
}

/// Mutable integer sequence being sorted
#[derive(Debug, Clone, Default)]
pub struct SortBuffer {
    values: Vec<i32>,
    markers: Markers,
    comparisons: u64,
}

impl SortBuffer {
    pub fn new(values: Vec<i32>) -> Self {
        SortBuffer {
            values,
            markers: Markers::NONE,
            comparisons: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Full copy of the current contents
    pub fn to_vec(&self) -> Vec<i32> {
        self.values.clone()
    }

    pub fn into_values(self) -> Vec<i32> {
        self.values
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }

    /// Number of element comparisons made so far
    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    fn check(&self, index: usize) -> Result<usize, EngineError> {
        if index < self.values.len() {
            Ok(index)
        } else {
            Err(EngineError::InvalidIndex {
                index,
                len: self.values.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<i32, EngineError> {
        self.check(index).map(|i| self.values[i])
    }

    pub fn set(&mut self, index: usize, value: i32) -> Result<(), EngineError> {
        let i = self.check(index)?;
        self.values[i] = value;
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), EngineError> {
        let (a, b) = (self.check(a)?, self.check(b)?);
        self.values.swap(a, b);
        Ok(())
    }

    /// Compare the elements at `a` and `b`, counting one comparison
    pub fn compare(&mut self, a: usize, b: usize) -> Result<Ordering, EngineError> {
        let (x, y) = (self.get(a)?, self.get(b)?);
        self.comparisons += 1;
        Ok(x.cmp(&y))
    }

    /// Compare the element at `index` against a value held outside the buffer
    pub fn compare_with(&mut self, index: usize, value: i32) -> Result<Ordering, EngineError> {
        let x = self.get(index)?;
        self.comparisons += 1;
        Ok(x.cmp(&value))
    }

    /// Highlight `a` and `b`
    pub fn set_markers(&mut self, a: usize, b: usize) -> Result<(), EngineError> {
        self.markers = Markers {
            first: Some(self.check(a)?),
            second: Some(self.check(b)?),
        };
        Ok(())
    }

    pub fn mark_first(&mut self, index: usize) -> Result<(), EngineError> {
        self.markers.first = Some(self.check(index)?);
        Ok(())
    }

    pub fn mark_second(&mut self, index: usize) -> Result<(), EngineError> {
        self.markers.second = Some(self.check(index)?);
        Ok(())
    }

    /// Highlight a single index and drop the other marker
    pub fn mark_only(&mut self, index: usize) -> Result<(), EngineError> {
        self.markers = Markers {
            first: Some(self.check(index)?),
            second: None,
        };
        Ok(())
    }

    pub fn clear_markers(&mut self) {
        self.markers = Markers::NONE;
    }
}
