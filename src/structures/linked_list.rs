//! Singly linked list with position-indexed insertion and deletion
//!
//! Positions are zero-based. Inserting at `len()` appends; anything past
//! that is rejected with [`StructureError::PositionOutOfBounds`] and leaves
//! the list unchanged.

use super::StructureError;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    value: i32,
    next: Link,
}

#[derive(Debug, Default)]
pub struct LinkedList {
    head: Link,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The link that points at the node currently at `position`
    fn link_at(&mut self, position: usize) -> Option<&mut Link> {
        let mut cursor = &mut self.head;
        for _ in 0..position {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
        Some(cursor)
    }

    pub fn insert_at_beginning(&mut self, value: i32) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    pub fn insert_at_end(&mut self, value: i32) {
        let len = self.len;
        if let Some(tail) = self.link_at(len) {
            *tail = Some(Box::new(Node { value, next: None }));
            self.len += 1;
        }
    }

    /// Insert so that `value` ends up at `position`
    pub fn insert_at_position(&mut self, value: i32, position: usize) -> Result<(), StructureError> {
        let len = self.len;
        let out_of_bounds = StructureError::PositionOutOfBounds { position, len };
        if position > len {
            return Err(out_of_bounds);
        }

        let link = self.link_at(position).ok_or(out_of_bounds)?;
        let next = link.take();
        *link = Some(Box::new(Node { value, next }));
        self.len += 1;
        Ok(())
    }

    /// Unlink the node at `position` and return its value
    pub fn delete_at_position(&mut self, position: usize) -> Result<i32, StructureError> {
        let len = self.len;
        if len == 0 {
            return Err(StructureError::Empty);
        }
        let out_of_bounds = StructureError::PositionOutOfBounds { position, len };
        if position >= len {
            return Err(out_of_bounds);
        }

        let link = self.link_at(position).ok_or(out_of_bounds.clone())?;
        let node = link.take().ok_or(out_of_bounds)?;
        let Node { value, next } = *node;
        *link = next;
        self.len -= 1;
        Ok(value)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Values from head to tail
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

impl Drop for LinkedList {
    fn drop(&mut self) {
        // Unlink iteratively so long lists don't recurse through Box drops
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

/// Borrowing iterator from head to tail
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node.value)
    }
}
