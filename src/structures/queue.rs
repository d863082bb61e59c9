//! FIFO queue of integers

use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<i32>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add at the rear
    pub fn enqueue(&mut self, value: i32) {
        self.items.push_back(value);
    }

    /// Remove from the front; `None` on an empty queue
    pub fn dequeue(&mut self) -> Option<i32> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<i32> {
        self.items.front().copied()
    }

    pub fn rear(&self) -> Option<i32> {
        self.items.back().copied()
    }

    /// Elements from front to rear
    pub fn to_vec(&self) -> Vec<i32> {
        self.items.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Queue::new();
        queue.enqueue(4);
        queue.enqueue(5);
        queue.enqueue(6);
        assert_eq!(queue.front(), Some(4));
        assert_eq!(queue.rear(), Some(6));
        assert_eq!(queue.dequeue(), Some(4));
        assert_eq!(queue.to_vec(), vec![5, 6]);
    }

    #[test]
    fn test_dequeue_empty() {
        let mut queue = Queue::new();
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.front(), None);
    }
}
