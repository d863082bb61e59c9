// Snapshot publication between the sort worker and the renderer

use crate::engine::algorithms::Algorithm;
use crate::engine::buffer::{Markers, SortBuffer};
use crate::engine::controller::RunStatus;
use parking_lot::Mutex;
use std::sync::Arc;

/// Point-in-time copy of everything the renderer draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub values: Vec<i32>,
    pub markers: Markers,
    pub status: RunStatus,
    pub algorithm: Option<Algorithm>,
    pub steps: u64,
    pub comparisons: u64,
}

impl Snapshot {
    /// Snapshot of a buffer no run is touching
    pub fn idle(values: Vec<i32>) -> Self {
        Snapshot {
            values,
            markers: Markers::NONE,
            status: RunStatus::Idle,
            algorithm: None,
            steps: 0,
            comparisons: 0,
        }
    }

    /// Copy the buffer and its markers in one go
    pub fn capture(
        buffer: &SortBuffer,
        status: RunStatus,
        algorithm: Algorithm,
        steps: u64,
    ) -> Self {
        Snapshot {
            values: buffer.to_vec(),
            markers: buffer.markers(),
            status,
            algorithm: Some(algorithm),
            steps,
            comparisons: buffer.comparisons(),
        }
    }

    /// Check that the markers index into this snapshot's own values
    pub fn is_consistent(&self) -> bool {
        self.markers.within(self.values.len())
    }

    /// Largest value, used to scale the bars
    pub fn max_value(&self) -> Option<i32> {
        self.values.iter().copied().max()
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::idle(Vec::new())
    }
}

/// Holds the latest published snapshot.
///
/// Publishing swaps in a new `Arc`; reading clones the current one. The lock
/// only ever guards a pointer swap or a reference-count bump, never a copy
/// of the values. Reader and writer can still contend on it for the length
/// of that swap.
#[derive(Debug, Default)]
pub struct SnapshotPublisher {
    latest: Mutex<Arc<Snapshot>>,
}

impl SnapshotPublisher {
    pub fn new(initial: Snapshot) -> Self {
        SnapshotPublisher {
            latest: Mutex::new(Arc::new(initial)),
        }
    }

    /// Replace the current snapshot
    pub fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let previous = std::mem::replace(&mut *self.latest.lock(), snapshot);
        // The old snapshot may be large; release it outside the lock
        drop(previous);
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_capture_copies_markers_with_values() {
        let mut buffer = SortBuffer::new(vec![4, 2, 7]);
        buffer.set_markers(0, 2).unwrap();

        let snapshot = Snapshot::capture(&buffer, RunStatus::Running, Algorithm::Bubble, 3);
        assert_eq!(snapshot.values, vec![4, 2, 7]);
        assert_eq!(snapshot.markers.second, Some(2));
        assert_eq!(snapshot.steps, 3);
        assert!(snapshot.is_consistent());
        assert!(!snapshot.is_sorted());
        assert_eq!(snapshot.max_value(), Some(7));
    }

    #[test]
    fn test_published_snapshot_is_immutable() {
        let publisher = SnapshotPublisher::new(Snapshot::idle(vec![1, 2]));
        let before = publisher.latest();

        publisher.publish(Snapshot::idle(vec![9]));

        assert_eq!(before.values, vec![1, 2]);
        assert_eq!(publisher.latest().values, vec![9]);
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_snapshots() {
        let publisher = Arc::new(SnapshotPublisher::default());

        let writer = {
            let publisher = Arc::clone(&publisher);
            thread::spawn(move || {
                for len in 1..500usize {
                    let mut buffer = SortBuffer::new(vec![len as i32; len]);
                    buffer.set_markers(0, len - 1).unwrap();
                    publisher.publish(Snapshot::capture(
                        &buffer,
                        RunStatus::Running,
                        Algorithm::Merge,
                        len as u64,
                    ));
                }
            })
        };

        for _ in 0..2000 {
            let snapshot = publisher.latest();
            assert!(snapshot.is_consistent());
            assert!(snapshot.values.iter().all(|&v| v as usize == snapshot.values.len()));
        }

        writer.join().unwrap();
    }
}
