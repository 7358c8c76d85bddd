//! Linear undo/redo over Content Snapshots.
//!
//! The log is a sequence of whole-document snapshots plus a current index.
//! There is no redo tree: pushing while not at the tail discards the
//! forward branch permanently.

use smol_str::SmolStr;

/// Snapshot history with a movable cursor.
///
/// Invariants: the index is always within `[0, len - 1]`; the snapshot at
/// index 0 is the value at mount time (or its eviction-shifted successor
/// once the depth cap bites).
#[derive(Debug, Clone)]
pub struct HistoryLog {
    snapshots: Vec<SmolStr>,
    index: usize,
    max_depth: usize,
}

impl HistoryLog {
    /// Start a log seeded with the mount-time snapshot.
    pub fn new(initial: &str, max_depth: usize) -> Self {
        Self {
            snapshots: vec![SmolStr::new(initial)],
            index: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// The snapshot at the current index.
    pub fn current(&self) -> &str {
        &self.snapshots[self.index]
    }

    /// Number of snapshots currently held. Never zero.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Append a snapshot, discarding any redo branch first.
    pub fn push(&mut self, snapshot: &str) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(SmolStr::new(snapshot));

        // Depth cap: evict from the front.
        while self.snapshots.len() > self.max_depth {
            self.snapshots.remove(0);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back. Returns the snapshot now current, or None at the floor.
    pub fn undo(&mut self) -> Option<&str> {
        if self.index == 0 {
            tracing::debug!("nothing to undo");
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward. Returns the snapshot now current, or None at the tail.
    pub fn redo(&mut self) -> Option<&str> {
        if self.index + 1 >= self.snapshots.len() {
            tracing::debug!("nothing to redo");
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }
}
