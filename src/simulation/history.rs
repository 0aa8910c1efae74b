use crate::events::PacketEvent;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Insertion-ordered window over the most recent records. The oldest record
/// is evicted once capacity is exceeded; there is no other removal path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    events: VecDeque<PacketEvent>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn append(&mut self, event: PacketEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            if let Some(evicted) = self.events.pop_front() {
                log::trace!("History full, evicted packet #{}", evicted.id);
            }
        }
    }

    /// Copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<PacketEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PacketEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{sample_event, Category};

    #[test]
    fn test_append_keeps_order() {
        let mut store = HistoryStore::default();
        store.append(sample_event(1, "t", Category::Normal));
        store.append(sample_event(2, "t", Category::DoS));
        let ids: Vec<u64> = store.snapshot().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let mut store = HistoryStore::default();
        for id in 1..=150 {
            store.append(sample_event(id, "t", Category::Normal));
            assert!(store.len() <= DEFAULT_HISTORY_CAPACITY);
        }
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 100);
        let ids: Vec<u64> = snapshot.iter().map(|e| e.id).collect();
        assert_eq!(ids, (51..=150).collect::<Vec<u64>>());
    }

    #[test]
    fn test_small_capacity() {
        let mut store = HistoryStore::new(3);
        for id in 1..=5 {
            store.append(sample_event(id, "t", Category::PortScan));
        }
        let ids: Vec<u64> = store.iter().rev().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut store = HistoryStore::new(2);
        store.append(sample_event(1, "t", Category::Normal));
        let before = store.snapshot();
        store.append(sample_event(2, "t", Category::Normal));
        store.append(sample_event(3, "t", Category::Normal));
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].id, 1);
    }
}
