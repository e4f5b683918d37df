use std::collections::VecDeque;
use std::sync::Mutex;

use crate::point::GpsPoint;

/// Default number of retained fixes.
pub const DEFAULT_CAPACITY: usize = 10;

/// Capacity-bounded FIFO of accepted fixes.
///
/// The pipeline is the single writer; reporting contexts may read
/// concurrently. Every operation takes the internal lock for its own
/// duration only, so readers never observe a torn buffer and the lock
/// is never held across a whole `process()` call.
#[derive(Debug)]
pub struct History {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    points: VecDeque<GpsPoint>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Builds a new [History] retaining at most `capacity` fixes.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                points: VecDeque::with_capacity(capacity),
                capacity,
            }),
        }
    }

    /// Appends an accepted fix, evicting the oldest when full.
    pub fn append(&self, point: GpsPoint) {
        let mut inner = self.lock();
        inner.points.push_back(point);
        while inner.points.len() > inner.capacity {
            inner.points.pop_front();
        }
    }

    /// Most recent fix with `valid == true`, scanning backwards.
    pub fn last_valid(&self) -> Option<GpsPoint> {
        let inner = self.lock();
        inner.points.iter().rev().find(|p| p.valid).cloned()
    }

    /// Clone of the whole buffer, oldest first.
    pub fn snapshot(&self) -> Vec<GpsPoint> {
        let inner = self.lock();
        inner.points.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().points.is_empty()
    }

    pub fn clear(&self) {
        self.lock().points.clear();
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Shrinking the capacity truncates from the front immediately.
    pub fn set_capacity(&self, capacity: usize) {
        let mut inner = self.lock();
        inner.capacity = capacity;
        while inner.points.len() > capacity {
            inner.points.pop_front();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // a poisoned lock only means a reader panicked mid-snapshot;
        // the buffer itself is still coherent
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::History;
    use crate::point::GpsPoint;
    use rstest::rstest;

    fn stamped(timestamp_ms: u64, valid: bool) -> GpsPoint {
        let mut p = GpsPoint::default();
        p.timestamp_ms = timestamp_ms;
        p.valid = valid;
        p
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    fn fifo_eviction_keeps_newest(#[case] overflow: usize) {
        let capacity = 5;
        let history = History::new(capacity);

        for t in 0..(capacity + overflow) as u64 {
            history.append(stamped(t, true));
        }

        let points = history.snapshot();
        assert_eq!(points.len(), capacity);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.timestamp_ms, (overflow + i) as u64);
        }
    }

    #[test]
    fn last_valid_scans_backwards() {
        let history = History::new(10);
        history.append(stamped(1, true));
        history.append(stamped(2, true));
        history.append(stamped(3, false));

        assert_eq!(history.last_valid().unwrap().timestamp_ms, 2);
    }

    #[test]
    fn last_valid_empty_or_all_invalid() {
        let history = History::new(10);
        assert!(history.last_valid().is_none());
        history.append(stamped(1, false));
        assert!(history.last_valid().is_none());
    }

    #[test]
    fn shrinking_capacity_truncates_front() {
        let history = History::new(10);
        for t in 0..6u64 {
            history.append(stamped(t, true));
        }

        history.set_capacity(3);
        let points = history.snapshot();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].timestamp_ms, 3);
    }

    #[test]
    fn clear_empties_buffer() {
        let history = History::new(10);
        history.append(stamped(1, true));
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
