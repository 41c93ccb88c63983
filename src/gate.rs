//! Admission gate bounding the number of pending delayed clicks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counting semaphore with non-blocking acquisition
#[derive(Debug)]
pub struct AdmissionGate {
    capacity: usize,
    in_flight: AtomicUsize,
}

/// One admitted unit; returned to the gate when dropped
#[derive(Debug)]
pub struct Permit {
    gate: Arc<AdmissionGate>,
}

impl AdmissionGate {
    /// Create a gate admitting `capacity` holders at once (minimum 1)
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity: capacity.max(1),
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Take one unit if any is free; never waits
    pub fn try_acquire(self: &Arc<Self>) -> Option<Permit> {
        self.in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.capacity).then_some(n + 1)
            })
            .ok()
            .map(|_| Permit { gate: self.clone() })
    }

    /// Maximum number of permits outstanding at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently held
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.gate.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn saturates_at_capacity_and_releases_on_drop() {
        let gate = AdmissionGate::new(2);
        let a = gate.try_acquire().unwrap();
        let b = gate.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());
        assert_eq!(gate.in_flight(), 2);

        drop(a);
        assert_eq!(gate.in_flight(), 1);
        let c = gate.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());

        drop(b);
        drop(c);
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn zero_capacity_admits_one() {
        let gate = AdmissionGate::new(0);
        assert_eq!(gate.capacity(), 1);
        let _permit = gate.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());
    }

    #[test]
    fn released_when_holder_panics() {
        let gate = AdmissionGate::new(1);
        let permit = gate.try_acquire().unwrap();
        let result = thread::spawn(move || {
            let _permit = permit;
            panic!("action failed");
        })
        .join();
        assert!(result.is_err());
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn ceiling_holds_under_contention() {
        let gate = AdmissionGate::new(3);
        let peak = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                let peak = peak.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        if let Some(_permit) = gate.try_acquire() {
                            peak.fetch_max(gate.in_flight(), Ordering::SeqCst);
                            thread::sleep(Duration::from_micros(200));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(gate.in_flight(), 0);
    }
}
