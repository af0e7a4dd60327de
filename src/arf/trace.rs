//! Effective data rate telemetry.

use std::fmt;

use crate::core::RateObserver;

/// Last selected data rate in bit/s, with change subscribers.
///
/// The engine never reads this back; it exists for external monitoring.
#[derive(Default)]
pub struct RateTrace {
    current: u64,
    observers: Vec<Box<dyn RateObserver>>,
}

impl RateTrace {
    /// Create a trace starting at 0 bit/s with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value in bit/s.
    pub fn get(&self) -> u64 {
        self.current
    }

    /// Register an observer for subsequent changes.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: RateObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Store a new value, notifying observers if it differs.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&mut self, rate: u64) -> bool {
        if rate == self.current {
            return false;
        }
        let old = std::mem::replace(&mut self.current, rate);
        for observer in &self.observers {
            observer.on_rate_change(old, rate);
        }
        true
    }
}

impl fmt::Debug for RateTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateTrace")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_set_notifies_on_change_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut trace = RateTrace::new();
        let sink = Arc::clone(&seen);
        trace.subscribe(move |old: u64, new: u64| sink.lock().unwrap().push((old, new)));

        assert!(trace.set(6_000_000));
        assert!(!trace.set(6_000_000));
        assert!(trace.set(9_000_000));

        assert_eq!(trace.get(), 9_000_000);
        assert_eq!(
            *seen.lock().unwrap(),
            [(0, 6_000_000), (6_000_000, 9_000_000)]
        );
    }

    #[test]
    fn test_multiple_observers() {
        let mut trace = RateTrace::new();
        let count = Arc::new(Mutex::new(0u32));
        for _ in 0..3 {
            let count = Arc::clone(&count);
            trace.subscribe(move |_: u64, _: u64| *count.lock().unwrap() += 1);
        }
        assert_eq!(trace.observer_count(), 3);
        trace.set(1);
        assert_eq!(*count.lock().unwrap(), 3);
    }
}
