//! Clock abstraction for mdtest.
//!
//! Provides a monotonic clock trait with both real and mock implementations
//! so benchmark timing can be tested deterministically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Trait for reading a monotonic clock.
///
/// Readings are offsets from an arbitrary, fixed origin. Only the difference
/// between two readings of the same clock is meaningful.
pub trait Clock: Send + Sync {
    /// Returns the time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Real monotonic clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Mock clock for testing with a fixed reading.
#[derive(Debug, Clone, Copy)]
pub struct MockClock {
    reading: Duration,
}

impl MockClock {
    /// Create a mock clock that always reads `millis` milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self {
            reading: Duration::from_millis(millis),
        }
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.reading
    }
}

/// Mock clock that auto-advances on each reading.
///
/// Useful for testing timing code where elapsed time must be non-zero.
#[derive(Debug)]
pub struct AdvancingClock {
    micros: AtomicU64,
    step_micros: u64,
}

impl AdvancingClock {
    /// Create a clock starting at `start_micros` that advances by `step_micros` per reading.
    pub fn new(start_micros: u64, step_micros: u64) -> Self {
        Self {
            micros: AtomicU64::new(start_micros),
            step_micros,
        }
    }

    /// Number of microseconds the next reading will return.
    pub fn peek_micros(&self) -> u64 {
        self.micros.load(Ordering::SeqCst)
    }
}

impl Clock for AdvancingClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.fetch_add(self.step_micros, Ordering::SeqCst))
    }
}

/// Convert a duration to fractional milliseconds.
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock_returns_fixed_reading() {
        let clock = MockClock::from_millis(1234);
        assert_eq!(clock.now(), Duration::from_millis(1234));
        assert_eq!(clock.now(), Duration::from_millis(1234));
    }

    #[test]
    fn test_mock_clock_zero() {
        let clock = MockClock::from_millis(0);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        let t2 = clock.now();
        assert!(t2 >= t1);
    }

    #[test]
    fn test_system_clock_default() {
        let clock = SystemClock::default();
        // Freshly constructed, so the reading is tiny.
        assert!(clock.now() < Duration::from_secs(60));
    }

    #[test]
    fn test_clock_trait_object() {
        let mock: Box<dyn Clock> = Box::new(MockClock::from_millis(42));
        assert_eq!(mock.now(), Duration::from_millis(42));

        let system: Box<dyn Clock> = Box::new(SystemClock::new());
        let _ = system.now();
    }

    #[test]
    fn test_advancing_clock_increments() {
        let clock = AdvancingClock::new(1000, 5);
        assert_eq!(clock.now(), Duration::from_micros(1000));
        assert_eq!(clock.now(), Duration::from_micros(1005));
        assert_eq!(clock.peek_micros(), 1010);
        assert_eq!(clock.now(), Duration::from_micros(1010));
    }

    #[test]
    fn test_advancing_clock_zero_step() {
        let clock = AdvancingClock::new(1000, 0);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_advancing_clock_debug() {
        let clock = AdvancingClock::new(1000, 1);
        let debug = format!("{:?}", clock);
        assert!(debug.contains("AdvancingClock"));
    }

    #[test]
    fn test_as_millis_f64() {
        assert_eq!(as_millis_f64(Duration::from_millis(250)), 250.0);
        assert_eq!(as_millis_f64(Duration::from_micros(1500)), 1.5);
        assert_eq!(as_millis_f64(Duration::ZERO), 0.0);
    }
}
