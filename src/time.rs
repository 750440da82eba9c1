use rand::Rng;
use std::time::Duration;

/// Wall-clock source for scrape timestamps, injected so tests can pin it.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> f64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        chrono::Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// Politeness-delay source, injected for the same reason.
pub trait Pacer: Send + Sync {
    fn politeness_delay(&self) -> Duration;
}

pub struct UniformPacer {
    min: Duration,
    max: Duration,
}

impl UniformPacer {
    pub fn new(min: Duration, max: Duration) -> Self {
        UniformPacer { min, max }
    }
}

impl Pacer for UniformPacer {
    fn politeness_delay(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}
