use chrono::Utc;

/// Source of invocation timestamps, in Unix seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Clamp pre-epoch clocks to zero
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Clock frozen at a fixed instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
