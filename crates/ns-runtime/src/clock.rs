//! Session time.

/// Monotonic session time in milliseconds, advanced once per tick.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    now_ms: u64,
    frames: u64,
}

impl SessionClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by the raw elapsed time. Returns the new time.
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        self.frames += 1;
        self.now_ms
    }

    /// Current time.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// The movement delta for a frame: the elapsed time, capped so that a stall
/// cannot teleport the player.
pub fn movement_delta(elapsed_ms: u64, max_ms: u64) -> f32 {
    elapsed_ms.min(max_ms) as f32
}
