use std::time::{Duration, Instant};

/// Drops frames that arrive before the frame delay has passed.
///
/// A frame is admitted when at least `delay` has elapsed since the last
/// admitted frame. The first frame is always admitted.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    delay: Duration,
    last_admitted: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_admitted {
            if now.saturating_duration_since(last) < self.delay {
                return false;
            }
        }
        self.last_admitted = Some(now);
        true
    }
}
