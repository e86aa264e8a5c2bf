use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Exponential delay between reconnect attempts, owned by the supervisor loop.
pub struct Backoff {
    initial: Duration,
    max: Duration,
    delay: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let initial = initial.min(max);
        Self {
            initial,
            max,
            delay: initial,
        }
    }

    /// The delay to wait now. The following one is doubled, up to `max`.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay;
        self.delay = self.delay.saturating_mul(2).min(self.max);
        delay
    }

    /// Back to `initial`; called on every successful connection.
    pub fn reset(&mut self) {
        self.delay = self.initial;
    }

    pub fn peek(&self) -> Duration {
        self.delay
    }
}
