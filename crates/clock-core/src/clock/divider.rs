use std::num::NonZeroU32;

/// Tick prescaler: one second boundary per `ratio` ticks.
pub struct Divider {
    ratio: NonZeroU32,
    tick_count: u32,
}

impl Divider {
    pub fn new(ratio: NonZeroU32) -> Divider {
        Divider {
            ratio,
            tick_count: 0,
        }
    }

    /// Counts one gated tick.
    ///
    /// # Returns
    ///
    /// `true` when this tick completes a second, and `false` otherwise
    pub fn advance(&mut self, tick: bool) -> bool {
        if !tick {
            return false;
        }
        self.tick_count += 1;
        if self.tick_count == self.ratio.get() {
            self.tick_count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.tick_count = 0;
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }
}
