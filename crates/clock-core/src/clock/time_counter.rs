use std::fmt;

use super::bcd::{Bcd, HOURS_WRAP, SIXTY_WRAP};
use super::meridiem::{Meridiem, MeridiemToggle};

/// Highest unit touched by one second event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Carry {
    Seconds,
    Minutes,
    Hours,
    /// Hours went 12 -> 1 and the meridiem flipped
    HourRollover,
}

/// Snapshot of the clock fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: Bcd,
    pub minutes: Bcd,
    pub seconds: Bcd,
    pub meridiem: Meridiem,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hours: Bcd::TWELVE,
        minutes: Bcd::ZERO,
        seconds: Bcd::ZERO,
        meridiem: Meridiem::Am,
    };
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} {}",
            self.hours, self.minutes, self.seconds, self.meridiem
        )
    }
}

/// Seconds, minutes and hours as two-digit BCD counters with a 12-hour wrap.
pub struct TimeCounter {
    seconds: Bcd,
    minutes: Bcd,
    hours: Bcd,
}

impl TimeCounter {
    pub fn new() -> TimeCounter {
        TimeCounter {
            seconds: Bcd::ZERO,
            minutes: Bcd::ZERO,
            hours: Bcd::TWELVE,
        }
    }

    /// Advances one second, carrying upward. The 12 -> 1 hour transition is
    /// reported to `meridiem`.
    pub fn on_second_elapsed(&mut self, meridiem: &mut MeridiemToggle) -> Carry {
        self.seconds.increment();
        if self.seconds != SIXTY_WRAP {
            return Carry::Seconds;
        }
        self.seconds = Bcd::ZERO;

        self.minutes.increment();
        if self.minutes != SIXTY_WRAP {
            return Carry::Minutes;
        }
        self.minutes = Bcd::ZERO;

        self.hours.increment();
        if self.hours != HOURS_WRAP {
            return Carry::Hours;
        }
        self.hours = Bcd::ONE;
        meridiem.on_hour_rollover();
        Carry::HourRollover
    }

    pub fn reset(&mut self, meridiem: &mut MeridiemToggle) {
        self.seconds = Bcd::ZERO;
        self.minutes = Bcd::ZERO;
        self.hours = Bcd::TWELVE;
        meridiem.reset();
    }

    pub fn seconds(&self) -> Bcd {
        self.seconds
    }

    pub fn minutes(&self) -> Bcd {
        self.minutes
    }

    pub fn hours(&self) -> Bcd {
        self.hours
    }

    pub fn snapshot(&self, meridiem: Meridiem) -> TimeOfDay {
        TimeOfDay {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            meridiem,
        }
    }
}

impl Default for TimeCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(counter: &mut TimeCounter, toggle: &mut MeridiemToggle, seconds: u32) -> Carry {
        let mut carry = Carry::Seconds;
        for _ in 0..seconds {
            carry = counter.on_second_elapsed(toggle);
        }
        carry
    }

    #[test]
    fn initial_state_is_twelve_o_clock() {
        let counter = TimeCounter::new();
        let toggle = MeridiemToggle::new();
        assert_eq!(counter.snapshot(toggle.meridiem()), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn seconds_count_in_decimal() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();
        advance(&mut counter, &mut toggle, 9);
        assert_eq!(counter.seconds().packed(), 0x09);
        assert_eq!(advance(&mut counter, &mut toggle, 1), Carry::Seconds);
        assert_eq!(counter.seconds().packed(), 0x10);
    }

    #[test]
    fn sixtieth_second_carries_into_minutes() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();
        advance(&mut counter, &mut toggle, 59);
        assert_eq!(counter.seconds().packed(), 0x59);
        assert_eq!(counter.minutes(), Bcd::ZERO);

        assert_eq!(counter.on_second_elapsed(&mut toggle), Carry::Minutes);
        assert_eq!(counter.seconds(), Bcd::ZERO);
        assert_eq!(counter.minutes(), Bcd::ONE);
        assert_eq!(counter.hours(), Bcd::TWELVE);
    }

    #[test]
    fn sixtieth_minute_carries_into_hours() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();
        // 12:00:00 -> 12:59:59
        advance(&mut counter, &mut toggle, 3599);
        assert_eq!(counter.minutes().packed(), 0x59);
        assert_eq!(counter.seconds().packed(), 0x59);

        assert_eq!(counter.on_second_elapsed(&mut toggle), Carry::HourRollover);
        assert_eq!(counter.hours(), Bcd::ONE);
        assert_eq!(counter.minutes(), Bcd::ZERO);
        assert_eq!(counter.seconds(), Bcd::ZERO);
    }

    #[test]
    fn hour_sequence_wraps_twelve_to_one() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();
        let mut hours = vec![counter.hours().packed()];
        for _ in 0..13 {
            advance(&mut counter, &mut toggle, 3600);
            hours.push(counter.hours().packed());
        }
        let want = [
            0x12, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x10, 0x11, 0x12,
        ];
        assert_eq!(hours[..13], want);
        assert_eq!(hours[13], 0x01);
    }

    #[test]
    fn meridiem_flips_on_twelve_to_one_only() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();

        // 12 -> 1
        assert_eq!(
            advance(&mut counter, &mut toggle, 3600),
            Carry::HourRollover
        );
        assert_eq!(toggle.meridiem(), Meridiem::Pm);

        // 1 -> 11 leaves it alone
        for _ in 0..10 {
            assert_eq!(advance(&mut counter, &mut toggle, 3600), Carry::Hours);
            assert_eq!(toggle.meridiem(), Meridiem::Pm);
        }

        // 11 -> 12 is a plain hour step
        assert_eq!(advance(&mut counter, &mut toggle, 3600), Carry::Hours);
        assert_eq!(counter.hours(), Bcd::TWELVE);
        assert_eq!(toggle.meridiem(), Meridiem::Pm);

        // 12 -> 1 again
        assert_eq!(
            advance(&mut counter, &mut toggle, 3600),
            Carry::HourRollover
        );
        assert_eq!(toggle.meridiem(), Meridiem::Am);
    }

    #[test]
    fn reset_restores_twelve_am() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();
        advance(&mut counter, &mut toggle, 3600 * 5 + 61);
        assert_eq!(toggle.meridiem(), Meridiem::Pm);

        counter.reset(&mut toggle);
        assert_eq!(counter.snapshot(toggle.meridiem()), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn every_reachable_state_stays_in_range() {
        let mut counter = TimeCounter::new();
        let mut toggle = MeridiemToggle::new();
        for _ in 0..(24 * 3600) {
            counter.on_second_elapsed(&mut toggle);
            let time = counter.snapshot(toggle.meridiem());
            assert!((1..=12).contains(&time.hours.value()), "{time}");
            assert!(time.minutes.value() <= 59, "{time}");
            assert!(time.seconds.value() <= 59, "{time}");
            for field in [time.hours, time.minutes, time.seconds] {
                assert!(field.tens() <= 9 && field.units() <= 9, "{time}");
            }
        }
        // a full day returns to the start
        assert_eq!(counter.snapshot(toggle.meridiem()), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn display_formats_clock_face() {
        assert_eq!(TimeOfDay::MIDNIGHT.to_string(), "12:00:00 AM");
    }
}
