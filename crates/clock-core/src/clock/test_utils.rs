//! Helpers for driving a [`Clock`] in tests.

use super::Clock;
use super::config::ClockConfig;
use super::control::ControlInput;
use super::output::OutputWords;
use super::time_counter::TimeOfDay;

/// A clock at the given ratio, just after one reset step.
pub fn clock_after_reset(ticks_per_second: u32) -> Clock {
    let config = ClockConfig::new(ticks_per_second).expect("non-zero ratio");
    let mut clock = Clock::new(config);
    clock.reset();
    clock
}

/// The packed word that keeps `clock` counting under its own control map.
pub fn running_word(clock: &Clock) -> u8 {
    clock.config().control_map().encode(ControlInput::RUN)
}

/// Counts `steps` enabled ticks.
pub fn run_ticks(clock: &mut Clock, steps: u64) -> OutputWords {
    let word = running_word(clock);
    clock.run(word, true, steps)
}

/// Counts whole seconds' worth of ticks.
pub fn run_seconds(clock: &mut Clock, seconds: u64) -> OutputWords {
    let ratio = u64::from(clock.config().ticks_per_second().get());
    run_ticks(clock, ratio * seconds)
}

pub fn assert_in_range(time: &TimeOfDay) {
    assert!(
        (1..=12).contains(&time.hours.value()),
        "hours out of range: {time}"
    );
    assert!(time.minutes.value() <= 59, "minutes out of range: {time}");
    assert!(time.seconds.value() <= 59, "seconds out of range: {time}");
    for field in [time.hours, time.minutes, time.seconds] {
        assert!(field.tens() <= 9, "tens nibble out of range: {time}");
        assert!(field.units() <= 9, "units nibble out of range: {time}");
    }
}
