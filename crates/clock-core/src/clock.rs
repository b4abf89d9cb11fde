pub mod bcd;
pub mod config;
pub mod control;
pub mod divider;
pub mod meridiem;
pub mod output;
pub mod time_counter;
pub mod tracer;

#[cfg(any(test, feature = "testing-utils"))]
pub mod test_utils;


use crate::{trace, trace_clock_event};
use config::ClockConfig;
use control::ControlInput;
use divider::Divider;
use meridiem::MeridiemToggle;
use output::OutputWords;
use time_counter::{Carry, TimeCounter, TimeOfDay};
use tracer::Traceable;

/// Synchronous 12-hour BCD clock.
///
/// Every call to [`Clock::step`] is one evaluation step: the control word is
/// decoded, reset (level-sensitive) wins over enable, and an enabled tick
/// feeds the divider. The output words are recomputed from state at the end
/// of every step, event or not.
pub struct Clock {
    config: ClockConfig,
    divider: Divider,
    counter: TimeCounter,
    meridiem: MeridiemToggle,
    output: OutputWords,
    cycles: u64,
}

impl Clock {
    /// Creates a clock already holding the reset state, 12:00:00 AM.
    pub fn new(config: ClockConfig) -> Self {
        let counter = TimeCounter::new();
        let meridiem = MeridiemToggle::new();
        let output = OutputWords::pack(counter.hours(), counter.minutes(), meridiem.meridiem());
        Self {
            divider: Divider::new(config.ticks_per_second()),
            config,
            counter,
            meridiem,
            output,
            cycles: 0,
        }
    }

    /// Evaluates one step from a packed control word and the separate enable
    /// line. Unknown bits must already be resolved to 0 by the caller.
    pub fn step(&mut self, control_word: u8, enable: bool) -> OutputWords {
        let input = self.config.control_map().decode(control_word, enable);
        self.step_input(input)
    }

    /// Evaluates one step from already decoded control signals.
    pub fn step_input(&mut self, input: ControlInput) -> OutputWords {
        if input.reset {
            self.apply_reset();
        } else if input.enable && self.divider.advance(input.tick) {
            let carry = self.counter.on_second_elapsed(&mut self.meridiem);
            self.on_carry(carry);
        }

        self.cycles += 1;
        self.output = OutputWords::pack(
            self.counter.hours(),
            self.counter.minutes(),
            self.meridiem.meridiem(),
        );
        self.output
    }

    /// Asserts reset for exactly one step.
    pub fn reset(&mut self) -> OutputWords {
        self.step_input(ControlInput::RESET)
    }

    /// Holds the same inputs for `steps` steps and returns the last output.
    pub fn run(&mut self, control_word: u8, enable: bool, steps: u64) -> OutputWords {
        let input = self.config.control_map().decode(control_word, enable);
        for _ in 0..steps {
            self.step_input(input);
        }
        self.output
    }

    fn apply_reset(&mut self) {
        if self.time() != TimeOfDay::MIDNIGHT || self.divider.tick_count() != 0 {
            log::debug!("reset at cycle {} from {}", self.cycles, self.time());
            trace_clock_event!("reset at cycle {}", self.cycles);
        }
        self.divider.reset();
        self.counter.reset(&mut self.meridiem);
    }

    fn on_carry(&mut self, carry: Carry) {
        match carry {
            Carry::Seconds => {}
            Carry::Minutes | Carry::Hours => {
                trace!("CLK {} cycle {}", self.time(), self.cycles);
            }
            Carry::HourRollover => {
                log::debug!(
                    "hour rollover at cycle {}, meridiem now {}",
                    self.cycles,
                    self.meridiem.meridiem()
                );
                trace_clock_event!(
                    "meridiem -> {} at cycle {}",
                    self.meridiem.meridiem(),
                    self.cycles
                );
            }
        }
    }

    /// Output words as of the last step.
    pub fn output(&self) -> OutputWords {
        self.output
    }

    pub fn time(&self) -> TimeOfDay {
        self.counter.snapshot(self.meridiem.meridiem())
    }

    /// Steps evaluated since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Divider progress toward the next second (diagnostics only).
    pub fn tick_count(&self) -> u32 {
        self.divider.tick_count()
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

impl Traceable for Clock {
    fn trace_name(&self) -> &'static str {
        "CLK"
    }

    fn trace_state(&self) -> Option<String> {
        Some(format!(
            "{} tc={} cyc={} out=[{}]",
            self.time(),
            self.tick_count(),
            self.cycles,
            self.output
        ))
    }
}
