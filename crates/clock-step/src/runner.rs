use std::fmt;

use clock_core::Clock;
use clock_core::OutputWords;
use clock_core::clock::time_counter::TimeOfDay;

use crate::error::ScenarioError;
use crate::scenario::{Expect, Phase, Scenario};

/// A single output assertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Check {
    HourBcd(u8),
    MinuteBcd(u8),
    MinuteBcdAtLeast(u8),
    Pm(bool),
}

impl Check {
    pub fn holds(&self, output: &OutputWords) -> bool {
        match *self {
            Check::HourBcd(want) => output.hours_bcd() == want,
            Check::MinuteBcd(want) => output.minutes_bcd() == want,
            Check::MinuteBcdAtLeast(min) => output.minutes_bcd() >= min,
            Check::Pm(want) => output.pm() == want,
        }
    }

    fn from_expect(expect: &Expect) -> Vec<Check> {
        let mut checks = Vec::new();
        if let Some(hour) = expect.hour_bcd {
            checks.push(Check::HourBcd(hour));
        }
        if let Some(minute) = expect.minute_bcd {
            checks.push(Check::MinuteBcd(minute));
        }
        if let Some(minute) = expect.minute_bcd_at_least {
            checks.push(Check::MinuteBcdAtLeast(minute));
        }
        if let Some(pm) = expect.pm {
            checks.push(Check::Pm(pm));
        }
        checks
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::HourBcd(want) => write!(f, "HH == {want:02X}"),
            Check::MinuteBcd(want) => write!(f, "MM == {want:02X}"),
            Check::MinuteBcdAtLeast(min) => write!(f, "MM >= {min:02X}"),
            Check::Pm(want) => write!(f, "PM == {}", u8::from(*want)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: Check,
    pub passed: bool,
}

#[derive(Clone, Debug)]
pub struct PhaseReport {
    pub label: String,
    /// Clock cycle count once the phase finished
    pub cycle: u64,
    pub output: OutputWords,
    pub time: TimeOfDay,
    pub unknown_bits: u8,
    pub checks: Vec<CheckOutcome>,
}

impl PhaseReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

#[derive(Clone, Debug)]
pub struct Report {
    pub name: String,
    pub ticks_per_second: u32,
    pub phases: Vec<PhaseReport>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.phases.iter().all(PhaseReport::passed)
    }

    pub fn check_count(&self) -> usize {
        self.phases.iter().map(|p| p.checks.len()).sum()
    }

    /// Failed checks with the phase they belong to.
    pub fn failures(&self) -> impl Iterator<Item = (&PhaseReport, &CheckOutcome)> {
        self.phases
            .iter()
            .flat_map(|phase| phase.checks.iter().map(move |check| (phase, check)))
            .filter(|(_, check)| !check.passed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} ticks/s)", self.name, self.ticks_per_second)?;
        for phase in &self.phases {
            let status = if phase.passed() { "ok" } else { "FAIL" };
            writeln!(
                f,
                "  [{status:>4}] {:<20} cycle {:>9}  {}  ({})",
                phase.label, phase.cycle, phase.output, phase.time
            )?;
            for outcome in phase.checks.iter().filter(|c| !c.passed) {
                writeln!(f, "         expected {}", outcome.check)?;
            }
        }
        let failed = self.failures().count();
        write!(
            f,
            "{} of {} checks passed",
            self.check_count() - failed,
            self.check_count()
        )
    }
}

/// Drives a fresh clock through every phase of `scenario`.
///
/// Failed checks are recorded in the report rather than returned as errors;
/// only an unusable scenario is an error.
pub fn run(scenario: &Scenario) -> Result<Report, ScenarioError> {
    if scenario.phases.is_empty() {
        return Err(ScenarioError::Empty(scenario.name.clone()));
    }
    let config = scenario.config()?;
    let mut clock = Clock::new(config);
    log::info!(
        "running '{}' at {} ticks/s, {} phases",
        scenario.name,
        scenario.ticks_per_second,
        scenario.phases.len()
    );

    let phases = scenario
        .phases
        .iter()
        .enumerate()
        .map(|(i, phase)| run_phase(&mut clock, i, phase))
        .collect();

    Ok(Report {
        name: scenario.name.clone(),
        ticks_per_second: scenario.ticks_per_second,
        phases,
    })
}

fn run_phase(clock: &mut Clock, index: usize, phase: &Phase) -> PhaseReport {
    let label = if phase.label.is_empty() {
        format!("phase {}", index + 1)
    } else {
        phase.label.clone()
    };

    // reset phases never drive the word
    let unknown_bits = if phase.reset {
        0
    } else {
        phase.control.unknown_bits()
    };
    if unknown_bits != 0 {
        log::warn!(
            "{label}: control {} has unknown bits {unknown_bits:08b}, reading them as 0",
            phase.control
        );
    }

    let output = if phase.reset {
        for _ in 0..phase.cycles {
            clock.reset();
        }
        clock.output()
    } else {
        clock.run(phase.control.resolve(), phase.enable, phase.cycles)
    };
    log::info!("{label}: Time: {output}");

    let checks = Check::from_expect(&phase.expect)
        .into_iter()
        .map(|check| {
            let passed = check.holds(&output);
            if !passed {
                log::warn!("{label}: expected {check}, got {output}");
            }
            CheckOutcome { check, passed }
        })
        .collect();

    PhaseReport {
        label,
        cycle: clock.cycles(),
        output,
        time: clock.time(),
        unknown_bits,
        checks,
    }
}
