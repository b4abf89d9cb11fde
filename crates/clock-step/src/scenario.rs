use std::fs;
use std::path::Path;

use clock_core::ClockConfig;
use clock_core::clock::control::ControlMap;
use serde::Deserialize;

use crate::error::ScenarioError;
use crate::logic::LogicWord;

/// Control-word layouts a scenario can select by name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPreset {
    #[default]
    Harness,
    ActiveHigh,
}

impl ControlPreset {
    pub fn control_map(self) -> ControlMap {
        match self {
            ControlPreset::Harness => ControlMap::HARNESS,
            ControlPreset::ActiveHigh => ControlMap::ACTIVE_HIGH,
        }
    }
}

/// A stimulus sequence plus the outputs expected after each phase.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub ticks_per_second: u32,
    #[serde(default)]
    pub control: ControlPreset,
    pub phases: Vec<Phase>,
}

/// One held input, `cycles` steps long.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Phase {
    #[serde(default)]
    pub label: String,
    /// Packed control word; may contain x/z bits. Not driven on reset phases.
    #[serde(default)]
    pub control: LogicWord,
    /// The separate enable line.
    #[serde(default = "enabled")]
    pub enable: bool,
    /// Drive the explicit reset entry point instead of stepping the word.
    #[serde(default)]
    pub reset: bool,
    pub cycles: u64,
    #[serde(default)]
    pub expect: Expect,
}

fn enabled() -> bool {
    true
}

/// Output checks evaluated once a phase has run.
///
/// BCD fields are written as hex strings holding the packed byte (`"12"`,
/// `"0x59"`) or as decimal numbers (`12`, `59`). Values the clock cannot
/// output are rejected at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expect {
    #[serde(default, deserialize_with = "bcd_field::hour")]
    pub hour_bcd: Option<u8>,
    #[serde(default, deserialize_with = "bcd_field::minute")]
    pub minute_bcd: Option<u8>,
    #[serde(default, deserialize_with = "bcd_field::minute")]
    pub minute_bcd_at_least: Option<u8>,
    pub pm: Option<bool>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Scenario, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Scenario::from_json(&text)
    }

    pub fn config(&self) -> Result<ClockConfig, ScenarioError> {
        let config = ClockConfig::new(self.ticks_per_second)?;
        Ok(config.with_control_map(self.control.control_map()))
    }

    /// The bring-up sequence: hold reset for 5 cycles, run for 6000 cycles
    /// and expect 12:01 or later in the AM, then run 432 000 more cycles and
    /// expect PM.
    pub fn smoke(ticks_per_second: u32) -> Scenario {
        Scenario {
            name: format!("smoke @ {ticks_per_second} ticks/s"),
            ticks_per_second,
            control: ControlPreset::Harness,
            phases: vec![
                Phase {
                    label: "reset".into(),
                    control: LogicWord::default(),
                    enable: true,
                    reset: true,
                    cycles: 5,
                    expect: Expect {
                        hour_bcd: Some(0x12),
                        minute_bcd: Some(0x00),
                        pm: Some(false),
                        ..Expect::default()
                    },
                },
                Phase {
                    label: "first minute".into(),
                    control: LogicWord::known(0b1110_0000),
                    enable: true,
                    reset: false,
                    cycles: 6000,
                    expect: Expect {
                        hour_bcd: Some(0x12),
                        minute_bcd_at_least: Some(0x01),
                        pm: Some(false),
                        ..Expect::default()
                    },
                },
                Phase {
                    label: "after 12 hours".into(),
                    control: LogicWord::known(0b1110_0000),
                    enable: true,
                    reset: false,
                    cycles: 3600 * 12 * 10,
                    expect: Expect {
                        pm: Some(true),
                        ..Expect::default()
                    },
                },
            ],
        }
    }
}

mod bcd_field {
    use std::ops::RangeInclusive;

    use clock_core::clock::bcd::Bcd;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    const HOURS: RangeInclusive<u8> = 0x01..=0x12;
    const MINUTES: RangeInclusive<u8> = 0x00..=0x59;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Decimal(u8),
        Packed(String),
    }

    pub fn hour<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        field(deserializer, "hour", HOURS)
    }

    pub fn minute<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        field(deserializer, "minute", MINUTES)
    }

    fn field<'de, D>(
        deserializer: D,
        name: &str,
        range: RangeInclusive<u8>,
    ) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bcd = match Option::<Field>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Field::Decimal(value)) => Bcd::from_value(value),
            Some(Field::Packed(text)) => {
                let digits = text.strip_prefix("0x").or(text.strip_prefix("0X"));
                let packed = u8::from_str_radix(digits.unwrap_or(&text), 16)
                    .map_err(|_| D::Error::custom(format!("invalid hex byte '{text}'")))?;
                Bcd::from_packed(packed)
            }
        };
        let Some(bcd) = bcd else {
            return Err(D::Error::custom(format!("{name} is not a two-digit BCD value")));
        };
        if !range.contains(&bcd.packed()) {
            return Err(D::Error::custom(format!(
                "{name} {bcd} is outside {:02X}..={:02X}",
                range.start(),
                range.end()
            )));
        }
        Ok(Some(bcd.packed()))
    }
}
