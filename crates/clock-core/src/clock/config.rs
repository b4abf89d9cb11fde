use std::num::NonZeroU32;

use thiserror::Error;

use super::control::ControlMap;

/// 10 ticks per second: 600 ticks make a minute.
pub const TEN_TICKS_PER_SECOND: u32 = 10;
/// 100 ticks per second: 6000 ticks make a minute.
pub const HUNDRED_TICKS_PER_SECOND: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick-to-second ratio must be at least 1")]
    ZeroRatio,

    #[error("control bit {0} is outside the 8-bit control word")]
    BitOutOfRange(u8),

    #[error("control bit {0} is mapped to more than one signal")]
    OverlappingBits(u8),
}

/// Construction-time parameters of a [`Clock`](super::Clock).
///
/// The tick-to-second ratio differs between the harness variants that drive
/// the circuit, so there is no default ratio; callers always name one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    ticks_per_second: NonZeroU32,
    control_map: ControlMap,
}

impl ClockConfig {
    pub fn new(ticks_per_second: u32) -> Result<ClockConfig, ConfigError> {
        let ticks_per_second = NonZeroU32::new(ticks_per_second).ok_or(ConfigError::ZeroRatio)?;
        Ok(ClockConfig {
            ticks_per_second,
            control_map: ControlMap::HARNESS,
        })
    }

    pub fn with_control_map(mut self, control_map: ControlMap) -> ClockConfig {
        self.control_map = control_map;
        self
    }

    pub fn ticks_per_second(&self) -> NonZeroU32 {
        self.ticks_per_second
    }

    pub fn control_map(&self) -> &ControlMap {
        &self.control_map
    }
}
