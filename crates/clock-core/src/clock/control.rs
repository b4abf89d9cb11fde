use bitflags::bitflags;

use super::config::ConfigError;

bitflags! {
    /* Control word as driven by the harness
        7  bit  0
        ---- ----
        TRE- ----
        |||
        ||+------- Enable (mirrors the separate enable line)
        |+-------- Reset (the harness drives this one active-low)
        +--------- Tick source
        Bits 4..0 are reserved and ignored.
     */
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ControlWord: u8 {
        const TICK =   0b1000_0000;
        const RESET =  0b0100_0000;
        const ENABLE = 0b0010_0000;
    }
}

impl ControlWord {
    fn single_bit(bit: u8) -> Result<ControlWord, ConfigError> {
        if bit > 7 {
            return Err(ConfigError::BitOutOfRange(bit));
        }
        Ok(ControlWord::from_bits_retain(1 << bit))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetPolarity {
    /// Reset asserted while the bit is 1
    ActiveHigh,
    /// Reset asserted while the bit is 0 (`rst_n` style)
    ActiveLow,
}

/// The three logical control signals of one evaluation step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub tick: bool,
    pub reset: bool,
    pub enable: bool,
}

impl ControlInput {
    /// Counting: tick present, enabled, reset released.
    pub const RUN: ControlInput = ControlInput::new(true, false, true);
    pub const RESET: ControlInput = ControlInput::new(false, true, true);

    pub const fn new(tick: bool, reset: bool, enable: bool) -> ControlInput {
        ControlInput {
            tick,
            reset,
            enable,
        }
    }
}

/// Where each control signal lives inside the packed control word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlMap {
    tick: ControlWord,
    reset: ControlWord,
    reset_polarity: ResetPolarity,
    enable: Option<ControlWord>,
}

impl ControlMap {
    /// Layout the harness drives: `0b1110_0000` counts, reset is active-low.
    pub const HARNESS: ControlMap = ControlMap {
        tick: ControlWord::TICK,
        reset: ControlWord::RESET,
        reset_polarity: ResetPolarity::ActiveLow,
        enable: Some(ControlWord::ENABLE),
    };

    /// Same bit positions with an active-high reset.
    pub const ACTIVE_HIGH: ControlMap = ControlMap {
        tick: ControlWord::TICK,
        reset: ControlWord::RESET,
        reset_polarity: ResetPolarity::ActiveHigh,
        enable: Some(ControlWord::ENABLE),
    };

    /// Builds a custom layout. `enable_bit` of `None` leaves gating to the
    /// separate enable line only.
    pub fn new(
        tick_bit: u8,
        reset_bit: u8,
        reset_polarity: ResetPolarity,
        enable_bit: Option<u8>,
    ) -> Result<ControlMap, ConfigError> {
        let tick = ControlWord::single_bit(tick_bit)?;
        let reset = ControlWord::single_bit(reset_bit)?;
        if tick.intersects(reset) {
            return Err(ConfigError::OverlappingBits(reset_bit));
        }
        let enable = match enable_bit {
            Some(bit) => {
                let enable = ControlWord::single_bit(bit)?;
                if enable.intersects(tick | reset) {
                    return Err(ConfigError::OverlappingBits(bit));
                }
                Some(enable)
            }
            None => None,
        };
        Ok(ControlMap {
            tick,
            reset,
            reset_polarity,
            enable,
        })
    }

    /// Splits a packed word into its control signals. Bits outside the map
    /// are ignored.
    pub fn decode(&self, word: u8, enable_line: bool) -> ControlInput {
        let word = ControlWord::from_bits_retain(word);
        let reset_bit = word.contains(self.reset);
        let reset = match self.reset_polarity {
            ResetPolarity::ActiveHigh => reset_bit,
            ResetPolarity::ActiveLow => !reset_bit,
        };
        let enable = enable_line && self.enable.is_none_or(|bit| word.contains(bit));
        ControlInput {
            tick: word.contains(self.tick),
            reset,
            enable,
        }
    }

    /// Packs `input` into a word that decodes back to it when the enable line
    /// is held high.
    pub fn encode(&self, input: ControlInput) -> u8 {
        let mut word = ControlWord::empty();
        word.set(self.tick, input.tick);
        let reset_bit = match self.reset_polarity {
            ResetPolarity::ActiveHigh => input.reset,
            ResetPolarity::ActiveLow => !input.reset,
        };
        word.set(self.reset, reset_bit);
        if let Some(enable) = self.enable {
            word.set(enable, input.enable);
        }
        word.bits()
    }

}

impl Default for ControlMap {
    fn default() -> Self {
        ControlMap::HARNESS
    }
}
