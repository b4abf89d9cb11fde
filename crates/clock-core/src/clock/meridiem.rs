use std::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl Meridiem {
    pub fn is_pm(self) -> bool {
        self == Meridiem::Pm
    }

    pub fn flipped(self) -> Meridiem {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// AM/PM flip-flop.
///
/// Only an hour rollover or a reset touches the stored value.
pub struct MeridiemToggle {
    meridiem: Meridiem,
}

impl MeridiemToggle {
    pub fn new() -> MeridiemToggle {
        MeridiemToggle {
            meridiem: Meridiem::Am,
        }
    }

    /// Called by the time counter on the 12 -> 1 hour transition
    pub fn on_hour_rollover(&mut self) {
        self.meridiem = self.meridiem.flipped();
    }

    pub fn reset(&mut self) {
        self.meridiem = Meridiem::Am;
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }
}

impl Default for MeridiemToggle {
    fn default() -> Self {
        Self::new()
    }
}
