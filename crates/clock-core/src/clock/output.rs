use std::fmt;

use super::bcd::Bcd;
use super::meridiem::Meridiem;

const MERIDIEM_BIT: u8 = 0b1000_0000;
const HOUR_MASK: u8 = 0b0111_1111;

/// The two packed output words.
///
/// `hour_word`: bit 7 = PM, bits 6..0 = BCD hour (0x01..=0x12).
/// `minute_word`: BCD minute (0x00..=0x59).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutputWords {
    pub hour_word: u8,
    pub minute_word: u8,
}

impl OutputWords {
    pub fn pack(hours: Bcd, minutes: Bcd, meridiem: Meridiem) -> OutputWords {
        let pm = if meridiem.is_pm() { MERIDIEM_BIT } else { 0 };
        OutputWords {
            hour_word: pm | (hours.packed() & HOUR_MASK),
            minute_word: minutes.packed(),
        }
    }

    pub fn pm(&self) -> bool {
        self.hour_word & MERIDIEM_BIT != 0
    }

    pub fn hours_bcd(&self) -> u8 {
        self.hour_word & HOUR_MASK
    }

    pub fn minutes_bcd(&self) -> u8 {
        self.minute_word
    }
}

impl From<OutputWords> for (u8, u8) {
    fn from(words: OutputWords) -> (u8, u8) {
        (words.hour_word, words.minute_word)
    }
}

impl fmt::Display for OutputWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HH={:02X} MM={:02X} PM={}",
            self.hours_bcd(),
            self.minutes_bcd(),
            u8::from(self.pm())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bcd(value: u8) -> Bcd {
        Bcd::from_value(value).unwrap()
    }

    #[test]
    fn packs_reset_state() {
        let out = OutputWords::pack(Bcd::TWELVE, Bcd::ZERO, Meridiem::Am);
        assert_eq!(out.hour_word, 0x12);
        assert_eq!(out.minute_word, 0x00);
        assert!(!out.pm());
    }

    #[test]
    fn pm_sets_top_bit_only() {
        let out = OutputWords::pack(bcd(11), bcd(59), Meridiem::Pm);
        assert_eq!(out.hour_word, 0x91);
        assert_eq!(out.hours_bcd(), 0x11);
        assert_eq!(out.minutes_bcd(), 0x59);
        assert!(out.pm());
    }

    #[test]
    fn every_hour_fits_in_seven_bits() {
        for hour in 1..=12 {
            let out = OutputWords::pack(bcd(hour), Bcd::ZERO, Meridiem::Pm);
            assert_eq!(out.hours_bcd(), bcd(hour).packed());
        }
    }

    #[test]
    fn converts_to_word_pair() {
        let out = OutputWords::pack(bcd(3), bcd(7), Meridiem::Pm);
        assert_eq!(<(u8, u8)>::from(out), (0x83, 0x07));
    }

    #[test]
    fn display_matches_harness_log_format() {
        let out = OutputWords::pack(Bcd::TWELVE, Bcd::ONE, Meridiem::Am);
        assert_eq!(out.to_string(), "HH=12 MM=01 PM=0");
    }
}
