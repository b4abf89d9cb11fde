use std::fmt;

const UNITS_MASK: u8 = 0b0000_1111;
const TENS_SHIFT: u8 = 4;

/// Value a minute or second field reaches just before wrapping to zero.
pub(crate) const SIXTY_WRAP: Bcd = Bcd(0x60);
/// Value the hour field reaches just before wrapping to one.
pub(crate) const HOURS_WRAP: Bcd = Bcd(0x13);

/// Two packed decimal digits: tens in the high nibble, units in the low nibble.
///
/// Both nibbles are always in `0..=9`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bcd(u8);

impl Bcd {
    pub const ZERO: Bcd = Bcd(0x00);
    pub const ONE: Bcd = Bcd(0x01);
    pub const TWELVE: Bcd = Bcd(0x12);

    /// Encodes a binary value in `0..=99`.
    pub fn from_value(value: u8) -> Option<Bcd> {
        if value > 99 {
            return None;
        }
        Some(Bcd(((value / 10) << TENS_SHIFT) | (value % 10)))
    }

    /// Accepts an already packed byte, rejecting nibbles above 9.
    pub fn from_packed(packed: u8) -> Option<Bcd> {
        let bcd = Bcd(packed);
        if bcd.tens() > 9 || bcd.units() > 9 {
            return None;
        }
        Some(bcd)
    }

    pub const fn tens(self) -> u8 {
        self.0 >> TENS_SHIFT
    }

    pub const fn units(self) -> u8 {
        self.0 & UNITS_MASK
    }

    pub const fn packed(self) -> u8 {
        self.0
    }

    pub const fn value(self) -> u8 {
        self.tens() * 10 + self.units()
    }

    /// Adds one at the digit level: the units digit wraps at ten and carries
    /// into the tens digit. Callers wrap the field before the tens digit can
    /// pass 9.
    pub(crate) fn increment(&mut self) {
        let mut units = self.units() + 1;
        let mut tens = self.tens();
        if units == 10 {
            units = 0;
            tens += 1;
        }
        debug_assert!(tens <= 9, "BCD tens digit overflow");
        self.0 = (tens << TENS_SHIFT) | units;
    }
}

impl fmt::Display for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hex formatting of a BCD byte prints its two decimal digits.
        write!(f, "{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_places_tens_in_high_nibble() {
        assert_eq!(Bcd::from_value(0).unwrap().packed(), 0x00);
        assert_eq!(Bcd::from_value(9).unwrap().packed(), 0x09);
        assert_eq!(Bcd::from_value(12).unwrap().packed(), 0x12);
        assert_eq!(Bcd::from_value(59).unwrap().packed(), 0x59);
        assert_eq!(Bcd::from_value(99).unwrap().packed(), 0x99);
    }

    #[test]
    fn from_value_rejects_three_digit_values() {
        assert_eq!(Bcd::from_value(100), None);
        assert_eq!(Bcd::from_value(255), None);
    }

    #[test]
    fn from_packed_rejects_non_decimal_nibbles() {
        assert_eq!(Bcd::from_packed(0x0A), None);
        assert_eq!(Bcd::from_packed(0xA0), None);
        assert_eq!(Bcd::from_packed(0x5F), None);
        assert_eq!(Bcd::from_packed(0x59), Some(Bcd(0x59)));
    }

    #[test]
    fn increment_carries_units_into_tens() {
        let mut bcd = Bcd::from_value(9).unwrap();
        bcd.increment();
        assert_eq!(bcd.packed(), 0x10);
        assert_eq!(bcd.tens(), 1);
        assert_eq!(bcd.units(), 0);

        let mut bcd = Bcd::from_value(59).unwrap();
        bcd.increment();
        assert_eq!(bcd.packed(), 0x60);
    }

    #[test]
    fn increment_never_produces_hex_digits() {
        let mut bcd = Bcd::ZERO;
        for expected in 1..=99u8 {
            bcd.increment();
            assert!(bcd.units() <= 9 && bcd.tens() <= 9);
            assert_eq!(bcd.value(), expected);
        }
    }

    #[test]
    fn display_prints_two_decimal_digits() {
        assert_eq!(Bcd::TWELVE.to_string(), "12");
        assert_eq!(Bcd::ONE.to_string(), "01");
    }
}
