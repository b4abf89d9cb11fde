use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

const WIDTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogicWordError {
    #[error("expected 8 logic digits, found {0}")]
    Width(usize),

    #[error("invalid logic digit '{0}' (expected 0, 1, x or z)")]
    InvalidDigit(char),
}

/// An 8-bit simulator value where each bit may be 0, 1, x or z.
///
/// The clock only accepts clean bits, so [`LogicWord::resolve`] is the
/// boundary where x and z become 0. The default word is all zeros.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WordSpec")]
pub struct LogicWord {
    ones: u8,
    unknown: u8,
}

/// Either a plain number or a digit string such as `"1110_0000"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WordSpec {
    Number(u8),
    Literal(String),
}

impl TryFrom<WordSpec> for LogicWord {
    type Error = LogicWordError;

    fn try_from(spec: WordSpec) -> Result<Self, Self::Error> {
        match spec {
            WordSpec::Number(value) => Ok(LogicWord::known(value)),
            WordSpec::Literal(text) => text.parse(),
        }
    }
}

impl LogicWord {
    pub const fn known(value: u8) -> LogicWord {
        LogicWord {
            ones: value,
            unknown: 0,
        }
    }

    /// The word as the clock sees it: unknown bits read as 0.
    pub fn resolve(self) -> u8 {
        self.ones & !self.unknown
    }

    /// Bits that were x or z.
    pub fn unknown_bits(self) -> u8 {
        self.unknown
    }
}

impl FromStr for LogicWord {
    type Err = LogicWordError;

    /// MSB first, `_` separators allowed, optional `0b` prefix.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let digits = text.strip_prefix("0b").unwrap_or(text);
        let mut ones = 0u8;
        let mut unknown = 0u8;
        let mut width = 0usize;
        for c in digits.chars().filter(|c| *c != '_') {
            width += 1;
            if width > WIDTH {
                continue;
            }
            ones <<= 1;
            unknown <<= 1;
            match c {
                '0' => {}
                '1' => ones |= 1,
                'x' | 'X' | 'z' | 'Z' => unknown |= 1,
                other => return Err(LogicWordError::InvalidDigit(other)),
            }
        }
        if width != WIDTH {
            return Err(LogicWordError::Width(width));
        }
        Ok(LogicWord { ones, unknown })
    }
}

impl fmt::Display for LogicWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in (0..WIDTH).rev() {
            let mask = 1u8 << bit;
            let c = if self.unknown & mask != 0 {
                'x'
            } else if self.ones & mask != 0 {
                '1'
            } else {
                '0'
            };
            write!(f, "{c}")?;
            if bit == 4 {
                write!(f, "_")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_word() {
        let word: LogicWord = "1110_0000".parse().unwrap();
        assert_eq!(word.unknown_bits(), 0);
        assert_eq!(word.resolve(), 0b1110_0000);
    }

    #[test]
    fn accepts_binary_prefix() {
        let word: LogicWord = "0b11100000".parse().unwrap();
        assert_eq!(word.resolve(), 0xE0);
    }

    #[test]
    fn unknown_bits_resolve_to_zero() {
        let word: LogicWord = "1x1z_000X".parse().unwrap();
        assert_eq!(word.unknown_bits(), 0b0101_0001);
        assert_eq!(word.resolve(), 0b1010_0000);
    }

    #[test]
    fn rejects_wrong_width() {
        assert_eq!("1110".parse::<LogicWord>(), Err(LogicWordError::Width(4)));
        assert_eq!(
            "1110_0000_1".parse::<LogicWord>(),
            Err(LogicWordError::Width(9))
        );
    }

    #[test]
    fn rejects_bad_digit() {
        assert_eq!(
            "1110_0002".parse::<LogicWord>(),
            Err(LogicWordError::InvalidDigit('2'))
        );
    }

    #[test]
    fn display_groups_nibbles() {
        let word: LogicWord = "1x10_0000".parse().unwrap();
        assert_eq!(word.to_string(), "1x10_0000");
        assert_eq!(LogicWord::known(0x0F).to_string(), "0000_1111");
    }

    #[test]
    fn deserializes_numbers_and_literals() {
        let words: Vec<LogicWord> =
            serde_json::from_str(r#"[224, "1110_0000", "xxxx_xxxx"]"#).unwrap();
        assert_eq!(words[0], words[1]);
        assert_eq!(words[2].resolve(), 0);
        assert_eq!(words[2].unknown_bits(), 0xFF);
    }

    #[test]
    fn deserialize_reports_bad_literal() {
        let err = serde_json::from_str::<LogicWord>(r#""12""#).unwrap_err();
        assert!(err.to_string().contains("invalid logic digit"), "{err}");
    }
}
