//! Numeric extraction from `Decimal` and `Hex` tokens.
//!
//! The lossy conversions behave like C's `strtol` family: the longest prefix of
//! valid digits is used, text without digits yields zero, and values that do
//! not fit saturate at the bounds of the target type. Nothing here touches a
//! tokenizer cursor.

use thiserror::Error;

use crate::token::Token;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("radix {radix} is outside 2..=36")]
    InvalidRadix { radix: u32 },
    #[error("`{text}` contains no base-{radix} digits")]
    NoDigits { text: String, radix: u32 },
    #[error("invalid base-{radix} digit `{ch}` in `{text}`")]
    InvalidDigit { text: String, ch: char, radix: u32 },
    #[error("`{text}` is out of range for the requested integer type")]
    OutOfRange { text: String },
}

/// Sign and digit run of a numeric token, with any `0x` prefix removed.
struct Digits<'a> {
    negative: bool,
    digits: &'a str,
}

impl<'a> Digits<'a> {
    fn split(text: &'a str, radix: u32) -> Self {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let digits = if radix == 16 {
            rest.strip_prefix("0x")
                .or_else(|| rest.strip_prefix("0X"))
                .unwrap_or(rest)
        } else {
            rest
        };
        Self { negative, digits }
    }

    fn magnitude(&self, radix: u32) -> u64 {
        self.digits
            .chars()
            .map_while(|ch| ch.to_digit(radix))
            .fold(0u64, |acc, digit| {
                acc.saturating_mul(u64::from(radix))
                    .saturating_add(u64::from(digit))
            })
    }

    fn signed(&self, radix: u32) -> i128 {
        let magnitude = i128::from(self.magnitude(radix));
        if self.negative { -magnitude } else { magnitude }
    }
}

fn saturate<T: TryFrom<i128>>(value: i128, min: T, max: T) -> T {
    T::try_from(value).unwrap_or(if value < 0 { min } else { max })
}

/// Longest `-?digits[.digits]` prefix of `text`, empty if it holds no digit.
fn float_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let sign = usize::from(bytes.first() == Some(&b'-'));
    let whole = count_digits(sign);
    let mut end = sign + whole;

    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(end + 1);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    } else if whole == 0 {
        return "";
    }

    if whole == 0 && end == sign { "" } else { &text[..end] }
}

impl Token<'_> {
    fn signed_in(&self, radix: u32) -> i128 {
        Digits::split(self.text(), radix).signed(radix)
    }

    fn magnitude_in(&self, radix: u32) -> i128 {
        i128::from(Digits::split(self.text(), radix).magnitude(radix))
    }

    // Decimal

    pub fn to_i32(&self) -> i32 {
        saturate(self.signed_in(10), i32::MIN, i32::MAX)
    }

    /// Magnitude of the token; a leading `-` is ignored.
    pub fn to_u32(&self) -> u32 {
        saturate(self.magnitude_in(10), u32::MIN, u32::MAX)
    }

    pub fn to_i64(&self) -> i64 {
        saturate(self.signed_in(10), i64::MIN, i64::MAX)
    }

    /// Magnitude of the token; a leading `-` is ignored.
    pub fn to_u64(&self) -> u64 {
        saturate(self.magnitude_in(10), u64::MIN, u64::MAX)
    }

    // Hex: the sign is skipped, signed results are never negative.

    pub fn hex_to_i32(&self) -> i32 {
        saturate(self.magnitude_in(16), i32::MIN, i32::MAX)
    }

    pub fn hex_to_u32(&self) -> u32 {
        saturate(self.magnitude_in(16), u32::MIN, u32::MAX)
    }

    pub fn hex_to_i64(&self) -> i64 {
        saturate(self.magnitude_in(16), i64::MIN, i64::MAX)
    }

    pub fn hex_to_u64(&self) -> u64 {
        saturate(self.magnitude_in(16), u64::MIN, u64::MAX)
    }

    // Binary: the token text reinterpreted in base 2.

    pub fn binary_to_i32(&self) -> i32 {
        saturate(self.signed_in(2), i32::MIN, i32::MAX)
    }

    pub fn binary_to_u32(&self) -> u32 {
        saturate(self.magnitude_in(2), u32::MIN, u32::MAX)
    }

    pub fn binary_to_i64(&self) -> i64 {
        saturate(self.signed_in(2), i64::MIN, i64::MAX)
    }

    pub fn binary_to_u64(&self) -> u64 {
        saturate(self.magnitude_in(2), u64::MIN, u64::MAX)
    }

    // Float

    pub fn to_f32(&self) -> f32 {
        float_prefix(self.text()).parse().unwrap_or(0.0)
    }

    pub fn to_f64(&self) -> f64 {
        float_prefix(self.text()).parse().unwrap_or(0.0)
    }

    /// Strict counterpart of the lossy conversions: every character after the
    /// sign (and `0x` for base 16) must be a digit of `radix`, and the value
    /// must fit in `T`.
    pub fn parse_int<T: TryFrom<i128>>(&self, radix: u32) -> Result<T, NumberError> {
        if !(2..=36).contains(&radix) {
            return Err(NumberError::InvalidRadix { radix });
        }

        let text = self.text();
        let parts = Digits::split(text, radix);

        if parts.digits.is_empty() {
            return Err(NumberError::NoDigits {
                text: text.to_owned(),
                radix,
            });
        }
        if let Some(ch) = parts.digits.chars().find(|ch| !ch.is_digit(radix)) {
            return Err(NumberError::InvalidDigit {
                text: text.to_owned(),
                ch,
                radix,
            });
        }

        let out_of_range = || NumberError::OutOfRange {
            text: text.to_owned(),
        };
        let magnitude = u128::from_str_radix(parts.digits, radix).map_err(|_| out_of_range())?;
        let magnitude = i128::try_from(magnitude).map_err(|_| out_of_range())?;
        let value = if parts.negative { -magnitude } else { magnitude };

        T::try_from(value).map_err(|_| out_of_range())
    }
}
