use std::fmt;
use std::str::FromStr;

use derive_more::{Add, AddAssign, Sub, SubAssign, Sum};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{all_consuming, map, opt, recognize, value};
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub type MilliUnits = i128;

pub const MILLIS_PER_UNIT: MilliUnits = 1_000;

/// Largest power of ten that still fits into `MilliUnits`.
const MAX_POW10: u32 = 38;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity cannot be empty")]
    Empty,
    #[error("cannot parse '{0}' as a quantity")]
    Malformed(String),
    #[error("quantity '{0}' is out of range")]
    OutOfRange(String),
}

/// Amount of a resource as it appears in a workload's resource requests
/// (`500m`, `2`, `256Mi`, `1.5G`, `3e2`, ...).
///
/// Stored as an exact number of milli-units. Anything below a milli-unit is
/// rounded up (away from zero) when the quantity is parsed.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    AddAssign,
    SubAssign,
    Sub,
    Add,
    Sum,
)]
pub struct Quantity(MilliUnits);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn from_milli(milli: MilliUnits) -> Self {
        Quantity(milli)
    }

    pub fn from_units(units: i64) -> Self {
        Quantity(units as MilliUnits * MILLIS_PER_UNIT)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Amount in milli-units.
    pub fn milli_value(&self) -> MilliUnits {
        self.0
    }

    /// Amount in whole units, rounded up.
    pub fn value(&self) -> MilliUnits {
        div_round_up(self.0, MILLIS_PER_UNIT)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 % MILLIS_PER_UNIT == 0 {
            write!(f, "{}", self.0 / MILLIS_PER_UNIT)
        } else {
            write!(f, "{}m", self.0)
        }
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }
        let (_, parsed) = all_consuming(p_quantity)(trimmed)
            .map_err(|_| QuantityError::Malformed(trimmed.to_string()))?;
        parsed
            .to_milli()
            .map(Quantity)
            .ok_or_else(|| QuantityError::OutOfRange(trimmed.to_string()))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawQuantity {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        let text = match RawQuantity::deserialize(deserializer)? {
            RawQuantity::Text(text) => text,
            RawQuantity::Integer(value) => return Ok(Quantity::from_units(value)),
            RawQuantity::Float(value) => value.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Division of `value` by a positive `divisor` that rounds away from zero.
fn div_round_up(value: MilliUnits, divisor: MilliUnits) -> MilliUnits {
    let magnitude = value.unsigned_abs().div_ceil(divisor as u128) as MilliUnits;
    if value < 0 { -magnitude } else { magnitude }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    /// Multiplier `1024^n`.
    Binary(u32),
    /// Multiplier `10^n`.
    Decimal(i32),
}

#[derive(Debug)]
struct ParsedQuantity<'a> {
    negative: bool,
    number: &'a str,
    suffix: Option<Suffix>,
}

impl ParsedQuantity<'_> {
    /// Exact conversion into milli-units, `None` on overflow.
    fn to_milli(&self) -> Option<MilliUnits> {
        let (integral, fractional) = self.number.split_once('.').unwrap_or((self.number, ""));
        let digits: String = integral.chars().chain(fractional.chars()).collect();
        let digits = digits.trim_start_matches('0');
        let mantissa: MilliUnits = if digits.is_empty() {
            0
        } else {
            digits.parse().ok()?
        };

        let (binary, exponent) = match self.suffix {
            None => (0, 0),
            Some(Suffix::Binary(power)) => (power, 0),
            Some(Suffix::Decimal(exponent)) => (0, exponent),
        };
        let mut amount = mantissa.checked_mul(1024i128.checked_pow(binary)?)?;

        let scale = i64::from(exponent) + 3 - fractional.len() as i64;
        if amount != 0 {
            if scale >= 0 {
                let scale = u32::try_from(scale).ok().filter(|s| *s <= MAX_POW10)?;
                amount = amount.checked_mul(10i128.pow(scale))?;
            } else if -scale > i64::from(MAX_POW10) {
                amount = 1;
            } else {
                amount = div_round_up(amount, 10i128.pow((-scale) as u32));
            }
        }
        Some(if self.negative { -amount } else { amount })
    }
}

type NomResult<'a, T> = IResult<&'a str, T>;

fn p_number(input: &str) -> NomResult<&str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(input)
}

fn p_binary_suffix(input: &str) -> NomResult<Suffix> {
    alt((
        value(Suffix::Binary(1), tag("Ki")),
        value(Suffix::Binary(2), tag("Mi")),
        value(Suffix::Binary(3), tag("Gi")),
        value(Suffix::Binary(4), tag("Ti")),
        value(Suffix::Binary(5), tag("Pi")),
        value(Suffix::Binary(6), tag("Ei")),
    ))(input)
}

fn p_exponent(input: &str) -> NomResult<Suffix> {
    let (rest, (sign, digits)) = preceded(one_of("eE"), pair(opt(one_of("+-")), digit1))(input)?;
    let exponent = digits.parse::<i32>().map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    let exponent = if sign == Some('-') { -exponent } else { exponent };
    Ok((rest, Suffix::Decimal(exponent)))
}

fn p_decimal_suffix(input: &str) -> NomResult<Suffix> {
    alt((
        value(Suffix::Decimal(-9), char('n')),
        value(Suffix::Decimal(-6), char('u')),
        value(Suffix::Decimal(-3), char('m')),
        value(Suffix::Decimal(3), char('k')),
        value(Suffix::Decimal(6), char('M')),
        value(Suffix::Decimal(9), char('G')),
        value(Suffix::Decimal(12), char('T')),
        value(Suffix::Decimal(15), char('P')),
        value(Suffix::Decimal(18), char('E')),
    ))(input)
}

fn p_quantity(input: &str) -> NomResult<ParsedQuantity<'_>> {
    map(
        tuple((
            opt(one_of("+-")),
            p_number,
            opt(alt((p_binary_suffix, p_exponent, p_decimal_suffix))),
        )),
        |(sign, number, suffix)| ParsedQuantity {
            negative: sign == Some('-'),
            number,
            suffix,
        },
    )(input)
}
