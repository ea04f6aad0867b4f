//! Arbitrary-magnitude numbers
//!
//! A [`Decimal`] is stored as a `sign`, a `layer` and a magnitude `mag`:
//! - layer 0: `sign * mag`
//! - layer 1: `sign * 10^mag`
//! - layer 2: `sign * 10^10^mag`, and so on.
//!
//! Values stay on layer 0 while they fit comfortably in an `f64`, so everyday
//! arithmetic is plain floating point. Larger (or vanishingly small) values
//! move up a layer and their arithmetic happens in log space. Precision is
//! that of the `f64` magnitude; the range is effectively unbounded.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Largest magnitude kept on layer 0, and largest `mag` kept on any layer
pub const EXP_LIMIT: f64 = 9e15;

/// Smallest non-zero magnitude kept on layer 0
const TINY_LIMIT: f64 = 1e-300;

/// Exponent gap past which the smaller addend no longer changes a sum
const ADD_PRECISION_DIGITS: f64 = 17.0;

/// An arbitrary-magnitude signed number
///
/// Serializes as its `(sign, layer, mag)` components and is normalized again
/// on the way back in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "DecimalParts", into = "DecimalParts")]
pub struct Decimal {
    sign: i8,
    layer: u32,
    mag: f64,
}

/// Raw persisted components of a [`Decimal`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimalParts {
    pub sign: i8,
    pub layer: u32,
    pub mag: f64,
}

impl From<DecimalParts> for Decimal {
    fn from(parts: DecimalParts) -> Self {
        Decimal::from_components(parts.sign, parts.layer, parts.mag)
    }
}

impl From<Decimal> for DecimalParts {
    fn from(d: Decimal) -> Self {
        d.components()
    }
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        sign: 0,
        layer: 0,
        mag: 0.0,
    };

    pub const ONE: Decimal = Decimal {
        sign: 1,
        layer: 0,
        mag: 1.0,
    };

    pub const TEN: Decimal = Decimal {
        sign: 1,
        layer: 0,
        mag: 10.0,
    };

    /// Build from raw components, normalizing the representation
    pub fn from_components(sign: i8, layer: u32, mag: f64) -> Self {
        let sign = sign.signum();
        if layer == 0 {
            return Self::from_f64(f64::from(sign) * mag.abs());
        }
        Self::normalized(sign, layer, mag)
    }

    /// Split into `(sign, layer, mag)` for persistence
    pub fn components(&self) -> DecimalParts {
        DecimalParts {
            sign: self.sign,
            layer: self.layer,
            mag: self.mag,
        }
    }

    /// Convert from a primitive float
    ///
    /// NaN becomes zero; infinities saturate at `±f64::MAX`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() || value == 0.0 {
            return Self::ZERO;
        }
        let sign = if value < 0.0 { -1 } else { 1 };
        let mag = value.abs();
        if mag.is_infinite() {
            return Self::normalized(sign, 1, f64::MAX.log10());
        }
        Self::normalized(sign, 0, mag)
    }

    fn normalized(sign: i8, mut layer: u32, mut mag: f64) -> Self {
        if sign == 0 || mag.is_nan() {
            return Self::ZERO;
        }
        loop {
            if layer == 0 {
                if mag == 0.0 {
                    return Self::ZERO;
                }
                if mag >= EXP_LIMIT || mag < TINY_LIMIT {
                    mag = mag.log10();
                    layer = 1;
                    continue;
                }
                break;
            }
            if mag >= EXP_LIMIT {
                mag = mag.log10();
                layer += 1;
                continue;
            }
            if layer == 1 && mag <= -EXP_LIMIT {
                return Self::ZERO;
            }
            let lowered = 10f64.powf(mag);
            let fits_below = if layer == 1 {
                (TINY_LIMIT..EXP_LIMIT).contains(&lowered)
            } else {
                lowered < EXP_LIMIT
            };
            if fits_below {
                mag = lowered;
                layer -= 1;
                continue;
            }
            break;
        }
        Self { sign, layer, mag }
    }

    pub fn sign(&self) -> i8 {
        self.sign
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn mag(&self) -> f64 {
        self.mag
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    pub fn is_positive(&self) -> bool {
        self.sign > 0
    }

    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    /// Whether the value has no fractional part
    pub fn is_integer(&self) -> bool {
        match self.layer {
            0 => self.mag.fract() == 0.0,
            1 => self.mag >= 0.0,
            _ => true,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            sign: self.sign.abs(),
            ..*self
        }
    }

    /// Nearest `f64`; saturates to infinity or zero outside its range
    pub fn to_f64(&self) -> f64 {
        let sign = f64::from(self.sign);
        match self.layer {
            0 => sign * self.mag,
            1 => sign * 10f64.powf(self.mag),
            _ => sign * f64::INFINITY,
        }
    }

    /// Integer part as `u64`, saturating; negative values give 0
    pub fn to_u64_saturating(&self) -> u64 {
        if self.sign <= 0 {
            return 0;
        }
        let value = self.to_f64().floor();
        if value >= u64::MAX as f64 {
            u64::MAX
        } else {
            value as u64
        }
    }

    /// Magnitude class used for ordering absolute values
    fn rank(&self) -> (i64, f64) {
        match self.layer {
            0 => (0, self.mag),
            1 if self.mag < 0.0 => (-1, self.mag),
            layer => (i64::from(layer), self.mag),
        }
    }

    fn cmp_abs(&self, other: &Self) -> Ordering {
        match (self.sign == 0, other.sign == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        let (class_a, mag_a) = self.rank();
        let (class_b, mag_b) = other.rank();
        class_a.cmp(&class_b).then(mag_a.total_cmp(&mag_b))
    }

    /// `log10(|self|)` as a float, for values on layers 0 and 1
    fn abs_log10_f64(&self) -> f64 {
        match self.layer {
            0 => self.mag.log10(),
            _ => self.mag,
        }
    }

    /// `log10(|self|)` for any non-zero value
    fn abs_log10(&self) -> Self {
        match self.layer {
            0 => Self::from_f64(self.mag.log10()),
            1 => Self::from_f64(self.mag),
            layer => Self::normalized(1, layer - 1, self.mag),
        }
    }

    /// `10^exponent`
    pub fn pow10(exponent: &Decimal) -> Self {
        if exponent.sign == 0 {
            return Self::ONE;
        }
        match exponent.layer {
            0 => Self::normalized(1, 1, f64::from(exponent.sign) * exponent.mag),
            // a tiny exponent: 10^ε is 1 within f64 precision
            1 if exponent.mag < 0.0 => Self::ONE,
            layer if exponent.sign > 0 => Self::normalized(1, layer + 1, exponent.mag),
            _ => Self::ZERO,
        }
    }

    /// Base-10 logarithm; `None` for non-positive values
    pub fn log10(&self) -> Option<Self> {
        if self.sign <= 0 {
            return None;
        }
        Some(self.abs_log10())
    }

    /// Natural logarithm; `None` for non-positive values
    pub fn ln(&self) -> Option<Self> {
        self.log10()
            .map(|l| l * Self::from_f64(std::f64::consts::LN_10))
    }

    /// Logarithm in an arbitrary base; `None` when undefined
    pub fn log(&self, base: &Decimal) -> Option<Self> {
        let numerator = self.log10()?;
        let denominator = base.log10()?;
        numerator.checked_div(&denominator)
    }

    /// `self ^ exponent`
    ///
    /// Negative bases are raised by magnitude and keep their sign only for
    /// odd integer exponents.
    pub fn pow(&self, exponent: &Decimal) -> Self {
        if exponent.sign == 0 {
            return Self::ONE;
        }
        if self.sign == 0 {
            return Self::ZERO;
        }
        let negate = self.sign < 0
            && exponent.layer == 0
            && exponent.mag.fract() == 0.0
            && exponent.mag % 2.0 == 1.0;
        let sign = if negate { -1 } else { 1 };

        if self.layer == 0 && exponent.layer == 0 {
            let direct = self.mag.powf(f64::from(exponent.sign) * exponent.mag);
            if direct.is_finite() && direct > 0.0 {
                return Self::from_f64(f64::from(sign) * direct);
            }
        }
        let magnitude = Self::pow10(&(self.abs_log10() * *exponent));
        if negate {
            -magnitude
        } else {
            magnitude
        }
    }

    pub fn powf(&self, exponent: f64) -> Self {
        self.pow(&Self::from_f64(exponent))
    }

    pub fn sqrt(&self) -> Self {
        if self.layer == 0 && self.sign > 0 {
            return Self::from_f64(self.mag.sqrt());
        }
        self.powf(0.5)
    }

    /// `n`-th root; `None` when `n` is zero
    pub fn root(&self, n: &Decimal) -> Option<Self> {
        let exponent = Self::ONE.checked_div(n)?;
        Some(self.pow(&exponent))
    }

    /// Division returning `None` for a zero divisor
    pub fn checked_div(&self, rhs: &Decimal) -> Option<Self> {
        if rhs.sign == 0 {
            return None;
        }
        if self.sign == 0 {
            return Some(Self::ZERO);
        }
        let sign = self.sign * rhs.sign;
        if self.layer == 0 && rhs.layer == 0 {
            let direct = self.mag / rhs.mag;
            if direct.is_finite() && direct > 0.0 {
                return Some(Self::from_f64(f64::from(sign) * direct));
            }
        }
        let magnitude = Self::pow10(&(self.abs_log10() - rhs.abs_log10()));
        Some(Self { sign, ..magnitude }.renormalized())
    }

    fn renormalized(self) -> Self {
        if self.mag == 0.0 && self.layer == 0 {
            Self::ZERO
        } else {
            self
        }
    }

    pub fn recip(&self) -> Option<Self> {
        Self::ONE.checked_div(self)
    }

    pub fn floor(&self) -> Self {
        self.integral(f64::floor, |negative| if negative { -Self::ONE } else { Self::ZERO })
    }

    pub fn ceil(&self) -> Self {
        self.integral(f64::ceil, |negative| if negative { Self::ZERO } else { Self::ONE })
    }

    pub fn round(&self) -> Self {
        self.integral(f64::round, |_| Self::ZERO)
    }

    fn integral(&self, op: fn(f64) -> f64, tiny: fn(bool) -> Self) -> Self {
        match self.layer {
            0 => Self::from_f64(op(f64::from(self.sign) * self.mag)),
            1 if self.mag < 0.0 => tiny(self.sign < 0),
            _ => *self,
        }
    }

    fn add_impl(self, rhs: Self) -> Self {
        if self.sign == 0 {
            return rhs;
        }
        if rhs.sign == 0 {
            return self;
        }
        if self.layer == 0 && rhs.layer == 0 {
            return Self::from_f64(
                f64::from(self.sign) * self.mag + f64::from(rhs.sign) * rhs.mag,
            );
        }

        let (big, small) = if self.cmp_abs(&rhs) == Ordering::Less {
            (rhs, self)
        } else {
            (self, rhs)
        };
        let opposite = big.sign != small.sign;
        if opposite && big.cmp_abs(&small) == Ordering::Equal {
            return Self::ZERO;
        }
        if big.layer >= 2 {
            return big;
        }

        let diff = big.abs_log10_f64() - small.abs_log10_f64();
        if diff > ADD_PRECISION_DIGITS {
            return big;
        }
        let ratio = 10f64.powf(-diff);
        let log = if opposite {
            big.abs_log10_f64() + (1.0 - ratio).log10()
        } else {
            big.abs_log10_f64() + (1.0 + ratio).log10()
        };
        Self::normalized(big.sign, 1, log)
    }

    fn mul_impl(self, rhs: Self) -> Self {
        if self.sign == 0 || rhs.sign == 0 {
            return Self::ZERO;
        }
        let sign = self.sign * rhs.sign;
        if self.layer == 0 && rhs.layer == 0 {
            let direct = self.mag * rhs.mag;
            if direct.is_finite() && direct > 0.0 {
                return Self::from_f64(f64::from(sign) * direct);
            }
        }
        let magnitude = Self::pow10(&(self.abs_log10() + rhs.abs_log10()));
        Self { sign, ..magnitude }.renormalized()
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => match self.sign {
                0 => Ordering::Equal,
                1 => self.cmp_abs(other),
                _ => other.cmp_abs(self),
            },
            unequal => unequal,
        }
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            sign: -self.sign,
            ..self
        }
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        self.add_impl(rhs)
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        self.add_impl(-rhs)
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        self.mul_impl(rhs)
    }
}

/// Division by zero yields zero; use [`Decimal::checked_div`] to detect it.
impl Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        self.checked_div(&rhs).unwrap_or(Decimal::ZERO)
    }
}

impl AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        *self = *self + rhs;
    }
}

impl SubAssign for Decimal {
    fn sub_assign(&mut self, rhs: Decimal) {
        *self = *self - rhs;
    }
}

impl MulAssign for Decimal {
    fn mul_assign(&mut self, rhs: Decimal) {
        *self = *self * rhs;
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, d| acc + d)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, d| acc + *d)
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from_f64(value as f64)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_f64(value as f64)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl From<usize> for Decimal {
    fn from(value: usize) -> Self {
        Self::from_f64(value as f64)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Accepts plain floats, `<mantissa>e<exponent>` with exponents beyond
    /// the `f64` range, and leading-`e` towers such as `ee5` (`10^10^5`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Parse("empty string".to_string()));
        }
        if let Some(rest) = s.strip_prefix('-') {
            return rest.parse::<Decimal>().map(|d| -d);
        }
        if let Some(rest) = s.strip_prefix(['e', 'E']) {
            let exponent: Decimal = rest.parse()?;
            return Ok(Decimal::pow10(&exponent));
        }
        if let Ok(value) = s.parse::<f64>() {
            if value.is_finite() {
                return Ok(Decimal::from_f64(value));
            }
        }
        let (mantissa, exponent) = s
            .split_once(['e', 'E'])
            .ok_or_else(|| Error::Parse(format!("not a number: {s}")))?;
        let mantissa: f64 = mantissa
            .parse()
            .map_err(|_| Error::Parse(format!("bad mantissa in {s}")))?;
        let exponent: f64 = exponent
            .parse()
            .map_err(|_| Error::Parse(format!("bad exponent in {s}")))?;
        if mantissa == 0.0 {
            return Ok(Decimal::ZERO);
        }
        let sign = if mantissa < 0.0 { -1 } else { 1 };
        Ok(Decimal::normalized(
            sign,
            1,
            mantissa.abs().log10() + exponent,
        ))
    }
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn scientific(log: f64) -> String {
    let mut exponent = log.floor();
    let mut mantissa = 10f64.powf(log - exponent);
    if mantissa >= 9.995 {
        mantissa = 1.0;
        exponent += 1.0;
    }
    format!("{}e{:.0}", trim_fraction(format!("{mantissa:.2}")), exponent)
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == 0 {
            return write!(f, "0");
        }
        if self.sign < 0 {
            write!(f, "-")?;
        }
        match self.layer {
            0 => {
                let value = self.mag;
                if value.fract() == 0.0 && value < 1e15 {
                    write!(f, "{value:.0}")
                } else if (1e-3..1e6).contains(&value) {
                    write!(f, "{}", trim_fraction(format!("{value:.3}")))
                } else {
                    write!(f, "{}", scientific(value.log10()))
                }
            }
            1 => write!(f, "{}", scientific(self.mag)),
            2 => write!(f, "e{}", scientific(self.mag)),
            layer => write!(f, "(e^{}){}", layer - 1, scientific(self.mag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_small_arithmetic() {
        let a = Decimal::from(6.0);
        let b = Decimal::from(3.0);
        assert_eq!(a + b, Decimal::from(9.0));
        assert_eq!(a - b, Decimal::from(3.0));
        assert_eq!(a * b, Decimal::from(18.0));
        assert_eq!(a / b, Decimal::from(2.0));
        assert_eq!(b - a, Decimal::from(-3.0));
        assert!(a.checked_div(&Decimal::ZERO).is_none());
    }

    #[test]
    fn test_crosses_layers() {
        let big = d("1e400");
        assert_eq!(big.layer(), 1);
        assert_eq!(big.mag(), 400.0);
        assert!(big > d("1e300"));
        assert!(big > Decimal::from(f64::MAX));
        assert_eq!(big * big, d("1e800"));
        assert_eq!((big * big) / big, big);
    }

    #[test]
    fn test_negligible_addend() {
        let big = d("1e400");
        assert_eq!(big + Decimal::ONE, big);
        assert_eq!(big - big, Decimal::ZERO);

        let sum = d("1e16") + d("1e16");
        assert!((sum.to_f64() - 2e16).abs() / 2e16 < 1e-12);
    }

    #[test]
    fn test_ordering_with_signs_and_tiny_values() {
        let tiny = Decimal::ONE / d("1e400");
        assert!(tiny.is_positive());
        assert!(tiny < Decimal::from(1e-300));
        assert!(tiny > Decimal::ZERO);
        assert!(-d("1e400") < Decimal::from(-5.0));
        assert!(Decimal::from(-5.0) < Decimal::ZERO);
    }

    #[test]
    fn test_pow_and_roots() {
        assert_eq!(Decimal::from(2.0).powf(10.0), Decimal::from(1024.0));
        assert_eq!(Decimal::TEN.pow(&Decimal::from(500.0)), d("1e500"));
        assert_eq!(Decimal::from(16.0).sqrt(), Decimal::from(4.0));
        assert_eq!(
            Decimal::from(27.0).root(&Decimal::from(3.0)).unwrap().round(),
            Decimal::from(3.0)
        );
        assert_eq!(Decimal::from(-2.0).powf(3.0), Decimal::from(-8.0));

        let tower = Decimal::TEN.pow(&d("1e20"));
        assert_eq!(tower.layer(), 2);
        assert!(tower > d("1e1000000"));
    }

    #[test]
    fn test_logs() {
        let log = Decimal::from(1000.0).log10().unwrap();
        assert!((log.to_f64() - 3.0).abs() < 1e-12);
        assert_eq!(d("1e400").log10(), Some(Decimal::from(400.0)));
        assert!(Decimal::ZERO.log10().is_none());
        assert!(Decimal::from(-1.0).ln().is_none());
        let log2 = Decimal::from(8.0).log(&Decimal::from(2.0)).unwrap();
        assert!((log2.to_f64() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Decimal::from(2.7).floor(), Decimal::from(2.0));
        assert_eq!(Decimal::from(-2.2).floor(), Decimal::from(-3.0));
        assert_eq!(Decimal::from(2.5).round(), Decimal::from(3.0));
        assert_eq!(Decimal::from(2.1).ceil(), Decimal::from(3.0));
        assert_eq!(d("1e400").floor(), d("1e400"));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(d("42"), Decimal::from(42.0));
        assert_eq!(d("-1.5"), Decimal::from(-1.5));
        assert_eq!(d("ee2"), Decimal::pow10(&Decimal::from(100.0)));
        assert!("abc".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal::from(1234.0).to_string(), "1234");
        assert_eq!(Decimal::from(1.25).to_string(), "1.25");
        assert_eq!(Decimal::from(-3.0).to_string(), "-3");
        assert_eq!(d("1.5e400").to_string(), "1.5e400");
        assert_eq!(Decimal::ZERO.to_string(), "0");
    }

    #[test]
    fn test_components_restore() {
        let value = d("3e1234");
        let parts = value.components();
        assert_eq!(Decimal::from_components(parts.sign, parts.layer, parts.mag), value);

        let ron_text = ron::to_string(&value).unwrap();
        let back: Decimal = ron::from_str(&ron_text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_saturating_conversions() {
        assert_eq!(Decimal::from(7.9).to_u64_saturating(), 7);
        assert_eq!(Decimal::from(-7.0).to_u64_saturating(), 0);
        assert_eq!(d("1e400").to_u64_saturating(), u64::MAX);
        assert_eq!(d("1e400").to_f64(), f64::INFINITY);
    }
}
