use crate::core::data::format_error::FormatError;
use dashu_base::Approximation;
use dashu_float::DBig;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Significant decimal digits an `f64` reliably carries.
pub const NATIVE_SIGNIFICANT_DIGITS: usize = 15;

/// Extra digits kept on top of what a view strictly needs to separate its pixels.
pub const GUARD_DIGITS: usize = 6;

/// Selects the numeric backend a [`Real`] is computed with.
///
/// `Native` is fast but saturates around 15 significant digits, which limits how far
/// a view can be zoomed before neighbouring pixels collapse onto the same coordinate.
/// `Decimal(digits)` keeps the given number of significant decimal digits and never
/// overflows, at a large cost per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Native,
    Decimal(usize),
}

impl Precision {
    #[must_use]
    pub fn digits(self) -> usize {
        match self {
            Self::Native => NATIVE_SIGNIFICANT_DIGITS,
            Self::Decimal(digits) => digits.max(1),
        }
    }

    /// The finer of two precisions.
    #[must_use]
    pub fn finer(self, other: Self) -> Self {
        match (self, other) {
            (Self::Native, Self::Native) => Self::Native,
            _ => Self::Decimal(self.digits().max(other.digits())),
        }
    }

    /// Cheapest precision that still resolves one pixel of a view `diameter` wide
    /// spread over `pixels` pixels.
    #[must_use]
    pub fn suggested_for(diameter: &Real, pixels: u32) -> Self {
        let Some(exponent) = diameter.decimal_exponent() else {
            return Self::Native;
        };

        let pixel_digits = f64::from(pixels.max(1)).log10().ceil() as isize;
        let required = (pixel_digits - exponent).max(1) as usize + GUARD_DIGITS;

        if required <= NATIVE_SIGNIFICANT_DIGITS {
            Self::Native
        } else {
            Self::Decimal(required)
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Decimal(digits) => write!(f, "{} decimal digits", digits),
        }
    }
}

/// Immutable scalar backed by either an `f64` or an arbitrary-precision decimal.
///
/// Arithmetic between two values of the same backend stays in that backend. Mixing
/// backends promotes the native operand to the decimal one, unless it is not finite,
/// in which case the decimal operand is demoted instead.
///
/// # Panics
///
/// Dividing a decimal value by zero panics, as integer division does. Native division
/// by zero follows IEEE-754.
#[derive(Debug, Clone)]
pub enum Real {
    Native(f64),
    Decimal(DBig),
}

fn round_to(value: DBig, digits: usize) -> DBig {
    match value.with_precision(digits.max(1)) {
        Approximation::Exact(v) => v,
        Approximation::Inexact(v, _) => v,
    }
}

fn promote(value: f64, digits: usize) -> Option<DBig> {
    if !value.is_finite() {
        return None;
    }

    // f64 formatting is the shortest decimal that reads back to the same f64
    value
        .to_string()
        .parse::<DBig>()
        .ok()
        .map(|v| round_to(v, digits))
}

// std float parsing rounds correctly; the direct conversion is the fallback
fn demote(value: &DBig) -> f64 {
    value
        .to_string()
        .parse::<f64>()
        .unwrap_or_else(|_| value.to_f64().value())
}

fn combine(
    lhs: &Real,
    rhs: &Real,
    native: fn(f64, f64) -> f64,
    decimal: fn(&DBig, &DBig) -> DBig,
) -> Real {
    match (lhs, rhs) {
        (Real::Native(a), Real::Native(b)) => Real::Native(native(*a, *b)),
        (Real::Decimal(a), Real::Decimal(b)) => Real::Decimal(decimal(a, b)),
        (Real::Native(a), Real::Decimal(b)) => match promote(*a, b.precision()) {
            Some(a) => Real::Decimal(decimal(&a, b)),
            None => Real::Native(native(*a, demote(b))),
        },
        (Real::Decimal(a), Real::Native(b)) => match promote(*b, a.precision()) {
            Some(b) => Real::Decimal(decimal(a, &b)),
            None => Real::Native(native(demote(a), *b)),
        },
    }
}

impl Real {
    #[must_use]
    pub fn zero(precision: Precision) -> Self {
        Self::from_int(0, precision)
    }

    #[must_use]
    pub fn from_int(value: i64, precision: Precision) -> Self {
        match precision {
            Precision::Native => Self::Native(value as f64),
            Precision::Decimal(digits) => Self::Decimal(round_to(DBig::from(value), digits)),
        }
    }

    /// Parses a decimal literal (`-0.75`, `1e-40`, `3`) into the requested backend.
    pub fn parse(text: &str, precision: Precision) -> Result<Self, FormatError> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(FormatError::new(text, "empty input"));
        }

        match precision {
            Precision::Native => {
                let value = trimmed
                    .parse::<f64>()
                    .map_err(|e| FormatError::new(text, e.to_string()))?;

                if !value.is_finite() {
                    return Err(FormatError::new(text, "value is not finite"));
                }

                Ok(Self::Native(value))
            }
            Precision::Decimal(digits) => {
                let value = trimmed
                    .parse::<DBig>()
                    .map_err(|e| FormatError::new(text, e.to_string()))?;

                Ok(Self::Decimal(round_to(value, digits)))
            }
        }
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        match self {
            Self::Native(_) => Precision::Native,
            Self::Decimal(value) => Precision::Decimal(value.precision()),
        }
    }

    /// Re-expresses this value in another backend, rounding if the target is coarser.
    #[must_use]
    pub fn with_precision(&self, precision: Precision) -> Self {
        match (self, precision) {
            (Self::Native(v), Precision::Native) => Self::Native(*v),
            (Self::Native(v), Precision::Decimal(digits)) => match promote(*v, digits) {
                Some(value) => Self::Decimal(value),
                None => Self::Native(*v),
            },
            (Self::Decimal(v), Precision::Native) => Self::Native(demote(v)),
            (Self::Decimal(v), Precision::Decimal(digits)) => {
                Self::Decimal(round_to(v.clone(), digits))
            }
        }
    }

    /// Lossy conversion, for display and statistics only.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Native(v) => *v,
            Self::Decimal(v) => demote(v),
        }
    }

    /// Power of ten of the leading digit, or `None` for zero and non-finite values.
    #[must_use]
    pub fn decimal_exponent(&self) -> Option<isize> {
        match self {
            Self::Native(v) => {
                if *v == 0.0 || !v.is_finite() {
                    None
                } else {
                    Some(v.abs().log10().floor() as isize)
                }
            }
            Self::Decimal(v) => {
                if *v == DBig::ZERO {
                    None
                } else {
                    let repr = v.repr();
                    Some(repr.exponent() + repr.digits() as isize - 1)
                }
            }
        }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Native(v) => *v > 0.0,
            Self::Decimal(v) => *v > DBig::ZERO,
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Native(v) => *v < 0.0,
            Self::Decimal(v) => *v < DBig::ZERO,
        }
    }

    #[must_use]
    pub fn square(&self) -> Self {
        self * self
    }

    #[must_use]
    pub fn half(&self) -> Self {
        self / &Self::from_int(2, self.precision())
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => a.partial_cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => a.partial_cmp(b),
            (Self::Native(a), Self::Decimal(b)) => match promote(*a, b.precision()) {
                Some(a) => a.partial_cmp(b),
                None => a.partial_cmp(&demote(b)),
            },
            (Self::Decimal(a), Self::Native(b)) => match promote(*b, a.precision()) {
                Some(b) => a.partial_cmp(&b),
                None => demote(a).partial_cmp(b),
            },
        }
    }
}

macro_rules! forward_binary_op {
    ($op:ident, $method:ident, $native:expr, $decimal:expr) => {
        impl $op<&Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                combine(self, rhs, $native, $decimal)
            }
        }

        impl $op<&Real> for Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                combine(&self, rhs, $native, $decimal)
            }
        }

        impl $op for Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                combine(&self, &rhs, $native, $decimal)
            }
        }
    };
}

forward_binary_op!(Add, add, |a, b| a + b, |a, b| a + b);
forward_binary_op!(Sub, sub, |a, b| a - b, |a, b| a - b);
forward_binary_op!(Mul, mul, |a, b| a * b, |a, b| a * b);
forward_binary_op!(Div, div, |a, b| a / b, |a, b| a / b);

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        match self {
            Real::Native(v) => Real::Native(-v),
            Real::Decimal(v) => Real::Decimal(-(v.clone())),
        }
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        -&self
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// Parses with the native backend; use [`Real::parse`] to pick another.
impl FromStr for Real {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Precision::Native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEEP: Precision = Precision::Decimal(40);

    fn native(text: &str) -> Real {
        Real::parse(text, Precision::Native).unwrap()
    }

    fn deep(text: &str) -> Real {
        Real::parse(text, DEEP).unwrap()
    }

    #[test]
    fn parse_native_literals() {
        assert_eq!(native("1.5").to_f64(), 1.5);
        assert_eq!(native("  -0.25 ").to_f64(), -0.25);
        assert_eq!(native("1e-3").to_f64(), 0.001);
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        for precision in [Precision::Native, DEEP] {
            assert!(Real::parse("abc", precision).is_err());
            assert!(Real::parse("", precision).is_err());
            assert!(Real::parse("1.2.3", precision).is_err());
        }
    }

    #[test]
    fn parse_rejects_non_finite_native_values() {
        let err = Real::parse("inf", Precision::Native).unwrap_err();
        assert_eq!(err.input(), "inf");

        assert!(Real::parse("NaN", Precision::Native).is_err());
    }

    #[test]
    fn from_str_uses_native_backend() {
        let value: Real = "2.5".parse().unwrap();
        assert_eq!(value.precision(), Precision::Native);
    }

    #[test]
    fn native_format_round_trips() {
        let third = &Real::from_int(1, Precision::Native) / &Real::from_int(3, Precision::Native);

        for value in [native("0.1"), native("-2.5e-7"), native("123456.789"), third] {
            let reparsed = Real::parse(&value.to_string(), Precision::Native).unwrap();
            assert_eq!(reparsed, value);
        }
    }

    #[test]
    fn decimal_format_round_trips() {
        let third = &Real::from_int(1, DEEP) / &Real::from_int(3, DEEP);

        for value in [deep("0.1"), deep("-1.00000000000000000000000001"), third] {
            let reparsed = Real::parse(&value.to_string(), DEEP).unwrap();
            assert_eq!(reparsed, value);
        }
    }

    #[test]
    fn native_arithmetic() {
        let a = native("1.5");
        let b = native("0.5");

        assert_eq!((&a + &b).to_f64(), 2.0);
        assert_eq!((&a - &b).to_f64(), 1.0);
        assert_eq!((&a * &b).to_f64(), 0.75);
        assert_eq!((&a / &b).to_f64(), 3.0);
        assert_eq!((-a).to_f64(), -1.5);
    }

    #[test]
    fn decimal_arithmetic() {
        let a = deep("1.5");
        let b = deep("0.5");

        assert_eq!(&a + &b, deep("2"));
        assert_eq!(&a - &b, deep("1"));
        assert_eq!(&a * &b, deep("0.75"));
        assert_eq!(&a / &b, deep("3"));
        assert_eq!(-a, deep("-1.5"));
    }

    #[test]
    fn decimal_keeps_digits_native_loses() {
        let text = "1.0000000000000000000000001";

        let native_diff = native(text) - Real::from_int(1, Precision::Native);
        let deep_diff = deep(text) - Real::from_int(1, DEEP);

        assert!(!native_diff.is_positive());
        assert!(deep_diff.is_positive());
        assert_eq!(deep_diff, deep("1e-25"));
    }

    #[test]
    fn mixed_backends_promote_to_decimal() {
        let sum = native("0.5") + deep("0.25");

        assert_eq!(sum.precision(), DEEP);
        assert_eq!(sum, deep("0.75"));
    }

    #[test]
    fn comparisons_across_backends() {
        assert!(native("0.5") < deep("0.75"));
        assert!(deep("2") > native("1.5"));
        assert_eq!(native("0.5"), deep("0.5"));
    }

    #[test]
    fn with_precision_converts_between_backends() {
        let value = native("0.125").with_precision(DEEP);
        assert_eq!(value.precision(), DEEP);
        assert_eq!(value, deep("0.125"));

        let back = value.with_precision(Precision::Native);
        assert_eq!(back.precision(), Precision::Native);
        assert_eq!(back.to_f64(), 0.125);
    }

    #[test]
    fn sign_checks() {
        assert!(native("0.1").is_positive());
        assert!(!native("0").is_positive());
        assert!(native("-0.1").is_negative());
        assert!(deep("-1e-30").is_negative());
        assert!(!deep("0").is_negative());
    }

    #[test]
    fn decimal_exponent_of_leading_digit() {
        assert_eq!(native("3").decimal_exponent(), Some(0));
        assert_eq!(native("0.0012").decimal_exponent(), Some(-3));
        assert_eq!(native("0").decimal_exponent(), None);
        assert_eq!(deep("1.5").decimal_exponent(), Some(0));
        assert_eq!(deep("0.0012").decimal_exponent(), Some(-3));
        assert_eq!(deep("-4.2e-50").decimal_exponent(), Some(-50));
    }

    #[test]
    fn suggested_precision_tracks_zoom_depth() {
        assert_eq!(
            Precision::suggested_for(&native("3"), 800),
            Precision::Native
        );

        match Precision::suggested_for(&deep("1e-30"), 800) {
            Precision::Decimal(digits) => assert!(digits >= 33),
            Precision::Native => panic!("deep view must not use native precision"),
        }
    }

    #[test]
    fn finer_precision_wins() {
        assert_eq!(
            Precision::Native.finer(Precision::Native),
            Precision::Native
        );
        assert_eq!(
            Precision::Native.finer(Precision::Decimal(30)),
            Precision::Decimal(30)
        );
        assert_eq!(
            Precision::Decimal(20).finer(Precision::Decimal(30)),
            Precision::Decimal(30)
        );
    }

    #[test]
    fn half_and_max() {
        assert_eq!(native("3").half().to_f64(), 1.5);
        assert_eq!(deep("3").half(), deep("1.5"));
        assert_eq!(native("1").max(native("2")).to_f64(), 2.0);
    }
}
