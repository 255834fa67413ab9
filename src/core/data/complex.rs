use crate::core::data::format_error::FormatError;
use crate::core::data::real::{Precision, Real};
use std::fmt;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, PartialEq)]
pub struct Complex {
    pub real: Real,
    pub imag: Real,
}

impl Complex {
    #[must_use]
    pub fn new(real: Real, imag: Real) -> Self {
        Self { real, imag }
    }

    #[must_use]
    pub fn zero(precision: Precision) -> Self {
        Self {
            real: Real::zero(precision),
            imag: Real::zero(precision),
        }
    }

    /// Parses `"<real>,<imag>"`, the same form `Display` writes.
    pub fn parse(text: &str, precision: Precision) -> Result<Self, FormatError> {
        let Some((real, imag)) = text.split_once(',') else {
            return Err(FormatError::new(text, "expected '<real>,<imag>'"));
        };

        let real = Real::parse(real, precision)
            .map_err(|e| FormatError::new(text, format!("real part: {}", e.reason())))?;
        let imag = Real::parse(imag, precision)
            .map_err(|e| FormatError::new(text, format!("imaginary part: {}", e.reason())))?;

        Ok(Self { real, imag })
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.real.precision().finer(self.imag.precision())
    }

    #[must_use]
    pub fn with_precision(&self, precision: Precision) -> Self {
        Self {
            real: self.real.with_precision(precision),
            imag: self.imag.with_precision(precision),
        }
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> Real {
        self.real.square() + self.imag.square()
    }

    #[must_use]
    pub fn square(&self) -> Self {
        let cross = &self.real * &self.imag;

        Self {
            real: self.real.square() - self.imag.square(),
            imag: &cross + &cross,
        }
    }
}

impl Add<&Complex> for &Complex {
    type Output = Complex;

    fn add(self, other: &Complex) -> Complex {
        Complex {
            real: &self.real + &other.real,
            imag: &self.imag + &other.imag,
        }
    }
}

impl Add<&Complex> for Complex {
    type Output = Complex;

    fn add(self, other: &Complex) -> Complex {
        &self + other
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, other: Complex) -> Complex {
        &self + &other
    }
}

impl Sub<&Complex> for &Complex {
    type Output = Complex;

    fn sub(self, other: &Complex) -> Complex {
        Complex {
            real: &self.real - &other.real,
            imag: &self.imag - &other.imag,
        }
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, other: Complex) -> Complex {
        &self - &other
    }
}

impl Mul<&Complex> for &Complex {
    type Output = Complex;

    fn mul(self, other: &Complex) -> Complex {
        Complex {
            real: &self.real * &other.real - &self.imag * &other.imag,
            imag: &self.real * &other.imag + &self.imag * &other.real,
        }
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, other: Complex) -> Complex {
        &self * &other
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.real, self.imag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(real: f64, imag: f64) -> Complex {
        Complex::new(Real::Native(real), Real::Native(imag))
    }

    fn deep(text: &str) -> Complex {
        Complex::parse(text, Precision::Decimal(40)).unwrap()
    }

    #[test]
    fn test_magnitude_squared() {
        assert_eq!(c(3.0, 4.0).magnitude_squared().to_f64(), 25.0); // 3² + 4² = 25
        assert_eq!(c(-3.0, 4.0).magnitude_squared().to_f64(), 25.0);
        assert_eq!(c(3.0, -4.0).magnitude_squared().to_f64(), 25.0);
        assert_eq!(c(0.0, 0.0).magnitude_squared().to_f64(), 0.0);
    }

    #[test]
    fn test_add() {
        assert_eq!(c(1.0, 2.0) + c(3.0, 4.0), c(4.0, 6.0));
        assert_eq!(c(1.0, 2.0) + c(-3.0, -7.0), c(-2.0, -5.0));
    }

    #[test]
    fn test_sub() {
        assert_eq!(c(1.0, 2.0) - c(3.0, 4.0), c(-2.0, -2.0));
    }

    #[test]
    fn test_mul() {
        // (1 + 2i) * (3 + 4i) = 3 + 4i + 6i + 8i² = -5 + 10i
        assert_eq!(c(1.0, 2.0) * c(3.0, 4.0), c(-5.0, 10.0));
        assert_eq!(c(1.0, 2.0) * c(-3.0, -4.0), c(5.0, -10.0));
        assert_eq!(c(5.0, 3.0) * c(0.0, 0.0), c(0.0, 0.0));
    }

    #[test]
    fn test_square_matches_mul() {
        // (2 + 3i)² = 4 + 12i + 9i² = -5 + 12i
        let z = c(2.0, 3.0);
        assert_eq!(z.square(), c(-5.0, 12.0));
        assert_eq!(z.square(), &z * &z);
    }

    #[test]
    fn test_square_decimal() {
        let z = deep("0.1,-0.2");

        assert_eq!(z.square(), deep("-0.03,-0.04"));
    }

    #[test]
    fn parse_and_format_round_trip() {
        for text in ["-0.4,0.6", "1e-20, -3.25", "0,0"] {
            let value = Complex::parse(text, Precision::Native).unwrap();
            let reparsed = Complex::parse(&value.to_string(), Precision::Native).unwrap();
            assert_eq!(reparsed, value);

            let value = deep(text);
            let reparsed = deep(&value.to_string());
            assert_eq!(reparsed, value);
        }
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(Complex::parse("1.0", Precision::Native).is_err());
        assert!(Complex::parse("a,1", Precision::Native).is_err());
        assert!(Complex::parse("1,", Precision::Native).is_err());

        let err = Complex::parse("1,x", Precision::Native).unwrap_err();
        assert_eq!(err.input(), "1,x");
        assert!(err.reason().starts_with("imaginary part"));
    }

    #[test]
    fn precision_reports_finest_part() {
        let mixed = Complex::new(Real::Native(1.0), Real::parse("2", Precision::Decimal(30)).unwrap());
        assert_eq!(mixed.precision(), Precision::Decimal(30));
        assert_eq!(c(1.0, 2.0).precision(), Precision::Native);
    }
}
