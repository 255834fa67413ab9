use crate::core::data::complex::Complex;
use std::fmt;

/// The recurrence `z -> z² + c` of one fractal family.
///
/// Mandelbrot takes `c` from the sampled point and starts at zero; Julia keeps `c`
/// fixed and starts at the sampled point.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FractalFunction {
    #[default]
    Mandelbrot,
    Julia { c: Complex },
}

impl FractalFunction {
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }

    /// Fresh, unbounded sequence of iterates for `start`, beginning with `z1`.
    #[must_use]
    pub fn evaluate(&self, start: &Complex) -> Orbit {
        match self {
            Self::Mandelbrot => Orbit {
                z: Complex::zero(start.precision()),
                c: start.clone(),
            },
            Self::Julia { c } => Orbit {
                z: start.clone(),
                c: c.clone(),
            },
        }
    }
}

impl fmt::Display for FractalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandelbrot => f.write_str(self.display_name()),
            Self::Julia { c } => write!(f, "{} ({})", self.display_name(), c),
        }
    }
}

/// Infinite iterator over `z_{n+1} = z_n² + c`; callers bound it with `take`.
#[derive(Debug, Clone)]
pub struct Orbit {
    z: Complex,
    c: Complex,
}

impl Iterator for Orbit {
    type Item = Complex;

    fn next(&mut self) -> Option<Complex> {
        self.z = self.z.square() + &self.c;
        Some(self.z.clone())
    }
}
