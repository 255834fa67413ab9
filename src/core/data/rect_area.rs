use crate::core::data::circle_area::{CircleArea, CircleAreaError};
use crate::core::data::complex::Complex;
use crate::core::data::real::Real;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RectAreaError {
    InvalidSize { width: Real, height: Real },
    EmptyGrid { rows: u32, cols: u32 },
}

impl fmt::Display for RectAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "rect area size must not be negative: {}x{}",
                    width, height
                )
            }
            Self::EmptyGrid { rows, cols } => {
                write!(f, "cannot subdivide into a {}x{} grid", rows, cols)
            }
        }
    }
}

impl Error for RectAreaError {}

/// `steps + 1` evenly spaced points from `start` to `end`, both ends included verbatim.
pub(crate) fn interpolate(start: &Real, end: &Real, steps: u32) -> Vec<Real> {
    let precision = start.precision().finer(end.precision());
    let span = end - start;
    let divisor = Real::from_int(i64::from(steps), precision);

    (0..=steps)
        .map(|k| {
            if k == 0 {
                start.clone()
            } else if k == steps {
                end.clone()
            } else {
                let offset = &(&span * &Real::from_int(i64::from(k), precision)) / &divisor;
                start + &offset
            }
        })
        .collect()
}

/// Axis-aligned region of the complex plane. `(x0, y0)` is the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RectArea {
    x0: Real,
    y0: Real,
    x1: Real,
    y1: Real,
}

impl RectArea {
    pub fn new(x0: Real, y0: Real, x1: Real, y1: Real) -> Result<Self, RectAreaError> {
        let width = &x1 - &x0;
        let height = &y1 - &y0;

        if width.is_negative() || height.is_negative() {
            return Err(RectAreaError::InvalidSize { width, height });
        }

        Ok(Self { x0, y0, x1, y1 })
    }

    #[must_use]
    pub fn x0(&self) -> &Real {
        &self.x0
    }

    #[must_use]
    pub fn y0(&self) -> &Real {
        &self.y0
    }

    #[must_use]
    pub fn x1(&self) -> &Real {
        &self.x1
    }

    #[must_use]
    pub fn y1(&self) -> &Real {
        &self.y1
    }

    #[must_use]
    pub fn width(&self) -> Real {
        &self.x1 - &self.x0
    }

    #[must_use]
    pub fn height(&self) -> Real {
        &self.y1 - &self.y0
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex::new(
            (&self.x0 + &self.x1).half(),
            (&self.y0 + &self.y1).half(),
        )
    }

    #[must_use]
    pub fn contains_point(&self, point: &Complex) -> bool {
        self.x0 <= point.real
            && self.y0 <= point.imag
            && self.x1 >= point.real
            && self.y1 >= point.imag
    }

    /// Splits into `rows * cols` equal cells, returned row-major with row 0 at the
    /// bottom (lowest imaginary part). Neighbouring cells share their edge values
    /// exactly, and the outer edges are this area's own.
    pub fn subdivide(&self, rows: u32, cols: u32) -> Result<Vec<RectArea>, RectAreaError> {
        if rows == 0 || cols == 0 {
            return Err(RectAreaError::EmptyGrid { rows, cols });
        }

        let xs = interpolate(&self.x0, &self.x1, cols);
        let ys = interpolate(&self.y0, &self.y1, rows);

        let mut cells = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows as usize {
            for col in 0..cols as usize {
                cells.push(RectArea {
                    x0: xs[col].clone(),
                    y0: ys[row].clone(),
                    x1: xs[col + 1].clone(),
                    y1: ys[row + 1].clone(),
                });
            }
        }

        Ok(cells)
    }

    /// Smallest centred circle area whose square bounding box covers this rect.
    pub fn to_circle_area(&self) -> Result<CircleArea, CircleAreaError> {
        let center = self.center();
        CircleArea::new(center.real, center.imag, self.width().max(self.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::real::Precision;

    fn r(value: f64) -> Real {
        Real::Native(value)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> RectArea {
        RectArea::new(r(x0), r(y0), r(x1), r(y1)).unwrap()
    }

    #[test]
    fn test_rect_area_new_valid() {
        let area = rect(-2.0, -1.0, 1.0, 1.0);

        assert_eq!(area.x0(), &r(-2.0));
        assert_eq!(area.y1(), &r(1.0));
        assert_eq!(area.width(), r(3.0));
        assert_eq!(area.height(), r(2.0));
    }

    #[test]
    fn test_rect_area_allows_degenerate_size() {
        assert!(RectArea::new(r(1.0), r(1.0), r(1.0), r(1.0)).is_ok());
    }

    #[test]
    fn test_rect_area_rejects_inverted_bounds() {
        assert_eq!(
            RectArea::new(r(0.0), r(0.0), r(-1.0), r(2.0)),
            Err(RectAreaError::InvalidSize {
                width: r(-1.0),
                height: r(2.0)
            })
        );
        assert!(RectArea::new(r(0.0), r(0.0), r(1.0), r(-2.0)).is_err());
    }

    #[test]
    fn test_contains_point() {
        let area = rect(-10.0, -5.0, 100.0, 200.0);

        assert!(area.contains_point(&Complex::new(r(50.0), r(50.0))));
        assert!(area.contains_point(&Complex::new(r(-10.0), r(200.0))));
        assert!(!area.contains_point(&Complex::new(r(101.0), r(50.0))));
        assert!(!area.contains_point(&Complex::new(r(50.0), r(-6.0))));
    }

    #[test]
    fn test_subdivide_rejects_empty_grid() {
        let area = rect(0.0, 0.0, 1.0, 1.0);

        assert_eq!(
            area.subdivide(0, 3),
            Err(RectAreaError::EmptyGrid { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn test_subdivide_row_zero_is_bottom() {
        let area = rect(0.0, 0.0, 4.0, 2.0);
        let cells = area.subdivide(2, 2).unwrap();

        assert_eq!(cells[0], rect(0.0, 0.0, 2.0, 1.0));
        assert_eq!(cells[1], rect(2.0, 0.0, 4.0, 1.0));
        assert_eq!(cells[2], rect(0.0, 1.0, 2.0, 2.0));
        assert_eq!(cells[3], rect(2.0, 1.0, 4.0, 2.0));
    }

    fn assert_tiles(area: &RectArea, rows: u32, cols: u32) {
        let cells = area.subdivide(rows, cols).unwrap();
        assert_eq!(cells.len(), (rows * cols) as usize);

        for row in 0..rows as usize {
            for col in 0..cols as usize {
                let cell = &cells[row * cols as usize + col];

                if col == 0 {
                    assert_eq!(cell.x0(), area.x0());
                } else {
                    assert_eq!(cell.x0(), cells[row * cols as usize + col - 1].x1());
                }
                if col == cols as usize - 1 {
                    assert_eq!(cell.x1(), area.x1());
                }
                if row == 0 {
                    assert_eq!(cell.y0(), area.y0());
                } else {
                    assert_eq!(cell.y0(), cells[(row - 1) * cols as usize + col].y1());
                }
                if row == rows as usize - 1 {
                    assert_eq!(cell.y1(), area.y1());
                }
                assert!(!cell.width().is_negative());
                assert!(!cell.height().is_negative());
            }
        }
    }

    #[test]
    fn test_subdivide_reconstructs_area() {
        let native = rect(-2.5, -1.25, 1.0, 1.3);
        let deep = RectArea::new(
            Real::parse("-0.7436438870371587", Precision::Decimal(50)).unwrap(),
            Real::parse("0.1318259042053119", Precision::Decimal(50)).unwrap(),
            Real::parse("-0.7436438870371586", Precision::Decimal(50)).unwrap(),
            Real::parse("0.1318259042053120", Precision::Decimal(50)).unwrap(),
        )
        .unwrap();

        for (rows, cols) in [(1, 1), (3, 7), (4, 4), (5, 2)] {
            assert_tiles(&native, rows, cols);
            assert_tiles(&deep, rows, cols);
        }
    }

    #[test]
    fn test_to_circle_area_uses_longest_side() {
        let circle = rect(-2.0, -1.0, 2.0, 1.0).to_circle_area().unwrap();

        assert_eq!(circle.center_x(), &r(0.0));
        assert_eq!(circle.center_y(), &r(0.0));
        assert_eq!(circle.diameter(), &r(4.0));
    }

    #[test]
    fn test_interpolate_includes_both_ends() {
        let points = interpolate(&r(1.0), &r(2.0), 4);

        assert_eq!(points, vec![r(1.0), r(1.25), r(1.5), r(1.75), r(2.0)]);
    }
}
