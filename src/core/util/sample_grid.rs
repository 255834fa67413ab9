use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::rect_area::{RectArea, interpolate};
use crate::core::data::real::Real;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SampleGridError {
    PointOutsideGrid { point: Point, pixel_rect: PixelRect },
}

impl fmt::Display for SampleGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideGrid { point, pixel_rect } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the {}x{} sample grid",
                    point.x,
                    point.y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
        }
    }
}

impl Error for SampleGridError {}

/// Plane coordinate of every pixel column and row of one image.
///
/// Column `i` samples `x0 + width * i / W`. Pixel rows run top-down while the plane's
/// imaginary axis runs bottom-up, so row `r` samples `y0 + height * (H - 1 - r) / H`;
/// this is the only place that flip happens. Built once per render and shared by
/// every task, it makes each pixel's coordinate independent of how the render was
/// subdivided.
#[derive(Debug)]
pub struct SampleGrid {
    pixel_rect: PixelRect,
    /// `W + 1` values; the last one is the area's right edge.
    x_edges: Vec<Real>,
    /// `H + 1` values from the bottom edge up.
    y_edges: Vec<Real>,
    /// Row samples, top row first.
    rows: Vec<Real>,
}

impl SampleGrid {
    #[must_use]
    pub fn new(area: &RectArea, pixel_rect: PixelRect) -> Self {
        let width = pixel_rect.width();
        let height = pixel_rect.height();

        let x_edges = interpolate(area.x0(), area.x1(), width);
        let y_edges = interpolate(area.y0(), area.y1(), height);
        let rows = y_edges.iter().take(height as usize).rev().cloned().collect();

        Self {
            pixel_rect,
            x_edges,
            y_edges,
            rows,
        }
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    pub fn sample(&self, point: Point) -> Result<Complex, SampleGridError> {
        match (self.column_values(point.x, 1).first(), self.row_values(point.y, 1).first()) {
            (Some(real), Some(imag)) => Ok(Complex::new(real.clone(), imag.clone())),
            _ => Err(SampleGridError::PointOutsideGrid {
                point,
                pixel_rect: self.pixel_rect,
            }),
        }
    }

    /// Real parts for the columns of `rect`, clipped to the grid.
    #[must_use]
    pub fn columns(&self, rect: PixelRect) -> &[Real] {
        self.column_values(rect.top_left().x, rect.width())
    }

    /// Imaginary parts for the rows of `rect`, top row first, clipped to the grid.
    #[must_use]
    pub fn rows(&self, rect: PixelRect) -> &[Real] {
        self.row_values(rect.top_left().y, rect.height())
    }

    /// Plane area spanned by the pixels of `rect`: from the left edge of its first
    /// column to the left edge of the column after its last, and from the bottom
    /// edge of its lowest row to the bottom edge of the row above its top one.
    /// Neighbouring rects get areas that share their edges exactly. `None` unless
    /// `rect` lies inside the grid.
    #[must_use]
    pub fn area_of(&self, rect: PixelRect) -> Option<RectArea> {
        let origin = self.pixel_rect.top_left();
        let left = usize::try_from(rect.top_left().x - origin.x).ok()?;
        let top = usize::try_from(rect.top_left().y - origin.y).ok()?;
        let right = left + rect.width() as usize;
        let height = self.pixel_rect.height() as usize;
        let bottom = height.checked_sub(top + rect.height() as usize)?;
        let upper = height - top;

        RectArea::new(
            self.x_edges.get(left)?.clone(),
            self.y_edges.get(bottom)?.clone(),
            self.x_edges.get(right)?.clone(),
            self.y_edges.get(upper)?.clone(),
        )
        .ok()
    }

    fn column_values(&self, x: i32, count: u32) -> &[Real] {
        let columns = &self.x_edges[..self.pixel_rect.width() as usize];
        slice_from(columns, x - self.pixel_rect.top_left().x, count)
    }

    fn row_values(&self, y: i32, count: u32) -> &[Real] {
        slice_from(&self.rows, y - self.pixel_rect.top_left().y, count)
    }
}

fn slice_from(values: &[Real], offset: i32, count: u32) -> &[Real] {
    let Ok(start) = usize::try_from(offset) else {
        return &[];
    };

    let start = start.min(values.len());
    let end = start.saturating_add(count as usize).min(values.len());

    &values[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(value: f64) -> Real {
        Real::Native(value)
    }

    fn grid(width: u32, height: u32) -> SampleGrid {
        let area = RectArea::new(r(-2.0), r(-1.0), r(2.0), r(1.0)).unwrap();
        SampleGrid::new(&area, PixelRect::from_size(width, height).unwrap())
    }

    #[test]
    fn test_top_left_pixel_samples_top_of_area() {
        let grid = grid(4, 4);
        let top_left = grid.sample(Point { x: 0, y: 0 }).unwrap();

        // rows are spaced by height / 4 = 0.5; the top row is 3 steps above y0
        assert_eq!(top_left, Complex::new(r(-2.0), r(0.5)));
    }

    #[test]
    fn test_bottom_left_pixel_samples_area_origin() {
        let grid = grid(4, 4);

        assert_eq!(
            grid.sample(Point { x: 0, y: 3 }).unwrap(),
            Complex::new(r(-2.0), r(-1.0))
        );
        assert_eq!(
            grid.sample(Point { x: 3, y: 3 }).unwrap(),
            Complex::new(r(1.0), r(-1.0))
        );
    }

    #[test]
    fn test_point_outside_grid_fails() {
        let grid = grid(4, 4);

        for point in [Point { x: 4, y: 0 }, Point { x: 0, y: -1 }] {
            assert_eq!(
                grid.sample(point),
                Err(SampleGridError::PointOutsideGrid {
                    point,
                    pixel_rect: grid.pixel_rect()
                })
            );
        }
    }

    #[test]
    fn test_columns_and_rows_for_sub_rect() {
        let grid = grid(4, 4);
        let rect = PixelRect::new(Point { x: 1, y: 2 }, Point { x: 2, y: 3 }).unwrap();

        assert_eq!(grid.columns(rect), &[r(-1.0), r(0.0)]);
        assert_eq!(grid.rows(rect), &[r(-0.5), r(-1.0)]);
    }

    #[test]
    fn test_area_of_whole_grid_is_the_area() {
        let grid = grid(4, 4);

        assert_eq!(
            grid.area_of(grid.pixel_rect()),
            Some(RectArea::new(r(-2.0), r(-1.0), r(2.0), r(1.0)).unwrap())
        );
    }

    #[test]
    fn test_area_of_uneven_bands_follows_pixels() {
        let grid = grid(5, 3);
        let left = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 2, y: 1 }).unwrap();
        let right = PixelRect::new(Point { x: 3, y: 0 }, Point { x: 4, y: 1 }).unwrap();
        let bottom = PixelRect::new(Point { x: 0, y: 2 }, Point { x: 2, y: 2 }).unwrap();

        let left_area = grid.area_of(left).unwrap();
        let right_area = grid.area_of(right).unwrap();
        let bottom_area = grid.area_of(bottom).unwrap();
        let column_three = grid.sample(Point { x: 3, y: 0 }).unwrap().real;
        let row_one = grid.sample(Point { x: 0, y: 1 }).unwrap().imag;

        assert_eq!(left_area.x0(), &r(-2.0));
        assert_eq!(left_area.x1(), &column_three);
        assert_eq!(right_area.x0(), &column_three);
        assert_eq!(right_area.x1(), &r(2.0));
        assert_eq!(left_area.y0(), &row_one);
        assert_eq!(left_area.y1(), &r(1.0));
        assert_eq!(bottom_area.y0(), &r(-1.0));
        assert_eq!(bottom_area.y1(), &row_one);
    }

    #[test]
    fn test_area_of_rect_outside_grid_is_none() {
        let grid = grid(4, 4);
        let overhanging = PixelRect::new(Point { x: 2, y: 2 }, Point { x: 4, y: 3 }).unwrap();

        assert_eq!(grid.area_of(overhanging), None);
    }

    #[test]
    fn test_clipped_slices() {
        let grid = grid(4, 4);
        let overhanging = PixelRect::new(Point { x: 3, y: 3 }, Point { x: 6, y: 6 }).unwrap();

        assert_eq!(grid.columns(overhanging).len(), 1);
        assert_eq!(grid.rows(overhanging).len(), 1);
    }
}
