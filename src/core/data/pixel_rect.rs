use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelRectError {
    InvalidSize { width: i64, height: i64 },
}

impl fmt::Display for PixelRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "pixel rect size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for PixelRectError {}

/// Splits `len` into `parts` contiguous runs, the leading runs taking one extra
/// pixel each when `len` does not divide evenly.
fn band_lengths(len: u32, parts: u32) -> impl Iterator<Item = u32> {
    let base = len / parts;
    let remainder = len % parts;

    (0..parts).map(move |k| base + u32::from(k < remainder))
}

/// Inclusive rectangle of pixels; `top_left` is the first row in raster order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, PixelRectError> {
        let width = i64::from(bottom_right.x) - i64::from(top_left.x) + 1;
        let height = i64::from(bottom_right.y) - i64::from(top_left.y) + 1;

        if width < 1 || height < 1 {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Rect of `width` by `height` pixels anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Result<Self, PixelRectError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(PixelRectError::InvalidSize {
                width: i64::from(width),
                height: i64::from(height),
            });
        }

        Self::new(
            Point { x: 0, y: 0 },
            Point {
                x: width as i32 - 1,
                y: height as i32 - 1,
            },
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Partitions into a `rows` x `cols` grid, clamped so that no cell is empty.
    ///
    /// Cells come back row-major with row 0 being the *bottom* band of pixels, the
    /// same order `RectArea::subdivide` uses for the plane, so the two grids can be
    /// zipped cell for cell.
    #[must_use]
    pub fn split(&self, rows: u32, cols: u32) -> Vec<PixelRect> {
        let rows = rows.clamp(1, self.height());
        let cols = cols.clamp(1, self.width());

        let mut cells = Vec::with_capacity((rows * cols) as usize);
        let mut bottom = self.bottom_right.y;

        for band_height in band_lengths(self.height(), rows) {
            let top = bottom - band_height as i32 + 1;
            let mut left = self.top_left.x;

            for band_width in band_lengths(self.width(), cols) {
                let right = left + band_width as i32 - 1;
                cells.push(Self {
                    top_left: Point { x: left, y: top },
                    bottom_right: Point {
                        x: right,
                        y: bottom,
                    },
                });
                left = right + 1;
            }

            bottom = top - 1;
        }

        cells
    }
}
