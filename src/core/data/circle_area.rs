use crate::core::data::format_error::FormatError;
use crate::core::data::real::{Precision, Real};
use crate::core::data::rect_area::RectArea;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CircleAreaError {
    NonPositiveDiameter { diameter: Real },
}

impl fmt::Display for CircleAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDiameter { diameter } => {
                write!(f, "view diameter must be positive: {}", diameter)
            }
        }
    }
}

impl Error for CircleAreaError {}

/// A view described the way a user types it: a centre and how much of the plane
/// fits across the image.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleArea {
    center_x: Real,
    center_y: Real,
    diameter: Real,
}

impl CircleArea {
    pub fn new(center_x: Real, center_y: Real, diameter: Real) -> Result<Self, CircleAreaError> {
        if !diameter.is_positive() {
            return Err(CircleAreaError::NonPositiveDiameter { diameter });
        }

        Ok(Self {
            center_x,
            center_y,
            diameter,
        })
    }

    /// For constants whose diameter is known to be positive.
    pub(crate) fn new_unchecked(center_x: Real, center_y: Real, diameter: Real) -> Self {
        debug_assert!(diameter.is_positive());

        Self {
            center_x,
            center_y,
            diameter,
        }
    }

    /// Parses the three view fields; a non-positive diameter is reported as a format
    /// error against the diameter text.
    pub fn parse(
        center_x: &str,
        center_y: &str,
        diameter: &str,
        precision: Precision,
    ) -> Result<Self, FormatError> {
        let x = Real::parse(center_x, precision)?;
        let y = Real::parse(center_y, precision)?;
        let d = Real::parse(diameter, precision)?;

        Self::new(x, y, d).map_err(|e| FormatError::new(diameter, e.to_string()))
    }

    #[must_use]
    pub fn center_x(&self) -> &Real {
        &self.center_x
    }

    #[must_use]
    pub fn center_y(&self) -> &Real {
        &self.center_y
    }

    #[must_use]
    pub fn diameter(&self) -> &Real {
        &self.diameter
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.center_x
            .precision()
            .finer(self.center_y.precision())
            .finer(self.diameter.precision())
    }

    #[must_use]
    pub fn with_precision(&self, precision: Precision) -> Self {
        Self {
            center_x: self.center_x.with_precision(precision),
            center_y: self.center_y.with_precision(precision),
            diameter: self.diameter.with_precision(precision),
        }
    }

    /// Square area of side `diameter` centred on the centre.
    #[must_use]
    pub fn to_rect_area(&self) -> RectArea {
        let half = self.diameter.half();
        self.rect_around(&half, &half)
    }

    /// Area with the image's aspect ratio whose shorter side spans `diameter`.
    #[must_use]
    pub fn fit_to(&self, width: u32, height: u32) -> RectArea {
        let precision = self.diameter.precision();
        let half = self.diameter.half();
        let (width, height) = (width.max(1), height.max(1));

        if width >= height {
            let ratio = &Real::from_int(i64::from(width), precision)
                / &Real::from_int(i64::from(height), precision);
            self.rect_around(&(&half * &ratio), &half)
        } else {
            let ratio = &Real::from_int(i64::from(height), precision)
                / &Real::from_int(i64::from(width), precision);
            self.rect_around(&half, &(&half * &ratio))
        }
    }

    fn rect_around(&self, half_width: &Real, half_height: &Real) -> RectArea {
        RectArea::new(
            &self.center_x - half_width,
            &self.center_y - half_height,
            &self.center_x + half_width,
            &self.center_y + half_height,
        )
        .unwrap_or_else(|_| unreachable!("a positive diameter always yields ordered bounds"))
    }
}

impl fmt::Display for CircleArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "centre ({}, {}) diameter {}",
            self.center_x, self.center_y, self.diameter
        )
    }
}
