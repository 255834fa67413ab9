use crate::core::data::colour::Colour;
use crate::core::fractals::painters::depth_painter::DepthPainter;
use crate::core::fractals::painters::kinds::DepthPainterKind;

/// Smooth polynomial palette running from deep blue to pale white.
#[derive(Debug)]
pub struct BlueWhiteGradient {
    max_depth: u32,
}

impl BlueWhiteGradient {
    #[must_use]
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }
}

impl DepthPainter for BlueWhiteGradient {
    fn colour_for(&self, depth: u32) -> Colour {
        if depth >= self.max_depth {
            return Colour::BLACK;
        }

        let t = f64::from(depth) / f64::from(self.max_depth);
        let s = 1.0 - t;

        Colour {
            r: (9.0 * s * t * t * t * 255.0) as u8,
            g: (15.0 * s * s * t * t * 255.0) as u8,
            b: (8.5 * s * s * s * t * 255.0) as u8,
        }
    }

    fn max_depth(&self) -> u32 {
        self.max_depth
    }

    fn kind(&self) -> DepthPainterKind {
        DepthPainterKind::BlueWhiteGradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_and_overflow_are_black() {
        let painter = BlueWhiteGradient::new(100);

        assert_eq!(painter.colour_for(100), Colour::BLACK);
        assert_eq!(painter.colour_for(250), Colour::BLACK);
    }

    #[test]
    fn test_midpoint_gradient() {
        let painter = BlueWhiteGradient::new(100);

        assert_eq!(painter.colour_for(50), Colour { r: 143, g: 239, b: 135 });
    }
}
