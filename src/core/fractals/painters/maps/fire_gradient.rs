use crate::core::data::colour::Colour;
use crate::core::fractals::painters::depth_painter::DepthPainter;
use crate::core::fractals::painters::kinds::DepthPainterKind;

/// Black through red and orange to white as the escape depth grows.
#[derive(Debug)]
pub struct FireGradient {
    max_depth: u32,
}

impl FireGradient {
    #[must_use]
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }
}

impl DepthPainter for FireGradient {
    fn colour_for(&self, depth: u32) -> Colour {
        if depth >= self.max_depth {
            return Colour::BLACK;
        }

        let t = f64::from(depth) / f64::from(self.max_depth);

        let (r, g, b) = if t < 0.25 {
            ((t / 0.25 * 255.0) as u8, 0, 0)
        } else if t < 0.5 {
            (255, ((t - 0.25) / 0.25 * 165.0) as u8, 0)
        } else if t < 0.75 {
            (255, (165.0 + (t - 0.5) / 0.25 * 90.0) as u8, 0)
        } else {
            (255, 255, ((t - 0.75) / 0.25 * 255.0) as u8)
        };

        Colour { r, g, b }
    }

    fn max_depth(&self) -> u32 {
        self.max_depth
    }

    fn kind(&self) -> DepthPainterKind {
        DepthPainterKind::FireGradient
    }
}
