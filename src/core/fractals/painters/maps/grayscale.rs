use crate::core::data::colour::Colour;
use crate::core::fractals::painters::depth_painter::DepthPainter;
use crate::core::fractals::painters::kinds::DepthPainterKind;

#[derive(Debug)]
pub struct Grayscale {
    max_depth: u32,
}

impl Grayscale {
    #[must_use]
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }
}

impl DepthPainter for Grayscale {
    fn colour_for(&self, depth: u32) -> Colour {
        if depth >= self.max_depth {
            return Colour::BLACK;
        }

        // brightest where points take longest to escape
        let level = (f64::from(depth + 1) / f64::from(self.max_depth) * 255.0) as u8;

        Colour {
            r: level,
            g: level,
            b: level,
        }
    }

    fn max_depth(&self) -> u32 {
        self.max_depth
    }

    fn kind(&self) -> DepthPainterKind {
        DepthPainterKind::Grayscale
    }
}
