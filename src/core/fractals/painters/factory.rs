use crate::core::fractals::painters::depth_painter::DepthPainter;
use crate::core::fractals::painters::kinds::DepthPainterKind;
use crate::core::fractals::painters::maps::blue_white_gradient::BlueWhiteGradient;
use crate::core::fractals::painters::maps::fire_gradient::FireGradient;
use crate::core::fractals::painters::maps::grayscale::Grayscale;

#[must_use]
pub fn depth_painter_factory(kind: DepthPainterKind, max_depth: u32) -> Box<dyn DepthPainter> {
    match kind {
        DepthPainterKind::FireGradient => Box::new(FireGradient::new(max_depth)),
        DepthPainterKind::BlueWhiteGradient => Box::new(BlueWhiteGradient::new(max_depth)),
        DepthPainterKind::Grayscale => Box::new(Grayscale::new(max_depth)),
    }
}
