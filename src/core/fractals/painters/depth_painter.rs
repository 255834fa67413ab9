use crate::core::data::colour::Colour;
use crate::core::fractals::painters::kinds::DepthPainterKind;
use std::fmt;

/// Maps an escape depth in `0..=max_depth` to a colour.
///
/// `max_depth` means the point never escaped and paints the interior colour.
/// Depths past the maximum are treated the same way.
pub trait DepthPainter: fmt::Debug + Send + Sync {
    fn colour_for(&self, depth: u32) -> Colour;

    fn max_depth(&self) -> u32;

    fn kind(&self) -> DepthPainterKind;

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}
