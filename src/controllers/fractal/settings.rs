use crate::core::actions::render_task::SplitPolicy;
use crate::core::data::circle_area::CircleArea;
use crate::core::data::real::{Precision, Real};
use crate::core::fractals::evaluator::{EvaluatorError, FractalEvaluator};
use crate::core::fractals::function::FractalFunction;
use crate::core::fractals::painters::factory::depth_painter_factory;
use crate::core::fractals::painters::kinds::DepthPainterKind;

pub const DEFAULT_CENTER_X: f64 = -0.5;
pub const DEFAULT_CENTER_Y: f64 = 0.0;
pub const DEFAULT_DIAMETER: f64 = 3.0;
pub const DEFAULT_MAX_DEPTH: u32 = 256;
pub const DEFAULT_ESCAPE_EDGE: f64 = 2.0;
pub const DEFAULT_PIXEL_SCALE: u32 = 1;

/// The full, already validated parameter set of one explorer session.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalSettings {
    pub area: CircleArea,
    pub max_depth: u32,
    pub escape_edge: Real,
    pub painter: DepthPainterKind,
    pub function: FractalFunction,
    pub pixel_scale: u32,
    /// Floor for the coordinate precision; deep zooms may pick a finer one.
    pub precision: Precision,
    pub split_policy: SplitPolicy,
}

impl Default for FractalSettings {
    fn default() -> Self {
        Self {
            area: default_area(),
            max_depth: DEFAULT_MAX_DEPTH,
            escape_edge: Real::Native(DEFAULT_ESCAPE_EDGE),
            painter: DepthPainterKind::default(),
            function: FractalFunction::default(),
            pixel_scale: DEFAULT_PIXEL_SCALE,
            precision: Precision::Native,
            split_policy: SplitPolicy::default(),
        }
    }
}

impl FractalSettings {
    /// Fresh evaluator for the current depth, edge, painter and function.
    pub fn evaluator(&self) -> Result<FractalEvaluator, EvaluatorError> {
        FractalEvaluator::new(
            self.max_depth,
            self.escape_edge.clone(),
            depth_painter_factory(self.painter, self.max_depth),
            self.function.clone(),
        )
    }

    /// Coordinate precision for `area` drawn across `pixels` pixels, never coarser
    /// than [`FractalSettings::precision`].
    #[must_use]
    pub fn precision_for(&self, area: &CircleArea, pixels: u32) -> Precision {
        Precision::suggested_for(area.diameter(), pixels).finer(self.precision)
    }
}

fn default_area() -> CircleArea {
    CircleArea::new_unchecked(
        Real::Native(DEFAULT_CENTER_X),
        Real::Native(DEFAULT_CENTER_Y),
        Real::Native(DEFAULT_DIAMETER),
    )
}

/// Raw text of the parameter fields, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterFields {
    pub pixel_scale: String,
    pub max_depth: String,
    pub escape_edge: String,
    pub painter: String,
}

impl ParameterFields {
    #[must_use]
    pub fn from_settings(settings: &FractalSettings) -> Self {
        Self {
            pixel_scale: settings.pixel_scale.to_string(),
            max_depth: settings.max_depth.to_string(),
            escape_edge: settings.escape_edge.to_string(),
            painter: settings.painter.display_name().to_string(),
        }
    }
}
