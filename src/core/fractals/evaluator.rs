use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::data::real::Real;
use crate::core::fractals::function::FractalFunction;
use crate::core::fractals::painters::depth_painter::DepthPainter;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    ZeroMaxDepth,
    NonPositiveEscapeEdge { escape_edge: Real },
    PainterDepthMismatch { max_depth: u32, painter_max_depth: u32 },
}

impl fmt::Display for EvaluatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxDepth => write!(f, "maximum depth must be greater than zero"),
            Self::NonPositiveEscapeEdge { escape_edge } => {
                write!(f, "escape edge must be positive: {}", escape_edge)
            }
            Self::PainterDepthMismatch {
                max_depth,
                painter_max_depth,
            } => {
                write!(
                    f,
                    "painter is scaled for depth {} but the evaluator stops at {}",
                    painter_max_depth, max_depth
                )
            }
        }
    }
}

impl Error for EvaluatorError {}

/// Everything needed to colour one sampled point. Never mutated after construction;
/// changing any parameter means building a new evaluator.
#[derive(Debug)]
pub struct FractalEvaluator {
    max_depth: u32,
    escape_edge: Real,
    escape_edge_squared: Real,
    painter: Box<dyn DepthPainter>,
    function: FractalFunction,
}

impl FractalEvaluator {
    pub fn new(
        max_depth: u32,
        escape_edge: Real,
        painter: Box<dyn DepthPainter>,
        function: FractalFunction,
    ) -> Result<Self, EvaluatorError> {
        if max_depth == 0 {
            return Err(EvaluatorError::ZeroMaxDepth);
        }

        if !escape_edge.is_positive() {
            return Err(EvaluatorError::NonPositiveEscapeEdge { escape_edge });
        }

        if painter.max_depth() != max_depth {
            return Err(EvaluatorError::PainterDepthMismatch {
                max_depth,
                painter_max_depth: painter.max_depth(),
            });
        }

        Ok(Self {
            max_depth,
            escape_edge_squared: escape_edge.square(),
            escape_edge,
            painter,
            function,
        })
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[must_use]
    pub fn escape_edge(&self) -> &Real {
        &self.escape_edge
    }

    #[must_use]
    pub fn painter(&self) -> &dyn DepthPainter {
        self.painter.as_ref()
    }

    #[must_use]
    pub fn function(&self) -> &FractalFunction {
        &self.function
    }

    /// Index of the first iterate outside the escape circle, or `max_depth` if the
    /// orbit stays inside for every iterate considered.
    #[must_use]
    pub fn depth(&self, value: &Complex) -> u32 {
        self.function
            .evaluate(value)
            .take(self.max_depth as usize)
            .position(|z| z.magnitude_squared() > self.escape_edge_squared)
            .map_or(self.max_depth, |depth| depth as u32)
    }

    #[must_use]
    pub fn evaluate(&self, value: &Complex) -> Colour {
        self.painter.colour_for(self.depth(value))
    }
}
