use log::{debug, error, warn};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::controllers::fractal::settings::{FractalSettings, ParameterFields};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::worker::{Worker, WorkerController};
use crate::core::data::circle_area::CircleArea;
use crate::core::data::format_error::FormatError;
use crate::core::data::fractal_image::{FractalImage, FractalImageError};
use crate::core::data::real::{GUARD_DIGITS, Precision, Real};
use crate::core::data::rect_area::RectArea;
use crate::core::fractals::evaluator::EvaluatorError;
use crate::core::fractals::function::FractalFunction;
use crate::core::fractals::painters::kinds::DepthPainterKind;

#[derive(Debug, Clone, PartialEq)]
pub enum FractalControllerError {
    Format(FormatError),
    Evaluator(EvaluatorError),
    Image(FractalImageError),
    NoFrame,
}

impl fmt::Display for FractalControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(err) => write!(f, "{}", err),
            Self::Evaluator(err) => write!(f, "{}", err),
            Self::Image(err) => write!(f, "{}", err),
            Self::NoFrame => write!(f, "no frame has been rendered yet"),
        }
    }
}

impl Error for FractalControllerError {}

impl From<FormatError> for FractalControllerError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

impl From<EvaluatorError> for FractalControllerError {
    fn from(err: EvaluatorError) -> Self {
        Self::Evaluator(err)
    }
}

impl From<FractalImageError> for FractalControllerError {
    fn from(err: FractalImageError) -> Self {
        Self::Image(err)
    }
}

fn parse_count(text: &str, what: &str) -> Result<u32, FormatError> {
    let value = text
        .trim()
        .parse::<u32>()
        .map_err(|e| FormatError::new(text, format!("{}: {}", what, e)))?;

    if value == 0 {
        return Err(FormatError::new(text, format!("{} must be at least 1", what)));
    }

    Ok(value)
}

/// Parameters accepted by [`FractalController::update_parameters`].
struct ParsedFields {
    pixel_scale: u32,
    max_depth: u32,
    escape_edge: Real,
    painter: DepthPainterKind,
}

impl ParsedFields {
    fn parse(fields: &ParameterFields) -> Result<Self, FormatError> {
        Ok(Self {
            pixel_scale: parse_count(&fields.pixel_scale, "pixel scale")?,
            max_depth: parse_count(&fields.max_depth, "max depth")?,
            escape_edge: Real::parse(&fields.escape_edge, Precision::Native)?,
            painter: DepthPainterKind::from_name(&fields.painter)?,
        })
    }
}

/// Turns raw field edits into renders.
///
/// Holds the last accepted [`FractalSettings`]. Every operation validates its input
/// first and only then touches the settings or the [`WorkerController`], so a
/// rejected edit leaves the previous render and settings in place.
pub struct FractalController<P: FilePresenterPort + Send + Sync + 'static> {
    settings: FractalSettings,
    initial_area: CircleArea,
    window: Option<(u32, u32)>,
    image_size: Option<(u32, u32)>,
    worker_controller: WorkerController,
    presenter: Arc<P>,
}

impl<P: FilePresenterPort + Send + Sync + 'static> FractalController<P> {
    /// Nothing renders until the first [`FractalController::resize`].
    pub fn new(
        settings: FractalSettings,
        worker: Worker,
        presenter: P,
    ) -> Result<Self, FractalControllerError> {
        let settings = FractalSettings {
            area: settings.area.with_precision(settings.precision),
            ..settings
        };
        let worker_controller = WorkerController::new(worker, settings.split_policy);

        worker_controller.update_evaluator(Arc::new(settings.evaluator()?));

        Ok(Self {
            initial_area: settings.area.clone(),
            settings,
            window: None,
            image_size: None,
            worker_controller,
            presenter: Arc::new(presenter),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &FractalSettings {
        &self.settings
    }

    #[must_use]
    pub fn area(&self) -> &CircleArea {
        &self.settings.area
    }

    #[must_use]
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    /// Register listeners here to receive frames and area changes.
    #[must_use]
    pub fn worker_controller(&self) -> &WorkerController {
        &self.worker_controller
    }

    /// Applies pixel scale, max depth, escape edge and painter in one go.
    pub fn update_parameters(
        &mut self,
        fields: &ParameterFields,
    ) -> Result<Option<u64>, FractalControllerError> {
        let parsed = ParsedFields::parse(fields)
            .inspect_err(|err| warn!("rejected parameters: {}", err))?;

        let candidate = FractalSettings {
            pixel_scale: parsed.pixel_scale,
            max_depth: parsed.max_depth,
            escape_edge: parsed.escape_edge,
            painter: parsed.painter,
            ..self.settings.clone()
        };
        let evaluator = candidate
            .evaluator()
            .inspect_err(|err| warn!("rejected parameters: {}", err))?;

        let view = if candidate.pixel_scale == self.settings.pixel_scale {
            None
        } else {
            self.view_for(&candidate)?
        };
        self.settings = candidate;
        let evaluator = Arc::new(evaluator);

        let Some((image, area)) = view else {
            return Ok(self.worker_controller.update_evaluator(evaluator));
        };

        self.image_size = Some((image.width(), image.height()));
        Ok(self.worker_controller.update_render(evaluator, image, area))
    }

    /// Centres the view on `(x, y)` with the given diameter.
    ///
    /// The fields are read at a generous decimal precision first, so a deep zoom
    /// typed by hand does not lose digits before the real precision is chosen.
    pub fn move_to(
        &mut self,
        x: &str,
        y: &str,
        diameter: &str,
    ) -> Result<Option<u64>, FractalControllerError> {
        let digits = [x, y, diameter]
            .iter()
            .map(|text| text.trim().len())
            .max()
            .unwrap_or_default()
            + GUARD_DIGITS;

        let area = CircleArea::parse(x, y, diameter, Precision::Decimal(digits))
            .inspect_err(|err| warn!("rejected area: {}", err))?;

        let pixels = self
            .image_size
            .map_or(1, |(width, height)| width.max(height));
        let precision = self.settings.precision_for(&area, pixels);

        debug!("moving to {} with {} precision", diameter.trim(), precision);

        Ok(self.set_area(area.with_precision(precision)))
    }

    pub fn reset_zoom(&mut self) -> Option<u64> {
        self.set_area(self.initial_area.clone())
    }

    /// Switches the painter by its display name.
    pub fn select_painter(&mut self, name: &str) -> Result<Option<u64>, FractalControllerError> {
        let painter = DepthPainterKind::from_name(name)
            .inspect_err(|err| warn!("rejected painter: {}", err))?;

        self.replace_evaluator(FractalSettings {
            painter,
            ..self.settings.clone()
        })
    }

    pub fn update_function(
        &mut self,
        function: FractalFunction,
    ) -> Result<Option<u64>, FractalControllerError> {
        self.replace_evaluator(FractalSettings {
            function,
            ..self.settings.clone()
        })
    }

    /// Reallocates the image for a window of the given size.
    pub fn resize(
        &mut self,
        window_width: u32,
        window_height: u32,
    ) -> Result<Option<u64>, FractalControllerError> {
        self.window = Some((window_width, window_height));
        self.refresh_view()
    }

    /// Exports the latest frame on a background thread; failures are logged there.
    pub fn save_image(
        &self,
        path: impl Into<PathBuf>,
    ) -> Result<JoinHandle<()>, FractalControllerError> {
        let frame = self
            .worker_controller
            .last_frame()
            .ok_or(FractalControllerError::NoFrame)?;
        let presenter = Arc::clone(&self.presenter);
        let path = path.into();

        Ok(thread::spawn(move || {
            if let Err(err) = presenter.present(&frame.pixel_buffer, &path) {
                error!("failed to save {}: {}", path.display(), err);
            }
        }))
    }

    fn replace_evaluator(
        &mut self,
        candidate: FractalSettings,
    ) -> Result<Option<u64>, FractalControllerError> {
        let evaluator = candidate
            .evaluator()
            .inspect_err(|err| warn!("rejected evaluator: {}", err))?;

        self.settings = candidate;

        Ok(self.worker_controller.update_evaluator(Arc::new(evaluator)))
    }

    fn set_area(&mut self, area: CircleArea) -> Option<u64> {
        self.settings.area = area;
        self.worker_controller.publish_area(self.settings.area.clone());

        let (width, height) = self.image_size?;
        self.worker_controller
            .update_area(self.settings.area.fit_to(width, height))
    }

    fn refresh_view(&mut self) -> Result<Option<u64>, FractalControllerError> {
        let Some((image, area)) = self.view_for(&self.settings)? else {
            return Ok(None);
        };

        self.image_size = Some((image.width(), image.height()));
        Ok(self.worker_controller.update_view(image, area))
    }

    /// Image and plane area for the current window under `settings`; `None` before
    /// the first resize.
    fn view_for(
        &self,
        settings: &FractalSettings,
    ) -> Result<Option<(FractalImage, RectArea)>, FractalControllerError> {
        let Some((window_width, window_height)) = self.window else {
            return Ok(None);
        };

        let scale = settings.pixel_scale.max(1);
        let width = (window_width / scale).max(1);
        let height = (window_height / scale).max(1);
        let image = FractalImage::new(width, height)?;

        Ok(Some((image, settings.area.fit_to(width, height))))
    }
}
