pub mod controllers;
pub mod core;
pub mod presenters;
pub mod storage;

pub use crate::controllers::cli::render::CliRenderController;
pub use crate::controllers::fractal::{
    FractalController, FractalControllerError, FractalSettings, ParameterFields,
};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::controllers::worker::{
    FrameData, ListenerId, RenderEvent, RenderPresenterPort, Worker, WorkerController, WorkerError,
};
pub use crate::core::actions::async_task::{AsyncTask, TaskOutcome};
pub use crate::core::actions::cancellation::{CancelToken, CancellationFlag, Cancelled, NeverCancel};
pub use crate::core::actions::ports::splittable_task::SplittableTask;
pub use crate::core::actions::render_task::{FractalRenderTask, SplitPolicy};
pub use crate::core::data::circle_area::CircleArea;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::format_error::FormatError;
pub use crate::core::data::fractal_image::{FractalImage, ImageView};
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::real::{Precision, Real};
pub use crate::core::data::rect_area::RectArea;
pub use crate::core::fractals::evaluator::FractalEvaluator;
pub use crate::core::fractals::function::FractalFunction;
pub use crate::core::fractals::painters::factory::depth_painter_factory;
pub use crate::core::fractals::painters::kinds::DepthPainterKind;
pub use crate::presenters::file::image_file::ImageFilePresenter;
pub use crate::storage::write_image::{ExportError, write_image};
