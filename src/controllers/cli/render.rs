use log::info;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::controllers::fractal::settings::FractalSettings;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::worker::Worker;
use crate::core::actions::async_task::AsyncTask;
use crate::core::actions::cancellation::Cancelled;
use crate::core::actions::render_task::FractalRenderTask;
use crate::core::data::fractal_image::FractalImage;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::write_image::ExportError;

/// Renders single frames synchronously and hands them to a file presenter.
pub struct CliRenderController<P: FilePresenterPort> {
    presenter: P,
    worker: Worker,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(presenter: P, worker: Worker) -> Self {
        Self {
            presenter,
            worker,
            buffer: None,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Renders `settings` into a `width` x `height` image and keeps the result for
    /// [`CliRenderController::write`].
    pub fn generate(
        &mut self,
        settings: &FractalSettings,
        width: u32,
        height: u32,
    ) -> Result<Duration, Box<dyn std::error::Error>> {
        let image = FractalImage::new(width, height)?;
        let evaluator = Arc::new(settings.evaluator()?);
        let precision = settings.precision_for(&settings.area, width.max(height));
        let area = settings.area.with_precision(precision).fit_to(width, height);

        info!(
            "rendering {} at {} ({}x{}, depth {}, {} precision, {} threads)",
            settings.function,
            settings.area,
            width,
            height,
            settings.max_depth,
            precision,
            self.worker.threads()
        );

        let task = FractalRenderTask::new(image, evaluator, area, settings.split_policy);
        let start = Instant::now();
        let image = self
            .worker
            .run(AsyncTask::new(task))
            .completed()
            .ok_or(Cancelled)?;
        let duration = start.elapsed();

        info!("rendered in {:?}", duration);

        self.buffer = Some(image.snapshot()?);

        Ok(duration)
    }

    /// Writes the last generated frame; does nothing before the first one.
    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), ExportError> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath.as_ref())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::point::Point;
    use crate::presenters::file::image_file::ImageFilePresenter;

    fn controller() -> CliRenderController<ImageFilePresenter> {
        CliRenderController::new(ImageFilePresenter::new(), Worker::new(2).unwrap())
    }

    #[test]
    fn write_before_generate_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        controller().write(&path).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn generate_then_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let settings = FractalSettings {
            max_depth: 64,
            ..FractalSettings::default()
        };
        let mut controller = controller();

        controller.generate(&settings, 30, 20).unwrap();
        controller.write(&path).unwrap();

        let buffer = controller.buffer().unwrap();
        assert_eq!((buffer.width(), buffer.height()), (30, 20));
        // the default view is centred inside the main cardioid
        assert_eq!(buffer.colour_at(Point { x: 15, y: 10 }), Some(Colour::BLACK));

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (30, 20));
        assert_eq!(&decoded.into_raw(), buffer.buffer());
    }

    #[test]
    fn generate_rejects_an_empty_image() {
        let mut controller = controller();

        assert!(controller.generate(&FractalSettings::default(), 0, 10).is_err());
        assert!(controller.buffer().is_none());
    }
}
