use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::write_image::{ExportError, write_image};
use log::info;
use std::path::Path;

/// Writes frames to disk in whatever raster format the file extension names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFilePresenter {}

impl ImageFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for ImageFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), ExportError> {
        write_image(buffer, filepath)?;

        info!(
            "wrote {}x{} image to {}",
            buffer.width(),
            buffer.height(),
            filepath.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_rect::PixelRect;

    #[test]
    fn present_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let buffer =
            PixelBuffer::from_data(PixelRect::from_size(1, 1).unwrap(), vec![1, 2, 3]).unwrap();

        ImageFilePresenter::new().present(&buffer, &path).unwrap();

        assert!(path.exists());
    }
}
