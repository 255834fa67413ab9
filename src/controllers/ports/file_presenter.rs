use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::write_image::ExportError;

pub trait FilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), ExportError>;
}
