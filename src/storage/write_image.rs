use crate::core::data::pixel_buffer::PixelBuffer;
use image::{ImageError, RgbImage};
use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum ExportError {
    BufferSize {
        width: u32,
        height: u32,
        buffer_size: usize,
    },
    Encode(ImageError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferSize {
                width,
                height,
                buffer_size,
            } => write!(
                f,
                "buffer of {} bytes does not hold a {}x{} RGB image",
                buffer_size, width, height
            ),
            Self::Encode(err) => write!(f, "cannot write image: {}", err),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BufferSize { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ImageError> for ExportError {
    fn from(err: ImageError) -> Self {
        Self::Encode(err)
    }
}

/// Encodes `buffer` to `filepath`; the format follows the file extension.
pub fn write_image(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> Result<(), ExportError> {
    let width = buffer.width();
    let height = buffer.height();

    let image = RgbImage::from_raw(width, height, buffer.buffer().clone()).ok_or(
        ExportError::BufferSize {
            width,
            height,
            buffer_size: buffer.buffer_size(),
        },
    )?;

    image.save(filepath)?;

    Ok(())
}
