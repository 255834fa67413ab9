use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum FractalImageError {
    InvalidSize(PixelRectError),
    PixelOutsideView { pixel: Point, view: PixelRect },
    ViewOutsideImage { view: PixelRect },
    Snapshot(PixelBufferError),
}

impl fmt::Display for FractalImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(err) => write!(f, "invalid image size: {}", err),
            Self::PixelOutsideView { pixel, view } => write!(
                f,
                "pixel at x:{}, y:{} outside of view top:{}, left:{}, bottom:{}, right:{}",
                pixel.x,
                pixel.y,
                view.top_left().y,
                view.top_left().x,
                view.bottom_right().y,
                view.bottom_right().x
            ),
            Self::ViewOutsideImage { view } => write!(
                f,
                "view {}x{} at x:{}, y:{} does not fit the image",
                view.width(),
                view.height(),
                view.top_left().x,
                view.top_left().y
            ),
            Self::Snapshot(err) => write!(f, "cannot snapshot image: {}", err),
        }
    }
}

impl Error for FractalImageError {}

impl From<PixelRectError> for FractalImageError {
    fn from(err: PixelRectError) -> Self {
        Self::InvalidSize(err)
    }
}

impl From<PixelBufferError> for FractalImageError {
    fn from(err: PixelBufferError) -> Self {
        Self::Snapshot(err)
    }
}

#[derive(Debug)]
struct Raster {
    pixel_rect: PixelRect,
    pixels: Vec<AtomicU32>,
}

/// Fixed-size render target shared by every task of one render.
///
/// Cloning shares the backing pixels. Writers only ever go through [`ImageView`]s
/// carved out of disjoint cells, so plain relaxed stores are enough; the pool join
/// that ends a render publishes them to whoever snapshots afterwards.
#[derive(Debug, Clone)]
pub struct FractalImage {
    raster: Arc<Raster>,
}

impl FractalImage {
    pub fn new(width: u32, height: u32) -> Result<Self, FractalImageError> {
        let pixel_rect = PixelRect::from_size(width, height)?;
        Ok(Self::blank(pixel_rect))
    }

    /// A new all-black image of the same size, sharing nothing with `self`.
    #[must_use]
    pub fn blank_copy(&self) -> Self {
        Self::blank(self.raster.pixel_rect)
    }

    fn blank(pixel_rect: PixelRect) -> Self {
        let pixels = (0..pixel_rect.size())
            .map(|_| AtomicU32::new(Colour::BLACK.pack()))
            .collect();

        Self {
            raster: Arc::new(Raster { pixel_rect, pixels }),
        }
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.raster.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.raster.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.raster.pixel_rect.height()
    }

    /// View over the whole image.
    #[must_use]
    pub fn view(&self) -> ImageView {
        ImageView {
            image: self.clone(),
            rect: self.raster.pixel_rect,
        }
    }

    #[must_use]
    pub fn colour_at(&self, pixel: Point) -> Option<Colour> {
        self.index_of(pixel)
            .map(|index| Colour::unpack(self.raster.pixels[index].load(Ordering::Relaxed)))
    }

    /// Copies the current pixels out as an RGB buffer.
    pub fn snapshot(&self) -> Result<PixelBuffer, FractalImageError> {
        let packed: Vec<u32> = self
            .raster
            .pixels
            .iter()
            .map(|pixel| pixel.load(Ordering::Acquire))
            .collect();

        Ok(PixelBuffer::from_packed(self.raster.pixel_rect, &packed)?)
    }

    /// True when both handles write into the same pixels.
    #[must_use]
    pub fn same_buffer(&self, other: &FractalImage) -> bool {
        Arc::ptr_eq(&self.raster, &other.raster)
    }

    fn index_of(&self, pixel: Point) -> Option<usize> {
        let rect = self.raster.pixel_rect;

        if !rect.contains_point(pixel) {
            return None;
        }

        Some(pixel.y as usize * rect.width() as usize + pixel.x as usize)
    }
}

/// A rectangular window onto a [`FractalImage`]; a view never copies pixels.
#[derive(Debug, Clone)]
pub struct ImageView {
    image: FractalImage,
    rect: PixelRect,
}

impl ImageView {
    pub fn new(image: FractalImage, rect: PixelRect) -> Result<Self, FractalImageError> {
        let bounds = image.pixel_rect();

        if !bounds.contains_point(rect.top_left()) || !bounds.contains_point(rect.bottom_right()) {
            return Err(FractalImageError::ViewOutsideImage { view: rect });
        }

        Ok(Self { image, rect })
    }

    #[must_use]
    pub fn image(&self) -> &FractalImage {
        &self.image
    }

    #[must_use]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    pub fn set_pixel(&self, pixel: Point, colour: Colour) -> Result<(), FractalImageError> {
        if !self.rect.contains_point(pixel) {
            return Err(FractalImageError::PixelOutsideView {
                pixel,
                view: self.rect,
            });
        }

        self.paint(pixel, colour);
        Ok(())
    }

    /// Unchecked write for callers iterating the view's own rect.
    pub(crate) fn paint(&self, pixel: Point, colour: Colour) {
        debug_assert!(self.rect.contains_point(pixel));

        if let Some(index) = self.image.index_of(pixel) {
            self.image.raster.pixels[index].store(colour.pack(), Ordering::Relaxed);
        }
    }

    /// Sub-views in the order of [`PixelRect::split`]: row-major, bottom band first.
    #[must_use]
    pub fn split(&self, rows: u32, cols: u32) -> Vec<ImageView> {
        self.rect
            .split(rows, cols)
            .into_iter()
            .map(|rect| ImageView {
                image: self.image.clone(),
                rect,
            })
            .collect()
    }
}
