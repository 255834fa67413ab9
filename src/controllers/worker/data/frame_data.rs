use std::sync::Arc;
use std::time::Duration;

use crate::core::data::pixel_buffer::PixelBuffer;

/// A finished render, copied out of the shared image when it completed.
#[derive(Debug, Clone)]
pub struct FrameData {
    pub generation: u64,
    pub pixel_buffer: Arc<PixelBuffer>,
    pub render_duration: Duration,
}
