pub mod circle_area;
pub mod colour;
pub mod complex;
pub mod format_error;
pub mod fractal_image;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod point;
pub mod real;
pub mod rect_area;
