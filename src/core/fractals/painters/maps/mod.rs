pub mod blue_white_gradient;
pub mod fire_gradient;
pub mod grayscale;
