pub mod write_image;
