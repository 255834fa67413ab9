pub mod depth_painter;
pub mod factory;
pub mod kinds;
pub mod maps;
