pub mod cli;
pub mod fractal;
pub mod ports;
pub mod worker;
