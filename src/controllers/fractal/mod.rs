//! Field-level front controller: validates user edits and forwards them to the
//! [`WorkerController`](crate::controllers::worker::WorkerController).

mod controller;
pub mod settings;

pub use controller::{FractalController, FractalControllerError};
pub use settings::{FractalSettings, ParameterFields};
