//! Background rendering: a bounded [`Worker`] pool and the [`WorkerController`]
//! that keeps at most one render in flight.
//!
//! Callers push parameter changes in; finished frames and view changes come back
//! out through [`RenderPresenterPort`] listeners.

mod controller;
pub mod data;
pub mod events;
pub mod ports;
mod worker;

pub use controller::{ListenerId, WorkerController};
pub use data::frame_data::FrameData;
pub use events::render_event::RenderEvent;
pub use ports::presenter_port::RenderPresenterPort;
pub use worker::{Worker, WorkerError};
