pub mod async_task;
pub mod cancellation;
pub mod ports;
pub mod render_task;
