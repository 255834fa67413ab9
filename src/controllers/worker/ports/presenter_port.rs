use crate::controllers::worker::events::render_event::RenderEvent;

pub trait RenderPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
