use crate::controllers::worker::data::frame_data::FrameData;
use crate::core::data::circle_area::CircleArea;

#[derive(Debug, Clone)]
pub enum RenderEvent {
    Frame(FrameData),
    /// The view moved; carries the new centre and diameter for display.
    AreaChanged(CircleArea),
}
