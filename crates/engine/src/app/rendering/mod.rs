mod canvas;
mod overlay;
mod renderer;
mod text;
mod transform;

pub(crate) use overlay::OverlayData;
pub use renderer::Renderer;
pub use text::{text_height_px, text_width_px};
pub use transform::{screen_px_to_world, world_to_screen_px};
