use crate::app::Vec2;

/// Framebuffer pixel rows grow downward; world y grows upward. Both share the same unit.
pub fn world_to_screen_px(world: Vec2, framebuffer_height: u32) -> (f32, f32) {
    (world.x, framebuffer_height as f32 - world.y)
}

pub fn screen_px_to_world(x: f32, y: f32, framebuffer_height: u32) -> Vec2 {
    Vec2::new(x, framebuffer_height as f32 - y)
}
