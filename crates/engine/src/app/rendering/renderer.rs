use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{SceneWorld, TextLabel, Vec2};

use super::canvas::Canvas;
use super::overlay::{draw_overlay, OverlayData};
use super::text::{draw_text, text_height_px};
use super::transform::{screen_px_to_world, world_to_screen_px};

/// Draws a `SceneWorld` into a framebuffer the size of the world. The surface scales it
/// to whatever the window's inner size is.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    buffer_width: u32,
    buffer_height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, buffer_width: u32, buffer_height: u32) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(
            Arc::clone(&window),
            (size.width.max(1), size.height.max(1)),
            (buffer_width, buffer_height),
        )?;
        Ok(Self {
            window,
            pixels,
            buffer_width,
            buffer_height,
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(
            Arc::clone(&self.window),
            (width, height),
            (self.buffer_width, self.buffer_height),
        )?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        surface: (u32, u32),
        buffer: (u32, u32),
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface.0, surface.1, window);
        Pixels::new(buffer.0, buffer.1, surface)
    }

    /// Maps a physical window position to world coordinates. `None` outside the framebuffer.
    pub fn window_to_world(&self, position: (f32, f32)) -> Option<Vec2> {
        let (x, y) = self.pixels.window_pos_to_pixel(position).ok()?;
        Some(screen_px_to_world(
            x as f32 + 0.5,
            y as f32 + 0.5,
            self.buffer_height,
        ))
    }

    pub(crate) fn render_world(
        &mut self,
        world: &SceneWorld,
        overlay_data: Option<&OverlayData>,
    ) -> Result<(), Error> {
        let width = self.buffer_width;
        let height = self.buffer_height;
        {
            let mut canvas = Canvas::new(self.pixels.frame_mut(), width, height);
            canvas.clear(world.clear_color());
            for shape in world.visible_shapes() {
                canvas.fill_shape(shape);
            }
            for label in world.labels() {
                draw_label(&mut canvas, label);
            }
            if let Some(data) = overlay_data {
                draw_overlay(&mut canvas, data);
            }
        }
        self.pixels.render()
    }
}

fn draw_label(canvas: &mut Canvas<'_>, label: &TextLabel) {
    let (x, y) = label_origin_for_world(label.position, label.scale, canvas.height());
    draw_text(canvas, x, y, &label.text, label.scale, label.color);
}

fn label_origin_for_world(position: Vec2, scale: u8, buffer_height: u32) -> (i32, i32) {
    let (x, baseline) = world_to_screen_px(position, buffer_height);
    (x.round() as i32, baseline.round() as i32 - text_height_px(scale))
}
