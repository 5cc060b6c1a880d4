use crate::app::{Rgba, Shape, Vec2};

use super::transform::world_to_screen_px;

/// RGBA8 framebuffer view with clipped, alpha-blended fills.
pub(crate) struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color.0);
        }
    }

    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let alpha = color.alpha();
        if alpha == 0 || x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(offset..offset + 4) else {
            return;
        };
        if alpha == u8::MAX {
            dst.copy_from_slice(&color.0);
            return;
        }
        let src_weight = u32::from(alpha);
        let dst_weight = 255 - src_weight;
        for channel in 0..3 {
            let mixed =
                u32::from(color.0[channel]) * src_weight + u32::from(dst[channel]) * dst_weight;
            dst[channel] = ((mixed + 127) / 255) as u8;
        }
        dst[3] = u8::MAX;
    }

    /// Fills the half-open pixel box `[x, x + w) x [y, y + h)` in screen coordinates.
    pub(crate) fn fill_rect_px(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(w).min(self.width as i32);
        let end_y = y.saturating_add(h).min(self.height as i32);
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub(crate) fn outline_rect_px(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        if w <= 1 || h <= 1 {
            return;
        }
        self.fill_rect_px(x, y, w, 1, color);
        self.fill_rect_px(x, y + h - 1, w, 1, color);
        self.fill_rect_px(x, y + 1, 1, h - 2, color);
        self.fill_rect_px(x + w - 1, y + 1, 1, h - 2, color);
    }

    /// Rasterizes a world-space shape. A pixel is covered when its center lies inside the
    /// shape's (possibly rotated) rectangle.
    pub(crate) fn fill_shape(&mut self, shape: &Shape) {
        if shape.color.alpha() == 0 || !shape.rect.has_positive_size() {
            return;
        }
        if shape.rotation_radians == 0.0 {
            let (left, top) = world_to_screen_px(
                Vec2::new(shape.rect.left(), shape.rect.top()),
                self.height,
            );
            let (right, bottom) = world_to_screen_px(
                Vec2::new(shape.rect.right(), shape.rect.bottom()),
                self.height,
            );
            let x0 = left.round() as i32;
            let y0 = top.round() as i32;
            let x1 = right.round() as i32;
            let y1 = bottom.round() as i32;
            self.fill_rect_px(x0, y0, x1 - x0, y1 - y0, shape.color);
            return;
        }

        let rect = shape.rect;
        let corners = [
            Vec2::new(rect.left(), rect.bottom()),
            Vec2::new(rect.right(), rect.bottom()),
            Vec2::new(rect.right(), rect.top()),
            Vec2::new(rect.left(), rect.top()),
        ]
        .map(|corner| {
            let (x, y) = world_to_screen_px(
                corner.rotated_about(shape.pivot, shape.rotation_radians),
                self.height,
            );
            Vec2::new(x, y)
        });
        self.fill_convex_quad(&corners, shape.color);
    }

    fn fill_convex_quad(&mut self, corners: &[Vec2; 4], color: Rgba) {
        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);
        if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
            return;
        }

        let start_x = (min_x.floor() as i32).max(0);
        let end_x = (max_x.ceil() as i32).min(self.width as i32);
        let start_y = (min_y.floor() as i32).max(0);
        let end_y = (max_y.ceil() as i32).min(self.height as i32);
        for py in start_y..end_y {
            for px in start_x..end_x {
                let sample = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if point_in_convex_quad(sample, corners) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }
}

fn point_in_convex_quad(point: Vec2, corners: &[Vec2; 4]) -> bool {
    let mut has_positive = false;
    let mut has_negative = false;
    for index in 0..corners.len() {
        let a = corners[index];
        let b = corners[(index + 1) % corners.len()];
        let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
        if cross > 0.0 {
            has_positive = true;
        } else if cross < 0.0 {
            has_negative = true;
        }
        if has_positive && has_negative {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Rect, ShapeGroup};

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn axis_aligned_shape_covers_flipped_rows() {
        let mut frame = vec![0u8; 10 * 10 * 4];
        let mut canvas = Canvas::new(&mut frame, 10, 10);
        canvas.clear(Rgba::BLACK);
        let shape = Shape::new(
            Rect::from_xywh(2.0, 2.0, 2.0, 2.0),
            Rgba::WHITE,
            ShapeGroup(0),
        );
        canvas.fill_shape(&shape);

        // World rows 1..3 land on screen rows 7..9.
        assert_eq!(pixel(&frame, 10, 1, 7), Rgba::WHITE.0);
        assert_eq!(pixel(&frame, 10, 2, 8), Rgba::WHITE.0);
        assert_eq!(pixel(&frame, 10, 1, 6), Rgba::BLACK.0);
        assert_eq!(pixel(&frame, 10, 3, 8), Rgba::BLACK.0);
    }

    #[test]
    fn half_alpha_blends_with_destination() {
        let mut frame = vec![0u8; 4];
        let mut canvas = Canvas::new(&mut frame, 1, 1);
        canvas.clear(Rgba::BLACK);
        canvas.blend_pixel(0, 0, Rgba([255, 0, 0, 128]));
        assert_eq!(pixel(&frame, 1, 0, 0), [128, 0, 0, 255]);
    }

    #[test]
    fn fully_transparent_shape_draws_nothing() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut canvas = Canvas::new(&mut frame, 4, 4);
        canvas.clear(Rgba::BLACK);
        let shape = Shape::new(
            Rect::from_xywh(2.0, 2.0, 4.0, 4.0),
            Rgba::TRANSPARENT,
            ShapeGroup(0),
        );
        canvas.fill_shape(&shape);
        assert!(frame.chunks_exact(4).all(|p| p == Rgba::BLACK.0));
    }

    #[test]
    fn quarter_turn_swaps_covered_extent() {
        let mut frame = vec![0u8; 20 * 20 * 4];
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        canvas.clear(Rgba::BLACK);
        let mut shape = Shape::new(
            Rect::from_xywh(10.0, 10.0, 10.0, 2.0),
            Rgba::WHITE,
            ShapeGroup(0),
        );
        shape.rotate(std::f32::consts::FRAC_PI_2);
        canvas.fill_shape(&shape);

        // Now tall and thin: column 10 covered far from center, row 10 not.
        assert_eq!(pixel(&frame, 20, 10, 6), Rgba::WHITE.0);
        assert_eq!(pixel(&frame, 20, 10, 13), Rgba::WHITE.0);
        assert_eq!(pixel(&frame, 20, 6, 10), Rgba::BLACK.0);
        assert_eq!(pixel(&frame, 20, 13, 10), Rgba::BLACK.0);
    }

    #[test]
    fn fills_clip_to_frame_bounds() {
        let mut frame = vec![0u8; 3 * 3 * 4];
        let mut canvas = Canvas::new(&mut frame, 3, 3);
        canvas.fill_rect_px(-5, -5, 100, 100, Rgba::WHITE);
        canvas.blend_pixel(3, 0, Rgba::BLACK);
        assert!(frame.chunks_exact(4).all(|p| p == Rgba::WHITE.0));
    }
}
