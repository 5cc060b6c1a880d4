use crate::app::{LoopMetricsSnapshot, Rgba};

use super::canvas::Canvas;
use super::text::{draw_text, text_height_px, text_width_px};

const TEXT_SCALE: u8 = 2;
const LINE_GAP_PX: i32 = 4;
const PANEL_MARGIN_PX: i32 = 8;
const PANEL_INSET_PX: i32 = 6;
const TEXT_PRIMARY_COLOR: Rgba = Rgba([244, 248, 252, 255]);
const TEXT_DIM_COLOR: Rgba = Rgba([176, 198, 220, 255]);
const PANEL_BG_COLOR: Rgba = Rgba([10, 12, 16, 210]);
const PANEL_BORDER_COLOR: Rgba = Rgba([92, 106, 126, 255]);
const PERF_SECTION_LABEL: &str = "Perf";
const SCENE_SECTION_LABEL: &str = "Scene";

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub metrics: LoopMetricsSnapshot,
    pub render_fps_cap: Option<u32>,
    pub slow_frame_delay_ms: u64,
    pub shape_count: usize,
    pub scene_lines: Vec<String>,
}

pub(crate) fn draw_overlay(canvas: &mut Canvas<'_>, data: &OverlayData) {
    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }

    let lines = build_overlay_lines(data);
    let line_height = text_height_px(TEXT_SCALE) + LINE_GAP_PX;
    let longest = lines
        .iter()
        .map(|line| text_width_px(line, TEXT_SCALE))
        .max()
        .unwrap_or(0);
    let panel_width = longest + PANEL_INSET_PX * 2;
    let panel_height = lines.len() as i32 * line_height - LINE_GAP_PX + PANEL_INSET_PX * 2;
    canvas.fill_rect_px(
        PANEL_MARGIN_PX,
        PANEL_MARGIN_PX,
        panel_width,
        panel_height,
        PANEL_BG_COLOR,
    );
    canvas.outline_rect_px(
        PANEL_MARGIN_PX,
        PANEL_MARGIN_PX,
        panel_width,
        panel_height,
        PANEL_BORDER_COLOR,
    );

    let x = PANEL_MARGIN_PX + PANEL_INSET_PX;
    let mut y = PANEL_MARGIN_PX + PANEL_INSET_PX;
    for line in &lines {
        draw_text(canvas, x, y, line, TEXT_SCALE, line_color(line));
        y += line_height;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    let mut lines = vec![
        PERF_SECTION_LABEL.to_string(),
        format_fps_line(
            data.metrics.fps,
            data.render_fps_cap,
            data.slow_frame_delay_ms,
        ),
        format!("TPS: {:.1}", data.metrics.tps),
        format!(
            "Frame: {:.2} ms (max {:.1})",
            data.metrics.frame_time_ms, data.metrics.worst_frame_ms
        ),
        format!("Dropped: {}", data.metrics.dropped_ticks),
        String::new(),
        SCENE_SECTION_LABEL.to_string(),
        format!("Shapes: {}", data.shape_count),
    ];
    lines.extend(data.scene_lines.iter().cloned());
    lines
}

fn line_color(line: &str) -> Rgba {
    if line == PERF_SECTION_LABEL || line == SCENE_SECTION_LABEL {
        TEXT_DIM_COLOR
    } else {
        TEXT_PRIMARY_COLOR
    }
}

fn format_fps_line(current_fps: f32, cap: Option<u32>, slow_frame_delay_ms: u64) -> String {
    let cap_text = match cap {
        Some(cap) => cap.to_string(),
        None => "off".to_string(),
    };
    if slow_frame_delay_ms > 0 {
        format!("FPS: {current_fps:.1} (cap {cap_text}, slow {slow_frame_delay_ms}ms)")
    } else {
        format!("FPS: {current_fps:.1} (cap {cap_text})")
    }
}
