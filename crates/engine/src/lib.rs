//! Fixed-tick 2D runtime: a window, a CPU framebuffer of flat-colored rectangles and
//! bitmap text, and a single [`Scene`] driven through load, update, animate and unload.

pub mod app;

pub use app::{
    run_app, screen_px_to_world, text_height_px, text_width_px, world_to_screen_px, AppError,
    InputAction, InputSnapshot, LoopConfig, LoopMetricsSnapshot, Rect, Renderer, Rgba, Scene,
    SceneCommand, SceneLoadError, SceneWorld, Shape, ShapeGroup, ShapeId, TextLabel, Vec2,
    SLOW_FRAME_ENV_VAR,
};
