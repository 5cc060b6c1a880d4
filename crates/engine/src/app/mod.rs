mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use geometry::{Rect, Vec2};
pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub(crate) use rendering::OverlayData;
pub use rendering::{
    screen_px_to_world, text_height_px, text_width_px, world_to_screen_px, Renderer,
};
pub use scene::{
    InputSnapshot, Rgba, Scene, SceneCommand, SceneLoadError, SceneWorld, Shape, ShapeGroup,
    ShapeId, TextLabel,
};
