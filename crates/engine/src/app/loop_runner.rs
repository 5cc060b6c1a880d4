use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::ActionTracker;
use super::metrics::MetricsAccumulator;
use super::scene::{SceneLoadError, SceneMachine};
use super::{
    InputAction, InputSnapshot, LoopMetricsSnapshot, OverlayData, Renderer, Scene, SceneCommand,
    Vec2,
};

pub const SLOW_FRAME_ENV_VAR: &str = "KART_SLOW_FRAME_MS";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub max_render_fps: Option<u32>,
    pub overlay_visible_at_start: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Blob Kart".to_string(),
            window_width: 1200,
            window_height: 800,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            max_render_fps: Some(60),
            overlay_visible_at_start: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error(transparent)]
    SceneLoad(#[from] SceneLoadError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Opens the window and drives `scene` at a fixed tick rate until the window closes.
///
/// Simulation advances in whole fixed steps; rendering happens once per redraw, after
/// any due ticks, and is paced by `max_render_fps`.
pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    let world_size = (config.window_width, config.window_height);
    let mut scenes = SceneMachine::new(scene, world_size);
    scenes.load()?;
    info!(
        shape_count = scenes.world().shape_count(),
        "scene_loaded"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window), world_size.0, world_size.1)
        .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let mut input_collector = InputCollector::new(world_size.0, world_size.1);

    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut latest_metrics = LoopMetricsSnapshot::default();
    let mut last_applied_title: Option<String> = None;
    let mut overlay_visible = config.overlay_visible_at_start;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize_surface(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let world = renderer.window_to_world((position.x as f32, position.y as f32));
                    input_collector.set_cursor_world(world);
                }
                WindowEvent::CursorLeft { .. } => {
                    input_collector.set_cursor_world(None);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if input_collector.take_overlay_toggle_pressed() {
                        overlay_visible = !overlay_visible;
                        info!(overlay_visible, "overlay_toggled");
                    }

                    if slow_frame_delay > Duration::ZERO {
                        thread::sleep(slow_frame_delay);
                    }

                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
                    accumulator = accumulator.saturating_add(clamped_frame_dt);

                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        let input_snapshot = input_collector.snapshot_for_tick();
                        match scenes.update(fixed_dt_seconds, &input_snapshot) {
                            SceneCommand::None => {}
                            SceneCommand::HardReset => {
                                if let Err(error) = scenes.hard_reset() {
                                    error!(error = %error, "scene_reset_failed");
                                    window_target.exit();
                                    return;
                                }
                                info!(
                                    shape_count = scenes.world().shape_count(),
                                    "scene_reset"
                                );
                            }
                        }
                    }
                    metrics_accumulator
                        .record_ticks(step_plan.ticks_to_run, step_plan.dropped_ticks);
                    accumulator = step_plan.remaining_accumulator;

                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame,
                            "sim_clamp_triggered"
                        );
                    }

                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    scenes.animate();
                    let overlay = overlay_visible.then(|| OverlayData {
                        metrics: latest_metrics,
                        render_fps_cap: effective_render_cap,
                        slow_frame_delay_ms: slow_frame_delay.as_millis() as u64,
                        shape_count: scenes.world().shape_count(),
                        scene_lines: scenes.debug_lines(),
                    });
                    if let Err(error) = renderer.render_world(scenes.world(), overlay.as_ref()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = scenes.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }
                    metrics_accumulator.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        latest_metrics = snapshot;
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            dropped_ticks = snapshot.dropped_ticks,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                scenes.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    actions: ActionTracker,
    cursor_world: Option<Vec2>,
    left_mouse_is_down: bool,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        let Some(action) = action_for_key(code) else {
            return;
        };
        self.actions.apply(action, is_pressed);
        if action == InputAction::Quit && is_pressed {
            self.mark_quit_requested();
        }
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.left_mouse_is_down = state == ElementState::Pressed;
        }
    }

    fn set_cursor_world(&mut self, cursor: Option<Vec2>) {
        self.cursor_world = cursor;
    }

    fn take_overlay_toggle_pressed(&mut self) -> bool {
        self.actions.take_pressed(InputAction::ToggleOverlay)
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        InputSnapshot::new(
            self.quit_requested,
            self.actions.held(),
            self.actions.take_pressed_edges(),
            self.cursor_world,
            self.left_mouse_is_down,
            self.window_width,
            self.window_height,
        )
    }
}

fn action_for_key(code: KeyCode) -> Option<InputAction> {
    let action = match code {
        KeyCode::KeyW => InputAction::PlayerOneUp,
        KeyCode::KeyS => InputAction::PlayerOneDown,
        KeyCode::KeyA => InputAction::PlayerOneLeft,
        KeyCode::KeyD => InputAction::PlayerOneRight,
        KeyCode::ArrowUp => InputAction::PlayerTwoUp,
        KeyCode::ArrowDown => InputAction::PlayerTwoDown,
        KeyCode::ArrowLeft => InputAction::PlayerTwoLeft,
        KeyCode::ArrowRight => InputAction::PlayerTwoRight,
        KeyCode::Space => InputAction::Begin,
        KeyCode::F3 => InputAction::ToggleOverlay,
        KeyCode::Escape => InputAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
    dropped_ticks: u32,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        let dropped_ticks = (accumulator.as_nanos() / fixed_dt.as_nanos().max(1)) as u32;
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
            dropped_ticks,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
            dropped_ticks: 0,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    match env::var(SLOW_FRAME_ENV_VAR) {
        Ok(value) => parse_slow_frame_ms(&value, config_slow_frame_ms),
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}

fn parse_slow_frame_ms(value: &str, config_slow_frame_ms: u64) -> Duration {
    match value.trim().parse::<u64>() {
        Ok(ms) => Duration::from_millis(ms),
        Err(_) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                value, "invalid slow-frame env var value; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(50), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(2));
        assert_eq!(result.dropped_backlog, Duration::ZERO);
        assert_eq!(result.dropped_ticks, 0);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
        assert_eq!(result.dropped_ticks, 4);
    }

    #[test]
    fn player_keys_are_split_between_wasd_and_arrows() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyW), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::ArrowLeft), true);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::PlayerOneUp));
        assert!(snapshot.is_down(InputAction::PlayerTwoLeft));
        assert!(!snapshot.is_down(InputAction::PlayerTwoUp));
        assert!(!snapshot.is_down(InputAction::PlayerOneLeft));
    }

    #[test]
    fn key_release_clears_action_state() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyD), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyD), false);

        assert!(!input.snapshot_for_tick().is_down(InputAction::PlayerOneRight));
    }

    #[test]
    fn space_press_is_edge_for_a_single_tick() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::Space), true);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();
        assert!(first.was_pressed(InputAction::Begin));
        assert!(!second.was_pressed(InputAction::Begin));
        assert!(second.is_down(InputAction::Begin));
    }

    #[test]
    fn tap_between_ticks_is_not_lost() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::Space), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::Space), false);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.was_pressed(InputAction::Begin));
        assert!(!snapshot.is_down(InputAction::Begin));
    }

    #[test]
    fn f3_toggle_is_edge_triggered() {
        let mut input = InputCollector::default();
        let f3 = PhysicalKey::Code(KeyCode::F3);

        input.update_action_state_from_physical_key(f3, true);
        assert!(input.take_overlay_toggle_pressed());

        input.update_action_state_from_physical_key(f3, true);
        assert!(!input.take_overlay_toggle_pressed());

        input.update_action_state_from_physical_key(f3, false);
        input.update_action_state_from_physical_key(f3, true);
        assert!(input.take_overlay_toggle_pressed());
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::Escape), true);
        assert!(input.quit_requested);
        assert!(input.snapshot_for_tick().quit_requested());
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyQ), true);
        let snapshot = input.snapshot_for_tick();
        assert!(!snapshot.is_down(InputAction::PlayerOneUp));
        assert!(!snapshot.quit_requested());
    }

    #[test]
    fn left_mouse_state_is_level_not_edge() {
        let mut input = InputCollector::new(1200, 800);
        input.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        assert!(input.snapshot_for_tick().left_mouse_down());
        assert!(input.snapshot_for_tick().left_mouse_down());

        input.handle_mouse_input(MouseButton::Right, ElementState::Released);
        assert!(input.snapshot_for_tick().left_mouse_down());

        input.handle_mouse_input(MouseButton::Left, ElementState::Released);
        assert!(!input.snapshot_for_tick().left_mouse_down());
    }

    #[test]
    fn snapshot_carries_cursor_and_window_size() {
        let mut input = InputCollector::new(1200, 800);
        input.set_cursor_world(Some(Vec2::new(100.0, 200.0)));
        let snapshot = input.snapshot_for_tick();

        assert_eq!(snapshot.window_size(), (1200, 800));
        assert_eq!(snapshot.cursor_position(), Some(Vec2::new(100.0, 200.0)));

        input.set_cursor_world(None);
        assert_eq!(input.snapshot_for_tick().cursor_position(), None);
    }

    #[test]
    fn target_frame_duration_none_when_cap_off() {
        assert_eq!(target_frame_duration(None), None);
    }

    #[test]
    fn target_frame_duration_for_60hz_is_expected() {
        let duration = target_frame_duration(Some(60)).expect("duration");
        assert!((duration.as_secs_f64() - (1.0 / 60.0)).abs() < 0.000_001);
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(20), target_frame_duration(Some(60)));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(5), target_frame_duration(Some(60)));
        assert!(sleep > Duration::ZERO);
    }

    #[test]
    fn normalize_render_fps_cap_disables_zero() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(60)), Some(60));
    }

    #[test]
    fn slow_frame_value_parses_or_falls_back() {
        assert_eq!(parse_slow_frame_ms(" 40 ", 0), Duration::from_millis(40));
        assert_eq!(parse_slow_frame_ms("fast", 7), Duration::from_millis(7));
    }

    #[test]
    fn default_config_matches_playfield() {
        let config = LoopConfig::default();
        assert_eq!((config.window_width, config.window_height), (1200, 800));
        assert_eq!(config.target_tps, 60);
        assert_eq!(config.max_render_fps, Some(60));
        assert!(!config.overlay_visible_at_start);
    }
}
