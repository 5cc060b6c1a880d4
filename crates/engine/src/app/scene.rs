use std::fmt::Display;

use thiserror::Error;

use super::geometry::{Rect, Vec2};
use super::input::{ActionStates, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    /// Unload the scene, clear its world and load it again from scratch.
    HardReset,
}

#[derive(Debug, Error)]
#[error("scene load failed: {message}")]
pub struct SceneLoadError {
    message: String,
}

impl SceneLoadError {
    pub fn new(message: impl Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    held: ActionStates,
    pressed: ActionStates,
    cursor_position: Option<Vec2>,
    left_mouse_down: bool,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        held: ActionStates,
        pressed: ActionStates,
        cursor_position: Option<Vec2>,
        left_mouse_down: bool,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            held,
            pressed,
            cursor_position,
            left_mouse_down,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.held.is_down(action)
    }

    /// True only on the tick that observed the up->down change.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    /// Cursor in world coordinates (bottom-left origin). `None` while outside the framebuffer.
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_position
    }

    pub fn left_mouse_down(&self) -> bool {
        self.left_mouse_down
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.held.set(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.held.set(action, true);
        self.pressed.set(action, true);
        self
    }

    pub fn with_cursor_position(mut self, cursor_position: Option<Vec2>) -> Self {
        self.cursor_position = cursor_position;
        self
    }

    pub fn with_left_mouse_down(mut self, left_mouse_down: bool) -> Self {
        self.left_mouse_down = left_mouse_down;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    /// Builds an opaque color from unit-range channels.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        Self::from_unit_alpha(r, g, b, 1.0)
    }

    pub fn from_unit_alpha(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba([
            unit_to_byte(r),
            unit_to_byte(g),
            unit_to_byte(b),
            unit_to_byte(a),
        ])
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }
}

fn unit_to_byte(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

/// Visibility bucket. Only 64 groups exist; ids at or above that are clamped to the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeGroup(pub u8);

impl ShapeGroup {
    const MAX: u8 = 63;

    fn bit(self) -> u64 {
        1u64 << self.0.min(Self::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub rect: Rect,
    pub color: Rgba,
    /// Cosmetic only; collision code always uses the unrotated `rect`.
    pub rotation_radians: f32,
    pub pivot: Vec2,
    pub group: ShapeGroup,
}

impl Shape {
    pub fn new(rect: Rect, color: Rgba, group: ShapeGroup) -> Self {
        Self {
            rect,
            color,
            rotation_radians: 0.0,
            pivot: rect.center,
            group,
        }
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
        self.pivot = self.pivot + delta;
    }

    pub fn rotate(&mut self, delta_radians: f32) {
        self.rotation_radians += delta_radians;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Bottom-left corner of the first glyph, in world coordinates.
    pub position: Vec2,
    pub scale: u8,
    pub color: Rgba,
}

#[derive(Debug)]
pub struct SceneWorld {
    shapes: Vec<Shape>,
    visible_groups: u64,
    labels: Vec<TextLabel>,
    clear_color: Rgba,
    size: (u32, u32),
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            visible_groups: u64::MAX,
            labels: Vec::new(),
            clear_color: Rgba::BLACK,
            size: (0, 0),
        }
    }
}

impl SceneWorld {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn spawn(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(shape);
        id
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.labels.clear();
        self.visible_groups = u64::MAX;
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0 as usize)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0 as usize)
    }

    pub fn rect(&self, id: ShapeId) -> Option<Rect> {
        self.shape(id).map(|shape| shape.rect)
    }

    pub fn set_color(&mut self, id: ShapeId, color: Rgba) {
        if let Some(shape) = self.shape_mut(id) {
            shape.color = color;
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn set_group_visible(&mut self, group: ShapeGroup, visible: bool) {
        if visible {
            self.visible_groups |= group.bit();
        } else {
            self.visible_groups &= !group.bit();
        }
    }

    pub fn show_only(&mut self, groups: &[ShapeGroup]) {
        self.visible_groups = groups.iter().fold(0, |mask, group| mask | group.bit());
    }

    pub fn is_group_visible(&self, group: ShapeGroup) -> bool {
        self.visible_groups & group.bit() != 0
    }

    /// Visible shapes in spawn order, which is also draw order.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes
            .iter()
            .filter(move |shape| self.is_group_visible(shape.group))
    }

    pub fn set_labels(&mut self, labels: Vec<TextLabel>) {
        self.labels = labels;
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Rgba) {
        self.clear_color = color;
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut SceneWorld) -> Result<(), SceneLoadError>;
    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand;
    /// Runs once per presented frame before drawing. Only cosmetic shapes may change here.
    fn animate(&mut self, _world: &mut SceneWorld) {}
    fn unload(&mut self, world: &mut SceneWorld);
    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        None
    }
    fn debug_lines(&self, _world: &SceneWorld) -> Vec<String> {
        Vec::new()
    }
}

pub(crate) struct SceneMachine {
    scene: Box<dyn Scene>,
    world: SceneWorld,
    is_loaded: bool,
}

impl SceneMachine {
    pub(crate) fn new(scene: Box<dyn Scene>, world_size: (u32, u32)) -> Self {
        Self {
            scene,
            world: SceneWorld::with_size(world_size.0, world_size.1),
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) -> Result<(), SceneLoadError> {
        if self.is_loaded {
            return Ok(());
        }
        self.scene.load(&mut self.world)?;
        self.is_loaded = true;
        Ok(())
    }

    pub(crate) fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        self.scene.update(fixed_dt_seconds, input, &mut self.world)
    }

    pub(crate) fn animate(&mut self) {
        self.scene.animate(&mut self.world);
    }

    pub(crate) fn hard_reset(&mut self) -> Result<(), SceneLoadError> {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
        }
        self.world.clear();
        self.is_loaded = false;
        self.scene.load(&mut self.world)?;
        self.is_loaded = true;
        Ok(())
    }

    pub(crate) fn world(&self) -> &SceneWorld {
        &self.world
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title(&self.world)
    }

    pub(crate) fn debug_lines(&self) -> Vec<String> {
        self.scene.debug_lines(&self.world)
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
            self.world.clear();
            self.is_loaded = false;
        }
    }
}
