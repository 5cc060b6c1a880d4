use std::f32::consts::{FRAC_PI_2, PI, TAU};

use kart_engine::{Rect, Vec2};

/// Cosmetic rotation applied per tick for each held direction.
pub(crate) const ROTATION_STEP_RADIANS: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Evaluation order for a tick. Each axis guard sees the hull as moved by earlier ones.
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub(crate) fn heading_radians(self) -> f32 {
        match self {
            Direction::Up => 0.0,
            Direction::Left => FRAC_PI_2,
            Direction::Down => PI,
            Direction::Right => -FRAC_PI_2,
        }
    }

    fn step(self, speed: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, speed),
            Direction::Down => Vec2::new(0.0, -speed),
            Direction::Left => Vec2::new(-speed, 0.0),
            Direction::Right => Vec2::new(speed, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Steering {
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl Steering {
    pub(crate) fn is_held(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub(crate) fn held(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.is_held(*direction))
    }
}

/// Play area edges. Vertical bounds are the window edges; horizontal ones sit
/// `horizontal_inset` inside the window on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlayBounds {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) horizontal_inset: f32,
}

impl PlayBounds {
    /// Strict comparisons: a hull exactly on a bound may not advance past it.
    fn allows(&self, direction: Direction, hull: &Rect) -> bool {
        match direction {
            Direction::Up => hull.top() < self.height,
            Direction::Down => hull.bottom() > 0.0,
            Direction::Left => hull.left() > self.horizontal_inset,
            Direction::Right => hull.right() < self.width - self.horizontal_inset,
        }
    }
}

/// Total translation for a cart this tick. Every part of the cart receives the same delta.
pub(crate) fn allowed_displacement(
    hull: Rect,
    steering: Steering,
    speed: f32,
    bounds: &PlayBounds,
) -> Vec2 {
    let mut hull = hull;
    let mut total = Vec2::ZERO;
    for direction in steering.held() {
        if bounds.allows(direction, &hull) {
            let step = direction.step(speed);
            hull.translate(step);
            total = total + step;
        }
    }
    total
}

/// Turns `current` toward `heading` by at most `step` along the shorter arc.
pub(crate) fn nudge_toward(current: f32, heading: f32, step: f32) -> f32 {
    let difference = shortest_arc(heading - current);
    if difference.abs() <= step {
        current + difference
    } else {
        current + step * difference.signum()
    }
}

/// Wraps an angle into (-PI, PI].
fn shortest_arc(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
