use kart_engine::{SceneWorld, ShapeId, Vec2};
use rand::Rng;

use super::layout::TitleCart;

const TITLE_DRIFT_PER_FRAME: f32 = 2.0;
const TITLE_WHEEL_SPIN_RADIANS: f32 = 0.08;
const TITLE_WRAP_X: f32 = -100.0;
const TITLE_WRAP_SHIFT: f32 = 1400.0;

/// Moves the title cart left, spinning its wheels, and wraps it back in from the right.
pub(crate) fn drift_title_cart(world: &mut SceneWorld, cart: &TitleCart) {
    for id in cart.parts() {
        translate(world, id, Vec2::new(-TITLE_DRIFT_PER_FRAME, 0.0));
    }
    for id in cart.wheels {
        if let Some(wheel) = world.shape_mut(id) {
            wheel.rotate(TITLE_WHEEL_SPIN_RADIANS);
        }
    }
    let off_screen = world
        .rect(cart.passenger)
        .is_some_and(|passenger| passenger.center.x < TITLE_WRAP_X);
    if off_screen {
        for id in cart.parts() {
            translate(world, id, Vec2::new(TITLE_WRAP_SHIFT, 0.0));
        }
    }
}

/// Each piece falls a tenth of its own height per frame and respawns above the top edge.
pub(crate) fn drop_confetti(
    world: &mut SceneWorld,
    confetti: &[ShapeId],
    world_size: Vec2,
    rng: &mut impl Rng,
) {
    let width = (world_size.x as u32).max(1);
    for id in confetti {
        let Some(piece) = world.shape_mut(*id) else {
            continue;
        };
        let fall = piece.rect.size.y / 10.0;
        piece.translate(Vec2::new(0.0, -fall));
        if piece.rect.center.y < 0.0 {
            let respawn = Vec2::new(
                rng.gen_range(0..width) as f32,
                world_size.y + piece.rect.size.y,
            );
            let delta = respawn - piece.rect.center;
            piece.translate(delta);
        }
    }
}

fn translate(world: &mut SceneWorld, id: ShapeId, delta: Vec2) {
    if let Some(shape) = world.shape_mut(id) {
        shape.translate(delta);
    }
}
