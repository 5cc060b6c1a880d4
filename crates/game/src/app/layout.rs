//! Static scene geometry: the circuit, carts, menus and results screen.
//!
//! Everything here is fixed data spawned once per load. The race core only reads
//! positions back through the handles stored in [`Layout`].

use kart_engine::{Rect, Rgba, SceneWorld, Shape, ShapeGroup, ShapeId, Vec2};
use rand::Rng;
use thiserror::Error;

use super::race::CHECKPOINT_COUNT;

pub(crate) const SKY: ShapeGroup = ShapeGroup(0);
pub(crate) const TITLE: ShapeGroup = ShapeGroup(1);
pub(crate) const CIRCUIT: ShapeGroup = ShapeGroup(2);
pub(crate) const CARTS: ShapeGroup = ShapeGroup(3);
pub(crate) const CHARACTER_SELECT: ShapeGroup = ShapeGroup(4);
pub(crate) const BUTTON: ShapeGroup = ShapeGroup(5);
pub(crate) const RESULTS: ShapeGroup = ShapeGroup(6);
pub(crate) const CONFETTI: ShapeGroup = ShapeGroup(7);

const WORLD_WIDTH: f32 = 1200.0;
const WORLD_HEIGHT: f32 = 800.0;
const BORDER_GAP: f32 = 40.0;
const TRACK_WIDTH: f32 = 150.0;

const CART_COUNT: usize = 2;
const CART_START_Y: f32 = 400.0;
/// Part order inside a cart: four wheels, hull, accent, character indicator.
const CART_PART_COUNT: usize = 7;
const HULL_PART: usize = 4;
const INDICATOR_PART: usize = 6;

const CHECKER_SIZE: f32 = 15.0;
const CHECKER_ORIGIN: Vec2 = Vec2::new(1018.0, 602.0);
const CHECKERS_PER_ROW: usize = 10;
const CHECKER_ROWS: usize = 3;

const BOX_COLUMNS: usize = 4;
const BOX_ROWS: usize = 2;
const BOX_FIRST_X: f32 = 187.0;
const BOX_STEP_X: f32 = 275.0;
const BOX_ROW_Y: [f32; BOX_ROWS] = [610.0, 270.0];

const CONFETTI_COUNT: usize = 300;
const TITLE_CART_START: Vec2 = Vec2::new(1300.0, 290.0);

/// A selectable character and its body color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Blob {
    pub(crate) name: &'static str,
    rgb: [f32; 3],
}

impl Blob {
    pub(crate) const fn new(name: &'static str, rgb: [f32; 3]) -> Self {
        Self { name, rgb }
    }

    pub(crate) fn color(&self) -> Rgba {
        Rgba::from_unit(self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

pub(crate) const ROSTER: [Blob; 8] = [
    Blob::new("Red", [0.7, 0.0, 0.0]),
    Blob::new("Orange", [0.96, 0.59, 0.12]),
    Blob::new("Yellow", [0.96, 0.87, 0.12]),
    Blob::new("Green", [0.18, 0.54, 0.16]),
    Blob::new("Blue", [0.08, 0.06, 0.67]),
    Blob::new("Purple", [0.69, 0.16, 0.89]),
    Blob::new("Black", [0.0, 0.0, 0.0]),
    Blob::new("Brown", [0.36, 0.18, 0.02]),
];

#[derive(Debug, Error, PartialEq)]
pub(crate) enum LayoutError {
    #[error("layout needs at least {required} {collection}, found {found}")]
    TooFew {
        collection: &'static str,
        required: usize,
        found: usize,
    },
    #[error("layout allows at most {allowed} {collection}, found {found}")]
    TooMany {
        collection: &'static str,
        allowed: usize,
        found: usize,
    },
    #[error("{collection}[{index}] has a non-positive size")]
    Degenerate {
        collection: &'static str,
        index: usize,
    },
}

/// The data-driven part of the layout: the collections the race core depends on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CircuitPlan {
    pub(crate) world_size: Vec2,
    pub(crate) track: Vec<Rect>,
    pub(crate) boosts: Vec<Rect>,
    pub(crate) checkpoints: Vec<Rect>,
    pub(crate) pond: Rect,
    pub(crate) cart_starts: Vec<Vec2>,
    pub(crate) roster: Vec<Blob>,
}

impl CircuitPlan {
    pub(crate) fn blob_kart() -> Self {
        let right_straight_x = WORLD_WIDTH - BORDER_GAP - TRACK_WIDTH * 0.5;
        let left_straight_x = BORDER_GAP + TRACK_WIDTH * 0.5;
        let top_straight_y = WORLD_HEIGHT - BORDER_GAP - TRACK_WIDTH * 0.5;
        let red_start_x = WORLD_WIDTH - BORDER_GAP - 75.0 - 35.0;

        Self {
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            track: vec![
                Rect::from_xywh(right_straight_x, 400.0, TRACK_WIDTH, 720.0),
                Rect::from_xywh(600.0, top_straight_y, 970.0, TRACK_WIDTH),
                Rect::from_xywh(left_straight_x, 400.0, TRACK_WIDTH, 720.0),
                Rect::from_xywh(345.0, 285.0, TRACK_WIDTH, 490.0),
                Rect::from_xywh(570.0, 285.0, TRACK_WIDTH, 490.0),
                Rect::from_xywh(230.0, 115.0, 80.0, TRACK_WIDTH),
                Rect::from_xywh(457.5, 455.0, 74.5, TRACK_WIDTH),
                Rect::from_xywh(827.5, 115.0, 365.0, TRACK_WIDTH),
            ],
            boosts: vec![
                Rect::from_xywh(600.0, 720.0, 300.0, 40.0),
                Rect::from_xywh(827.5, 80.0, 300.0, 40.0),
                Rect::from_xywh(left_straight_x, 500.0, 40.0, 180.0),
            ],
            checkpoints: vec![
                Rect::from_xywh(right_straight_x, 610.0, TRACK_WIDTH, 5.0),
                Rect::from_xywh(left_straight_x, 285.0, TRACK_WIDTH, 5.0),
                Rect::from_xywh(570.0, 285.0, TRACK_WIDTH, 5.0),
            ],
            pond: Rect::from_xywh(825.0, 400.0, 275.0, 350.0),
            cart_starts: vec![
                Vec2::new(red_start_x, CART_START_Y),
                Vec2::new(red_start_x + 75.0, CART_START_Y),
            ],
            roster: ROSTER.to_vec(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        at_least("track segments", 1, self.track.len())?;
        at_least("boost panels", 1, self.boosts.len())?;
        exactly("checkpoints", CHECKPOINT_COUNT, self.checkpoints.len())?;
        exactly("carts", CART_COUNT, self.cart_starts.len())?;
        at_least("characters", 1, self.roster.len())?;
        at_most("characters", BOX_COLUMNS * BOX_ROWS, self.roster.len())?;

        if self.world_size.x < 1.0 || self.world_size.y < 1.0 {
            return Err(LayoutError::Degenerate {
                collection: "world",
                index: 0,
            });
        }
        for (collection, rects) in [
            ("track", &self.track),
            ("boosts", &self.boosts),
            ("checkpoints", &self.checkpoints),
        ] {
            if let Some(index) = rects.iter().position(|rect| !rect.has_positive_size()) {
                return Err(LayoutError::Degenerate { collection, index });
            }
        }
        if !self.pond.has_positive_size() {
            return Err(LayoutError::Degenerate {
                collection: "pond",
                index: 0,
            });
        }
        Ok(())
    }
}

fn at_least(collection: &'static str, required: usize, found: usize) -> Result<(), LayoutError> {
    if found < required {
        return Err(LayoutError::TooFew {
            collection,
            required,
            found,
        });
    }
    Ok(())
}

fn at_most(collection: &'static str, allowed: usize, found: usize) -> Result<(), LayoutError> {
    if found > allowed {
        return Err(LayoutError::TooMany {
            collection,
            allowed,
            found,
        });
    }
    Ok(())
}

fn exactly(collection: &'static str, count: usize, found: usize) -> Result<(), LayoutError> {
    at_least(collection, count, found)?;
    at_most(collection, count, found)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CartParts {
    pub(crate) parts: [ShapeId; CART_PART_COUNT],
}

impl CartParts {
    pub(crate) fn hull(&self) -> ShapeId {
        self.parts[HULL_PART]
    }

    pub(crate) fn indicator(&self) -> ShapeId {
        self.parts[INDICATOR_PART]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CharacterBox {
    pub(crate) border: ShapeId,
    pub(crate) area: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ButtonParts {
    pub(crate) border: ShapeId,
    pub(crate) face: ShapeId,
    pub(crate) area: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TitleCart {
    pub(crate) passenger: ShapeId,
    pub(crate) body: ShapeId,
    pub(crate) wheels: [ShapeId; 2],
}

impl TitleCart {
    pub(crate) fn parts(&self) -> [ShapeId; 4] {
        [self.passenger, self.body, self.wheels[0], self.wheels[1]]
    }
}

/// Handles and collision rects for everything the game reads back after spawning.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
    pub(crate) world_size: Vec2,
    pub(crate) track: Vec<Rect>,
    pub(crate) boosts: Vec<Rect>,
    pub(crate) checkpoints: [Rect; CHECKPOINT_COUNT],
    pub(crate) carts: [CartParts; CART_COUNT],
    pub(crate) roster: Vec<Blob>,
    pub(crate) boxes: Vec<CharacterBox>,
    pub(crate) button: ButtonParts,
    pub(crate) title_cart: TitleCart,
    pub(crate) podium: [Rect; 3],
    pub(crate) winners: [ShapeId; 2],
    pub(crate) confetti: Vec<ShapeId>,
}

impl Layout {
    /// Spawns the full scene in draw order. Nothing is spawned when the plan is invalid.
    pub(crate) fn build(
        world: &mut SceneWorld,
        plan: &CircuitPlan,
        rng: &mut impl Rng,
    ) -> Result<Self, LayoutError> {
        plan.validate()?;
        let checkpoints: [Rect; CHECKPOINT_COUNT] = plan
            .checkpoints
            .as_slice()
            .try_into()
            .map_err(|_| LayoutError::TooFew {
                collection: "checkpoints",
                required: CHECKPOINT_COUNT,
                found: plan.checkpoints.len(),
            })?;
        let size = plan.world_size;

        world.spawn(Shape::new(
            Rect::from_xywh(size.x * 0.5, 534.0, size.x, 533.0),
            Rgba::from_unit(0.0, 1.0, 1.0),
            SKY,
        ));
        spawn_title(world);
        let title_cart = spawn_title_cart(world);

        world.spawn(Shape::new(plan.pond, Rgba::from_unit(0.2, 0.84, 0.92), CIRCUIT));
        for segment in &plan.track {
            world.spawn(Shape::new(*segment, Rgba::from_unit(0.125, 0.125, 0.125), CIRCUIT));
        }
        for panel in &plan.boosts {
            world.spawn(Shape::new(*panel, Rgba::from_unit(0.9, 0.9, 0.0), CIRCUIT));
        }
        spawn_checkers(world);
        for zone in &checkpoints {
            world.spawn(Shape::new(*zone, Rgba::TRANSPARENT, CIRCUIT));
        }

        let carts = [
            spawn_cart(world, plan.cart_starts[0], [1.0, 0.0, 0.0], [0.7, 0.0, 0.0]),
            spawn_cart(world, plan.cart_starts[1], [0.0, 0.0, 1.0], [0.12, 0.25, 0.96]),
        ];

        let boxes = plan
            .roster
            .iter()
            .enumerate()
            .map(|(index, blob)| spawn_character_box(world, index, blob))
            .collect();

        let podium = [
            Rect::from_xywh(300.0, 200.0, 300.0, 100.0),
            Rect::from_xywh(600.0, 300.0, 300.0, 300.0),
            Rect::from_xywh(900.0, 250.0, 300.0, 200.0),
        ];
        for block in &podium {
            world.spawn(Shape::new(*block, Rgba::from_unit(0.4, 0.0, 0.0), RESULTS));
        }
        let winner_size = Vec2::new(75.0, 125.0);
        let winners = [podium[1], podium[2]].map(|block| {
            let center = Vec2::new(block.center.x, block.top() + winner_size.y * 0.5);
            world.spawn(Shape::new(Rect::new(center, winner_size), Rgba::BLACK, RESULTS))
        });

        let confetti = (0..CONFETTI_COUNT)
            .map(|_| spawn_confetti_piece(world, size, rng))
            .collect();

        let button = spawn_button(world);

        Ok(Self {
            world_size: size,
            track: plan.track.clone(),
            boosts: plan.boosts.clone(),
            checkpoints,
            carts,
            roster: plan.roster.clone(),
            boxes,
            button,
            title_cart,
            podium,
            winners,
            confetti,
        })
    }

    pub(crate) fn blob(&self, character: usize) -> Option<&Blob> {
        self.roster.get(character)
    }
}

fn spawn_title(world: &mut SceneWorld) {
    let banner = Rect::from_xywh(600.0, 565.0, 900.0, 200.0);
    world.spawn(Shape::new(banner, Rgba::BLACK, TITLE));
    world.spawn(Shape::new(
        Rect::new(banner.center, Vec2::new(880.0, 180.0)),
        Rgba::WHITE,
        TITLE,
    ));
}

fn spawn_title_cart(world: &mut SceneWorld) -> TitleCart {
    let Vec2 { x, y } = TITLE_CART_START;
    let wheel = Rgba::from_unit(0.3, 0.3, 0.3);
    TitleCart {
        passenger: world.spawn(Shape::new(
            Rect::from_xywh(x, y + 20.0, 20.0, 20.0),
            Rgba::from_unit(0.69, 0.16, 0.89),
            TITLE,
        )),
        body: world.spawn(Shape::new(
            Rect::from_xywh(x, y, 75.0, 40.0),
            Rgba::from_unit(1.0, 0.0, 0.0),
            TITLE,
        )),
        wheels: [-25.0, 25.0].map(|offset| {
            world.spawn(Shape::new(
                Rect::from_xywh(x + offset, y - 20.0, 20.0, 20.0),
                wheel,
                TITLE,
            ))
        }),
    }
}

/// Checkered start line, three rows just below the first checkpoint.
fn spawn_checkers(world: &mut SceneWorld) {
    let first = CHECKER_ORIGIN;
    for row in 0..CHECKER_ROWS {
        for column in 0..CHECKERS_PER_ROW {
            let center = Vec2::new(
                first.x + column as f32 * CHECKER_SIZE,
                first.y - row as f32 * CHECKER_SIZE,
            );
            let color = if (row + column) % 2 == 0 {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            };
            world.spawn(Shape::new(
                Rect::new(center, Vec2::new(CHECKER_SIZE, CHECKER_SIZE)),
                color,
                CIRCUIT,
            ));
        }
    }
}

/// Every part pivots around the hull center so the cart turns as one piece.
fn spawn_cart(
    world: &mut SceneWorld,
    start: Vec2,
    hull_rgb: [f32; 3],
    accent_rgb: [f32; 3],
) -> CartParts {
    let [r, g, b] = hull_rgb;
    let wheel = Rgba::from_unit(0.3, 0.3, 0.3);
    let part = |offset: Vec2, size: Vec2, color: Rgba| {
        Shape::new(Rect::new(start + offset, size), color, CARTS).with_pivot(start)
    };
    let wheel_size = Vec2::new(10.0, 20.0);
    let shapes = [
        part(Vec2::new(-15.0, -20.0), wheel_size, wheel),
        part(Vec2::new(-15.0, 20.0), wheel_size, wheel),
        part(Vec2::new(15.0, -20.0), wheel_size, wheel),
        part(Vec2::new(15.0, 20.0), wheel_size, wheel),
        part(Vec2::ZERO, Vec2::new(30.0, 65.0), Rgba::from_unit(r, g, b)),
        part(
            Vec2::ZERO,
            Vec2::new(20.0, 55.0),
            Rgba::from_unit(r, g + 0.25, b + 0.25),
        ),
        part(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            Rgba::from_unit(accent_rgb[0], accent_rgb[1], accent_rgb[2]),
        ),
    ];
    CartParts {
        parts: shapes.map(|shape| world.spawn(shape)),
    }
}

fn spawn_character_box(world: &mut SceneWorld, index: usize, blob: &Blob) -> CharacterBox {
    let center = Vec2::new(
        BOX_FIRST_X + (index % BOX_COLUMNS) as f32 * BOX_STEP_X,
        BOX_ROW_Y[(index / BOX_COLUMNS).min(BOX_ROWS - 1)],
    );
    let area = Rect::new(center, Vec2::new(190.0, 315.0));
    let border = world.spawn(Shape::new(area, Rgba::BLACK, CHARACTER_SELECT));
    world.spawn(Shape::new(
        Rect::new(center, Vec2::new(175.0, 300.0)),
        Rgba::WHITE,
        CHARACTER_SELECT,
    ));
    world.spawn(Shape::new(
        Rect::from_xywh(center.x, center.y - 10.0, 75.0, 125.0),
        blob.color(),
        CHARACTER_SELECT,
    ));
    CharacterBox { border, area }
}

fn spawn_button(world: &mut SceneWorld) -> ButtonParts {
    let area = Rect::from_xywh(1090.0, 45.0, 210.0, 85.0);
    let border = world.spawn(Shape::new(area, Rgba::from_unit(0.7, 0.0, 0.0), BUTTON));
    let face = world.spawn(Shape::new(
        Rect::new(area.center, Vec2::new(200.0, 75.0)),
        Rgba::from_unit(1.0, 0.0, 0.0),
        BUTTON,
    ));
    ButtonParts { border, face, area }
}

fn spawn_confetti_piece(world: &mut SceneWorld, world_size: Vec2, rng: &mut impl Rng) -> ShapeId {
    let width = world_size.x as u32;
    let height = world_size.y as u32;
    let center = Vec2::new(
        rng.gen_range(0..width) as f32,
        (height + 2 + rng.gen_range(0..height)) as f32,
    );
    let size = Vec2::new(
        rng.gen_range(0..14u32).max(1) as f32,
        rng.gen_range(0..15u32).max(1) as f32,
    );
    let mut channel = || rng.gen_range(0..10u32) as f32 / 10.0;
    let color = Rgba::from_unit(channel(), channel(), channel());
    world.spawn(Shape::new(Rect::new(center, size), color, CONFETTI))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn build(plan: &CircuitPlan) -> (SceneWorld, Result<Layout, LayoutError>) {
        let mut world = SceneWorld::with_size(1200, 800);
        let mut rng = StdRng::seed_from_u64(7);
        let layout = Layout::build(&mut world, plan, &mut rng);
        (world, layout)
    }

    #[test]
    fn standard_plan_builds_every_piece() {
        let (world, layout) = build(&CircuitPlan::blob_kart());
        let layout = layout.expect("layout");

        assert_eq!(layout.track.len(), 8);
        assert_eq!(layout.boosts.len(), 3);
        assert_eq!(layout.boxes.len(), 8);
        assert_eq!(layout.confetti.len(), CONFETTI_COUNT);
        let checkers = world
            .shapes()
            .iter()
            .filter(|shape| shape.rect.size == Vec2::new(CHECKER_SIZE, CHECKER_SIZE))
            .count();
        assert_eq!(checkers, 30);
    }

    #[test]
    fn carts_start_side_by_side_on_the_start_straight() {
        let (world, layout) = build(&CircuitPlan::blob_kart());
        let layout = layout.expect("layout");
        let red = world.rect(layout.carts[0].hull()).expect("red hull");
        let blue = world.rect(layout.carts[1].hull()).expect("blue hull");

        assert_eq!(red.center, Vec2::new(1050.0, 400.0));
        assert_eq!(blue.center, Vec2::new(1125.0, 400.0));
        assert_eq!(red.size, Vec2::new(30.0, 65.0));
        assert!(layout.track[0].contains_point(red.center));
        assert!(layout.track[0].contains_point(blue.center));
    }

    #[test]
    fn cart_parts_pivot_on_the_hull() {
        let (world, layout) = build(&CircuitPlan::blob_kart());
        let layout = layout.expect("layout");
        let hull_center = world.rect(layout.carts[1].hull()).expect("hull").center;
        for id in layout.carts[1].parts {
            assert_eq!(world.shape(id).expect("part").pivot, hull_center);
        }
        assert_eq!(
            world.shape(layout.carts[1].indicator()).map(|shape| shape.color),
            Some(Rgba::from_unit(0.12, 0.25, 0.96))
        );
    }

    #[test]
    fn checkpoints_are_invisible_and_on_track() {
        let (world, layout) = build(&CircuitPlan::blob_kart());
        let layout = layout.expect("layout");
        for zone in &layout.checkpoints {
            assert!(layout.track.iter().any(|segment| segment.contains_point(zone.center)));
            let shape = world
                .shapes()
                .iter()
                .find(|shape| shape.rect == *zone)
                .expect("checkpoint shape");
            assert_eq!(shape.color.alpha(), 0);
        }
    }

    #[test]
    fn boosts_sit_on_the_track() {
        let plan = CircuitPlan::blob_kart();
        for panel in &plan.boosts {
            assert!(plan.track.iter().any(|segment| segment.contains_point(panel.center)));
        }
    }

    #[test]
    fn confetti_pieces_are_never_degenerate() {
        let (world, layout) = build(&CircuitPlan::blob_kart());
        let layout = layout.expect("layout");
        for id in &layout.confetti {
            let rect = world.rect(*id).expect("confetti");
            assert!(rect.has_positive_size());
            assert!(rect.center.y > 800.0);
        }
    }

    #[test]
    fn winners_stand_on_first_and_second_blocks() {
        let (world, layout) = build(&CircuitPlan::blob_kart());
        let layout = layout.expect("layout");
        let first = world.rect(layout.winners[0]).expect("first");
        let second = world.rect(layout.winners[1]).expect("second");
        assert_eq!(first.center, Vec2::new(600.0, 512.5));
        assert_eq!(second.center, Vec2::new(900.0, 412.5));
    }

    #[test]
    fn missing_checkpoint_is_rejected_before_spawning() {
        let mut plan = CircuitPlan::blob_kart();
        plan.checkpoints.pop();
        let (world, layout) = build(&plan);
        assert_eq!(
            layout.expect_err("two checkpoints"),
            LayoutError::TooFew {
                collection: "checkpoints",
                required: 3,
                found: 2
            }
        );
        assert_eq!(world.shape_count(), 0);
    }

    #[test]
    fn single_cart_is_rejected() {
        let mut plan = CircuitPlan::blob_kart();
        plan.cart_starts.truncate(1);
        assert!(matches!(
            plan.validate(),
            Err(LayoutError::TooFew {
                collection: "carts",
                ..
            })
        ));
    }

    #[test]
    fn extra_characters_do_not_fit_the_grid() {
        let mut plan = CircuitPlan::blob_kart();
        plan.roster.push(Blob::new("Grey", [0.5, 0.5, 0.5]));
        assert!(matches!(plan.validate(), Err(LayoutError::TooMany { .. })));
    }

    #[test]
    fn zero_size_segment_is_reported_with_index() {
        let mut plan = CircuitPlan::blob_kart();
        plan.track[5] = Rect::from_xywh(230.0, 115.0, 0.0, 150.0);
        assert_eq!(
            plan.validate(),
            Err(LayoutError::Degenerate {
                collection: "track",
                index: 5
            })
        );
    }
}
