use std::mem;
use std::time::Duration;

use kart_engine::{Rgba, SceneWorld, Vec2};

use crate::app::config::RaceConfig;
use crate::app::layout::{CartParts, Layout};

use super::button::{self, ButtonVisual, PointerState, PointerTracker};
use super::countdown::RaceTimers;
use super::laps::LapProgress;
use super::movement::{self, PlayBounds, Steering, ROTATION_STEP_RADIANS};
use super::phase::{next_phase, GamePhase, PhaseEvent};
use super::selection::{BoxHighlight, Player, Selection};
use super::zones::{self, Zone};

/// What the core reads from input each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct FrameInput {
    pub(crate) begin_pressed: bool,
    pub(crate) steering: [Steering; 2],
    pub(crate) cursor: Option<Vec2>,
    pub(crate) mouse_down: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RaceEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    CharacterSelected {
        player: Player,
        character: usize,
    },
    CountdownFinished,
    CheckpointCrossed {
        player: Player,
        checkpoint: usize,
    },
    LapCompleted {
        player: Player,
        laps: u32,
    },
    RaceFinished {
        winner: Player,
        laps: [u32; 2],
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CartRace {
    pub(crate) progress: LapProgress,
    pub(crate) zone: Zone,
}

/// Owns the phase and all per-race state. World shapes are only touched through the
/// handles in [`Layout`].
#[derive(Debug, Clone)]
pub(crate) struct RaceSession {
    phase: GamePhase,
    selection: Selection,
    carts: [CartRace; 2],
    timers: RaceTimers,
    pointer: PointerTracker,
    button: ButtonVisual,
    hovered_box: Option<usize>,
    race: RaceConfig,
    events: Vec<RaceEvent>,
}

impl RaceSession {
    pub(crate) fn new(race: RaceConfig) -> Self {
        Self {
            phase: GamePhase::Start,
            selection: Selection::default(),
            carts: [CartRace::default(); 2],
            timers: RaceTimers::default(),
            pointer: PointerTracker::default(),
            button: ButtonVisual::Idle,
            hovered_box: None,
            race,
            events: Vec::new(),
        }
    }

    pub(crate) fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) fn cart(&self, player: Player) -> &CartRace {
        &self.carts[player.index()]
    }

    pub(crate) fn timers(&self) -> &RaceTimers {
        &self.timers
    }

    pub(crate) fn race_config(&self) -> &RaceConfig {
        &self.race
    }

    pub(crate) fn button_visual(&self) -> ButtonVisual {
        self.button
    }

    /// Advances one tick. Returns everything that happened, in order.
    pub(crate) fn update(
        &mut self,
        input: &FrameInput,
        now: Duration,
        world: &mut SceneWorld,
        layout: &Layout,
    ) -> Vec<RaceEvent> {
        let released = self.pointer.observe(input.mouse_down);
        match self.phase {
            GamePhase::Start => {
                if input.begin_pressed {
                    self.apply(PhaseEvent::Begin, now, world, layout);
                }
            }
            GamePhase::CharacterSelect => {
                self.update_character_select(input, released, now, world, layout)
            }
            GamePhase::Play => self.update_play(input, now, world, layout),
            GamePhase::Over => self.update_over(input, released, now, world, layout),
        }
        mem::take(&mut self.events)
    }

    fn update_character_select(
        &mut self,
        input: &FrameInput,
        released: bool,
        now: Duration,
        world: &mut SceneWorld,
        layout: &Layout,
    ) {
        self.hovered_box = input.cursor.and_then(|cursor| {
            layout
                .boxes
                .iter()
                .position(|character_box| character_box.area.contains_point(cursor))
        });

        if released {
            if let Some(character) = self.hovered_box {
                if let Some(player) = self.selection.commit(character) {
                    if let Some(blob) = layout.blob(character) {
                        world.set_color(layout.carts[player.index()].indicator(), blob.color());
                    }
                    self.events
                        .push(RaceEvent::CharacterSelected { player, character });
                }
            }
        }

        for (index, character_box) in layout.boxes.iter().enumerate() {
            let highlight = self.selection.highlight(index, self.hovered_box);
            world.set_color(character_box.border, highlight_color(highlight));
        }

        let pointer = PointerState {
            hovered: input.cursor.is_some_and(|cursor| layout.button.area.contains_point(cursor)),
            mouse_down: input.mouse_down,
            released,
        };
        let selections_complete = self.selection.is_complete();
        self.set_button(self.button.next(selections_complete, pointer), world, layout);
        if button::was_clicked(pointer) {
            self.apply(
                PhaseEvent::PlayClicked {
                    selections_complete,
                },
                now,
                world,
                layout,
            );
        }
    }

    fn update_play(
        &mut self,
        input: &FrameInput,
        now: Duration,
        world: &mut SceneWorld,
        layout: &Layout,
    ) {
        if self.timers.poll_go(now, self.race.countdown_seconds) {
            self.events.push(RaceEvent::CountdownFinished);
        }
        let go = self.timers.is_go();
        let bounds = PlayBounds {
            width: layout.world_size.x,
            height: layout.world_size.y,
            horizontal_inset: self.race.horizontal_inset,
        };

        for player in Player::ALL {
            let parts = &layout.carts[player.index()];
            let Some(hull) = world.rect(parts.hull()) else {
                continue;
            };
            let zone = zones::classify(hull.center, &layout.track, &layout.boosts);
            let mut hull_point = hull.center;
            if go {
                let steering = input.steering[player.index()];
                let speed = zone.speed(&self.race.speeds);
                let delta = movement::allowed_displacement(hull, steering, speed, &bounds);
                steer_cart(world, parts, steering, delta);
                hull_point = hull_point + delta;
            }

            let cart = &mut self.carts[player.index()];
            cart.zone = zone;
            let crossings = cart.progress.update(hull_point, &layout.checkpoints);
            let laps = cart.progress.laps();
            for crossing in crossings {
                self.events.push(if crossing.lap_completed {
                    RaceEvent::LapCompleted { player, laps }
                } else {
                    RaceEvent::CheckpointCrossed {
                        player,
                        checkpoint: crossing.checkpoint,
                    }
                });
            }
        }

        let laps_to_finish = self.race.laps_to_finish;
        if self
            .carts
            .iter()
            .any(|cart| cart.progress.has_finished(laps_to_finish))
        {
            let laps = self.carts.map(|cart| cart.progress.laps());
            self.events.push(RaceEvent::RaceFinished {
                winner: self.leader(),
                laps,
            });
            self.apply(PhaseEvent::RaceFinished, now, world, layout);
        }
    }

    fn update_over(
        &mut self,
        input: &FrameInput,
        released: bool,
        now: Duration,
        world: &mut SceneWorld,
        layout: &Layout,
    ) {
        let pointer = PointerState {
            hovered: input.cursor.is_some_and(|cursor| layout.button.area.contains_point(cursor)),
            mouse_down: input.mouse_down,
            released,
        };
        self.set_button(self.button.next(true, pointer), world, layout);
        if button::was_clicked(pointer) {
            self.apply(PhaseEvent::MainMenuClicked, now, world, layout);
        }
    }

    fn apply(&mut self, event: PhaseEvent, now: Duration, world: &mut SceneWorld, layout: &Layout) {
        let Some(next) = next_phase(self.phase, event) else {
            return;
        };
        let from = self.phase;
        self.phase = next;
        match next {
            GamePhase::Start => self.reset(),
            GamePhase::CharacterSelect => {}
            GamePhase::Play => self.timers.start_countdown(now),
            GamePhase::Over => {
                self.set_button(ButtonVisual::Idle, world, layout);
                self.paint_winners(world, layout);
            }
        }
        self.events.push(RaceEvent::PhaseChanged { from, to: next });
    }

    /// Red places first only with strictly more laps; ties go to blue.
    pub(crate) fn leader(&self) -> Player {
        let [red, blue] = self.carts.map(|cart| cart.progress.laps());
        if red > blue {
            Player::One
        } else {
            Player::Two
        }
    }

    fn paint_winners(&self, world: &mut SceneWorld, layout: &Layout) {
        let leader = self.leader();
        let runner_up = match leader {
            Player::One => Player::Two,
            Player::Two => Player::One,
        };
        for (slot, player) in [leader, runner_up].into_iter().enumerate() {
            let indicator = layout.carts[player.index()].indicator();
            if let Some(color) = world.shape(indicator).map(|shape| shape.color) {
                world.set_color(layout.winners[slot], color);
            }
        }
    }

    fn set_button(&mut self, visual: ButtonVisual, world: &mut SceneWorld, layout: &Layout) {
        self.button = visual;
        let (border, face) = button_colors(visual);
        world.set_color(layout.button.border, border);
        world.set_color(layout.button.face, face);
    }

    fn reset(&mut self) {
        let events = mem::take(&mut self.events);
        *self = Self::new(self.race.clone());
        self.events = events;
    }
}

/// Translates every part by `delta` and turns the cart toward each held direction.
/// Turning happens even when the move was blocked.
fn steer_cart(world: &mut SceneWorld, parts: &CartParts, steering: Steering, delta: Vec2) {
    let current = world
        .shape(parts.hull())
        .map(|shape| shape.rotation_radians)
        .unwrap_or(0.0);
    let target = steering.held().fold(current, |rotation, direction| {
        movement::nudge_toward(rotation, direction.heading_radians(), ROTATION_STEP_RADIANS)
    });
    let turn = target - current;
    for id in parts.parts {
        if let Some(shape) = world.shape_mut(id) {
            shape.translate(delta);
            shape.rotate(turn);
        }
    }
}

fn highlight_color(highlight: BoxHighlight) -> Rgba {
    match highlight {
        BoxHighlight::Neutral => Rgba::BLACK,
        BoxHighlight::PlayerOne => Rgba::from_unit(1.0, 0.0, 0.0),
        BoxHighlight::PlayerTwo => Rgba::from_unit(0.0, 0.0, 1.0),
    }
}

/// Border and face colors.
fn button_colors(visual: ButtonVisual) -> (Rgba, Rgba) {
    match visual {
        ButtonVisual::Idle => (Rgba::from_unit(0.7, 0.0, 0.0), Rgba::from_unit(1.0, 0.0, 0.0)),
        ButtonVisual::Hover => (Rgba::from_unit(1.0, 0.5, 0.5), Rgba::from_unit(1.0, 0.5, 0.5)),
        ButtonVisual::Pressed | ButtonVisual::Disabled => {
            (Rgba::from_unit(0.2, 0.0, 0.0), Rgba::from_unit(0.5, 0.0, 0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::app::layout::CircuitPlan;

    struct Rig {
        world: SceneWorld,
        layout: Layout,
        session: RaceSession,
    }

    impl Rig {
        fn new() -> Self {
            let mut world = SceneWorld::with_size(1200, 800);
            let mut rng = StdRng::seed_from_u64(1);
            let layout =
                Layout::build(&mut world, &CircuitPlan::blob_kart(), &mut rng).expect("layout");
            Self {
                world,
                layout,
                session: RaceSession::new(RaceConfig::default()),
            }
        }

        fn tick(&mut self, input: FrameInput, now: Duration) -> Vec<RaceEvent> {
            self.session
                .update(&input, now, &mut self.world, &self.layout)
        }

        /// Press and release over `point`. Returns the events of the release tick.
        fn click(&mut self, point: Vec2, now: Duration) -> Vec<RaceEvent> {
            let held = FrameInput {
                cursor: Some(point),
                mouse_down: true,
                ..FrameInput::default()
            };
            self.tick(held, now);
            self.tick(
                FrameInput {
                    mouse_down: false,
                    ..held
                },
                now,
            )
        }

        fn box_center(&self, index: usize) -> Vec2 {
            self.layout.boxes[index].area.center
        }

        fn button_center(&self) -> Vec2 {
            self.layout.button.area.center
        }

        fn begin(&mut self) {
            self.tick(
                FrameInput {
                    begin_pressed: true,
                    ..FrameInput::default()
                },
                Duration::ZERO,
            );
        }

        /// Picks two characters, enters Play at t=0 and ticks once at go time.
        fn race_at_go(&mut self, red: usize, blue: usize) {
            self.begin();
            self.click(self.box_center(red), Duration::ZERO);
            self.click(self.box_center(blue), Duration::ZERO);
            self.click(self.button_center(), Duration::ZERO);
            assert_eq!(self.session.phase(), GamePhase::Play);
            self.tick(FrameInput::default(), secs(4));
            assert!(self.session.timers().is_go());
        }

        fn hull(&self, player: Player) -> kart_engine::Rect {
            self.world
                .rect(self.layout.carts[player.index()].hull())
                .expect("hull")
        }

        fn teleport(&mut self, player: Player, to: Vec2) {
            let delta = to - self.hull(player).center;
            for id in self.layout.carts[player.index()].parts {
                if let Some(shape) = self.world.shape_mut(id) {
                    shape.translate(delta);
                }
            }
        }

        fn checkpoint(&self, index: usize) -> Vec2 {
            self.layout.checkpoints[index].center
        }
    }

    fn secs(seconds: u64) -> Duration {
        Duration::from_secs(seconds)
    }

    fn steer(player: Player, steering: Steering) -> FrameInput {
        let mut input = FrameInput::default();
        input.steering[player.index()] = steering;
        input
    }

    const UP: Steering = Steering {
        up: true,
        down: false,
        left: false,
        right: false,
    };

    const LEFT: Steering = Steering {
        up: false,
        down: false,
        left: true,
        right: false,
    };

    fn phase_changes(events: &[RaceEvent]) -> Vec<(GamePhase, GamePhase)> {
        events
            .iter()
            .filter_map(|event| match event {
                RaceEvent::PhaseChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn begin_edge_opens_character_select() {
        let mut rig = Rig::new();
        assert!(rig.tick(FrameInput::default(), Duration::ZERO).is_empty());
        rig.begin();
        assert_eq!(rig.session.phase(), GamePhase::CharacterSelect);
    }

    #[test]
    fn play_button_is_inert_until_both_pick() {
        let mut rig = Rig::new();
        rig.begin();
        assert!(rig.click(rig.button_center(), Duration::ZERO).is_empty());
        assert_eq!(rig.session.button_visual(), ButtonVisual::Disabled);

        rig.click(rig.box_center(2), Duration::ZERO);
        assert!(rig.click(rig.button_center(), Duration::ZERO).is_empty());
        assert_eq!(rig.session.phase(), GamePhase::CharacterSelect);

        rig.click(rig.box_center(5), Duration::ZERO);
        let events = rig.click(rig.button_center(), Duration::from_millis(1500));
        assert_eq!(
            phase_changes(&events),
            vec![(GamePhase::CharacterSelect, GamePhase::Play)]
        );
    }

    #[test]
    fn pressing_without_release_does_not_commit() {
        let mut rig = Rig::new();
        rig.begin();
        let held = FrameInput {
            cursor: Some(rig.box_center(3)),
            mouse_down: true,
            ..FrameInput::default()
        };
        for _ in 0..10 {
            assert!(rig.tick(held, Duration::ZERO).is_empty());
        }
        assert_eq!(rig.session.selection().pick(Player::One), None);
        let border = rig.layout.boxes[3].border;
        assert_eq!(
            rig.world.shape(border).map(|shape| shape.color),
            Some(Rgba::from_unit(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn picks_recolor_cart_indicators() {
        let mut rig = Rig::new();
        rig.begin();
        let events = rig.click(rig.box_center(3), Duration::ZERO);
        assert_eq!(
            events,
            vec![RaceEvent::CharacterSelected {
                player: Player::One,
                character: 3
            }]
        );
        let indicator = rig.layout.carts[0].indicator();
        assert_eq!(
            rig.world.shape(indicator).map(|shape| shape.color),
            Some(rig.layout.roster[3].color())
        );
    }

    #[test]
    fn second_player_may_take_the_same_character() {
        let mut rig = Rig::new();
        rig.begin();
        rig.click(rig.box_center(4), Duration::ZERO);
        let events = rig.click(rig.box_center(4), Duration::ZERO);
        assert_eq!(
            events,
            vec![RaceEvent::CharacterSelected {
                player: Player::Two,
                character: 4
            }]
        );
        assert_eq!(rig.session.selection().pick(Player::Two), Some(4));
        assert!(rig.session.selection().is_complete());
    }

    #[test]
    fn carts_are_frozen_during_countdown() {
        let mut rig = Rig::new();
        rig.begin();
        rig.click(rig.box_center(0), Duration::ZERO);
        rig.click(rig.box_center(1), Duration::ZERO);
        rig.click(rig.button_center(), secs(10));
        let start = rig.hull(Player::One).center;

        rig.tick(steer(Player::One, UP), Duration::from_millis(13_999));
        assert_eq!(rig.hull(Player::One).center, start);
        assert!(!rig.session.timers().is_go());

        let events = rig.tick(steer(Player::One, UP), secs(14));
        assert!(events.contains(&RaceEvent::CountdownFinished));
        assert_eq!(rig.hull(Player::One).center, Vec2::new(start.x, start.y + 3.15));
    }

    #[test]
    fn boost_panel_outpaces_track() {
        let mut rig = Rig::new();
        rig.race_at_go(0, 1);
        rig.teleport(Player::One, Vec2::new(600.0, 720.0));
        rig.tick(steer(Player::One, LEFT), secs(5));
        assert_eq!(rig.hull(Player::One).center.x, 594.0);
        assert_eq!(rig.session.cart(Player::One).zone, Zone::Boost);

        rig.teleport(Player::Two, Vec2::new(825.0, 400.0));
        rig.tick(steer(Player::Two, LEFT), secs(5));
        assert_eq!(rig.hull(Player::Two).center.x, 825.0 - 0.35);
        assert_eq!(rig.session.cart(Player::Two).zone, Zone::OffTrack);
    }

    #[test]
    fn blocked_cart_still_turns() {
        let mut rig = Rig::new();
        rig.race_at_go(0, 1);
        rig.teleport(Player::One, Vec2::new(17.0 + 15.0, 400.0));
        rig.tick(steer(Player::One, LEFT), secs(5));

        assert_eq!(rig.hull(Player::One).left(), 17.0);
        for id in rig.layout.carts[0].parts {
            let rotation = rig.world.shape(id).expect("part").rotation_radians;
            assert!((rotation - ROTATION_STEP_RADIANS).abs() < 1e-6);
        }
    }

    #[test]
    fn crossings_are_reported_in_order() {
        let mut rig = Rig::new();
        rig.race_at_go(0, 1);
        let mut events = Vec::new();
        for checkpoint in [0, 1, 2, 0] {
            rig.teleport(Player::Two, rig.checkpoint(checkpoint));
            events.extend(rig.tick(FrameInput::default(), secs(6)));
        }
        assert_eq!(
            events,
            vec![
                RaceEvent::LapCompleted {
                    player: Player::Two,
                    laps: 1
                },
                RaceEvent::CheckpointCrossed {
                    player: Player::Two,
                    checkpoint: 1
                },
                RaceEvent::CheckpointCrossed {
                    player: Player::Two,
                    checkpoint: 2
                },
                RaceEvent::LapCompleted {
                    player: Player::Two,
                    laps: 2
                },
            ]
        );
        assert_eq!(rig.session.cart(Player::One).progress.laps(), 0);
    }

    #[test]
    fn simultaneous_finish_enters_over_once_with_blue_first() {
        let mut rig = Rig::new();
        rig.race_at_go(2, 6);
        let mut all_events = Vec::new();
        for _ in 0..4 {
            for checkpoint in [0, 1, 2] {
                for player in Player::ALL {
                    rig.teleport(player, rig.checkpoint(checkpoint));
                }
                all_events.extend(rig.tick(FrameInput::default(), secs(30)));
                if rig.session.phase() == GamePhase::Over {
                    break;
                }
            }
        }
        assert_eq!(
            phase_changes(&all_events),
            vec![(GamePhase::Play, GamePhase::Over)]
        );
        assert!(all_events.contains(&RaceEvent::RaceFinished {
            winner: Player::Two,
            laps: [4, 4]
        }));
        assert_eq!(
            rig.world.shape(rig.layout.winners[0]).map(|shape| shape.color),
            Some(rig.layout.roster[6].color())
        );
        assert_eq!(
            rig.world.shape(rig.layout.winners[1]).map(|shape| shape.color),
            Some(rig.layout.roster[2].color())
        );

        assert!(rig.tick(FrameInput::default(), secs(31)).is_empty());
    }

    #[test]
    fn main_menu_click_resets_everything() {
        let mut rig = Rig::new();
        rig.race_at_go(0, 1);
        for _ in 0..4 {
            for checkpoint in [0, 1, 2] {
                rig.teleport(Player::One, rig.checkpoint(checkpoint));
                rig.tick(FrameInput::default(), secs(20));
            }
        }
        assert_eq!(rig.session.phase(), GamePhase::Over);
        assert_eq!(rig.session.leader(), Player::One);

        let events = rig.click(rig.button_center(), secs(25));
        assert_eq!(
            phase_changes(&events),
            vec![(GamePhase::Over, GamePhase::Start)]
        );
        assert_eq!(rig.session.selection(), &Selection::default());
        assert_eq!(rig.session.cart(Player::One).progress, LapProgress::default());
        assert!(!rig.session.timers().is_go());
    }
}
