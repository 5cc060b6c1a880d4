use kart_engine::{
    InputAction, InputSnapshot, Rgba, Scene, SceneCommand, SceneLoadError, SceneWorld,
    ShapeGroup,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::config::{GameConfig, RaceConfig};
use super::effects;
use super::hud;
use super::layout::{self, CircuitPlan, Layout};
use super::race::{
    Clock, FrameInput, GamePhase, Player, RaceEvent, RaceSession, Steering, CHECKPOINT_COUNT,
};

/// Plugs the race core into the engine: input in, shapes and labels out.
pub(crate) struct RaceScene<C: Clock> {
    title: String,
    race: RaceConfig,
    plan: CircuitPlan,
    clock: C,
    rng: StdRng,
    layout: Option<Layout>,
    session: RaceSession,
}

impl<C: Clock> RaceScene<C> {
    pub(crate) fn new(config: &GameConfig, clock: C, rng: StdRng) -> Self {
        Self {
            title: config.window.title.clone(),
            race: config.race.clone(),
            plan: CircuitPlan::blob_kart(),
            clock,
            rng,
            layout: None,
            session: RaceSession::new(config.race.clone()),
        }
    }

    pub(crate) fn with_entropy(config: &GameConfig, clock: C) -> Self {
        Self::new(config, clock, StdRng::from_entropy())
    }

    fn refresh_view(&self, world: &mut SceneWorld, layout: &Layout) {
        world.show_only(visible_groups(self.session.phase()));
        world.set_labels(hud::labels(&self.session, layout, self.clock.now()));
    }
}

impl<C: Clock> Scene for RaceScene<C> {
    fn load(&mut self, world: &mut SceneWorld) -> Result<(), SceneLoadError> {
        let layout =
            Layout::build(world, &self.plan, &mut self.rng).map_err(SceneLoadError::new)?;
        world.set_clear_color(Rgba::from_unit(0.0, 0.7, 0.1));
        self.session = RaceSession::new(self.race.clone());
        self.refresh_view(world, &layout);
        info!(
            shapes = world.shape_count(),
            track_segments = layout.track.len(),
            boost_panels = layout.boosts.len(),
            characters = layout.roster.len(),
            "scene_loaded"
        );
        self.layout = Some(layout);
        Ok(())
    }

    fn update(
        &mut self,
        _fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand {
        let Some(layout) = self.layout.as_ref() else {
            return SceneCommand::None;
        };
        let now = self.clock.now();
        let events = self
            .session
            .update(&frame_input(input), now, world, layout);

        let mut command = SceneCommand::None;
        for event in &events {
            log_event(event, layout);
            if matches!(
                event,
                RaceEvent::PhaseChanged {
                    to: GamePhase::Start,
                    ..
                }
            ) {
                command = SceneCommand::HardReset;
            }
        }
        self.refresh_view(world, layout);
        command
    }

    fn animate(&mut self, world: &mut SceneWorld) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        match self.session.phase() {
            GamePhase::Start => effects::drift_title_cart(world, &layout.title_cart),
            GamePhase::Over => {
                effects::drop_confetti(world, &layout.confetti, layout.world_size, &mut self.rng)
            }
            GamePhase::CharacterSelect | GamePhase::Play => {}
        }
    }

    fn unload(&mut self, _world: &mut SceneWorld) {
        self.layout = None;
        debug!("scene_unloaded");
    }

    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        Some(format!("{} | {}", self.title, self.session.phase().label()))
    }

    fn debug_lines(&self, _world: &SceneWorld) -> Vec<String> {
        let timers = self.session.timers();
        let mut lines = vec![format!("phase: {}", self.session.phase().label())];
        for player in Player::ALL {
            let cart = self.session.cart(player);
            lines.push(format!(
                "{}: lap {} cp {}/{} zone {}",
                player.cart_name().to_lowercase(),
                cart.progress.laps(),
                cart.progress.last_crossed(),
                CHECKPOINT_COUNT - 1,
                cart.zone.label()
            ));
        }
        lines.push(format!(
            "go: {} race_s: {}",
            timers.is_go(),
            timers.race_seconds(self.clock.now())
        ));
        lines.push(format!("button: {:?}", self.session.button_visual()));
        lines
    }
}

fn visible_groups(phase: GamePhase) -> &'static [ShapeGroup] {
    match phase {
        GamePhase::Start => &[layout::SKY, layout::TITLE],
        GamePhase::CharacterSelect => &[layout::CHARACTER_SELECT, layout::BUTTON],
        GamePhase::Play => &[layout::CIRCUIT, layout::CARTS],
        GamePhase::Over => &[
            layout::SKY,
            layout::RESULTS,
            layout::CONFETTI,
            layout::BUTTON,
        ],
    }
}

fn frame_input(input: &InputSnapshot) -> FrameInput {
    let steering = |up, down, left, right| Steering {
        up: input.is_down(up),
        down: input.is_down(down),
        left: input.is_down(left),
        right: input.is_down(right),
    };
    FrameInput {
        begin_pressed: input.was_pressed(InputAction::Begin),
        steering: [
            steering(
                InputAction::PlayerOneUp,
                InputAction::PlayerOneDown,
                InputAction::PlayerOneLeft,
                InputAction::PlayerOneRight,
            ),
            steering(
                InputAction::PlayerTwoUp,
                InputAction::PlayerTwoDown,
                InputAction::PlayerTwoLeft,
                InputAction::PlayerTwoRight,
            ),
        ],
        cursor: input.cursor_position(),
        mouse_down: input.left_mouse_down(),
    }
}

fn log_event(event: &RaceEvent, layout: &Layout) {
    match event {
        RaceEvent::PhaseChanged { from, to } => {
            info!(from = from.label(), to = to.label(), "phase_changed");
        }
        RaceEvent::CharacterSelected { player, character } => {
            let blob = layout.blob(*character).map_or("unknown", |blob| blob.name);
            info!(cart = player.cart_name(), character = blob, "character_selected");
        }
        RaceEvent::CountdownFinished => info!("countdown_finished"),
        RaceEvent::CheckpointCrossed { player, checkpoint } => {
            debug!(cart = player.cart_name(), checkpoint, "checkpoint_crossed");
        }
        RaceEvent::LapCompleted { player, laps } => {
            info!(cart = player.cart_name(), laps, "lap_completed");
        }
        RaceEvent::RaceFinished { winner, laps } => {
            info!(
                winner = winner.cart_name(),
                red_laps = laps[0],
                blue_laps = laps[1],
                "race_finished"
            );
        }
    }
}
