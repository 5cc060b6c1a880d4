#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum GamePhase {
    #[default]
    Start,
    CharacterSelect,
    Play,
    Over,
}

impl GamePhase {
    pub(crate) fn label(self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::CharacterSelect => "character_select",
            GamePhase::Play => "play",
            GamePhase::Over => "over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseEvent {
    Begin,
    PlayClicked { selections_complete: bool },
    RaceFinished,
    MainMenuClicked,
}

/// The full transition table. Anything not listed leaves the phase unchanged.
pub(crate) fn next_phase(phase: GamePhase, event: PhaseEvent) -> Option<GamePhase> {
    match (phase, event) {
        (GamePhase::Start, PhaseEvent::Begin) => Some(GamePhase::CharacterSelect),
        (
            GamePhase::CharacterSelect,
            PhaseEvent::PlayClicked {
                selections_complete: true,
            },
        ) => Some(GamePhase::Play),
        (GamePhase::Play, PhaseEvent::RaceFinished) => Some(GamePhase::Over),
        (GamePhase::Over, PhaseEvent::MainMenuClicked) => Some(GamePhase::Start),
        _ => None,
    }
}
