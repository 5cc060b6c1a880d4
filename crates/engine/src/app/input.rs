#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    PlayerOneUp,
    PlayerOneDown,
    PlayerOneLeft,
    PlayerOneRight,
    PlayerTwoUp,
    PlayerTwoDown,
    PlayerTwoLeft,
    PlayerTwoRight,
    Begin,
    ToggleOverlay,
    Quit,
}

const ACTION_COUNT: usize = 11;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn clear(&mut self) {
        self.down = [false; ACTION_COUNT];
    }
}

/// Held state plus latched press edges. An edge is set on an up->down change and stays
/// set until the next tick consumes it, so a tap shorter than one tick is not lost.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionTracker {
    held: ActionStates,
    pressed_edges: ActionStates,
}

impl ActionTracker {
    pub(crate) fn apply(&mut self, action: InputAction, is_down: bool) {
        if is_down && !self.held.is_down(action) {
            self.pressed_edges.set(action, true);
        }
        self.held.set(action, is_down);
    }

    pub(crate) fn held(&self) -> ActionStates {
        self.held
    }

    pub(crate) fn take_pressed_edges(&mut self) -> ActionStates {
        let edges = self.pressed_edges;
        self.pressed_edges.clear();
        edges
    }

    pub(crate) fn take_pressed(&mut self, action: InputAction) -> bool {
        let was_pressed = self.pressed_edges.is_down(action);
        self.pressed_edges.set(action, false);
        was_pressed
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::PlayerOneUp => 0,
            InputAction::PlayerOneDown => 1,
            InputAction::PlayerOneLeft => 2,
            InputAction::PlayerOneRight => 3,
            InputAction::PlayerTwoUp => 4,
            InputAction::PlayerTwoDown => 5,
            InputAction::PlayerTwoLeft => 6,
            InputAction::PlayerTwoRight => 7,
            InputAction::Begin => 8,
            InputAction::ToggleOverlay => 9,
            InputAction::Quit => 10,
        }
    }
}
