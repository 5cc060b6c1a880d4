/// Derives a release edge from the per-tick mouse button level.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PointerTracker {
    was_down: bool,
}

impl PointerTracker {
    /// Returns true on the tick the button goes from held to released.
    pub(crate) fn observe(&mut self, is_down: bool) -> bool {
        let released = self.was_down && !is_down;
        self.was_down = is_down;
        released
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ButtonVisual {
    #[default]
    Idle,
    Hover,
    Pressed,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PointerState {
    pub(crate) hovered: bool,
    pub(crate) mouse_down: bool,
    pub(crate) released: bool,
}

impl ButtonVisual {
    /// A disabled button never shows hover or press feedback. Dragging the held
    /// mouse off the button keeps whatever it showed last.
    pub(crate) fn next(self, enabled: bool, pointer: PointerState) -> ButtonVisual {
        match (pointer.hovered, pointer.mouse_down, enabled) {
            (true, _, false) => ButtonVisual::Disabled,
            (true, true, true) => ButtonVisual::Pressed,
            (true, false, true) => ButtonVisual::Hover,
            (false, false, true) => ButtonVisual::Idle,
            (false, false, false) => ButtonVisual::Disabled,
            (false, true, _) => self,
        }
    }
}

/// A click lands when the mouse is released over the button.
pub(crate) fn was_clicked(pointer: PointerState) -> bool {
    pointer.hovered && pointer.released
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(hovered: bool, mouse_down: bool) -> PointerState {
        PointerState {
            hovered,
            mouse_down,
            released: false,
        }
    }

    #[test]
    fn release_edge_fires_once() {
        let mut tracker = PointerTracker::default();
        assert!(!tracker.observe(false));
        assert!(!tracker.observe(true));
        assert!(!tracker.observe(true));
        assert!(tracker.observe(false));
        assert!(!tracker.observe(false));
    }

    #[test]
    fn enabled_button_tracks_hover_and_press() {
        assert_eq!(ButtonVisual::Idle.next(true, pointer(true, false)), ButtonVisual::Hover);
        assert_eq!(ButtonVisual::Hover.next(true, pointer(true, true)), ButtonVisual::Pressed);
        assert_eq!(ButtonVisual::Hover.next(true, pointer(false, false)), ButtonVisual::Idle);
    }

    #[test]
    fn disabled_button_only_shows_disabled() {
        assert_eq!(ButtonVisual::Idle.next(false, pointer(true, true)), ButtonVisual::Disabled);
        assert_eq!(ButtonVisual::Idle.next(false, pointer(true, false)), ButtonVisual::Disabled);
        assert_eq!(ButtonVisual::Idle.next(false, pointer(false, false)), ButtonVisual::Disabled);
    }

    #[test]
    fn dragging_off_while_held_keeps_visual() {
        assert_eq!(ButtonVisual::Pressed.next(true, pointer(false, true)), ButtonVisual::Pressed);
        assert_eq!(ButtonVisual::Disabled.next(true, pointer(false, true)), ButtonVisual::Disabled);
    }

    #[test]
    fn click_needs_release_over_button() {
        let over = PointerState {
            hovered: true,
            mouse_down: false,
            released: true,
        };
        assert!(was_clicked(over));
        assert!(!was_clicked(PointerState {
            hovered: false,
            ..over
        }));
        assert!(!was_clicked(pointer(true, true)));
    }
}
