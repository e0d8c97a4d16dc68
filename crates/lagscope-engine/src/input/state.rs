use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, PointerMoveEvent};

/// Current input state for the window.
///
/// Holds "is down" information and the current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and
    /// writes deltas to `frame`.
    ///
    /// Press edges are detected against `keys_down`, so both platform
    /// auto-repeat events (`repeat: true`) and redundant press events leave
    /// `frame.keys_pressed` untouched.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear the "down" set. Avoids stuck keys
                    // when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                repeat,
                ..
            } => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(*key);
                    if inserted && !repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    let removed = self.keys_down.remove(key);
                    if removed {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            code: 0,
            repeat,
        }
    }

    #[test]
    fn press_edge_is_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit1, KeyState::Pressed, false));
        assert!(frame.keys_pressed.contains(&Key::Digit1));
        assert!(state.key_down(Key::Digit1));
    }

    #[test]
    fn auto_repeat_never_produces_a_press_edge() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit1, KeyState::Pressed, false));
        frame.clear();

        // Held key keeps repeating across frames; no new edges may appear.
        for _ in 0..5 {
            state.apply_event(&mut frame, key(Key::Digit1, KeyState::Pressed, true));
        }
        assert!(frame.keys_pressed.is_empty());
        assert_eq!(frame.events.len(), 5);
    }

    #[test]
    fn release_then_press_is_a_new_edge() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit7, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Digit7, KeyState::Released, false));
        frame.clear();

        state.apply_event(&mut frame, key(Key::Digit7, KeyState::Pressed, false));
        assert!(frame.keys_pressed.contains(&Key::Digit7));
    }

    #[test]
    fn pointer_updates_overwrite_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 }),
        );
        state.apply_event(
            &mut frame,
            InputEvent::PointerMoved(PointerMoveEvent { x: 30.0, y: 40.0 }),
        );
        assert_eq!(state.pointer_pos, Some((30.0, 40.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit3, KeyState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::Digit3));
    }
}
