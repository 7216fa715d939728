use std::collections::HashSet;

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard and mouse state accumulated from window events.
///
/// Held keys are polled every frame (movement, speed, UV scale); one-shot
/// actions (presets, wrap-mode selection, orbit toggle) read the per-frame
/// just-pressed set instead so holding the key does not retrigger them.
/// Cursor and scroll deltas accumulate until the frame consumes them.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    last_cursor: Option<(f64, f64)>,
    cursor_delta: (f32, f32),
    scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(code),
                        ElementState::Released => self.release(code),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((last_x, last_y)) = self.last_cursor {
                    self.cursor_delta.0 += (position.x - last_x) as f32;
                    // Window y grows downward; camera pitch grows upward.
                    self.cursor_delta.1 += (last_y - position.y) as f32;
                }
                self.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
            }
            WindowEvent::MouseInput { button, state, .. } => {
                log::debug!("mouse button {button:?} {state:?}");
            }
            WindowEvent::Focused(false) => {
                // Clear held state so keys can't stick across focus loss.
                self.keys_down.clear();
            }
            _ => {}
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        if self.keys_down.insert(code) {
            self.just_pressed.insert(code);
        }
    }

    pub fn release(&mut self, code: KeyCode) {
        self.keys_down.remove(&code);
    }

    pub fn key_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed.contains(&code)
    }

    /// Returns and resets the accumulated cursor delta.
    pub fn take_cursor_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.cursor_delta)
    }

    /// Returns and resets the accumulated scroll delta.
    pub fn take_scroll_delta(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }

    /// Ends the frame: held keys persist, edge-triggered state does not.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_and_just_pressed_lifecycles() {
        let mut input = InputState::new();

        input.press(KeyCode::KeyW);
        assert!(input.key_down(KeyCode::KeyW));
        assert!(input.just_pressed(KeyCode::KeyW));

        input.end_frame();
        assert!(input.key_down(KeyCode::KeyW));
        assert!(!input.just_pressed(KeyCode::KeyW));

        // Holding the key does not re-arm the edge trigger.
        input.press(KeyCode::KeyW);
        assert!(!input.just_pressed(KeyCode::KeyW));

        input.release(KeyCode::KeyW);
        input.press(KeyCode::KeyW);
        assert!(input.just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn deltas_are_consumed_once() {
        let mut input = InputState::new();
        input.cursor_delta = (3.0, -2.0);
        input.scroll_delta = 1.5;

        assert_eq!(input.take_cursor_delta(), (3.0, -2.0));
        assert_eq!(input.take_cursor_delta(), (0.0, 0.0));
        assert_eq!(input.take_scroll_delta(), 1.5);
        assert_eq!(input.take_scroll_delta(), 0.0);
    }
}
