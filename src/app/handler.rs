//! Input handling — maps key/mouse/resize events to engine entry points.
//!
//! The engine only ever sees three kinds of mutation: gestures, spring
//! frames and viewport widths.  Everything terminal-specific (columns, key
//! codes, focus) is translated here.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::core::gesture::GestureEvent;

use super::state::AppState;

/// Direction of a keyboard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

// ── Keys ────────────────────────────────────────────────────────

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => step(state, Step::Prev),
        KeyCode::Right | KeyCode::Char('l') => step(state, Step::Next),
        KeyCode::Char('d') => {
            state.show_debug = !state.show_debug;
            state.status_message = Some(format!(
                "Debug line {}",
                if state.show_debug { "on" } else { "off" }
            ));
        }
        _ => {}
    }
}

/// Synthesise a one-pitch swipe.  Ignored while the mouse holds the strip.
pub fn step(state: &mut AppState, direction: Step) {
    if state.pointer.is_active() {
        return;
    }
    let pitch = state.revolver.pitch();
    let delta = match direction {
        Step::Prev => pitch,
        Step::Next => -pitch,
    };
    apply_gesture(state, GestureEvent::Start);
    apply_gesture(state, GestureEvent::Update(delta));
    apply_gesture(state, GestureEvent::End);
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let column = mouse.column as f64;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !state.layout().hits_carousel(mouse.column, mouse.row) {
                return;
            }
            state.status_message = None;
            let event = state.pointer.press(column);
            apply_gesture(state, event);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            // Tracks the pointer even after it leaves the carousel.
            if let Some(event) = state.pointer.drag(column) {
                apply_gesture(state, event);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => release_pointer(state),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => step(state, Step::Prev),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => step(state, Step::Next),
        _ => {}
    }
}

/// The terminal lost focus mid-drag; treat it as a release so the strip
/// does not stay grabbed.
pub fn handle_focus_lost(state: &mut AppState) {
    release_pointer(state);
}

fn release_pointer(state: &mut AppState) {
    if let Some(event) = state.pointer.release() {
        apply_gesture(state, event);
    }
}

/// Forward one gesture step to the engine.
pub fn apply_gesture(state: &mut AppState, event: GestureEvent) {
    match event {
        GestureEvent::Start => state.revolver.on_gesture_start(),
        GestureEvent::Update(delta) => state.revolver.on_gesture_update(delta),
        GestureEvent::End => {
            state.revolver.on_gesture_end();
            // Start the spring clock at release, not at the last frame.
            state.last_frame = Instant::now();
        }
    }
}

// ── Resize ──────────────────────────────────────────────────────

/// New terminal size: the carousel's inner width becomes the viewport.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = Rect::new(0, 0, width, height);
    let viewport = state.layout().strip_area.width;
    state.revolver.on_viewport_width_changed(viewport as f64);
}

// ── Frames ──────────────────────────────────────────────────────

/// Advance the spring by the wall time since the previous frame and feed
/// the result to the engine.
pub fn handle_frame(state: &mut AppState, now: Instant) {
    let elapsed = now.saturating_duration_since(state.last_frame);
    state.last_frame = now;
    if let Some(frame) = state.revolver.spring_mut().advance(elapsed) {
        state.revolver.on_spring_frame(frame);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::engine::{EngineState, Revolver};
    use crate::core::spring::PhysicsSpring;

    fn app() -> AppState {
        let config = AppConfig::default();
        let items = ["1", "2", "3", "4"].map(String::from).to_vec();
        let revolver =
            Revolver::new(items, config.geometry(), PhysicsSpring::new(config.spring())).unwrap();
        let mut state = AppState::new(revolver, config);
        handle_resize(&mut state, 80, 24);
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn run_frames(state: &mut AppState) {
        let mut now = state.last_frame;
        for _ in 0..1_000 {
            if state.revolver.state() != EngineState::Settling {
                return;
            }
            now += Duration::from_millis(16);
            handle_frame(state, now);
        }
        panic!("carousel did not settle");
    }

    #[test]
    fn resize_sets_viewport_to_strip_width() {
        let state = app();
        assert_eq!(state.revolver.viewport_width(), Some(78.0));
    }

    #[test]
    fn mouse_drag_moves_and_settles() {
        let mut state = app();
        let row = state.layout().strip_area.y;

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 50, row));
        assert!(state.revolver.is_dragging());
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, row));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 30, 0));
        assert_eq!(state.revolver.visual_offset(), -20.0);

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 30, 0));
        assert_eq!(state.revolver.state(), EngineState::Settling);
        run_frames(&mut state);
        assert_eq!(state.revolver.center_index(), 1);
        assert_eq!(state.revolver.center_item(), "2");
    }

    #[test]
    fn second_press_without_release_does_not_jump() {
        let mut state = app();
        let row = state.layout().strip_area.y;

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 50, row));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 20, row));
        assert_eq!(state.revolver.visual_offset(), -30.0);

        // The release was lost; the next press starts elsewhere.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 60, row));
        assert!(state.revolver.is_dragging());
        assert_eq!(state.revolver.visual_offset(), -30.0);

        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 59, row));
        assert_eq!(state.revolver.visual_offset(), -31.0);

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 59, row));
        run_frames(&mut state);
        assert_eq!(state.revolver.center_index(), 2);
    }

    #[test]
    fn press_outside_the_carousel_is_ignored() {
        let mut state = app();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 10, 0));
        assert!(!state.revolver.is_dragging());
        assert!(!state.pointer.is_active());
    }

    #[test]
    fn focus_loss_releases_the_strip() {
        let mut state = app();
        let row = state.layout().strip_area.y;
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 50, row));
        handle_focus_lost(&mut state);
        assert_eq!(state.revolver.state(), EngineState::Settling);
        assert!(!state.pointer.is_active());
    }

    #[test]
    fn arrow_keys_step_one_item() {
        let mut state = app();
        handle_key(&mut state, key(KeyCode::Left));
        run_frames(&mut state);
        assert_eq!(state.revolver.center_index(), 3);
        assert_eq!(state.revolver.center_item(), "4");

        handle_key(&mut state, key(KeyCode::Right));
        handle_key(&mut state, key(KeyCode::Right));
        run_frames(&mut state);
        assert_eq!(state.revolver.center_index(), 1);
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut state = app();
            handle_key(&mut state, key(code));
            assert!(state.should_quit);
        }
        let mut state = app();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn card_cache_follows_the_window() {
        let mut state = app();
        state.sync_slots();
        let len = state.slots.len();
        assert_eq!(len, state.revolver.window().len);
        assert_eq!(state.slots.rebuilt(), len);

        handle_key(&mut state, key(KeyCode::Right));
        run_frames(&mut state);
        state.sync_slots();
        assert_eq!(state.slots.rebuilt(), 1);
    }
}
