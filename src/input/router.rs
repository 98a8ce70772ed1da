use egui::PointerButton;

use super::InputEvent;
use crate::pad::DraftPad;

/// Routes one input event to the draft pad.
///
/// Only the primary button draws. A press must start on the canvas, but moves
/// and releases are delivered wherever the pointer is so a gesture dragged
/// over the toolbar still ends cleanly. Leaving the window ends the gesture.
/// Returns whether the pad consumed the event.
pub fn route_event(pad: &mut DraftPad, event: &InputEvent) -> bool {
    if !pad.is_open() {
        return false;
    }

    match event {
        InputEvent::PointerDown {
            location,
            button: PointerButton::Primary,
            modifiers,
        } if location.in_canvas => {
            pad.pointer_down(location.position, *modifiers);
            true
        }
        InputEvent::PointerUp {
            location,
            button: PointerButton::Primary,
        } => {
            pad.pointer_up(location.position);
            true
        }
        InputEvent::PointerMove { location, .. } => {
            pad.pointer_move(location.position);
            true
        }
        InputEvent::PointerLeave { last_known_location } => {
            pad.pointer_up(last_known_location.position);
            true
        }
        InputEvent::KeyDown { key, modifiers } => pad.handle_key(*key, *modifiers),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use egui::{Context, Modifiers, Pos2};

    fn at(x: f32, y: f32, in_canvas: bool) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            in_canvas,
        }
    }

    fn open_pad() -> DraftPad {
        let mut pad = DraftPad::default();
        pad.open(&Context::default());
        pad
    }

    fn press(location: InputLocation) -> InputEvent {
        InputEvent::PointerDown {
            location,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn leaving_the_window_ends_the_stroke() {
        let mut pad = open_pad();
        assert!(route_event(&mut pad, &press(at(10.0, 10.0, true))));
        route_event(
            &mut pad,
            &InputEvent::PointerMove {
                location: at(30.0, 10.0, true),
                held_buttons: vec![PointerButton::Primary],
            },
        );
        assert!(route_event(
            &mut pad,
            &InputEvent::PointerLeave {
                last_known_location: at(30.0, 10.0, true),
            },
        ));

        assert!(pad.state().is_idle());
        assert_eq!(pad.scene().strokes().len(), 1);
        assert_eq!(pad.scene().strokes()[0].points().len(), 2);
        assert!(pad.can_undo());
    }

    #[test]
    fn presses_off_the_canvas_are_ignored() {
        let mut pad = open_pad();
        assert!(!route_event(&mut pad, &press(at(10.0, 10.0, false))));
        assert!(pad.state().is_idle());
        assert!(pad.scene().is_empty());
    }

    #[test]
    fn secondary_button_does_not_draw() {
        let mut pad = open_pad();
        let event = InputEvent::PointerDown {
            location: at(10.0, 10.0, true),
            button: PointerButton::Secondary,
            modifiers: Modifiers::NONE,
        };
        assert!(!route_event(&mut pad, &event));
        assert!(pad.state().is_idle());
    }

    #[test]
    fn closed_pad_ignores_events() {
        let mut pad = DraftPad::default();
        assert!(!route_event(&mut pad, &press(at(10.0, 10.0, true))));
        assert!(pad.scene().is_empty());
    }
}
