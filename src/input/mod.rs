use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

mod router;
pub mod shortcuts;

pub use router::route_event;
pub use shortcuts::{KeyAction, key_action};

/// Where a pointer event happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas origin
    pub position: Pos2,
    /// Whether the pointer was over the canvas (and not over the toolbar)
    pub in_canvas: bool,
}

/// Input events the draft pad reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Pointer left the window
    PointerLeave { last_known_location: InputLocation },
    /// A key was pressed while the pad had focus
    KeyDown { key: Key, modifiers: Modifiers },
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Converts raw egui input into [`InputEvent`]s in canvas-local coordinates
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the on-screen rectangle of the canvas
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    /// Screen position to canvas-local location
    pub fn make_location(&self, screen_pos: Pos2, canvas_hovered: bool) -> InputLocation {
        match self.canvas_rect {
            Some(rect) => InputLocation {
                position: (screen_pos - rect.min).to_pos2(),
                in_canvas: canvas_hovered && rect.contains(screen_pos),
            },
            None => InputLocation {
                position: screen_pos,
                in_canvas: false,
            },
        }
    }

    /// Collect this frame's events. `canvas_hovered` is false while the
    /// pointer is over a floating window such as the toolbar.
    pub fn process_input(&mut self, ctx: &Context, canvas_hovered: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let modifiers = input.modifiers;

            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = BUTTONS
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos, canvas_hovered),
                        held_buttons,
                    });
                }
                self.last_pointer_pos = Some(pos);
            } else if let Some(last) = self.last_pointer_pos.take() {
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.make_location(last, canvas_hovered),
                });
            }

            let pointer_pos = input.pointer.interact_pos().or(self.last_pointer_pos);
            for button in BUTTONS {
                let Some(pos) = pointer_pos else {
                    break;
                };
                if input.pointer.button_pressed(button) {
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos, canvas_hovered),
                        button,
                        modifiers,
                    });
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos, canvas_hovered),
                        button,
                    });
                }
            }

            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}
