use egui::{Context, Key, PointerButton, Pos2, Rect};
use kurbo::Point;

/// Canvas input in canvas-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas.
    PointerDown { pos: Point },
    /// Pointer moved while the primary button is held.
    PointerDrag { pos: Point },
    /// Primary button released after a press that started in the canvas.
    PointerUp { pos: Point },
    /// Pointer moved over the canvas with no button held.
    PointerMove { pos: Point },
    KeyDown {
        key: Key,
        /// A text field owns the keyboard; shortcuts must not fire.
        text_focus: bool,
    },
}

/// Handles converting raw egui input into canvas [`InputEvent`]s.
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
    canvas_hovered: bool,
    pressed: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: None,
            canvas_hovered: false,
            pressed: false,
        }
    }

    /// Update the screen rectangle of the canvas and whether the pointer is
    /// over it with no other egui layer (popup, window) in between.
    pub fn set_canvas(&mut self, rect: Rect, hovered: bool) {
        self.canvas_rect = Some(rect);
        self.canvas_hovered = hovered;
    }

    fn in_canvas(&self, pos: Pos2) -> bool {
        self.canvas_hovered && self.canvas_rect.is_some_and(|rect| rect.contains(pos))
    }

    /// Converts a screen position into canvas coordinates.
    pub fn to_canvas(&self, pos: Pos2) -> Point {
        let origin = self.canvas_rect.map_or(Pos2::ZERO, |rect| rect.min);
        Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let text_focus = ctx.wants_keyboard_input();

        ctx.input(|input| {
            let pointer_pos = input.pointer.interact_pos().or(input.pointer.hover_pos());

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pointer_pos.filter(|pos| self.in_canvas(*pos)) {
                    self.pressed = true;
                    events.push(InputEvent::PointerDown { pos: self.to_canvas(pos) });
                }
            } else if let Some(pos) = pointer_pos {
                if Some(pos) != self.last_pointer_pos {
                    if self.pressed {
                        events.push(InputEvent::PointerDrag { pos: self.to_canvas(pos) });
                    } else if self.in_canvas(pos) {
                        events.push(InputEvent::PointerMove { pos: self.to_canvas(pos) });
                    }
                }
            }

            if self.pressed && input.pointer.button_released(PointerButton::Primary) {
                self.pressed = false;
                let pos = pointer_pos.or(self.last_pointer_pos).unwrap_or(Pos2::ZERO);
                events.push(InputEvent::PointerUp { pos: self.to_canvas(pos) });
            }

            if pointer_pos.is_some() {
                self.last_pointer_pos = pointer_pos;
            }

            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        text_focus,
                    });
                }
            }
        });

        events
    }
}
