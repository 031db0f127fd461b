//! Input controller: gesture state machine
//!
//! Turns screen-space pointer and wheel events into viewport changes and
//! marking model mutations. Screen coordinates are converted to image space
//! before anything reaches the model.

use super::messages::{InputEvent, Modifiers, PointerButton};
use crate::annotations::MarkingModel;
use crate::config::EditorConfig;
use crate::domain::{MarkKind, Point, ViewportTransform};

/// Current gesture
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// A marking is open in the model
    Drawing,
    /// Dragging the viewport with `button`; `last` is the previous screen position
    Panning { last: Point, button: PointerButton },
}

/// Whether handling an event changed anything visible
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    Unchanged,
    Redraw,
}

impl Update {
    pub fn needs_redraw(self) -> bool {
        self == Update::Redraw
    }
}

/// Middle button, or primary button with Alt, drags the view
fn is_pan_gesture(button: PointerButton, modifiers: Modifiers) -> bool {
    button == PointerButton::Middle || (button == PointerButton::Primary && modifiers.alt)
}

#[derive(Clone, Debug)]
pub struct InputController {
    gesture: Gesture,
    tool: Option<MarkKind>,
    brush_size: f32,
    zoom_in_factor: f32,
    zoom_out_factor: f32,
}

impl InputController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            tool: Some(config.default_tool),
            brush_size: EditorConfig::clamp_brush_size(config.brush_size),
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture == Gesture::Drawing
    }

    pub fn tool(&self) -> Option<MarkKind> {
        self.tool
    }

    /// Change tool; takes effect on the next pointer-down
    pub fn set_tool(&mut self, tool: Option<MarkKind>) {
        self.tool = tool;
    }

    /// Brush diameter in image pixels
    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = EditorConfig::clamp_brush_size(size);
    }

    /// Forget any gesture in flight
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Apply one input event
    pub fn handle(
        &mut self,
        event: InputEvent,
        viewport: &mut ViewportTransform,
        model: &mut MarkingModel,
    ) -> Update {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers, viewport, model),
            InputEvent::PointerMove { position } => self.pointer_move(position, viewport, model),
            InputEvent::PointerUp { button, .. } => self.pointer_up(button, model),
            InputEvent::PointerLeave => self.end_gesture(model),
            InputEvent::Wheel { position, delta_y } => {
                // Zoom never touches the gesture state
                if delta_y == 0.0 || !delta_y.is_finite() {
                    return Update::Unchanged;
                }
                let factor = if delta_y > 0.0 {
                    self.zoom_out_factor
                } else {
                    self.zoom_in_factor
                };
                viewport.zoom_at(position, factor);
                Update::Redraw
            }
        }
    }

    fn pointer_down(
        &mut self,
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
        viewport: &ViewportTransform,
        model: &mut MarkingModel,
    ) -> Update {
        if self.gesture != Gesture::Idle {
            return Update::Unchanged;
        }
        if is_pan_gesture(button, modifiers) {
            self.gesture = Gesture::Panning {
                last: position,
                button,
            };
            return Update::Unchanged;
        }
        let (PointerButton::Primary, Some(kind)) = (button, self.tool) else {
            return Update::Unchanged;
        };

        let radius = self.brush_size / 2.0;
        model.begin(kind, viewport.to_image(position), radius);
        self.gesture = Gesture::Drawing;
        Update::Redraw
    }

    fn pointer_move(
        &mut self,
        position: Point,
        viewport: &mut ViewportTransform,
        model: &mut MarkingModel,
    ) -> Update {
        match self.gesture {
            Gesture::Idle => Update::Unchanged,
            Gesture::Drawing => {
                model.extend(viewport.to_image(position));
                Update::Redraw
            }
            Gesture::Panning { last, button } => {
                viewport.pan_by(position - last);
                self.gesture = Gesture::Panning {
                    last: position,
                    button,
                };
                Update::Redraw
            }
        }
    }

    /// Only the button that started the gesture ends it
    fn pointer_up(&mut self, button: PointerButton, model: &mut MarkingModel) -> Update {
        let ends = match self.gesture {
            Gesture::Idle => false,
            Gesture::Drawing => button == PointerButton::Primary,
            Gesture::Panning { button: started, .. } => button == started,
        };
        if ends {
            self.end_gesture(model)
        } else {
            Update::Unchanged
        }
    }

    fn end_gesture(&mut self, model: &mut MarkingModel) -> Update {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => Update::Unchanged,
            Gesture::Drawing => {
                let committed = model.commit();
                log::debug!("Gesture ended, marking committed: {}", committed);
                Update::Redraw
            }
        }
    }
}
