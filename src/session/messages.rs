//! Message types for an editor session
//!
//! This module contains:
//! - Pointer and wheel input events, in screen coordinates
//! - Tool messages (drawing mode, brush size, clearing)
//! - EditorMsg wrapping both for a single update entry point

use serde::{Deserialize, Serialize};

use crate::domain::{MarkKind, Point};

// ============================================================================
// Input Types
// ============================================================================

/// Mouse/pen button that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        shift: false,
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ctrl: false,
        shift: false,
    };
}

/// Raw pointer input in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button pressed
    PointerDown {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Pointer moved (with or without a button held)
    PointerMove { position: Point },
    /// Button released
    PointerUp {
        position: Point,
        button: PointerButton,
    },
    /// Pointer left the drawing surface
    PointerLeave,
    /// Wheel scrolled; positive `delta_y` scrolls down (zoom out)
    Wheel { position: Point, delta_y: f32 },
}

impl InputEvent {
    /// Primary-button press without modifiers
    pub fn press(x: f32, y: f32) -> Self {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn move_to(x: f32, y: f32) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    /// Primary-button release
    pub fn release(x: f32, y: f32) -> Self {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn wheel(x: f32, y: f32, delta_y: f32) -> Self {
        InputEvent::Wheel {
            position: Point::new(x, y),
            delta_y,
        }
    }
}

// ============================================================================
// Tool Types
// ============================================================================

/// Tool configuration messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolMsg {
    /// Select the drawing tool; None disables drawing
    SetTool(Option<MarkKind>),
    /// Set brush diameter in image pixels
    SetBrushSize(f32),
    /// Remove every marking
    ClearAll,
}

/// Everything a session reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorMsg {
    Input(InputEvent),
    Tool(ToolMsg),
}

impl From<InputEvent> for EditorMsg {
    fn from(event: InputEvent) -> Self {
        EditorMsg::Input(event)
    }
}

impl From<ToolMsg> for EditorMsg {
    fn from(msg: ToolMsg) -> Self {
        EditorMsg::Tool(msg)
    }
}
