//! Editor session module
//!
//! This module contains:
//! - Input and tool message types
//! - The input controller (gesture state machine)
//! - Session state owning the viewport, markings and display surface
//! - A task wrapper driving a session over a command channel

pub mod controller;
pub mod messages;
pub mod state;
pub mod task;

pub use controller::{Gesture, InputController, Update};
pub use messages::{EditorMsg, InputEvent, Modifiers, PointerButton, ToolMsg};
pub use state::{EditorSession, SessionStatus};
pub use task::{EditorHandle, spawn};
