//! Marking store and tool message handlers
//!
//! This module provides:
//! - The append-only marking model
//! - Message handlers for tool and brush settings (ToolMsg)

pub mod handlers;
pub mod model;

pub use model::MarkingModel;
