//! Tool message handlers
//!
//! Handles ToolMsg for drawing mode, brush size and clearing.

use crate::session::EditorSession;
use crate::session::messages::ToolMsg;

/// Handle a ToolMsg, modifying session state
///
/// Returns true if the display was redrawn.
pub fn handle_tool_msg(session: &mut EditorSession, msg: ToolMsg) -> bool {
    match msg {
        ToolMsg::SetTool(tool) => {
            session.controller_mut().set_tool(tool);
            log::debug!("Drawing tool set to {:?}", tool);
            false
        }
        ToolMsg::SetBrushSize(size) => {
            session.controller_mut().set_brush_size(size);
            false
        }
        ToolMsg::ClearAll => session.clear_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::SourceImage;
    use crate::config::EditorConfig;
    use crate::domain::{MarkKind, Size};
    use crate::session::messages::InputEvent;
    use image::RgbaImage;

    fn ready_session() -> EditorSession {
        let mut session = EditorSession::new(EditorConfig::default(), Size::new(64.0, 64.0));
        session
            .image_loaded(Ok(SourceImage::new(RgbaImage::new(64, 64))))
            .unwrap();
        session
    }

    #[test]
    fn test_set_tool_switches_marking_kind() {
        let mut session = ready_session();
        handle_tool_msg(&mut session, ToolMsg::SetTool(Some(MarkKind::Rect)));
        session.handle_input(InputEvent::press(1.0, 1.0));
        session.handle_input(InputEvent::move_to(9.0, 9.0));
        let kind = session.model().and_then(|m| m.in_progress()).map(|m| m.kind());
        assert_eq!(kind, Some(MarkKind::Rect));
    }

    #[test]
    fn test_set_brush_size_clamps() {
        let mut session = ready_session();
        handle_tool_msg(&mut session, ToolMsg::SetBrushSize(2.0));
        assert_eq!(session.controller().brush_size(), 5.0);
    }

    #[test]
    fn test_clear_all_redraws() {
        let mut session = ready_session();
        session.handle_input(InputEvent::press(1.0, 1.0));
        session.handle_input(InputEvent::move_to(9.0, 9.0));
        session.handle_input(InputEvent::release(9.0, 9.0));
        assert_eq!(session.model().map(|m| m.len()), Some(1));

        let frames = session.frames();
        assert!(handle_tool_msg(&mut session, ToolMsg::ClearAll));
        assert_eq!(session.model().map(|m| m.len()), Some(0));
        assert_eq!(session.frames(), frames + 1);
    }
}
