//! Editor session: one source image, its viewport, and its markings
//!
//! The session is the single owner and writer of the viewport and marking
//! model. Every event that changes either one redraws the display surface
//! before returning.

use tiny_skia::Pixmap;

use super::controller::InputController;
use super::messages::{EditorMsg, InputEvent};
use crate::annotations::{MarkingModel, handlers};
use crate::capture::{self, ImageSource, SourceImage};
use crate::config::EditorConfig;
use crate::domain::{Size, ViewportTransform};
use crate::error::{EditorError, Result};
use crate::render::{self, ExportedImage, Renderer};

/// State that exists once the source image is available
#[derive(Debug)]
struct ActiveSession {
    source: SourceImage,
    viewport: ViewportTransform,
    model: MarkingModel,
    renderer: Renderer,
}

impl ActiveSession {
    fn redraw(&mut self) {
        self.renderer.render(&self.viewport, &self.model);
    }
}

#[derive(Debug)]
enum Phase {
    /// Waiting for the source image; input is ignored
    Loading,
    Ready(Box<ActiveSession>),
    /// The source image could not be loaded; input is ignored
    Failed(EditorError),
    /// Export delivered; nothing more to do
    Finished,
}

/// Coarse session status for callers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Ready,
    Failed,
    Finished,
}

#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    container: Size,
    controller: InputController,
    phase: Phase,
}

impl EditorSession {
    /// Create a session that waits for its image
    pub fn new(config: EditorConfig, container: Size) -> Self {
        let config = config.sanitized();
        Self {
            controller: InputController::new(&config),
            config,
            container,
            phase: Phase::Loading,
        }
    }

    /// Load `source` and return a ready session, or the load failure
    pub async fn open(source: ImageSource, config: EditorConfig, container: Size) -> Result<Self> {
        let mut session = Self::new(config, container);
        let loaded = capture::load(source).await;
        session.image_loaded(loaded)?;
        Ok(session)
    }

    /// Finish the loading phase with the result of the image load
    ///
    /// On success the viewport is fitted to the container and the first frame
    /// is drawn. On failure the session stays closed to input.
    pub fn image_loaded(&mut self, result: Result<SourceImage>) -> Result<()> {
        if !matches!(self.phase, Phase::Loading) {
            log::warn!("Image load result arrived after loading finished, ignoring");
            return Ok(());
        }

        let activated = result.and_then(|source| {
            let mut viewport =
                ViewportTransform::with_limits(self.config.min_scale, self.config.max_scale);
            viewport.fit_to_container(source.size(), self.container);
            let renderer = Renderer::new(&source, self.container, &self.config)?;
            Ok(ActiveSession {
                source,
                viewport,
                model: MarkingModel::new(),
                renderer,
            })
        });

        match activated {
            Ok(mut active) => {
                active.redraw();
                log::debug!(
                    "Session ready: {}x{} image at {}%",
                    active.source.width(),
                    active.source.height(),
                    active.viewport.zoom_percent()
                );
                self.phase = Phase::Ready(Box::new(active));
                Ok(())
            }
            Err(err) => {
                log::error!("Session cannot start: {}", err);
                self.phase = Phase::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::Loading => SessionStatus::Loading,
            Phase::Ready(_) => SessionStatus::Ready,
            Phase::Failed(_) => SessionStatus::Failed,
            Phase::Finished => SessionStatus::Finished,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// Why loading failed, if it did
    pub fn load_error(&self) -> Option<&EditorError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    pub(crate) fn controller_mut(&mut self) -> &mut InputController {
        &mut self.controller
    }

    fn active(&self) -> Option<&ActiveSession> {
        match &self.phase {
            Phase::Ready(active) => Some(active),
            _ => None,
        }
    }

    pub fn viewport(&self) -> Option<&ViewportTransform> {
        self.active().map(|a| &a.viewport)
    }

    pub fn model(&self) -> Option<&MarkingModel> {
        self.active().map(|a| &a.model)
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.active().map(|a| &a.source)
    }

    /// Last rendered display frame
    pub fn surface(&self) -> Option<&Pixmap> {
        self.active().map(|a| a.renderer.surface())
    }

    /// Number of display frames rendered so far
    pub fn frames(&self) -> u64 {
        self.active().map_or(0, |a| a.renderer.frames())
    }

    /// Dispatch any editor message; returns true if the display was redrawn
    pub fn update(&mut self, msg: EditorMsg) -> bool {
        match msg {
            EditorMsg::Input(event) => self.handle_input(event),
            EditorMsg::Tool(tool) => handlers::handle_tool_msg(self, tool),
        }
    }

    /// Feed one pointer or wheel event through the controller
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let Phase::Ready(active) = &mut self.phase else {
            log::debug!("Ignoring {:?}: session is not ready", event);
            return false;
        };
        let update = self
            .controller
            .handle(event, &mut active.viewport, &mut active.model);
        if update.needs_redraw() {
            active.redraw();
        }
        update.needs_redraw()
    }

    /// Remove every marking and abandon any stroke in progress
    pub fn clear_all(&mut self) -> bool {
        let Phase::Ready(active) = &mut self.phase else {
            return false;
        };
        active.model.clear_all();
        self.controller.reset();
        active.redraw();
        true
    }

    /// Follow a container resize; the viewport is left as is
    pub fn resize(&mut self, container: Size) -> Result<()> {
        if let Phase::Ready(active) = &mut self.phase {
            active.renderer.resize(container)?;
            active.redraw();
        }
        self.container = container;
        Ok(())
    }

    /// Export committed markings at source resolution and end the session
    ///
    /// If the export fails the session stays open with its markings intact.
    pub fn save(&mut self) -> Result<ExportedImage> {
        let active = match &self.phase {
            Phase::Ready(active) => active,
            Phase::Loading => return Err(EditorError::NotReady),
            Phase::Failed(err) => return Err(err.clone()),
            Phase::Finished => return Err(EditorError::SessionClosed),
        };

        let exported = render::export(&active.source, active.model.committed())?;
        log::debug!(
            "Session saved with {} markings",
            active.model.committed().len()
        );
        self.controller.reset();
        self.phase = Phase::Finished;
        Ok(exported)
    }

    /// Discard the session without exporting anything
    pub fn cancel(mut self) {
        match &mut self.phase {
            Phase::Ready(active) => {
                let open = active.model.cancel_in_progress();
                log::debug!(
                    "Session cancelled, discarding {} markings (open stroke: {})",
                    active.model.len(),
                    open
                );
            }
            _ => log::debug!("Session cancelled"),
        }
    }
}
