//! Session hosted on its own task
//!
//! The session runs on a spawned task and is driven over a command channel.
//! Commands are handled one at a time, so every event observes the effects
//! of the events before it. Input that arrives while the image is still
//! loading is handled by the session's own gate.

use std::ops::ControlFlow;

use tokio::sync::{mpsc, oneshot};

use super::messages::{EditorMsg, InputEvent, ToolMsg};
use super::state::{EditorSession, SessionStatus};
use crate::capture::{self, ImageSource};
use crate::config::EditorConfig;
use crate::domain::Size;
use crate::error::{EditorError, Result};
use crate::render::ExportedImage;

const COMMAND_QUEUE: usize = 32;

/// Commands that can be sent to a running session
#[derive(Debug)]
enum Command {
    Update(EditorMsg, oneshot::Sender<bool>),
    Resize(Size, oneshot::Sender<Result<()>>),
    Status(oneshot::Sender<SessionStatus>),
    /// Reply once loading has finished
    WhenReady(oneshot::Sender<Result<()>>),
    Save(oneshot::Sender<Result<ExportedImage>>),
    Cancel,
}

/// How the session loop ended
enum Exit {
    Saved,
    Cancelled,
}

/// Cloneable handle to a session task
#[derive(Clone, Debug)]
pub struct EditorHandle {
    tx: mpsc::Sender<Command>,
}

impl EditorHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| EditorError::SessionClosed)?;
        response.await.map_err(|_| EditorError::SessionClosed)
    }

    /// Returns whether the display was redrawn
    pub async fn input(&self, event: InputEvent) -> Result<bool> {
        self.request(|reply| Command::Update(event.into(), reply))
            .await
    }

    pub async fn tool(&self, msg: ToolMsg) -> Result<bool> {
        self.request(|reply| Command::Update(msg.into(), reply))
            .await
    }

    pub async fn resize(&self, container: Size) -> Result<()> {
        self.request(|reply| Command::Resize(container, reply))
            .await?
    }

    pub async fn status(&self) -> Result<SessionStatus> {
        self.request(Command::Status).await
    }

    /// Wait for the image load to finish; returns the load error if it failed
    pub async fn ready(&self) -> Result<()> {
        self.request(Command::WhenReady).await?
    }

    /// Export and close the session
    pub async fn save(&self) -> Result<ExportedImage> {
        self.request(Command::Save).await?
    }

    /// Close the session without exporting
    pub async fn cancel(&self) -> Result<()> {
        self.tx
            .send(Command::Cancel)
            .await
            .map_err(|_| EditorError::SessionClosed)
    }
}

/// Start a session on the current tokio runtime and begin loading `source`
pub fn spawn(source: ImageSource, config: EditorConfig, container: Size) -> EditorHandle {
    let (tx, rx) = mpsc::channel(COMMAND_QUEUE);
    let session = EditorSession::new(config, container);
    tokio::spawn(run(session, source, rx));
    EditorHandle { tx }
}

fn readiness(session: &EditorSession) -> Result<()> {
    match session.status() {
        SessionStatus::Ready => Ok(()),
        SessionStatus::Loading => Err(EditorError::NotReady),
        SessionStatus::Failed => Err(session
            .load_error()
            .cloned()
            .unwrap_or(EditorError::NotReady)),
        SessionStatus::Finished => Err(EditorError::SessionClosed),
    }
}

fn dispatch(session: &mut EditorSession, command: Command) -> ControlFlow<Exit> {
    match command {
        Command::Update(msg, reply) => {
            let _ = reply.send(session.update(msg));
        }
        Command::Resize(container, reply) => {
            let _ = reply.send(session.resize(container));
        }
        Command::Status(reply) => {
            let _ = reply.send(session.status());
        }
        Command::WhenReady(reply) => {
            let _ = reply.send(readiness(session));
        }
        Command::Save(reply) => {
            let result = session.save();
            let saved = result.is_ok();
            let _ = reply.send(result);
            if saved {
                return ControlFlow::Break(Exit::Saved);
            }
        }
        Command::Cancel => return ControlFlow::Break(Exit::Cancelled),
    }
    ControlFlow::Continue(())
}

async fn run(mut session: EditorSession, source: ImageSource, mut rx: mpsc::Receiver<Command>) {
    let load = capture::load(source);
    tokio::pin!(load);
    let mut waiting: Vec<oneshot::Sender<Result<()>>> = Vec::new();

    let exit = loop {
        tokio::select! {
            loaded = &mut load => {
                let result = session.image_loaded(loaded);
                for reply in waiting.drain(..) {
                    let _ = reply.send(result.clone());
                }
                break None;
            }
            command = rx.recv() => match command {
                None => {
                    log::debug!("All session handles dropped while loading");
                    return;
                }
                Some(Command::WhenReady(reply)) => waiting.push(reply),
                Some(command) => {
                    if let ControlFlow::Break(exit) = dispatch(&mut session, command) {
                        break Some(exit);
                    }
                }
            }
        }
    };

    let exit = match exit {
        Some(exit) => Some(exit),
        None => loop {
            let Some(command) = rx.recv().await else {
                break None;
            };
            if let ControlFlow::Break(exit) = dispatch(&mut session, command) {
                break Some(exit);
            }
        },
    };

    match exit {
        Some(Exit::Saved) => log::debug!("Session task finished after save"),
        Some(Exit::Cancelled) => session.cancel(),
        None => log::debug!("All session handles dropped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarkKind;
    use crate::render::geometry::MARKER_RGBA;
    use image::RgbaImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 200, 200, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn rect_config() -> EditorConfig {
        EditorConfig {
            default_tool: MarkKind::Rect,
            ..EditorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_marks_and_saves() {
        let handle = spawn(
            ImageSource::bytes(png_bytes(40, 30)),
            rect_config(),
            Size::new(40.0, 30.0),
        );
        handle.ready().await.unwrap();
        assert_eq!(handle.status().await.unwrap(), SessionStatus::Ready);

        assert!(handle.input(InputEvent::press(5.0, 5.0)).await.unwrap());
        assert!(handle.input(InputEvent::move_to(15.0, 10.0)).await.unwrap());
        assert!(handle.input(InputEvent::release(15.0, 10.0)).await.unwrap());

        let out = handle.save().await.unwrap();
        assert_eq!(out.rgba.get_pixel(5, 5).0, MARKER_RGBA);
        assert_eq!(out.rgba.get_pixel(14, 9).0, MARKER_RGBA);
        assert_eq!(out.rgba.get_pixel(15, 10).0, [200, 200, 200, 255]);

        // Task exits after a successful save
        assert_eq!(handle.status().await, Err(EditorError::SessionClosed));
    }

    #[tokio::test]
    async fn test_load_failure_reaches_waiters() {
        let handle = spawn(
            ImageSource::bytes(b"not an image".to_vec()),
            EditorConfig::default(),
            Size::new(40.0, 30.0),
        );
        assert!(matches!(handle.ready().await, Err(EditorError::ImageLoad(_))));
        assert!(!handle.input(InputEvent::press(1.0, 1.0)).await.unwrap());
        assert!(matches!(handle.save().await, Err(EditorError::ImageLoad(_))));
        assert_eq!(handle.status().await.unwrap(), SessionStatus::Failed);
    }

    #[tokio::test]
    async fn test_cancel_closes_session() {
        let handle = spawn(
            ImageSource::bytes(png_bytes(8, 8)),
            EditorConfig::default(),
            Size::new(8.0, 8.0),
        );
        handle.ready().await.unwrap();
        handle.cancel().await.unwrap();
        assert_eq!(handle.save().await, Err(EditorError::SessionClosed));
    }

    #[tokio::test]
    async fn test_tool_messages_route_to_session() {
        let handle = spawn(
            ImageSource::bytes(png_bytes(20, 20)),
            EditorConfig::default(),
            Size::new(20.0, 20.0),
        );
        handle.ready().await.unwrap();
        assert!(!handle.tool(ToolMsg::SetTool(None)).await.unwrap());
        // No tool selected, so a press draws nothing
        assert!(!handle.input(InputEvent::press(2.0, 2.0)).await.unwrap());
        assert!(handle.tool(ToolMsg::ClearAll).await.unwrap());
        handle.resize(Size::new(50.0, 10.0)).await.unwrap();
        assert!(matches!(
            handle.resize(Size::new(0.0, 10.0)).await,
            Err(EditorError::Render(_))
        ));
    }
}
