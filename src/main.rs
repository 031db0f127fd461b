use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::Deserialize;

use regionmark::capture::ImageSource;
use regionmark::config::EditorConfig;
use regionmark::domain::{MarkKind, Point, Size};
use regionmark::session::{self, EditorMsg, InputEvent, Modifiers, PointerButton, ToolMsg};

const USAGE: &str = "usage: regionmark <image> <script.json> <out.png> [--container WxH]";
const DEFAULT_CONTAINER: Size = Size::new(800.0, 600.0);

/// One recorded gesture or tool change, in screen coordinates
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
enum ScriptStep {
    Tool {
        tool: Option<MarkKind>,
    },
    Brush {
        size: f32,
    },
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        alt: bool,
    },
    Move {
        x: f32,
        y: f32,
    },
    Up {
        x: f32,
        y: f32,
        #[serde(default)]
        button: PointerButton,
    },
    Leave,
    Wheel {
        x: f32,
        y: f32,
        delta_y: f32,
    },
    Clear,
}

impl From<ScriptStep> for EditorMsg {
    fn from(step: ScriptStep) -> Self {
        match step {
            ScriptStep::Tool { tool } => ToolMsg::SetTool(tool).into(),
            ScriptStep::Brush { size } => ToolMsg::SetBrushSize(size).into(),
            ScriptStep::Down { x, y, button, alt } => InputEvent::PointerDown {
                position: Point::new(x, y),
                button,
                modifiers: if alt { Modifiers::ALT } else { Modifiers::NONE },
            }
            .into(),
            ScriptStep::Move { x, y } => InputEvent::move_to(x, y).into(),
            ScriptStep::Up { x, y, button } => InputEvent::PointerUp {
                position: Point::new(x, y),
                button,
            }
            .into(),
            ScriptStep::Leave => InputEvent::PointerLeave.into(),
            ScriptStep::Wheel { x, y, delta_y } => InputEvent::wheel(x, y, delta_y).into(),
            ScriptStep::Clear => ToolMsg::ClearAll.into(),
        }
    }
}

#[derive(Debug)]
struct Args {
    image: PathBuf,
    script: PathBuf,
    output: PathBuf,
    container: Size,
}

fn parse_container(value: &str) -> Result<Size, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {:?}", value))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("bad width: {}", e))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("bad height: {}", e))?;
    let size = Size::from_pixels(width, height);
    if !size.is_drawable() {
        return Err(format!("container must not be empty, got {:?}", value));
    }
    Ok(size)
}

fn parse_args(mut args: pico_args::Arguments) -> anyhow::Result<Args> {
    let container = args
        .opt_value_from_fn("--container", parse_container)?
        .unwrap_or(DEFAULT_CONTAINER);
    let mut free = args.finish().into_iter().map(PathBuf::from);
    let (Some(image), Some(script), Some(output), None) =
        (free.next(), free.next(), free.next(), free.next())
    else {
        bail!(USAGE);
    };
    Ok(Args {
        image,
        script,
        output,
        container,
    })
}

fn parse_script(text: &str) -> anyhow::Result<Vec<ScriptStep>> {
    serde_json::from_str(text).context("invalid gesture script")
}

async fn run(args: Args, config: EditorConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read {}", args.script.display()))?;
    let steps = parse_script(&text)?;

    let handle = session::spawn(
        ImageSource::path(&args.image),
        config,
        args.container,
    );
    handle
        .ready()
        .await
        .with_context(|| format!("failed to open {}", args.image.display()))?;

    let count = steps.len();
    for step in steps {
        match EditorMsg::from(step) {
            EditorMsg::Input(event) => handle.input(event).await?,
            EditorMsg::Tool(msg) => handle.tool(msg).await?,
        };
    }

    let exported = handle.save().await.context("export failed")?;
    let png = exported.to_png()?;
    std::fs::write(&args.output, png)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!(
        "Replayed {} steps, wrote {}x{} to {}",
        count,
        exported.width(),
        exported.height(),
        args.output.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = parse_args(pico_args::Arguments::from_env())?;
    run(args, EditorConfig::load()).await
}
