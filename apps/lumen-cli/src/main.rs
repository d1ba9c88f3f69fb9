use clap::{Parser, Subcommand};
use glam::Vec3;
use lumen_common::Viewport;
use lumen_render::{AfterFrames, DebugTextRenderer, FrameLoop, Renderer};
use lumen_scene::{Material, PerspectiveCamera, Scene, SceneSummary};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen-cli", about = "Headless tools for the lumen showcase")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the showcase scene and print it
    Describe {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        #[arg(long, default_value_t = 720)]
        height: u32,
    },
    /// Run the frame loop with the text renderer and print the last frame
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value_t = 60)]
        frames: u64,
        #[arg(long, default_value_t = 1280)]
        width: u32,
        #[arg(long, default_value_t = 720)]
        height: u32,
    },
    /// Sample the shared gradient material from straight down to straight up
    Gradient {
        /// Number of samples
        #[arg(short, long, default_value_t = 5)]
        steps: u32,
    },
}

#[derive(Serialize)]
struct Description<'a> {
    viewport: Viewport,
    camera: &'a PerspectiveCamera,
    summary: SceneSummary,
    scene: &'a Scene,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("lumen-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", lumen_render::crate_info());
            println!("rotation step: {} rad/frame", lumen_scene::ROTATION_STEP);
        }
        Commands::Describe {
            json,
            width,
            height,
        } => {
            let demo = lumen_scene::demo::build(Viewport::new(width, height))?;
            if json {
                let description = Description {
                    viewport: demo.viewport,
                    camera: &demo.camera,
                    summary: demo.scene.summary(),
                    scene: &demo.scene,
                };
                println!("{}", serde_json::to_string_pretty(&description)?);
            } else {
                let renderer = DebugTextRenderer::new();
                print!("{}", renderer.render(&demo.scene, &demo.camera));
            }
        }
        Commands::Run {
            frames,
            width,
            height,
        } => {
            let mut demo = lumen_scene::demo::build(Viewport::new(width, height))?;
            let mut frame_loop = FrameLoop::new();
            let last = frame_loop.run(&mut demo, &DebugTextRenderer::new(), AfterFrames(frames));
            tracing::info!(frames = frame_loop.frames(), "run finished");
            match last {
                Some(text) => print!("{text}"),
                None => println!("no frames rendered"),
            }
        }
        Commands::Gradient { steps } => {
            let demo = lumen_scene::demo::build(Viewport::default())?;
            let Some(Material::Gradient(gradient)) = demo.scene.material(demo.gradient) else {
                anyhow::bail!("showcase gradient material missing");
            };
            let steps = steps.max(2);
            for i in 0..steps {
                let y = -1.0 + 2.0 * i as f32 / (steps - 1) as f32;
                let normal = Vec3::new((1.0 - y * y).max(0.0).sqrt(), y, 0.0);
                println!("normal.y={y:+.2}  #{:06x}", gradient.shade(normal).to_hex());
            }
        }
    }

    Ok(())
}
