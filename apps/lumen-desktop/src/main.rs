use anyhow::{Context, Result};
use clap::Parser;
use lumen_common::Viewport;
use lumen_render::{AfterFrames, FrameLoop, Never, Renderer, StopCondition};
use lumen_render_wgpu::WgpuRenderer;
use lumen_scene::{DemoScene, PerspectiveCamera, Scene};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "lumen-desktop", about = "Gradient light showcase")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Exit after this many frames instead of running until the window closes
    #[arg(long)]
    max_frames: Option<u64>,
}

/// Surface and device state bound to the window.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    /// Configured once from the startup viewport.
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

impl Gpu {
    fn new(window: Arc<Window>, viewport: Viewport, scene: &Scene) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window).context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lumen_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: viewport.width.max(1),
            height: viewport.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            scene,
        );

        tracing::info!(
            "GPU initialized with {} backend ({:?})",
            adapter.get_info().backend.to_str(),
            surface_format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl Renderer for Gpu {
    type Output = Result<(), wgpu::SurfaceError>;

    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, scene, camera);
        output.present();
        Ok(())
    }
}

struct App {
    requested: Viewport,
    stop: Box<dyn StopCondition>,
    frame_loop: FrameLoop,
    window: Option<Arc<Window>>,
    demo: Option<DemoScene>,
    gpu: Option<Gpu>,
    /// Startup failure, handed back to `main` after the event loop exits.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(requested: Viewport, max_frames: Option<u64>) -> Self {
        let stop: Box<dyn StopCondition> = match max_frames {
            Some(n) => Box::new(AfterFrames(n)),
            None => Box::new(Never),
        };
        Self {
            requested,
            stop,
            frame_loop: FrameLoop::new(),
            window: None,
            demo: None,
            gpu: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let requested = PhysicalSize::new(self.requested.width, self.requested.height);
        let attrs = Window::default_attributes()
            .with_title("Lumen")
            .with_inner_size(requested)
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        // The only time the viewport is read.
        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);

        let demo = lumen_scene::demo::build(viewport)?;
        let gpu = Gpu::new(window.clone(), viewport, &demo.scene)?;

        window.request_redraw();
        self.window = Some(window);
        self.demo = Some(demo);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.stop.should_stop(self.frame_loop.frames()) {
            tracing::info!(frames = self.frame_loop.frames(), "frame budget reached");
            event_loop.exit();
            return;
        }

        let (Some(gpu), Some(demo)) = (&self.gpu, &mut self.demo) else {
            return;
        };

        match self.frame_loop.tick(demo, gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => tracing::error!("surface error: {e}"),
        }

        // Schedule the next frame.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                // Surface and camera keep their startup size.
                tracing::debug!(
                    width = new_size.width,
                    height = new_size.height,
                    "resize ignored"
                );
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("lumen-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(Viewport::new(cli.width, cli.height), cli.max_frames);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
