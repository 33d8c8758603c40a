//! Ping Pong 2 entry point
//!
//! Opens the window, loads assets and drives the game loop from winit's
//! event loop.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use ping_pong::assets::Assets;
use ping_pong::audio::{AudioManager, SoundEffect};
use ping_pong::consts::{HEIGHT, WIDTH};
use ping_pong::game_loop::SIM_STEP;
use ping_pong::platform::{InputEvent, InputQueue, Key, Platform, SystemClock};
use ping_pong::renderer::{self, RenderState, SurfaceRecovery, TextRasterizer};
use ping_pong::scene::Scene;
use ping_pong::{FrameOutcome, Game, Settings, StartupError};

const WINDOW_TITLE: &str = "Ping Pong 2";
/// Frame cap (60 fps)
const FRAME_TIME: Duration = SIM_STEP;

/// Window plus its GPU state
struct Gpu {
    window: Arc<Window>,
    render_state: RenderState,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self, StartupError> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WIDTH as f64, HEIGHT as f64))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| StartupError::Graphics(format!("failed to create window: {e}")))?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| StartupError::Graphics(format!("failed to create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| StartupError::Graphics(format!("no suitable adapter: {e}")))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
        ))?;

        Ok(Self {
            window,
            render_state,
        })
    }
}

/// Host services for one frame, borrowed from [`App`]
struct NativePlatform<'a> {
    clock: &'a SystemClock,
    input: &'a mut InputQueue,
    audio: &'a AudioManager,
    text: &'a TextRasterizer,
    gpu: &'a mut Gpu,
    /// Set when the GPU can no longer render
    fatal: &'a mut bool,
}

impl Platform for NativePlatform<'_> {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.input.pop()
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.input.is_held(key)
    }

    fn play(&mut self, sound: SoundEffect) {
        self.audio.play(sound);
    }

    fn render(&mut self, scene: &Scene) {
        let vertices = renderer::tessellate(scene, self.text);
        let render_state = &mut self.gpu.render_state;
        let Err(e) = render_state.render(&vertices, scene.clear) else {
            return;
        };
        match SurfaceRecovery::for_error(&e) {
            SurfaceRecovery::Reconfigure => {
                log::debug!("Surface {:?}, reconfiguring", e);
                render_state.resize(render_state.size.0, render_state.size.1);
            }
            SurfaceRecovery::Fatal => {
                log::error!("Render failed: {:?}", e);
                *self.fatal = true;
            }
            SurfaceRecovery::Skip => {
                log::warn!("Render error: {:?}", e);
            }
        }
    }
}

struct App {
    game: Game,
    input: InputQueue,
    clock: SystemClock,
    audio: AudioManager,
    text: TextRasterizer,
    gpu: Option<Gpu>,
    next_frame: Instant,
    fatal: bool,
    error: Option<StartupError>,
}

impl App {
    fn new(settings: &Settings, assets: Assets) -> Self {
        Self {
            game: Game::new(settings),
            input: InputQueue::new(),
            clock: SystemClock::new(),
            audio: AudioManager::new(assets.sounds, settings),
            text: TextRasterizer::new(assets.font),
            gpu: None,
            next_frame: Instant::now(),
            fatal: false,
            error: None,
        }
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let mut platform = NativePlatform {
            clock: &self.clock,
            input: &mut self.input,
            audio: &self.audio,
            text: &self.text,
            gpu,
            fatal: &mut self.fatal,
        };
        if self.game.frame(&mut platform) == FrameOutcome::Exit || self.fatal {
            event_loop.exit();
        }
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
                self.next_frame = Instant::now();
                log::info!("Ping Pong running!");
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.input.close(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.input.key_down(map_key(code), repeat),
                ElementState::Released => self.input.key_up(map_key(code)),
            },
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.run_frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        let now = Instant::now();
        if now >= self.next_frame {
            gpu.window.request_redraw();
            self.next_frame += FRAME_TIME;
            if self.next_frame < now {
                self.next_frame = now + FRAME_TIME;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ping Pong 2 starting...");

    let settings = Settings::load(&Settings::path());
    let assets = match Assets::load(&settings.asset_dir) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{}", StartupError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("{}", StartupError::Graphics(format!("failed to create event loop: {e}")));
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&settings, assets);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop failed: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(e) = app.error {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    if app.fatal {
        return ExitCode::FAILURE;
    }
    log::info!("Bye");
    ExitCode::SUCCESS
}
