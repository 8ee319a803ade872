use std::collections::HashSet;
use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::pixels_renderer::PixelsRenderer2d;
use crate::render::{RenderCommand, draw_commands};
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    /// Logical drawing area; also the initial window size.
    pub buffer_size: SurfaceSize,
    pub vsync: bool,
    /// Redraw rate cap. `None` redraws as fast as the event loop spins.
    pub target_fps: Option<u32>,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
}

/// A one-shot input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Key(VirtualKeyCode),
    /// Left click at a buffer position.
    Click(u32, u32),
}

/// Input sampled since the previous redraw.
///
/// `keys_down` is level state; `presses` holds the frame's edges in the order they arrived and
/// is cleared after every frame.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Cursor position in buffer coordinates.
    pub mouse_pos: Option<(u32, u32)>,
    pub keys_down: HashSet<VirtualKeyCode>,
    pub presses: Vec<Press>,
}

impl InputFrame {
    pub fn is_down(&self, key: VirtualKeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn was_pressed(&self, key: VirtualKeyCode) -> bool {
        self.presses.contains(&Press::Key(key))
    }

    pub fn on_key(&mut self, key: VirtualKeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // OS key repeat re-sends Pressed; only the first one is an edge.
                if self.keys_down.insert(key) {
                    self.presses.push(Press::Key(key));
                }
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    /// Records a left-button press at the last known cursor position.
    pub fn on_click(&mut self, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }
        if let Some((x, y)) = self.mouse_pos {
            self.presses.push(Press::Click(x, y));
        }
    }

    /// Drops held keys, e.g. when the window loses focus and releases would go unseen.
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    pub fn end_frame(&mut self) {
        self.presses.clear();
    }
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    /// One frame: consume input, advance state, describe what to draw.
    fn update(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) -> Vec<RenderCommand>;

    fn should_exit(&self, _state: &Self::State) -> bool {
        false
    }
}

struct FramePacer {
    interval: Option<Duration>,
    next_at: Instant,
}

impl FramePacer {
    fn new(target_fps: Option<u32>) -> Self {
        let interval = target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64));
        Self {
            interval,
            next_at: Instant::now(),
        }
    }

    /// Whether a redraw is due now; schedules the next one when it is.
    fn poll(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        if now < self.next_at {
            return false;
        }
        self.next_at += interval;
        if self.next_at < now {
            // Fell behind (e.g. window drag); resync instead of bursting.
            self.next_at = now + interval;
        }
        true
    }

    fn control_flow(&self) -> ControlFlow {
        match self.interval {
            Some(_) => ControlFlow::WaitUntil(self.next_at),
            None => ControlFlow::Poll,
        }
    }
}

pub fn run_game<G: GameApp + 'static>(
    config: AppConfig,
    mut game: G,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let buffer = config.buffer_size;
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(LogicalSize::new(buffer.width, buffer.height))
        .with_min_inner_size(LogicalSize::new(1u32, 1u32))
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let pixels = PixelsBuilder::new(buffer.width, buffer.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, buffer)?;

    let mut ctx = AppContext { window, renderer };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut pacer = FramePacer::new(config.target_fps);
    let mut last_frame = Instant::now();

    tracing::info!(
        width = buffer.width,
        height = buffer.height,
        fps = ?config.target_fps,
        "window ready"
    );

    event_loop.run(move |event, _, control_flow| match &event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::Resized(size) => {
                let size = SurfaceSize::new(size.width, size.height);
                if let Err(err) = ctx.renderer.resize_surface(size) {
                    tracing::error!(%err, "resize failed");
                }
            }
            WindowEvent::Focused(false) => input.release_all(),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(key),
                        state: key_state,
                        ..
                    },
                ..
            } => input.on_key(*key, *key_state),
            WindowEvent::CursorMoved { position, .. } => {
                input.mouse_pos = Some(ctx.renderer.window_to_buffer(position.x, position.y));
            }
            WindowEvent::MouseInput {
                state: mouse_state,
                button: MouseButton::Left,
                ..
            } => input.on_click(*mouse_state),
            _ => {}
        },
        Event::RedrawRequested(_) => {
            let now = Instant::now();
            let dt = now.saturating_duration_since(last_frame);
            last_frame = now;

            let commands = game.update(&mut state, &input, dt, &mut ctx);
            ctx.renderer.draw_frame(|gfx| draw_commands(gfx, &commands));
            if let Err(err) = ctx.renderer.present() {
                tracing::error!(%err, "present failed");
            }
            input.end_frame();

            if game.should_exit(&state) {
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::MainEventsCleared => {
            if *control_flow != ControlFlow::Exit {
                if pacer.poll(Instant::now()) {
                    ctx.window.request_redraw();
                }
                *control_flow = pacer.control_flow();
            }
        }
        _ => {}
    });

    #[allow(unreachable_code)]
    Ok(())
}
