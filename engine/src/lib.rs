pub mod app;
pub mod graphics;
pub mod history;
pub mod pixels_renderer;
pub mod playback;
pub mod profiling;
pub mod regression;
pub mod render;
pub mod surface;
pub mod ui;

use std::time::{Duration, Instant};

use render::RenderCommand;

/// A frame-driven game: one call per rendered frame, no hidden suspension.
///
/// Implementations must behave identically whether driven by a window or by a test.
pub trait FrameLogic {
    type Input;

    fn tick(&mut self, dt: Duration, input: &Self::Input) -> Vec<RenderCommand>;
}

/// Drives a `FrameLogic` without a display, counting frames.
#[derive(Debug)]
pub struct HeadlessRunner<G: FrameLogic> {
    logic: G,
    frame: usize,
}

impl<G: FrameLogic> HeadlessRunner<G> {
    pub fn new(logic: G) -> Self {
        Self { logic, frame: 0 }
    }

    /// Number of frames stepped so far.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn logic(&self) -> &G {
        &self.logic
    }

    pub fn step(&mut self, dt: Duration, input: &G::Input) -> Vec<RenderCommand> {
        let commands = self.logic.tick(dt, input);
        self.frame += 1;
        commands
    }

    pub fn step_profiled<P: profiling::Profiler>(
        &mut self,
        dt: Duration,
        input: &G::Input,
        profiler: &mut P,
    ) -> Vec<RenderCommand> {
        let total_start = Instant::now();

        let tick_start = Instant::now();
        let commands = self.logic.tick(dt, input);
        let tick_dt = tick_start.elapsed();

        self.frame += 1;
        let total_dt = total_start.elapsed();
        profiler.on_step(
            self.frame,
            profiling::StepTimings {
                tick: tick_dt,
                total: total_dt,
                commands: commands.len(),
            },
        );

        commands
    }

    /// Steps once per input with a fixed `dt`, returning the last frame's commands.
    pub fn run<I>(&mut self, dt: Duration, inputs: I) -> Vec<RenderCommand>
    where
        I: IntoIterator<Item = G::Input>,
    {
        let mut last = Vec::new();
        for input in inputs {
            last = self.step(dt, &input);
        }
        last
    }
}
