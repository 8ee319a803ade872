use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimings {
    /// Time spent inside `FrameLogic::tick`.
    pub tick: Duration,
    /// Tick plus runner bookkeeping.
    pub total: Duration,
    /// Number of render commands the tick produced.
    pub commands: usize,
}

/// Hook for observing per-frame step timings without knowing the game's types.
pub trait Profiler {
    fn on_step(&mut self, _frame: usize, _timings: StepTimings) {}
}
