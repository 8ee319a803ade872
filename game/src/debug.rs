use std::collections::VecDeque;
use std::time::Duration;

use engine::profiling::{Profiler, StepTimings};

/// Ticks slower than this get a warning in the log.
const SLOW_TICK: Duration = Duration::from_millis(8);

#[derive(Debug, Clone)]
struct RollingMs {
    cap: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl RollingMs {
    fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            values: VecDeque::new(),
            sum: 0.0,
        }
    }

    fn push(&mut self, d: Duration) {
        let v = d.as_secs_f64() * 1000.0;
        self.values.push_back(v);
        self.sum += v;
        if self.values.len() > self.cap {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
            }
        }
    }

    fn avg(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f64
        }
    }
}

/// Rolling frame/tick timings for the optional debug overlay.
#[derive(Debug, Clone)]
pub struct FrameStats {
    enabled: bool,
    frame_dt: RollingMs,
    tick_dt: RollingMs,
    last_frame: usize,
    last_commands: usize,
}

impl FrameStats {
    pub fn new(enabled: bool) -> Self {
        let window = 120;
        Self {
            enabled,
            frame_dt: RollingMs::new(window),
            tick_dt: RollingMs::new(window),
            last_frame: 0,
            last_commands: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record_frame(&mut self, dt: Duration) {
        self.frame_dt.push(dt);
    }

    pub fn fps(&self) -> f64 {
        let ms = self.frame_dt.avg();
        if ms <= 0.0 { 0.0 } else { 1000.0 / ms }
    }

    pub fn summary(&self) -> String {
        format!(
            "FPS {:.0} | TICK {:.3}MS | CMDS {} | FRAME {}",
            self.fps(),
            self.tick_dt.avg(),
            self.last_commands,
            self.last_frame
        )
    }
}

impl Profiler for FrameStats {
    fn on_step(&mut self, frame: usize, timings: StepTimings) {
        self.tick_dt.push(timings.tick);
        self.last_frame = frame;
        self.last_commands = timings.commands;
        if timings.tick > SLOW_TICK {
            tracing::warn!(frame, tick_ms = timings.tick.as_secs_f64() * 1000.0, "slow tick");
        }
    }
}
