use std::time::Duration;

use engine::HeadlessRunner;
use engine::app::{AppConfig, AppContext, GameApp, InputFrame, run_game};
use engine::render::RenderCommand;
use engine::surface::SurfaceSize;

use rewind::debug::FrameStats;
use rewind::headful::input_adapter::{DEBUG_TOGGLE_KEY, frame_input};
use rewind::session::Session;
use rewind::settings::{SessionSettings, SettingsStore};
use rewind::view::debug_overlay;

/// Longest frame step fed to the session; longer stalls are treated as this.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

struct RewindApp {
    settings: SessionSettings,
    stats: FrameStats,
}

impl GameApp for RewindApp {
    type State = HeadlessRunner<Session>;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        HeadlessRunner::new(Session::new(&self.settings))
    }

    fn update(
        &mut self,
        runner: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        _ctx: &mut AppContext,
    ) -> Vec<RenderCommand> {
        if input.was_pressed(DEBUG_TOGGLE_KEY) {
            self.stats.toggle();
        }
        self.stats.record_frame(dt);

        let frame = frame_input(input);
        let mut commands = runner.step_profiled(dt.min(MAX_FRAME_DT), &frame, &mut self.stats);
        if self.stats.is_enabled() {
            commands.extend(debug_overlay(
                self.settings.width,
                self.settings.height,
                &self.stats.summary(),
            ));
        }
        commands
    }

    fn should_exit(&self, runner: &Self::State) -> bool {
        runner.logic().quit_requested()
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let store = SettingsStore::from_env();
    let settings = store.load();
    tracing::info!(
        path = %store.path().display(),
        width = settings.width,
        height = settings.height,
        cadence = settings.replay_cadence,
        "starting path rewind"
    );

    let config = AppConfig {
        title: "Path Rewind".to_string(),
        buffer_size: SurfaceSize::new(settings.width, settings.height),
        vsync: settings.vsync,
        target_fps: Some(settings.target_fps),
    };
    let app = RewindApp {
        stats: FrameStats::new(settings.show_debug),
        settings,
    };

    run_game(config, app)
}
