use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use engine_logging::{engine_debug, engine_info, engine_warn, DEFAULT_LOG_FILE};
use hoerspiel_core::{update, AppState, Msg};
use hoerspiel_engine::EngineHandle;

use super::cli::Cli;
use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::ui;

const OVERALL_TIMEOUT: Duration = Duration::from_secs(180);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let (config, config_error) = match config::load_config(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    engine_logging::initialize(
        config.log_output.into(),
        config.log_level(),
        Path::new(DEFAULT_LOG_FILE),
    );
    if let Some(err) = config_error {
        engine_warn!("Using default settings: {}", err);
    }

    let engine = EngineHandle::new(config.fetch_settings()).context("failed to start engine")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx);

    let mut state = AppState::with_settings(config.browser_settings());
    for msg in cli.messages(&config.series_term) {
        state = dispatch(state, msg, &runner);
    }

    let deadline = Instant::now() + OVERALL_TIMEOUT;
    while state.is_loading() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match msg_rx.recv_timeout(remaining) {
            Ok(msg) => state = dispatch(state, msg, &runner),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                bail!("no answer within {}s", OVERALL_TIMEOUT.as_secs())
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => bail!("engine stopped unexpectedly"),
        }
    }

    engine_info!("Rendering {:?}", state.page());
    print!("{}", ui::render::render(&state.view()));
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    engine_debug!("Dispatch {:?}", msg_name(&msg));
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::OpenLanding => "OpenLanding",
        Msg::OpenSeries { .. } => "OpenSeries",
        Msg::OpenSearch => "OpenSearch",
        Msg::QueryChanged(_) => "QueryChanged",
        Msg::QuerySubmitted => "QuerySubmitted",
        Msg::FilterChanged(_) => "FilterChanged",
        Msg::LayoutChanged(_) => "LayoutChanged",
        Msg::SearchCompleted { .. } => "SearchCompleted",
        Msg::LandingCompleted { .. } => "LandingCompleted",
    }
}
