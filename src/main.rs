use std::path::PathBuf;

use movey_search::app::State;
use movey_search::config;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match config_arg() {
        Some(path) => config::load_from(&path),
        None => config::load(),
    };

    tracing::info!("Starting Movey search against {}", config.registry.base_url);

    iced::daemon(move || State::new(config.clone()), State::update, State::view)
        .title(State::title)
        .subscription(State::subscription)
        .theme(State::theme)
        .style(State::style)
        .run()
}

/// Path given with `--config <path>`, if any
fn config_arg() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    let idx = args.iter().position(|a| a == "--config")?;
    match args.get(idx + 1) {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            eprintln!("movey-search: --config requires a path, using the default config");
            None
        }
    }
}
