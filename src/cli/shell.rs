use std::sync::Arc;

use crate::{
    cli::{
        core::{CliError, CliMode, LoopControl, ShellContext},
        io::Prompter,
        output,
    },
    config::{Config, ConfigManager},
    core::{
        services::ExpenseService,
        time::{Clock, SystemClock},
    },
    storage::{json_backend::JsonStorage, AccumulatorStore},
};

pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env();
    let manager = ConfigManager::new();
    let config = load_config(&manager);
    output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

    let storage = JsonStorage::new(config.resolve_data_file(manager.base_dir()));
    tracing::debug!(path = %storage.path().display(), "using record file");
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = AccumulatorStore::new(Box::new(storage));
    let service = ExpenseService::open(store, clock.clone());

    let mut context = ShellContext::new(service, clock, &config, Prompter::new(mode));
    context.start();
    loop {
        match context.step()? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

fn load_config(manager: &ConfigManager) -> Config {
    if !manager.exists() {
        let config = Config::default();
        if let Err(err) = manager.save(&config) {
            tracing::warn!(
                path = %manager.path().display(),
                error = %err,
                "could not write default config"
            );
        }
        return config;
    }
    match manager.load() {
        Ok(config) => config,
        Err(err) => {
            output::warning(format!(
                "Ignoring unreadable config at {}: {err}",
                manager.path().display()
            ));
            Config::default()
        }
    }
}
