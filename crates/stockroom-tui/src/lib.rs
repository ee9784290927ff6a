//! stockroom TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use anyhow::Context;
use stockroom_core::{config::Config, Dataset};

/// Load every configured dataset, from its file or the bundled demo records.
pub fn load_datasets(config: &Config) -> anyhow::Result<Vec<Dataset>> {
    config
        .datasets
        .iter()
        .map(|ds| {
            Dataset::from_config(ds).with_context(|| format!("loading dataset `{}`", ds.name))
        })
        .collect()
}

/// Start the TUI with the datasets named in `config`.
pub fn run(config: Config) -> anyhow::Result<()> {
    let datasets = load_datasets(&config)?;
    tracing::info!(datasets = datasets.len(), "starting tui");
    let theme = theme::Theme::load_default();
    App::new(datasets, config, theme).run()
}
