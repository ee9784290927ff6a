use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockroom_core::{config::Config, thumbnail::resolve_image_path, Dataset, Error};

#[derive(Parser)]
#[command(name = "stockroom", about = "Stockroom — search warehouse records from the terminal")]
struct Cli {
    /// Write debug logs to /tmp/stockroom-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file layered over the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the rows a query renders, one `label<TAB>target` per line.
    Search {
        dataset: String,
        #[arg(long, short, default_value = "")]
        query: String,
    },
    /// Print the image source a thumbnail path resolves to.
    Thumb { relative: String },
    /// List configured datasets.
    Datasets,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/stockroom-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("stockroom debug log started — tail -f /tmp/stockroom-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Config::defaults()
        }),
    };

    match cli.command {
        None => stockroom_tui::run(config),
        Some(Cmd::Search { dataset, query }) => {
            let ds_config = config
                .dataset(&dataset)
                .ok_or_else(|| Error::UnknownDataset(dataset.clone()))?;
            let ds = Dataset::from_config(ds_config)?;
            let mut list = ds.result_list();
            ds.search(&query, &mut list)?;
            for row in list.rows() {
                println!("{}\t{}", row.label, row.target);
            }
            Ok(())
        }
        Some(Cmd::Thumb { relative }) => {
            println!("{}", resolve_image_path(&config.gallery.base_path, &relative));
            Ok(())
        }
        Some(Cmd::Datasets) => {
            for ds in &config.datasets {
                println!(
                    "{}\t#{}\t{}\t{}",
                    ds.name,
                    ds.list_id,
                    ds.route_prefix,
                    ds.fields.join(",")
                );
            }
            Ok(())
        }
    }
}
