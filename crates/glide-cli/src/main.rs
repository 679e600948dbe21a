use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glide_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Inspect and tune the glide page interactions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an engine headlessly and print what the page would see
    Simulate {
        #[command(subcommand)]
        target: SimulateTarget,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SimulateTarget {
    /// Momentum scroll between two offsets
    Scroll {
        /// Starting offset in pixels
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Target offset in pixels
        #[arg(long)]
        to: f64,
        /// Maximum scroll offset of the page
        #[arg(long)]
        max: Option<f64>,
        /// Behave as if the user prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,
        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },
    /// Counter animation up to a target
    Counter {
        /// Value in the `data-count` attribute
        #[arg(long)]
        target: String,
        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },
    /// Carousel navigation
    Carousel {
        /// Number of cards
        #[arg(long)]
        cards: usize,
        /// Comma-separated actions: next, prev, go:<index>, swipe:<start>:<end>
        #[arg(long, value_delimiter = ',')]
        actions: Vec<String>,
        /// Card width used for the track offset
        #[arg(long, default_value_t = 320.0)]
        card_width: f64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A broken config file must not lock out `config init --force`
    let config = AppConfig::load();
    let level = match &config {
        Ok(config) => config.general.log_level.clone(),
        Err(_) => "info".to_string(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(level),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Simulate { target } => {
            let config = config?;
            match target {
                SimulateTarget::Scroll {
                    from,
                    to,
                    max,
                    reduced_motion,
                    json,
                } => commands::simulate::scroll(&config, from, to, max, reduced_motion, json),
                SimulateTarget::Counter { target, json } => {
                    commands::simulate::counter(&config, &target, json)
                }
                SimulateTarget::Carousel {
                    cards,
                    actions,
                    card_width,
                } => commands::simulate::carousel(&config, cards, &actions, card_width),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config?),
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
