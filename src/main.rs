//! Binary entrypoint for the choosepath CLI.
//!
//! Commands:
//! - `start [--bind <addr>]` - resolve levels and serve the game
//! - `init` - create a starter `config.toml` with a playable sample game
//! - `status` - print the resolved level table and exit
//!
//! See the library crate docs for module-level details: `choosepath::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use choosepath::config::Config;
use choosepath::game::GameServer;

#[derive(Parser)]
#[command(name = "choosepath")]
#[command(about = "A cookie-state Choose Your Path game server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Start {
        /// Listen address (overrides the configured one), e.g. 127.0.0.1:8080
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Initialize a new game configuration
    Init,
    /// Show the resolved level table
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes the default)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Start { bind } => {
            let mut config = pre_config.unwrap_or(Config::load(&cli.config).await?);
            info!("Starting choosepath v{}", env!("CARGO_PKG_VERSION"));

            // CLI bind overrides config; fallback to config when CLI absent
            if let Some(cli_bind) = bind {
                config.server.bind = cli_bind;
            }

            let server = GameServer::new(config).await?;
            server.run().await?;
        }
        Commands::Init => {
            info!("Initializing new game configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            info!("Start the server and visit the entry route to play.");
        }
        Commands::Status => {
            let config = pre_config.unwrap_or(Config::load(&cli.config).await?);
            let entry_route = config.server.entry_route.clone();
            let server = GameServer::new(config).await?;
            let mut routes: Vec<&String> = server.levels().keys().collect();
            routes.sort();
            println!("Entry route: {}", entry_route);
            for route in routes {
                let level = &server.levels()[route];
                println!(
                    "{} \"{}\" treasure={} damage={} template={}",
                    route,
                    level.title,
                    level.treasure_reward,
                    level.damage_amount,
                    if level.template.is_some() { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from config; CLI verbosity overrides
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                writeln!(fmt, "{}", line)
            });
        } else {
            eprintln!("Could not open log file {}; logging to console only", file);
            builder.format(default_format);
        }
    } else {
        builder.format(default_format);
    }
    let _ = builder.try_init();
}

fn default_format(
    fmt: &mut env_logger::fmt::Formatter,
    record: &log::Record<'_>,
) -> std::io::Result<()> {
    use std::io::Write;
    writeln!(
        fmt,
        "{} [{}] {}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
        record.level(),
        record.args()
    )
}
