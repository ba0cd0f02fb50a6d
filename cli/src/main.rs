use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use matchtimer_cli::audio::{AudioService, cue_channel};
use matchtimer_cli::{CliContext, commands, logging, readline, ticker};
use matchtimer_core::{AppConfig, AppConfigExt, EventCatalog, FileStore, MatchSession};
use tokio::sync::RwLock;

/// Launch options
#[derive(Parser)]
#[command(version, about = "Match event timer")]
struct Args {
    /// Event catalog (TOML) to use instead of the built-in one
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let config = AppConfig::load();
    let catalog = match args.catalog.or_else(|| config.catalog_file()) {
        Some(path) => EventCatalog::load(&path).map_err(|e| format_error(&e))?,
        None => EventCatalog::builtin(),
    };

    let store = FileStore::open_or_empty(&config.preferences_file());
    let (player, cue_rx) = cue_channel();
    let session = MatchSession::new(&catalog, Box::new(store), Box::new(player));

    let audio_settings = Arc::new(RwLock::new(config.audio.clone()));
    let tick_hz = config.tick_hz();
    let ctx = CliContext::new(config, catalog, session);

    {
        let mut tasks = ctx.tasks.lock().await;
        tasks.audio = Some(tokio::spawn(AudioService::new(cue_rx, audio_settings).run()));
        tasks.ticker = Some(ticker::spawn(Arc::clone(&ctx.session), tick_hz));
    }

    println!("{} events loaded. Type `help` for commands.", ctx.catalog.len());

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "matchtimer", about = "Match timer commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new match, or continue a paused one
    Start,
    Pause,
    Resume,
    /// Stop the clock and reset every event
    Reset,
    /// Jump to a match time (MM:SS or seconds)
    Seek {
        #[arg(short, long)]
        time: String,
    },
    /// Mark a boss or camp as cleared/killed
    Clear {
        #[arg(short, long)]
        id: String,
    },
    /// Toggle sound for one event
    Sound {
        #[arg(short, long)]
        id: String,
    },
    /// Toggle, or set, the global mute
    Mute {
        #[arg(long, conflicts_with = "off")]
        on: bool,
        #[arg(long)]
        off: bool,
    },
    /// Show every event with its status and countdown
    Events,
    /// Show recent event log lines, newest first
    Log {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    Stage,
    Catalog,
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "matchtimer".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Start) => commands::start(ctx).await?,
        Some(Commands::Pause) => commands::pause(ctx).await?,
        Some(Commands::Resume) => commands::resume(ctx).await?,
        Some(Commands::Reset) => commands::reset(ctx).await?,
        Some(Commands::Seek { time }) => commands::seek(ctx, time).await?,
        Some(Commands::Clear { id }) => commands::clear(ctx, id).await?,
        Some(Commands::Sound { id }) => commands::toggle_sound(ctx, id).await?,
        Some(Commands::Mute { on, off }) => commands::mute(ctx, *on, *off).await?,
        Some(Commands::Events) => commands::show_events(ctx).await?,
        Some(Commands::Log { limit }) => commands::show_log(ctx, *limit).await?,
        Some(Commands::Stage) => commands::show_stage(ctx).await?,
        Some(Commands::Catalog) => commands::show_catalog(ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit(ctx).await;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

/// Error with its source chain on one line
fn format_error(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
