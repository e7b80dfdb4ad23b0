use clap::{CommandFactory, Parser};
use plex_delete::cli::{Args, Mode};
use plex_delete::config::{default_config_path, ConfigStore};
use plex_delete::logging;
use plex_delete::output::{display_libraries, display_watched};
use plex_delete::plex::{MediaServer, PlexClient};
use plex_delete::triage::{TriageEngine, TriageOptions, TriageOutcome};
use plex_delete::ui::{Ui, UiConfig};
use plex_delete::AppError;
use std::io;
use tracing::{debug, error, info, warn};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    let Some(mode) = args.mode() else {
        debug!("Expected exactly one mode flag, printing usage");
        let _ = Args::command().print_help();
        println!();
        return;
    };

    if let Err(e) = run(&args, mode) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: &Args, mode: Mode) -> Result<(), AppError> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut store = ConfigStore::load(config_path)?;

    for show in store.policies().overlapping() {
        warn!(
            "{:?} is in both always_delete and always_ignore; always_delete wins",
            show
        );
    }

    if args.force && mode != Mode::DeleteWatched {
        warn!("--force only applies to --delete-watched, ignoring");
    }

    let client = PlexClient::new(args.server_config())?;
    let mut stdout = io::stdout();

    match mode {
        Mode::ListLibraries => {
            let libraries = client.list_libraries()?;
            display_libraries(&libraries, &mut stdout)
                .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        }
        Mode::ListWatched => {
            let watched = client.list_watched(&args.target_library)?;
            display_watched(&args.target_library, &watched, &mut stdout)
                .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        }
        Mode::DeleteWatched => {
            let watched = client.list_watched(&args.target_library)?;
            println!();

            let ui = Ui::new(UiConfig::new());
            let options = TriageOptions { force: args.force };
            let stdin = io::stdin();
            let mut engine = TriageEngine::new(&client, &mut store, stdin.lock(), ui, options);

            match engine.run(watched)? {
                TriageOutcome::Completed(summary) => {
                    info!("Triage complete: {:?}", summary);
                }
                TriageOutcome::Quit(summary) => {
                    info!("Triage stopped by operator: {:?}", summary);
                }
            }
        }
    }

    Ok(())
}
