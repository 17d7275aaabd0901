//! json2slides - Entry Point

use clap::Parser;
use json2slides::api::{ApiClient, DriveClient, SlidesClient};
use json2slides::auth::Authenticator;
use json2slides::model::AppError;
use json2slides::{config, logging, parser, pipeline};
use std::path::PathBuf;
use tracing::{error, info};

/// Build a Google Slides presentation from a JSON slide deck and file it
/// into a Google Drive folder.
#[derive(Parser, Debug)]
#[command(name = "json2slides")]
#[command(version)]
#[command(about = "Builds a Google Slides presentation from a JSON slide deck")]
pub struct Args {
    /// Path to the JSON deck file (an array of slide records)
    pub deck: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Presentation title (overrides config)
    #[arg(long)]
    pub title: Option<String>,

    /// Destination Drive folder name (overrides config)
    #[arg(long)]
    pub folder: Option<String>,

    /// Path to the OAuth client secrets file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Path to the cached token file
    #[arg(long)]
    pub token: Option<PathBuf>,

    /// Print the per-slide request JSON instead of calling the APIs
    #[arg(long)]
    pub dry_run: bool,
}

fn main() {
    if let Err(err) = run() {
        // The subscriber may not be installed if logging::init failed.
        error!(error = %err, "json2slides failed");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();

    logging::init()?;

    // Precedence chain: Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(
            with_env,
            args.title.clone(),
            args.folder.clone(),
            args.credentials.clone(),
            args.token.clone(),
        )
    };

    let deck = parser::load_deck(&args.deck)?;
    info!(slides = deck.len(), deck = %args.deck.display(), "Loaded deck");

    if args.dry_run {
        println!("{}", pipeline::render_dry_run(&deck)?);
        return Ok(());
    }

    let auth = Authenticator::new(&config.credentials_path, &config.token_path)?;
    let api = ApiClient::new(auth);
    let mut slides = SlidesClient::new(api.clone());
    let mut drive = DriveClient::new(api);

    let presentation =
        pipeline::build_presentation(&mut slides, &config.presentation_title, &deck)?;
    pipeline::file_presentation(&mut drive, &presentation, &config.drive_folder)?;

    info!(
        folder = %config.drive_folder,
        "Done! Check the folder in Google Drive"
    );
    Ok(())
}
