//! beat-admin: pricing console for the beat store.
//!
//! Subcommands:
//! - validate: check a beat list against the pricing rules, offline
//! - save: edit one beat (optional) and save it
//! - save-all: save a whole beat list in one request
//! - upload-image: upload a bundle cover image
//! - update-db / reset-db / stats: maintenance actions
//! - init-config: write the default config file

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use beat_admin::commands::{beat, bundle, maintenance};
use beat_admin::state::{BeatEditor, ConsoleConfig, Dialog, Prompter, Toast};
use beat_admin::{init_tracing, AdminConsole, CommandOutcome};
use beat_api::AdminClient;
use beat_core::{Beat, BundleImage, FieldEdit, ImageUpload, Money};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "beat-admin")]
#[command(about = "Manage beat prices, bundle images and the store database", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every beat in a JSON file against the pricing rules
    Validate {
        /// JSON array of beats (prices in cents)
        #[arg(short, long)]
        beats: PathBuf,
    },

    /// Write the default config file
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    Server(ServerCommand),
}

/// Subcommands that talk to the admin server.
#[derive(Subcommand)]
enum ServerCommand {
    /// Apply optional edits to one beat, then save it
    Save {
        #[arg(short, long)]
        beats: PathBuf,

        /// Beat to save
        #[arg(long)]
        id: i64,

        /// Tick or untick "Discounted"
        #[arg(long)]
        discounted: Option<bool>,

        /// New list price, e.g. 19.99
        #[arg(long)]
        original_price: Option<String>,

        /// New discount percentage (1-99)
        #[arg(long)]
        percent: Option<i64>,

        /// New discounted price, e.g. 14.99
        #[arg(long)]
        discounted_price: Option<String>,
    },

    /// Save every beat in a JSON file in one request
    SaveAll {
        #[arg(short, long)]
        beats: PathBuf,
    },

    /// Upload a bundle cover image
    UploadImage {
        /// Image file
        #[arg(short, long)]
        file: PathBuf,

        /// Key of the image being replaced, so the server can delete it
        #[arg(long)]
        previous_key: Option<String>,
    },

    /// Re-import the catalogue on the server
    UpdateDb,

    /// Wipe and rebuild the server database
    ResetDb {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show database counters
    Stats,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { beats } => validate(&beats),
        Commands::InitConfig { force } => init_config(cli.config, force),
        Commands::Server(command) => run(cli.config, command).await,
    }
}

async fn run(config_path: Option<PathBuf>, command: ServerCommand) -> Result<ExitCode> {
    let config = ConsoleConfig::load(config_path).context("loading configuration")?;
    debug!(base_url = %config.api.base_url, "Configuration loaded");

    let client = AdminClient::new(&config.api).context("building HTTP client")?;
    let prompter = match &command {
        ServerCommand::ResetDb { yes: true } => CliPrompter::AlwaysYes,
        _ => CliPrompter::Terminal,
    };
    let mut console = AdminConsole::new(client, prompter, &config.notifications);

    let outcome = match command {
        ServerCommand::Save {
            beats,
            id,
            discounted,
            original_price,
            percent,
            discounted_price,
        } => {
            console.editor_mut().load(read_beats(&beats)?)?;

            let edits = collect_edits(discounted, original_price, percent, discounted_price)?;
            let mut outcome = CommandOutcome::Completed;
            for edit in edits {
                outcome = beat::edit_field(&mut console, id, edit);
                if !outcome.is_success() {
                    break;
                }
            }

            if outcome.is_success() {
                outcome = beat::save_beat(&mut console, id).await;
            }
            if let Some(message) = console.errors().message(id) {
                eprintln!("Beat {id}: {message}");
            }
            outcome
        }
        ServerCommand::SaveAll { beats } => {
            console.editor_mut().load(read_beats(&beats)?)?;
            beat::save_all(&mut console).await
        }
        ServerCommand::UploadImage { file, previous_key } => {
            if let Some(image_key) = previous_key {
                console.set_bundle_image(Some(BundleImage {
                    image_key,
                    image_url: String::new(),
                }));
            }

            let outcome = bundle::upload_bundle_image(&mut console, read_image(&file)?).await;
            if outcome == CommandOutcome::Completed {
                if let Some(image) = console.bundle_image() {
                    println!("{}", serde_json::to_string_pretty(image)?);
                }
            }
            outcome
        }
        ServerCommand::UpdateDb => maintenance::update_database(&mut console).await,
        ServerCommand::ResetDb { .. } => maintenance::reset_database(&mut console).await,
        ServerCommand::Stats => {
            let outcome = maintenance::refresh_stats(&mut console).await;
            match console.stats() {
                Some(stats) => println!("{}", serde_json::to_string_pretty(stats)?),
                None => eprintln!("Could not load database stats"),
            }
            outcome
        }
    };

    for toast in console.notifications_mut().drain_unrendered() {
        print_toast(&toast);
    }

    info!(?outcome, "Command finished");
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<ExitCode> {
    let target = path
        .or_else(ConsoleConfig::default_config_path)
        .context("no config directory on this platform; pass --config")?;

    if target.exists() && !force {
        eprintln!("{} already exists (use --force to replace it)", target.display());
        return Ok(ExitCode::FAILURE);
    }

    let written = ConsoleConfig::default().save(Some(target))?;
    println!("Wrote {}", written.display());
    Ok(ExitCode::SUCCESS)
}

fn validate(path: &Path) -> Result<ExitCode> {
    let mut editor = BeatEditor::new();
    let count = editor.load(read_beats(path)?)?;

    let report = editor.validate_all();
    if report.is_clean() {
        println!("{count} beats OK");
        return Ok(ExitCode::SUCCESS);
    }

    for line in report.labelled_messages() {
        println!("{line}");
    }
    println!(
        "{} problems in {} of {count} beats",
        report.error_count(),
        report.failures.len()
    );
    Ok(ExitCode::FAILURE)
}

/// Edits in the order the form applies them: the toggle first, so that a
/// discounted price typed in the same run is accepted.
fn collect_edits(
    discounted: Option<bool>,
    original_price: Option<String>,
    percent: Option<i64>,
    discounted_price: Option<String>,
) -> Result<Vec<FieldEdit>> {
    let mut edits = Vec::new();

    if let Some(flag) = discounted {
        edits.push(FieldEdit::Discounted(flag));
    }
    if let Some(text) = original_price {
        edits.push(FieldEdit::OriginalPrice(Money::parse("original_price", &text)?));
    }
    if let Some(percent) = percent {
        edits.push(FieldEdit::DiscountPercent(percent));
    }
    if let Some(text) = discounted_price {
        edits.push(FieldEdit::DiscountedPrice(Money::parse("discounted_price", &text)?));
    }

    Ok(edits)
}

fn read_beats(path: &Path) -> Result<Vec<Beat>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading beats from {}", path.display()))?;
    let beats = serde_json::from_str(&contents)
        .with_context(|| format!("parsing beats in {}", path.display()))?;
    Ok(beats)
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageUpload::new(file_name, content_type_for(path), bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn print_toast(toast: &Toast) {
    match &toast.title {
        Some(title) => println!("[{}] {}: {}", toast.level, title, toast.message),
        None => println!("[{}] {}", toast.level, toast.message),
    }
}

// =============================================================================
// Terminal Prompts
// =============================================================================

enum CliPrompter {
    Terminal,
    AlwaysYes,
}

impl Prompter for CliPrompter {
    fn alert(&mut self, dialog: &Dialog) {
        eprintln!("\n{}\n{}\n", dialog.title, dialog.message);
    }

    fn confirm(&mut self, dialog: &Dialog) -> bool {
        if let CliPrompter::AlwaysYes = self {
            return true;
        }

        eprintln!("\n{}\n{}", dialog.title, dialog.message);
        eprint!("{} / {} [y/N]: ", dialog.confirm_label, dialog.cancel_label);

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }

        let answer = line.trim();
        answer.eq_ignore_ascii_case("y")
            || answer.eq_ignore_ascii_case("yes")
            || answer.eq_ignore_ascii_case(&dialog.confirm_label)
    }
}
