use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

use hnstories::app::{App, AppEvent};
use hnstories::config::Config;
use hnstories::preferences::{PreferenceCell, SEARCH_KEY, THEME_KEY};
use hnstories::print;
use hnstories::search::build_client;
use hnstories::storage::{Database, DatabaseError};
use hnstories::stories::{SearchSession, SortKey};
use hnstories::ui;

/// Get the config directory path (~/.config/hnstories/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("hnstories");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "hnstories", about = "Search Hacker News stories from the terminal")]
struct Args {
    /// Search term for this run (also remembered for the next one)
    #[arg(long, value_name = "TERM", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    query: Option<String>,

    /// Delete the preference database before starting
    #[arg(long)]
    reset_prefs: bool,

    /// Print results to stdout instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Number of pages to fetch in print mode
    #[arg(long, default_value_t = 1, value_name = "N")]
    pages: u32,

    /// Sort column in print mode (title, author, comments, points)
    #[arg(long, value_name = "KEY", value_parser = parse_sort_key)]
    sort: Option<SortKey>,

    /// Reverse the sort direction in print mode
    #[arg(long, requires = "sort")]
    reverse: bool,

    /// Alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::from_str_name(s)
        .ok_or_else(|| format!("unknown sort key '{}' (expected title, author, comments or points)", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set; stderr keeps print-mode output clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        tracing::info!(path = %config_dir.display(), "Created config directory");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
            tracing::warn!(
                path = %config_dir.display(),
                error = %e,
                "Failed to set config directory permissions to 0700"
            );
        }
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let db_path = config_dir.join("prefs.db");
    if args.reset_prefs && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete preference database")?;
        eprintln!("Preferences reset.");
    }

    // Without a database, preferences still work for this run
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => Some(db),
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of hnstories appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Preference database unavailable, preferences will not persist");
            None
        }
    };

    let mut search_pref = PreferenceCell::load(db.clone(), SEARCH_KEY, &config.default_search).await;
    if let Some(query) = &args.query {
        search_pref.set(query).await;
    }

    let http_client =
        build_client(config.request_timeout()).context("Failed to build HTTP client")?;
    let mut session = SearchSession::new(config.api_base.clone(), search_pref);

    if args.print {
        if let Some(key) = args.sort {
            session.set_sort_key(key);
            if args.reverse && key != SortKey::None {
                session.set_sort_key(key);
            }
        }
        return print_stories(&mut session, &http_client, args.pages).await;
    }

    let theme_pref = PreferenceCell::load(db, THEME_KEY, &config.theme).await;
    let mut app = App::new(session, http_client, theme_pref);

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}

/// Fetch and print the stored search. Stories received before a failure
/// are still printed; the failure is reported on stderr with exit status 1.
async fn print_stories(
    session: &mut SearchSession,
    client: &reqwest::Client,
    pages: u32,
) -> Result<()> {
    let complete = print::fetch_pages(session, client, pages).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print::write_table(session, &mut out).context("Failed to write results")?;
    out.flush()?;

    if !complete {
        eprintln!("Something went wrong ...");
        std::process::exit(1);
    }
    Ok(())
}
