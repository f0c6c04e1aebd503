//! `caffeinated` — command-line front end for the caffeine intake tracker.
//!
//! # Usage
//!
//! ```
//! caffeinated log "Costa Coffee Latte"
//! caffeinated status --limit 300
//! caffeinated chart --day 2024-09-12
//! ```
//!
//! Settings come from `caffeinated.toml` (or `--config`), then `CAFFEINATED_*`
//! environment variables, then command-line flags.

mod client;
mod notify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use caffeine_core::{
  catalog::{self, CatalogFilter, CatalogTab},
  decay,
  history::group_by_day,
  intake::{Category, IntakeEvent},
  store::{DEFAULT_RECENT_LIMIT, IntakeStore},
  tracker::{DEFAULT_DAILY_LIMIT_MG, Tracker},
};
use caffeine_store_sqlite::SqliteStore;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use client::CatalogClient;
use notify::ConsoleNotifier;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_STORE_PATH: &str = "~/.local/share/caffeinated/history.db";
const DEFAULT_CATALOG_URL: &str = "https://coffee-ef9cb-default-rtdb.firebaseio.com";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "caffeinated", version, about = "Track caffeine intake and its decay")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "caffeinated.toml")]
  config: PathBuf,

  /// SQLite file holding the intake history.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  /// Daily caffeine limit in mg.
  #[arg(long)]
  limit: Option<u32>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Browse the drink catalog.
  Catalog {
    /// Case-insensitive substring of the drink name.
    #[arg(long, default_value = "")]
    search:   String,
    /// Only drinks of this category (e.g. "Tea", "Energy Drinks").
    #[arg(long, conflicts_with = "recent")]
    category: Option<String>,
    /// Only drinks logged earlier today.
    #[arg(long)]
    recent:   bool,
  },
  /// Log a catalog drink as consumed now.
  Log {
    /// Exact catalog name (case-insensitive).
    name: String,
  },
  /// Show today's caffeine level and raise any warnings.
  Status,
  /// Print the half-hourly caffeine curve for a day.
  Chart {
    /// Day to chart; defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    day: Option<NaiveDate>,
  },
  /// List every logged drink, grouped by day.
  History,
  /// The most recent distinct drinks logged today.
  Recent {
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    limit: usize,
  },
  /// Remove a logged drink by entry id.
  Remove { entry_id: Uuid },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Runtime settings, layered from file and environment.
#[derive(Debug, Deserialize)]
struct Settings {
  store_path:     PathBuf,
  daily_limit_mg: u32,
  catalog_url:    String,
}

fn load_settings(path: &Path) -> Result<Settings> {
  config::Config::builder()
    .set_default("store_path", DEFAULT_STORE_PATH)?
    .set_default("daily_limit_mg", i64::from(DEFAULT_DAILY_LIMIT_MG))?
    .set_default("catalog_url", DEFAULT_CATALOG_URL)?
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("CAFFEINATED"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(&cli.config)?;

  let store_path = expand_tilde(cli.store.as_deref().unwrap_or(&settings.store_path));
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let tracker = Tracker::new(ConsoleNotifier, settings.daily_limit_mg);
  if let Some(limit) = cli.limit {
    tracker.set_limit(limit);
  }

  let today = Local::now().date_naive();

  match cli.command {
    Command::Catalog { search, category, recent } => {
      let drinks = CatalogClient::new(&settings.catalog_url)?.fetch_all().await;
      let tab = if recent {
        CatalogTab::Recent(store.recent_names(today, DEFAULT_RECENT_LIMIT).await?)
      } else if let Some(c) = category {
        CatalogTab::Category(Category::parse(&c))
      } else {
        CatalogTab::All
      };
      for drink in (CatalogFilter { query: search, tab }).apply(&drinks) {
        println!("{}", describe(drink));
      }
    }

    Command::Log { name } => {
      let drinks = CatalogClient::new(&settings.catalog_url)?.fetch_all().await;
      let Some(drink) = catalog::find_by_name(&drinks, &name) else {
        bail!("no catalog drink named {name:?}");
      };
      let event = drink.consumed(Local::now().naive_local());
      let day = event.day().context("logged drink has no consumption time")?;
      let entry_id = store.insert(day, event.clone()).await?;
      println!("Logged {} ({entry_id})", describe(&event));
      tracker.evaluate(&store).await?;
    }

    Command::Status => {
      let level = tracker.current_level(&store).await?;
      println!("Current level: {level} mg of {} mg daily limit", tracker.limit());
      tracker.evaluate(&store).await?;
    }

    Command::Chart { day } => {
      let day = day.unwrap_or(today);
      let events = store.read_day(day).await?;
      println!("{}", day.format("%B %d %Y"));
      for point in decay::daily_series(&events, day) {
        let bar = "#".repeat((point.level_mg / 10.0).round() as usize);
        println!("{}  {:>6.1} mg  {bar}", point.time.format("%H:%M"), point.level_mg);
      }
    }

    Command::History => {
      for section in group_by_day(store.read_all().await?) {
        println!("{}  ({} mg)", section.day.format("%B %d %Y"), section.total_mg);
        for entry in &section.entries {
          let time = entry
            .event
            .consumed_at
            .map_or_else(|| "--:--".to_owned(), |t| t.format("%l:%M %p").to_string());
          println!("  {}  {time}  {}", entry.entry_id, describe(&entry.event));
        }
      }
    }

    Command::Recent { limit } => {
      for name in store.recent_names(today, limit).await? {
        println!("{name}");
      }
    }

    Command::Remove { entry_id } => {
      if store.delete_entry(entry_id).await? {
        println!("Removed {entry_id}");
      } else {
        println!("No entry {entry_id}");
      }
    }
  }

  Ok(())
}

/// One-line summary of a drink for listings.
fn describe(drink: &IntakeEvent) -> String {
  let volume = drink
    .volume_fl_oz()
    .map_or_else(|| drink.volume_ml.clone(), |oz| format!("{oz:.1} fl oz"));
  format!(
    "{} [{}] {} mg, {} kcal, {volume}",
    drink.name, drink.category, drink.caffeine_mg, drink.calories
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
