//! `padel-slots`: look up free padel courts from the command line.
//!
//! ```sh
//! padel-slots slots lemon-padel-club --date 2026-02-15 --court-type DOUBLE \
//!     --start-time 08:00 --end-time 20:00 --timezone Europe/Berlin
//! padel-slots search --name "Lemon Padel"
//! padel-slots search --location Berlin --radius 25
//! ```

use std::process;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing::error;

use padel_slot_finder::filter::{parse_date, parse_timezone};
use padel_slot_finder::format::{render_console, render_venues};
use padel_slot_finder::{Config, CourtType, SlotFinder, SlotQuery};

#[derive(Parser)]
#[command(name = "padel-slots", version, about = "Find available padel court slots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging and print the full error chain
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List open slots for one club on one date
    Slots {
        /// Club slug/identifier
        club_slug: String,
        /// Date to check (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Type of court to filter by (SINGLE or DOUBLE)
        #[arg(long)]
        court_type: Option<CourtType>,
        /// Start of the window (HH:MM, local time)
        #[arg(long)]
        start_time: Option<String>,
        /// End of the window (HH:MM, local time)
        #[arg(long)]
        end_time: Option<String>,
        /// Slot duration in minutes
        #[arg(long, value_parser = ["60", "90", "120"])]
        duration: Option<String>,
        /// Timezone of the time window; defaults to DEFAULT_TIMEZONE
        #[arg(long)]
        timezone: Option<String>,
        /// Print matching slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search clubs by name or by location
    #[command(group(ArgGroup::new("selector").required(true).args(["location", "name"])))]
    Search {
        /// Place to search around (city, region, address)
        #[arg(long)]
        location: Option<String>,
        /// Club name
        #[arg(long)]
        name: Option<String>,
        /// Search radius in kilometres (location search only)
        #[arg(long)]
        radius: Option<u32>,
        /// Country code narrowing the location lookup (e.g. de)
        #[arg(long)]
        country: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            if verbose {
                eprintln!("Error: {:?}", e);
            } else {
                error!(error = %e, "Command failed");
                eprintln!("Error: {}", e);
            }
            1
        }
    };
    process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    init_logging(&config, cli.verbose);
    let finder = SlotFinder::from_config(config);

    match cli.command {
        Commands::Slots { club_slug, date, court_type, start_time, end_time, duration, timezone, json } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => chrono::Local::now().date_naive(),
            };
            let tz = match timezone.as_deref() {
                Some(name) => parse_timezone(name)?,
                None => finder.config().default_timezone,
            };
            let duration = duration
                .map(|d| d.parse::<u32>())
                .transpose()
                .context("invalid duration")?;
            let query = SlotQuery {
                venue_identifier: club_slug,
                date,
                court_type,
                local_start: start_time,
                local_end: end_time,
                timezone: Some(tz.name().to_string()),
                duration,
            };
            let slots = finder
                .find(&query)
                .with_context(|| format!("slot search for {} on {} failed", query.venue_identifier, date))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else if slots.is_empty() {
                println!("No slots found.");
            } else {
                print!("{}", render_console(&slots, tz, &finder.config().link_base_url));
            }
        }
        Commands::Search { location, name, radius, country } => {
            let venues = match (location, name) {
                (Some(place), _) => finder.search_by_location(&place, country.as_deref(), radius)?,
                (None, Some(name)) => finder.search_by_name(&name)?,
                (None, None) => unreachable!("clap enforces one of --location/--name"),
            };
            print!("{}", render_venues(&venues));
        }
    }
    Ok(())
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.to_lowercase()))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
