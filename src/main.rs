mod commands;
mod dates;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jamaah_core::jamaah::Jamaah;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jamaah")]
#[command(about = "Community schedules, Hijri calendar and Qibla direction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which schedules are due on a day
    Due {
        /// Day to evaluate (YYYY-MM-DD or e.g. "next friday"), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan a window of days for occurrences that were never notified
    Backfill {
        /// First day to scan (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day to scan (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,

        /// Scan this far back from --to instead of giving --from (e.g. "2weeks")
        #[arg(long, conflicts_with = "from")]
        span: Option<String>,

        /// Print occurrences as notification JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit notification documents for today's due schedules
    Notify {
        /// Day to evaluate, defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Record the emitted keys so they are not sent again
        #[arg(long)]
        mark_sent: bool,
    },
    /// Convert between Gregorian and Hijri dates
    Hijri {
        /// Gregorian day to convert, defaults to today
        date: Option<String>,

        /// Convert a Hijri date (DD-MM-YYYY) to Gregorian instead
        #[arg(long, conflicts_with = "date")]
        from_hijri: Option<String>,
    },
    /// Show a month with Hijri days alongside
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Direction and distance to the Kaaba
    Qibla {
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Current compass heading in degrees, to get a turn hint
        #[arg(long)]
        heading: Option<f64>,

        /// Store --lat/--lon as the default location
        #[arg(long, requires = "lat")]
        save: bool,
    },
    /// Show configuration paths and settings
    Config,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let jamaah = Jamaah::load()?;

    match cli.command {
        Commands::Due { date, json } => commands::due::run(&jamaah, date.as_deref(), json),
        Commands::Backfill {
            from,
            to,
            span,
            json,
        } => commands::backfill::run(
            &jamaah,
            from.as_deref(),
            to.as_deref(),
            span.as_deref(),
            json,
        ),
        Commands::Notify { date, mark_sent } => {
            commands::notify::run(&jamaah, date.as_deref(), mark_sent)
        }
        Commands::Hijri { date, from_hijri } => {
            commands::hijri::run(&jamaah, date.as_deref(), from_hijri.as_deref())
        }
        Commands::Calendar { month } => commands::calendar::run(&jamaah, month.as_deref()),
        Commands::Qibla {
            lat,
            lon,
            heading,
            save,
        } => commands::qibla::run(jamaah, lat.zip(lon), heading, save),
        Commands::Config => commands::config::run(&jamaah),
    }
}

/// Log to stderr, filtered by JAMAAH_LOG (e.g. `JAMAAH_LOG=jamaah_core=debug`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("JAMAAH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
