use anyhow::{bail, Context};
use bestcar::backend::{BackendClient, DEFAULT_API_URL};
use bestcar::region::{
    is_detectable, resolve_system, selectable_system, Coordinate, SELECTABLE_SYSTEMS,
};
use bestcar::stops::{filter_stops, find_stop, End, Selection};
use bestcar::trips::{FileStorage, MemoryStorage, RecentTrips, Storage, Trip};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// bestcar — board the car that stops closest to your exit.
///
/// Detects your transit system, remembers your last five trips, and asks the
/// backend which car to board.
///
/// Examples:
///   bestcar detect --lat 43.65 --lon -79.38
///   bestcar stops --system TTC --filter york
///   bestcar plan --system TTC --from Kipling --to Yorkdale
///   bestcar plan --lat 43.65 --lon -79.38 --from "Union Station" --to Oakville
///   bestcar plan --system TTC --recent 1
///   bestcar recent
///   bestcar serve --port 8080
#[derive(Parser)]
#[command(name = "bestcar", version, about, long_about = None)]
struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "BESTCAR_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Storage file for recent trips. Defaults to ~/.bestcar/storage.json.
    #[arg(long, global = true, env = "BESTCAR_STORAGE")]
    storage: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "bestcar=info").
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect the transit system for a coordinate.
    Detect {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// List systems available for manual selection.
    Systems,

    /// Check that the backend is reachable.
    Health,

    /// List stops for a system.
    Stops {
        #[arg(long)]
        system: String,
        /// Case-insensitive name filter.
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },

    /// Confirm a trip, save it to recent trips, and show the best car.
    Plan {
        /// System name. Detected from --lat/--lon when omitted.
        #[arg(long)]
        system: Option<String>,
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
        /// Origin stop name.
        #[arg(long, required_unless_present = "recent")]
        from: Option<String>,
        /// Destination stop name.
        #[arg(long, required_unless_present = "recent")]
        to: Option<String>,
        /// Reuse origin and destination of a recent trip (1 = newest).
        #[arg(long, conflicts_with_all = ["from", "to"])]
        recent: Option<usize>,
        /// Do not record the trip in recent trips.
        #[arg(long)]
        no_save: bool,
    },

    /// Show recent trips, newest first.
    Recent,

    /// Run the local HTTP server.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Keep recent trips in memory only.
        #[arg(long)]
        ephemeral: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let storage_path = cli.storage.clone().unwrap_or_else(FileStorage::default_path);

    match cli.command {
        Command::Detect { lat, lon } => detect(lat, lon),
        Command::Systems => {
            list_systems();
            Ok(())
        }
        Command::Health => {
            let status = BackendClient::new(&cli.api_url)
                .health()
                .with_context(|| format!("Backend at {} is unreachable", cli.api_url))?;
            eprintln!("  Backend status: {}", status);
            Ok(())
        }
        Command::Stops { system, filter } => {
            let system = canonical_system(&system)?;
            let client = BackendClient::new(&cli.api_url);
            let stops = client
                .stops(system)
                .with_context(|| format!("Could not load stops for {}", system))?;
            let shown = filter_stops(&stops, filter.as_deref().unwrap_or(""));
            if shown.is_empty() {
                eprintln!("  No stops found");
            }
            for stop in &shown {
                eprintln!("  {}", stop.name);
            }
            println!("{}", serde_json::to_string_pretty(&shown)?);
            Ok(())
        }
        Command::Plan { system, lat, lon, from, to, recent, no_save } => {
            let system = match (system, lat, lon) {
                (Some(s), _, _) => canonical_system(&s)?,
                (None, Some(lat), Some(lon)) => match resolve_system(lat, lon) {
                    Some(s) => s,
                    None => bail!(
                        "No supported system near {}. Pick one with --system ({})",
                        Coordinate::new(lat, lon),
                        SELECTABLE_SYSTEMS.join(", ")
                    ),
                },
                _ => bail!("Provide --system or --lat/--lon"),
            };

            let (from, to) = match (recent, from, to) {
                (Some(n), _, _) => {
                    let trip = recent_trip(FileStorage::load_from(storage_path.clone()), n)?;
                    (trip.start, trip.destination)
                }
                (None, Some(from), Some(to)) => (from, to),
                _ => bail!("Provide --from and --to, or --recent"),
            };

            let client = BackendClient::new(&cli.api_url);
            let stops = client
                .stops(system)
                .with_context(|| format!("Could not load stops for {}", system))?;

            let mut selection = Selection::new();
            selection.select(End::Origin, find_stop(&stops, &from)?.clone())?;
            selection.select(End::Destination, find_stop(&stops, &to)?.clone())?;
            let trip = selection.confirm()?;

            eprintln!("  {} \u{2014} {}", system, trip.route_line());

            if !no_save {
                let mut recent = RecentTrips::new(FileStorage::load_from(storage_path));
                recent.save_trip(trip.clone());
            }

            let rec = client
                .best_car(&trip.start, &trip.destination, system)
                .context("Could not get a recommendation")?;
            eprintln!("  {}", rec.display_line());
            println!("{}", serde_json::to_string_pretty(&rec)?);
            Ok(())
        }
        Command::Recent => {
            let recent = RecentTrips::new(FileStorage::load_from(storage_path));
            let trips = recent.recent_trips();
            if trips.is_empty() {
                eprintln!("  No recent trips");
            }
            for (i, trip) in trips.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, trip.display_line());
            }
            println!("{}", serde_json::to_string_pretty(&trips)?);
            Ok(())
        }
        Command::Serve { host, port, ephemeral } => {
            let storage: Box<dyn Storage> = if ephemeral {
                Box::new(MemoryStorage::new())
            } else {
                Box::new(FileStorage::load_from(storage_path))
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(bestcar::server::start(&host, port, storage))
        }
    }
}

fn detect(lat: f64, lon: f64) -> anyhow::Result<()> {
    match resolve_system(lat, lon) {
        Some(system) => {
            eprintln!("  Detected system: {}", system);
            println!("{}", serde_json::json!({ "system": system, "manual": false }));
            Ok(())
        }
        None => {
            eprintln!("  No supported system detected. Select one manually:");
            for name in SELECTABLE_SYSTEMS {
                eprintln!("    {}", name);
            }
            println!("{}", serde_json::json!({ "system": null, "manual": true }));
            std::process::exit(2);
        }
    }
}

fn list_systems() {
    for &name in SELECTABLE_SYSTEMS {
        let marker = if is_detectable(name) { " (auto-detect)" } else { "" };
        eprintln!("  {}{}", name, marker);
    }
}

fn canonical_system(name: &str) -> anyhow::Result<&'static str> {
    selectable_system(name).with_context(|| {
        format!(
            "Unknown system '{}'. Choose one of: {}",
            name,
            SELECTABLE_SYSTEMS.join(", ")
        )
    })
}

fn recent_trip<S: Storage>(storage: S, position: usize) -> anyhow::Result<Trip> {
    let recent = RecentTrips::new(storage);
    match recent.recent_trip(position) {
        Some(trip) => Ok(trip),
        None => match recent.recent_trips().len() {
            0 => bail!("No recent trips to reuse"),
            n => bail!("No recent trip #{}. Choose 1 to {}", position, n),
        },
    }
}
