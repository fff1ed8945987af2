//! `carlux` command-line driver.
//!
//! Each subcommand runs one view binder against the native adapters:
//! reqwest for HTTP, a JSON file for the session, stderr for alerts and
//! navigation, and an in-memory page that is printed once the binder
//! finishes.
//!
//! # Examples
//! ```sh
//! CARLUX_API_BASE_URL=http://127.0.0.1:8082 carlux signin --email a@b.com --password pw
//! carlux vehicles
//! carlux directions --from 30.0444,31.2357 --to 30.1,31.3 --lang ar
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use carlux_frontend::config::ClientSettings;
use carlux_frontend::domain::ports::SessionStore;
use carlux_frontend::domain::{CarDetails, Coordinate, SearchQuery, element_ids};
use carlux_frontend::inbound::{BookingForm, ViewBinder, ViewPorts};
use carlux_frontend::outbound::document::MemoryDocument;
use carlux_frontend::outbound::geolocation::StaticGeolocator;
use carlux_frontend::outbound::http::ReqwestTransport;
use carlux_frontend::outbound::local_storage::JsonFileSessionStore;
use carlux_frontend::outbound::terminal::{TerminalNavigator, TerminalNotifier};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `carlux` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "carlux",
    about = "Drive the CarLux Service backend from the terminal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register an account and its first car.
    Signup(SignupArgs),
    /// Sign in and store the session.
    Signin {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    Signout,
    /// Show the stored session.
    Whoami,
    /// Search known car problems.
    Search {
        /// Problem description.
        query: String,
        /// Car brand.
        #[arg(long)]
        brand: String,
        /// Car model.
        #[arg(long)]
        model: String,
        /// Response language.
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Find the nearest car owner, at the device position unless given.
    NearestOwner {
        /// Latitude typed into the manual location form.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<String>,
        /// Longitude typed into the manual location form.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<String>,
    },
    /// Find the nearest maintenance center.
    NearestCenter {
        /// Latitude.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// List maintenance centers near a position.
    NearestCenters {
        /// Position as `lat,lon`.
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        at: Coordinate,
        /// Restrict to one brand.
        #[arg(long)]
        brand: Option<String>,
    },
    /// Route between two positions.
    Directions {
        /// Start as `lat,lon`.
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,
        /// End as `lat,lon`.
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
        /// Instruction language.
        #[arg(long)]
        lang: Option<String>,
    },
    /// Save the device position for the signed-in user.
    ShareLocation,
    /// Book a maintenance appointment.
    Book(BookArgs),
    /// Load the signed-in user's vehicles.
    Vehicles,
    /// Load the services of one maintenance center.
    Services {
        /// Maintenance center id.
        center_id: String,
    },
    /// List every maintenance center.
    Centers,
    /// Open a WhatsApp chat with support.
    Whatsapp,
    /// Call support.
    Call,
}

#[derive(Debug, Args)]
struct SignupArgs {
    /// Account email.
    #[arg(long)]
    email: String,
    /// Display name.
    #[arg(long)]
    name: String,
    /// Account password.
    #[arg(long)]
    password: String,
    /// Car brand.
    #[arg(long)]
    brand: String,
    /// Car model.
    #[arg(long)]
    model: String,
    /// Year of manufacture.
    #[arg(long)]
    year: u16,
}

#[derive(Debug, Args)]
struct BookArgs {
    /// Vehicle id.
    #[arg(long)]
    vehicle: String,
    /// Maintenance center id.
    #[arg(long)]
    center: String,
    /// Service id.
    #[arg(long)]
    service: String,
    /// Appointment date.
    #[arg(long)]
    date: String,
    /// Notes for the center.
    #[arg(long, default_value = "")]
    notes: String,
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon', got '{raw}'"))?;
    Coordinate::parse(lat, lon).map_err(|error| error.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("carlux")])
        .map_err(|error| eyre!("failed to load configuration: {error}"))?;

    let transport = ReqwestTransport::new(settings.api_base_url()?)
        .wrap_err("failed to build HTTP client")?;
    let sessions = Arc::new(
        JsonFileSessionStore::open(settings.session_dir())
            .wrap_err("failed to open session store")?,
    );
    let page = Arc::new(MemoryDocument::standard());
    let binder = ViewBinder::new(
        Arc::new(transport),
        ViewPorts {
            sessions: sessions.clone(),
            navigator: Arc::new(TerminalNavigator::stderr()),
            notifier: Arc::new(TerminalNotifier::stderr()),
            page: page.clone(),
            geolocator: Arc::new(StaticGeolocator::from_option(settings.static_position()?)),
        },
        settings.support_phone()?,
    );

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Whoami => match sessions.get()? {
            Some(session) => writeln!(
                stdout,
                "{} <{}> (id {})",
                session.user_name(),
                session.user_email(),
                session.user_id()
            )?,
            None => writeln!(stdout, "not signed in")?,
        },
        command => {
            if let Some(payload) = run(&binder, &page, command).await {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&payload)?)?;
            }
            write!(stdout, "{page}")?;
        }
    }
    Ok(())
}

async fn run(
    binder: &ViewBinder,
    page: &MemoryDocument,
    command: Command,
) -> Option<serde_json::Value> {
    match command {
        Command::Signup(args) => {
            let car = CarDetails {
                brand: args.brand,
                model: args.model,
                manufacturing_year: args.year,
            };
            binder
                .sign_up(&args.email, &args.name, &args.password, car)
                .await
        }
        Command::Signin { email, password } => {
            binder.sign_in(&email, &password).await;
            None
        }
        Command::Signout => {
            binder.sign_out();
            None
        }
        Command::Search {
            query,
            brand,
            model,
            lang,
        } => {
            let search = SearchQuery {
                query,
                brand,
                model,
                lang,
            };
            binder.search(&search).await
        }
        Command::NearestOwner { lat, lon } => {
            match lat.zip(lon) {
                Some((latitude, longitude)) => {
                    page.set_input(element_ids::MANUAL_LAT, latitude);
                    page.set_input(element_ids::MANUAL_LON, longitude);
                    binder.use_manual_location().await;
                }
                None => binder.show_nearest_owner_here().await,
            }
            None
        }
        Command::NearestCenter { lat, lon } => {
            binder.show_nearest_center(lat, lon).await;
            None
        }
        Command::NearestCenters { at, brand } => {
            binder.show_nearest_centers(at, brand.as_deref()).await;
            None
        }
        Command::Directions { from, to, lang } => {
            binder.show_directions(from, to, lang.as_deref()).await;
            None
        }
        Command::ShareLocation => {
            let report = binder.share_location().await;
            Some(serde_json::json!({ "location": format!("{report:?}") }))
        }
        Command::Book(args) => {
            let form = BookingForm {
                vehicle_id: args.vehicle,
                center_id: args.center,
                service_id: args.service,
                appointment_date: args.date,
                notes: args.notes,
            };
            binder.submit_booking(form).await
        }
        Command::Vehicles => {
            binder.load_user_vehicles().await;
            None
        }
        Command::Services { center_id } => {
            binder.load_center_services(&center_id).await;
            None
        }
        Command::Centers => {
            binder.render_maintenance_centers().await;
            None
        }
        Command::Whatsapp => {
            binder.open_whatsapp();
            None
        }
        Command::Call => {
            binder.call_center();
            None
        }
        Command::Whoami => None,
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("30.0444,31.2357", Coordinate::new(30.0444, 31.2357))]
    #[case(" -33.9 , 18.4 ", Coordinate::new(-33.9, 18.4))]
    fn coordinates_parse_as_lat_lon(#[case] raw: &str, #[case] expected: Coordinate) {
        assert_eq!(parse_coordinate(raw), Ok(expected));
    }

    #[rstest]
    #[case("30.0444")]
    #[case("north,31")]
    fn malformed_coordinates_are_rejected(#[case] raw: &str) {
        assert!(parse_coordinate(raw).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn manual_owner_lookup_needs_both_components() {
        let parsed = Cli::try_parse_from(["carlux", "nearest-owner", "--lat", "30"]);
        assert!(parsed.is_err());
    }
}
