//! Terminal front-end for the weather relay.
//!
//! ```text
//! weather-cli --city London
//! weather-cli --here --lat 51.5 --lon -0.12
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_relay::{
    ClientState, Coordinates, DisplayState, FixedGeolocator, Geolocator, HttpRelayClient,
    NoGeolocation, WeatherClient, client::viewer_offset,
};

#[derive(Debug, Parser)]
#[command(name = "weather-cli", about = "Look up the weather through the relay")]
struct Cli {
    /// City to look up
    #[arg(long, conflicts_with = "here")]
    city: Option<String>,

    /// Look up the weather at the device position
    #[arg(long)]
    here: bool,

    /// Device latitude; without it the position is unavailable
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Relay base URL
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:8080")]
    relay_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let relay = HttpRelayClient::new(&cli.relay_url)?;

    let position = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
        _ => None,
    };

    let state = match position {
        Some(coords) => run(relay, FixedGeolocator(coords), &cli).await,
        None => run(relay, NoGeolocation, &cli).await,
    };

    match state {
        Some((state, display)) => {
            print_state(&state, display.as_ref());
            if state.error.is_some() {
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("Nothing to look up: pass --city <name> or --here");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn run<G: Geolocator>(
    relay: HttpRelayClient,
    geolocator: G,
    cli: &Cli,
) -> Option<(ClientState, Option<DisplayState>)> {
    let client = WeatherClient::new(relay, geolocator);

    if cli.here {
        client.submit_location_query().await;
    } else {
        client.submit_city_query(cli.city.as_deref()?).await?;
    }

    Some((client.state().await, client.display(viewer_offset()).await))
}

fn print_state(state: &ClientState, display: Option<&DisplayState>) {
    if let Some(error) = &state.error {
        println!("Error: {error}");
        return;
    }

    let Some(display) = display else {
        return;
    };

    println!("{}", display.location);
    println!("{}", display.local_time);
    println!(
        "{:.1}°C, {} [{}]",
        display.temperature,
        display.description,
        display.animation.as_str()
    );
    if let Some(humidity) = display.humidity {
        println!("Humidity: {humidity:.0}%");
    }
    if let Some(wind) = display.wind_speed {
        println!("Wind: {wind:.1} m/s");
    }
    if let Some(visibility) = display.visibility {
        println!("Visibility: {:.1} km", visibility / 1000.0);
    }
    println!("{}", display.suggestion);

    if let Some(message) = &state.forecast_error {
        println!("Forecast unavailable: {message}");
    } else if !display.daily.is_empty() {
        println!();
        for day in &display.daily {
            println!(
                "{:<12} {:>6.1}°C  {}",
                day.label, day.temperature, day.description
            );
        }
    }
}
