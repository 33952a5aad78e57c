use clap::Parser;
use finedust::air::{AirKoreaService, AirQualityReport, AirQualityResolver, KakaoGeocoder};
use finedust::config::Config;
use finedust::location::{LocationResolver, PositionRequest};
use finedust::report::render_report;
use finedust::server;

/// finedust — nearest-station air quality readings for Korea.
///
/// Resolves a coordinate to the TM grid via the Kakao local API, finds the
/// nearest AirKorea monitoring station, and prints its latest measurements.
///
/// Examples:
///   finedust --lat 37.5665 --lon 126.9780
///   finedust --auto
///   finedust --station 종로구
///   finedust --auto --json
///   finedust --serve --port 8080
#[derive(Parser)]
#[command(name = "finedust", version, about, long_about = None)]
struct Cli {
    /// Latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Auto-detect location via IP geolocation.
    #[arg(long, short = 'a')]
    auto: bool,

    /// Fetch readings for a named station, skipping resolution.
    #[arg(long)]
    station: Option<String>,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Run the web server instead of a one-shot fetch.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(&cli.host, cli.port, &config));
        return;
    }

    let agent = ureq::agent();
    let resolver = AirQualityResolver::new(
        KakaoGeocoder::new(agent.clone(), config.kakao_rest_api_key.clone()),
        AirKoreaService::new(agent.clone(), config.airkorea_service_key.clone()),
    );

    let report = fetch_report(&cli, agent, &resolver);

    if cli.json {
        // Machine output on stdout, the human report stays on stderr.
        eprint!("{}", render_report(&report));
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }));
    } else {
        print!("{}", render_report(&report));
    }
}

fn fetch_report(cli: &Cli, agent: ureq::Agent, resolver: &AirQualityResolver) -> AirQualityReport {
    // A named station bypasses location acquisition entirely.
    if let Some(ref station) = cli.station {
        return resolver.fetch_station(station).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    }

    let position = LocationResolver::new(agent)
        .resolve(PositionRequest {
            lat: cli.lat,
            lon: cli.lon,
            auto: cli.auto,
        })
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            if matches!(e, finedust::location::LocationError::NoInput) {
                eprintln!();
                eprintln!("Usage:");
                eprintln!("  finedust --lat 37.5665 --lon 126.9780");
                eprintln!("  finedust --auto");
                eprintln!("  finedust --station <name>");
                eprintln!("  finedust --serve");
            }
            std::process::exit(1);
        });

    eprintln!("  {}", position.display_line());

    resolver.fetch(position.coordinate).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}
