use tour_engine::amap::{AmapClient, AmapConfig};
use tour_engine::domain::{Preference, Strategy};
use tour_engine::geo::GeoResolver;
use tour_engine::rail::{RailClient, RailConfig, RailResolver};
use tour_engine::segment::SegmentRouter;
use tour_engine::tour::{TourBuilder, TourConfig};

/// One-shot tour optimization from the command line:
///
/// ```text
/// tour-engine <city> <strategy> <place> <place> [place...]
/// ```
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tour_engine=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("Usage: tour-engine <city> <strategy> <place> <place> [place...]");
        std::process::exit(2);
    }
    let city = &args[0];
    let strategy: Strategy = match args[1].parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let names = &args[2..];

    // Get credentials from environment
    let amap_key = match std::env::var("AMAP_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("AMAP_API_KEY is not set");
            std::process::exit(2);
        }
    };
    let rail_url = std::env::var("RAIL_API_URL").unwrap_or_default();

    let amap = AmapClient::new(AmapConfig::new(&amap_key)).expect("Failed to create Amap client");

    // The rail bridge is optional for fixed non-train strategies; an
    // unset URL still needs a client, so point it at a dead endpoint
    // and let the soft fallback take over.
    let rail_config = if rail_url.is_empty() {
        eprintln!("Warning: RAIL_API_URL not set. Train legs will fall back to transit.");
        RailConfig::new("http://127.0.0.1:0").with_timeout(1)
    } else {
        RailConfig::new(rail_url)
    };
    let rail = RailClient::new(rail_config).expect("Failed to create rail client");

    let builder = TourBuilder::new(
        GeoResolver::new(amap.clone()),
        SegmentRouter::new(amap, city.clone()),
        RailResolver::new(rail),
        TourConfig::default(),
    );

    match builder
        .optimize_route(names, city, strategy, Preference::Time)
        .await
    {
        Ok(tour) => {
            println!("Visiting order: {}", tour.order().join(" -> "));
            for leg in &tour.legs {
                match leg.segment() {
                    Some(seg) => println!(
                        "  {} -> {}: {:.1} km, {:.0} min ({})",
                        seg.origin.name,
                        seg.destination.name,
                        seg.distance_km,
                        seg.duration_minutes,
                        seg.mode_label
                    ),
                    None => println!("  (leg could not be routed)"),
                }
            }
            println!(
                "Total: {:.1} km, {:.1} h",
                tour.total_distance_km, tour.total_duration_hours
            );
        }
        Err(e) => {
            eprintln!("Tour failed: {e}");
            std::process::exit(1);
        }
    }
}
