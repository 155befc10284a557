use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tripweaver::assembler::ItineraryAssembler;
use tripweaver::config::TripWeaverConfig;
use tripweaver::generation::GenerationClient;
use tripweaver::geocode::{Geocoder, NominatimClient};
use tripweaver::links::navigation_link;
use tripweaver::models::Itinerary;
use tripweaver::places::GooglePlacesClient;
use tripweaver::resolver::PlaceResolver;

struct TripRequest {
    location: String,
    num_days: u32,
    hotel_address: String,
}

fn parse_args() -> Result<TripRequest> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        bail!(
            "Usage: tripweaver <location> <num_days> <hotel_address>\n\
             Example: tripweaver \"New York City, New York, USA\" 2 \"350 W 39th St, New York\""
        );
    }

    let num_days: u32 = args[1]
        .parse()
        .with_context(|| format!("Invalid number of days: '{}'", args[1]))?;
    if num_days == 0 {
        bail!("Number of days must be at least 1");
    }

    Ok(TripRequest {
        location: args[0].clone(),
        num_days,
        hotel_address: args[2].clone(),
    })
}

fn print_itinerary(itinerary: &Itinerary, request: &TripRequest) {
    for day in &itinerary.days {
        println!("\n{}", day.label);
        for place in &day.places {
            println!("  - {}: {}", place.name, place.description);
            match &place.coordinate {
                Some(coordinate) => println!("      at {}", coordinate.format_coordinates()),
                None => println!("      (location unavailable)"),
            }
            match &place.image_url {
                Some(url) => println!("      image: {url}"),
                None => println!("      (no image available)"),
            }
        }

        let waypoints = day.route.waypoints();
        if waypoints.len() > 2 {
            println!("  Suggested round trip ({:.1} km):", day.route.total_distance_km());
            for pair in waypoints.windows(2) {
                println!(
                    "      {} -> {} ({:.1} km)",
                    pair[0].format_coordinates(),
                    pair[1].format_coordinates(),
                    pair[0].distance_km(&pair[1])
                );
            }
        } else {
            println!("  No routable places for this day.");
        }

        println!(
            "  Directions: {}",
            navigation_link(&request.hotel_address, &request.location, day)
        );
    }
}

async fn run(request: TripRequest, config: TripWeaverConfig) -> Result<()> {
    let nominatim = Arc::new(
        NominatimClient::new(&config.geocoding).context("Failed to create geocoding client")?,
    );
    let places = Arc::new(
        GooglePlacesClient::new(&config.places).context("Failed to create places client")?,
    );
    let generator = GenerationClient::new(config.generation.clone())
        .context("Failed to create generation client")?;

    let geocoder = Geocoder::new(nominatim, places.clone());

    let hotel = geocoder
        .resolve(&request.hotel_address)
        .await
        .context("Invalid hotel address. Please enter a valid address.")?;
    info!(
        "Hotel resolved to {} for '{}'",
        hotel.format_coordinates(),
        request.hotel_address
    );

    let generated = generator
        .generate(&request.location, request.num_days, &request.hotel_address)
        .await
        .context("Itinerary generation failed")?;

    let resolver = PlaceResolver::new(geocoder, places, config.resolver.concurrency as usize);
    let assembler = ItineraryAssembler::new(resolver);

    let itinerary = assembler
        .assemble(&generated, &request.location, hotel)
        .await;

    println!(
        "Itinerary for {} days in {}, starting from {}",
        itinerary.day_count(),
        request.location,
        request.hotel_address
    );
    print_itinerary(&itinerary, &request);

    Ok(())
}

#[tokio::main]
async fn main() {
    let config = match TripWeaverConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let request = match parse_args() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    };

    if let Err(e) = run(request, config).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
