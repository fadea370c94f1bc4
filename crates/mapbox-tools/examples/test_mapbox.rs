//! Exercise every Mapbox endpoint the relay uses.
//!
//! Run with: cargo run -p mapbox-tools --example test_mapbox
//! Or with places: cargo run -p mapbox-tools --example test_mapbox -- "Lyon" "Geneva"
//!
//! Make sure to set environment variables in .env:
//!   MAPBOX_ACCESS_TOKEN - Mapbox public or secret token

use std::env;

use mapbox_tools::{
    Coordinates, DirectionsOptions, IsochroneRequest, MapboxClient, MappingProvider, RouteProfile,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapbox_tools=debug".parse()?),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let origin = args.first().map(String::as_str).unwrap_or("Paris");
    let destination = args.get(1).map(String::as_str).unwrap_or("Berlin");

    let client = MapboxClient::from_env()?;
    println!("=== Mapbox client test ({}) ===\n", client.config().api_url);

    println!("--- Geocoding ---");
    let from = first_match(&client, origin).await?;
    let to = first_match(&client, destination).await?;

    println!("\n--- Reverse geocoding {} ---", from);
    for feature in client.reverse_geocode(from, 3).await? {
        println!("  {}", feature.place_name);
    }

    println!("\n--- Directions ---");
    let directions = client
        .directions(RouteProfile::Driving, &[from, to], &DirectionsOptions::default())
        .await?;
    match directions.routes.first() {
        Some(route) => println!(
            "  {:.1} minutes, {:.1} km",
            route.duration_secs / 60.0,
            route.distance_meters / 1000.0
        ),
        None => println!("  no route"),
    }

    println!("\n--- Isochrone (10, 20 min walking) ---");
    let request = IsochroneRequest::new(RouteProfile::Walking, from, vec![10, 20]);
    let isochrone = client.isochrone(&request).await?;
    let contours = isochrone["features"].as_array().map(Vec::len).unwrap_or(0);
    println!("  {} contour features", contours);

    println!("\n=== Done ===");
    Ok(())
}

async fn first_match(
    client: &MapboxClient,
    place: &str,
) -> Result<Coordinates, Box<dyn std::error::Error>> {
    let features = client.geocode(place, 1).await?;
    let feature = features
        .into_iter()
        .next()
        .ok_or_else(|| format!("no match for {:?}", place))?;
    println!("  {} -> {} ({})", place, feature.center, feature.place_name);
    Ok(feature.center)
}
