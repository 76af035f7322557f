use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use lastmile::{DeliveryRequest, GeoCoord, GeoIndex};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct MapLoadError(PathBuf, #[source] lastmile::map::MapError);

#[derive(Debug, thiserror::Error)]
#[error("malformed delivery (expected \"lat:lon:item\"): {0}")]
struct BadDelivery(String);

#[derive(Parser)]
struct Cli {
    /// The path to the map data file
    map_file: PathBuf,

    /// Latitude of the depot
    depot_lat: String,

    /// Longitude of the depot
    depot_lon: String,

    /// Deliveries to make, each as "lat:lon:item"
    deliveries: Vec<String>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let index = load_map(&cli.map_file)?;

    let depot = GeoCoord::new(&cli.depot_lat, &cli.depot_lon)
        .expect("malformed depot coordinate");

    let deliveries = cli
        .deliveries
        .iter()
        .map(|raw| parse_delivery(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let plan = lastmile::plan(&index, &depot, &deliveries, &mut rand::rng())?;

    for command in &plan.commands {
        println!("{}", command);
    }
    println!("Total distance: {:.2} miles", plan.total_distance);

    Ok(())
}

fn load_map<P: AsRef<Path>>(path: P) -> Result<GeoIndex, MapLoadError> {
    let mut index = GeoIndex::new();
    match lastmile::map::load_map_from_file(&mut index, path.as_ref()) {
        Ok(()) => Ok(index),
        Err(e) => Err(MapLoadError(PathBuf::from(path.as_ref()), e)),
    }
}

fn parse_delivery(raw: &str) -> Result<DeliveryRequest, BadDelivery> {
    let mut fields = raw.splitn(3, ':');
    let lat = fields.next().ok_or_else(|| BadDelivery(raw.to_string()))?;
    let lon = fields.next().ok_or_else(|| BadDelivery(raw.to_string()))?;
    let item = fields.next().ok_or_else(|| BadDelivery(raw.to_string()))?;

    Ok(DeliveryRequest {
        location: GeoCoord::new(lat, lon).ok_or_else(|| BadDelivery(raw.to_string()))?,
        item: item.to_string(),
    })
}
