//! CLI tool to create an estate and plant random trees through the API.

use clap::Parser;
use grove_cli::GroveClient;
use rand::Rng;
use std::collections::HashSet;

/// Create an estate and fill it with randomly placed trees
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Grove server URL
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,

    /// Estate width in plots
    #[arg(long, default_value_t = 10)]
    width: u32,

    /// Estate length in plots
    #[arg(long, default_value_t = 10)]
    length: u32,

    /// Number of trees to plant
    #[arg(long, default_value_t = 20)]
    trees: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Connecting to grove server at {}...", args.url);
    let client = GroveClient::new(&args.url);

    let estate = client.create_estate(args.width, args.length).await?;
    println!(
        "Created estate {} ({} x {} plots)",
        estate.id, args.length, args.width
    );

    let plots = args.length as u64 * args.width as u64;
    let target = (args.trees as u64).min(plots);
    if target < args.trees as u64 {
        println!("Capping at {} trees (one per plot)", target);
    }

    let mut rng = rand::rng();
    let mut taken: HashSet<(u32, u32)> = HashSet::new();
    while (taken.len() as u64) < target {
        let x = rng.random_range(1..=args.length);
        let y = rng.random_range(1..=args.width);
        if !taken.insert((x, y)) {
            continue;
        }

        let height: u8 = rng.random_range(1..=30);
        let tree = client.plant_tree(&estate.id, x, y, height).await?;
        println!(
            "Planted tree {} at ({}, {}) with height {}",
            tree.id, x, y, height
        );
    }

    let stats = client.estate_stats(&estate.id).await?;
    println!();
    println!(
        "Estate stats: count={} min={} max={} median={}",
        stats.count, stats.min, stats.max, stats.median
    );

    Ok(())
}
