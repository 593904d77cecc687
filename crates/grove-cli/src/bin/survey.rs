//! CLI tool to request a drone survey plan for an estate.

use clap::Parser;
use grove_cli::GroveClient;

/// Request a drone survey plan from the grove server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Grove server URL
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,

    /// Estate id to survey
    #[arg(long)]
    estate: String,

    /// Maximum travel distance before the drone must rest
    #[arg(long)]
    max_distance: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let client = GroveClient::new(&args.url);
    let plan = client.drone_plan(&args.estate, args.max_distance).await?;

    println!("Total distance: {}", plan.distance);
    match plan.rest {
        Some(rest) => println!("Drone rests at plot ({}, {})", rest.x, rest.y),
        None => println!("Drone completed the survey and landed"),
    }

    Ok(())
}
