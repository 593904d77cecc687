pub mod flight;
pub mod models;
pub mod stats;

pub use flight::{plan_flight, FlightPlan, PlotCoord, SerpentinePath};
pub use models::{Estate, EstateStats, Tree, MAX_DIMENSION, MAX_TREE_HEIGHT};
pub use stats::{place_tree, PlantError};
