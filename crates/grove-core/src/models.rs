//! Core data models for the estate survey system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest accepted grid extent along either estate axis.
pub const MAX_DIMENSION: u32 = 50_000;

/// Tallest plantable tree.
pub const MAX_TREE_HEIGHT: u8 = 30;

/// A rectangular land plot subdivided into a 1-based unit grid, together
/// with the running statistics over every tree planted so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estate {
    pub id: String,
    /// Grid extent along the y axis.
    pub width: u32,
    /// Grid extent along the x axis.
    pub length: u32,
    pub tree_count: u32,
    /// Zero while no trees are planted.
    pub min_height: u8,
    pub max_height: u8,
    pub median_height: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Estate {
    /// Create a new estate with no trees. Dimensions are immutable afterwards.
    pub fn new(width: u32, length: u32) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            width,
            length,
            tree_count: 0,
            min_height: 0,
            max_height: 0,
            median_height: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total number of plots in the grid.
    pub fn plot_count(&self) -> u64 {
        self.length as u64 * self.width as u64
    }

    /// Aggregate view of the tree-height statistics.
    pub fn stats(&self) -> EstateStats {
        EstateStats {
            count: self.tree_count,
            min: self.min_height,
            max: self.max_height,
            median: self.median_height,
        }
    }
}

/// Snapshot of an estate's tree-height statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateStats {
    pub count: u32,
    pub min: u8,
    pub max: u8,
    pub median: u8,
}

/// A single planting at a grid coordinate. Trees are never moved or resized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: String,
    pub estate_id: String,
    /// 1-based, bounded by the estate length.
    pub x: u32,
    /// 1-based, bounded by the estate width.
    pub y: u32,
    /// In [1, MAX_TREE_HEIGHT].
    pub height: u8,
    pub created_at: DateTime<Utc>,
}

impl Tree {
    /// Create a new tree record belonging to `estate`.
    pub fn new(estate: &Estate, x: u32, y: u32, height: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            estate_id: estate.id.clone(),
            x,
            y,
            height,
            created_at: Utc::now(),
        }
    }
}
