//! Estate aggregate maintenance for tree plantings.
//!
//! Validates a candidate planting against the estate boundary and the
//! occupied plots, then folds the new height into the estate's running
//! minimum, maximum, count, and median.

use chrono::Utc;
use thiserror::Error;

use crate::models::{Estate, Tree};

/// Rejection of a tree placement. No state is mutated on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlantError {
    #[error("plot ({x}, {y}) lies outside the {length}x{width} estate grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        length: u32,
        width: u32,
    },
    #[error("plot ({x}, {y}) already has a tree")]
    PlotOccupied { x: u32, y: u32 },
}

/// Validate a planting at `(x, y)` and return the estate with its
/// aggregates updated plus the new tree record.
///
/// `existing` must be the full set of trees currently planted in the
/// estate; the median is recomputed from every height rather than folded
/// from the previous median, so a stale or partial set silently skews it.
/// Persisting both returned values is the caller's responsibility.
pub fn place_tree(
    estate: &Estate,
    x: u32,
    y: u32,
    height: u8,
    existing: &[Tree],
) -> Result<(Estate, Tree), PlantError> {
    if x == 0 || y == 0 || x > estate.length || y > estate.width {
        return Err(PlantError::OutOfBounds {
            x,
            y,
            length: estate.length,
            width: estate.width,
        });
    }

    if existing.iter().any(|tree| tree.x == x && tree.y == y) {
        return Err(PlantError::PlotOccupied { x, y });
    }

    let mut updated = estate.clone();
    if updated.tree_count == 0 {
        updated.min_height = height;
        updated.max_height = height;
    } else {
        updated.min_height = updated.min_height.min(height);
        updated.max_height = updated.max_height.max(height);
    }
    updated.median_height = median_with(existing, height);
    updated.tree_count += 1;
    updated.updated_at = Utc::now();

    let tree = Tree::new(&updated, x, y, height);
    Ok((updated, tree))
}

/// True median of the existing heights plus the candidate: the middle
/// element of the sorted multiset, or the truncating mean of the two middle
/// elements for even counts.
fn median_with(existing: &[Tree], height: u8) -> u8 {
    let mut heights: Vec<u8> = existing.iter().map(|tree| tree.height).collect();
    heights.push(height);
    heights.sort_unstable();

    let mid = heights.len() / 2;
    if heights.len() % 2 == 1 {
        heights[mid]
    } else {
        ((heights[mid - 1] as u16 + heights[mid] as u16) / 2) as u8
    }
}
