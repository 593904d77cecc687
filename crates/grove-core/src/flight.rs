//! Drone survey flight simulation.
//!
//! Simulates a single drone sweeping every plot of an estate in a
//! boustrophedon pattern, holding one unit of clearance above each plot's
//! tallest feature. An optional travel budget grounds the drone mid-flight
//! once it is spent.

use serde::{Deserialize, Serialize};

use crate::models::{Estate, Tree};

/// 1-based plot coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotCoord {
    pub x: u32,
    pub y: u32,
}

/// Outcome of a survey flight simulation. Derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Total vertical plus horizontal distance travelled.
    pub total_distance: u64,
    /// Where the drone came to rest, present only when the budget ran out
    /// before touchdown.
    pub rest: Option<PlotCoord>,
}

/// Serpentine walk over an estate grid: odd rows run west to east, even
/// rows east to west, so consecutive plots are always one unit apart and
/// every plot is visited exactly once.
#[derive(Debug, Clone)]
pub struct SerpentinePath {
    length: u32,
    width: u32,
    row: u32,
    col: u32,
}

impl SerpentinePath {
    pub fn new(length: u32, width: u32) -> Self {
        Self {
            length,
            width,
            row: 1,
            col: 1,
        }
    }
}

impl Iterator for SerpentinePath {
    type Item = PlotCoord;

    fn next(&mut self) -> Option<PlotCoord> {
        if self.length == 0 || self.row > self.width {
            return None;
        }

        let x = if self.row % 2 == 1 {
            self.col
        } else {
            self.length + 1 - self.col
        };
        let plot = PlotCoord { x, y: self.row };

        if self.col == self.length {
            self.col = 1;
            self.row += 1;
        } else {
            self.col += 1;
        }

        Some(plot)
    }
}

/// Obstacle heights per plot; zero means bare ground.
struct HeightMap {
    length: u32,
    cells: Vec<u8>,
}

impl HeightMap {
    fn build(estate: &Estate, trees: &[Tree]) -> Self {
        let mut cells = vec![0u8; estate.plot_count() as usize];
        for tree in trees {
            if (1..=estate.length).contains(&tree.x) && (1..=estate.width).contains(&tree.y) {
                let idx = (tree.y - 1) as usize * estate.length as usize + (tree.x - 1) as usize;
                cells[idx] = tree.height;
            }
        }
        Self {
            length: estate.length,
            cells,
        }
    }

    fn height_at(&self, plot: PlotCoord) -> u8 {
        self.cells[(plot.y - 1) as usize * self.length as usize + (plot.x - 1) as usize]
    }
}

/// Drone movement state with budget accounting.
///
/// Every sub-movement passes through [`Drone::spend`], which grants at most
/// what the budget still allows and flags exhaustion once the budget is
/// reached. `travelled` only ever grows by the granted amount.
struct Drone {
    altitude: u64,
    travelled: u64,
    budget: Option<u64>,
    exhausted: bool,
}

impl Drone {
    fn new(budget: Option<u64>) -> Self {
        Self {
            altitude: 0,
            travelled: 0,
            budget,
            exhausted: false,
        }
    }

    /// Grant as much of the requested distance as the budget allows.
    /// Meeting the budget exactly still grants the full request but marks
    /// the drone exhausted so no further movement is attempted.
    fn spend(&mut self, requested: u64) -> u64 {
        let granted = match self.budget {
            Some(budget) => {
                let remaining = budget - self.travelled;
                if requested >= remaining {
                    self.exhausted = true;
                }
                requested.min(remaining)
            }
            None => requested,
        };
        self.travelled += granted;
        granted
    }

    /// Returns false once the budget is exhausted; the caller must then
    /// abandon all remaining movement.
    fn ascend(&mut self, distance: u64) -> bool {
        self.altitude += self.spend(distance);
        !self.exhausted
    }

    fn descend(&mut self, distance: u64) -> bool {
        self.altitude -= self.spend(distance);
        !self.exhausted
    }

    fn forward(&mut self) -> bool {
        self.spend(1);
        !self.exhausted
    }

    /// Descend all the way to ground level. True only if touchdown was
    /// actually reached, even when the budget ran out at that exact moment.
    fn land(&mut self) -> bool {
        let requested = self.altitude;
        let granted = self.spend(requested);
        self.altitude -= granted;
        granted == requested
    }
}

/// Simulate a full survey of `estate`, visiting every plot in serpentine
/// order at one unit of clearance above its tallest feature.
///
/// With `max_distance` set, the drone stops as soon as the budget is spent;
/// the returned plan then reports the plot it was processing as its resting
/// coordinate and a total distance equal to the budget.
pub fn plan_flight(estate: &Estate, trees: &[Tree], max_distance: Option<u64>) -> FlightPlan {
    let map = HeightMap::build(estate, trees);
    let mut drone = Drone::new(max_distance);
    let mut path = SerpentinePath::new(estate.length, estate.width).peekable();
    let mut first = true;

    while let Some(plot) = path.next() {
        let h = map.height_at(plot) as u64;

        let completed = if first {
            // Ascend from ground to one unit above the origin plot. Over
            // bare ground, keep climbing if the next plot's obstacle is
            // already above the drone.
            first = false;
            if h > 0 {
                drone.ascend(h + 1)
            } else {
                let ahead = path.peek().map(|&p| map.height_at(p) as u64).unwrap_or(0);
                drone.ascend(1) && (drone.altitude >= ahead || drone.ascend(ahead))
            }
        } else if path.peek().is_none() {
            // Grid terminus: move onto the plot and land.
            drone.forward() && drone.land()
        } else if h == 0 {
            drone.forward()
        } else if drone.altitude > h + 1 {
            let drop = drone.altitude - (h + 1);
            drone.forward() && drone.descend(drop)
        } else if drone.altitude < h + 1 {
            drone.ascend(h + 1 - drone.altitude) && drone.forward()
        } else {
            drone.forward()
        };

        if !completed {
            return FlightPlan {
                total_distance: drone.travelled,
                rest: Some(plot),
            };
        }
    }

    FlightPlan {
        total_distance: drone.travelled,
        rest: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Estate;

    fn tree_at(estate: &Estate, x: u32, y: u32, height: u8) -> Tree {
        Tree::new(estate, x, y, height)
    }

    #[test]
    fn serpentine_visits_every_plot_exactly_once() {
        let plots: Vec<PlotCoord> = SerpentinePath::new(3, 2).collect();
        assert_eq!(
            plots,
            vec![
                PlotCoord { x: 1, y: 1 },
                PlotCoord { x: 2, y: 1 },
                PlotCoord { x: 3, y: 1 },
                PlotCoord { x: 3, y: 2 },
                PlotCoord { x: 2, y: 2 },
                PlotCoord { x: 1, y: 2 },
            ]
        );

        // Larger grid: the walk is a permutation of the full grid.
        let mut seen: Vec<PlotCoord> = SerpentinePath::new(7, 5).collect();
        assert_eq!(seen.len(), 35);
        seen.sort_by_key(|p| (p.y, p.x));
        seen.dedup();
        assert_eq!(seen.len(), 35);
    }

    #[test]
    fn single_plot_with_tree_ascends_to_clearance() {
        let estate = Estate::new(1, 1);
        let trees = vec![tree_at(&estate, 1, 1, 5)];

        let plan = plan_flight(&estate, &trees, None);
        assert_eq!(plan.total_distance, 6);
        assert_eq!(plan.rest, None);
    }

    #[test]
    fn empty_estate_is_a_flat_sweep() {
        // N plots, no trees: ascend 1, N - 2 unit moves, then move and
        // descend 1 at the terminus.
        let estate = Estate::new(3, 4);
        let plan = plan_flight(&estate, &[], None);
        assert_eq!(plan.total_distance, 13);
        assert_eq!(plan.rest, None);

        let estate = Estate::new(2, 2);
        let plan = plan_flight(&estate, &[], None);
        assert_eq!(plan.total_distance, 5);
        assert_eq!(plan.rest, None);
    }

    #[test]
    fn climbs_ahead_of_a_tree_and_lands_from_altitude() {
        // 3x1 row with a single tree of height 3 in the middle:
        // ascend 1, ascend 3 to clear the tree ahead, forward, forward,
        // descend 4.
        let estate = Estate::new(1, 3);
        let trees = vec![tree_at(&estate, 2, 1, 3)];

        let plan = plan_flight(&estate, &trees, None);
        assert_eq!(plan.total_distance, 10);
        assert_eq!(plan.rest, None);
    }

    #[test]
    fn descends_after_passing_a_tall_tree() {
        // 4x1 row, trees of height 5 at (2,1) and 2 at (3,1): ascend 1,
        // ascend 5 to clear the tree ahead, forward onto (2,1), forward
        // then descend 3 onto (3,1), forward and land from 3.
        let estate = Estate::new(1, 4);
        let trees = vec![tree_at(&estate, 2, 1, 5), tree_at(&estate, 3, 1, 2)];

        let plan = plan_flight(&estate, &trees, None);
        assert_eq!(plan.total_distance, 1 + 5 + 1 + 1 + 3 + 1 + 3);
        assert_eq!(plan.rest, None);
    }

    #[test]
    fn budget_spent_on_first_plot_rests_at_origin() {
        let estate = Estate::new(1, 2);

        let plan = plan_flight(&estate, &[], Some(1));
        assert_eq!(plan.total_distance, 1);
        assert_eq!(plan.rest, Some(PlotCoord { x: 1, y: 1 }));
    }

    #[test]
    fn budget_cut_mid_climb_rests_at_origin() {
        let estate = Estate::new(1, 3);
        let trees = vec![tree_at(&estate, 2, 1, 3)];

        // Needs 1 + 3 to leave the origin; a budget of 2 is cut mid-climb.
        let plan = plan_flight(&estate, &trees, Some(2));
        assert_eq!(plan.total_distance, 2);
        assert_eq!(plan.rest, Some(PlotCoord { x: 1, y: 1 }));
    }

    #[test]
    fn budget_met_exactly_on_a_forward_move_rests_there() {
        let estate = Estate::new(1, 3);
        let trees = vec![tree_at(&estate, 2, 1, 3)];

        // ascend 1, ascend 3, forward onto (2,1) = 5 spends the budget
        // exactly; the drone rests on the plot it just reached.
        let plan = plan_flight(&estate, &trees, Some(5));
        assert_eq!(plan.total_distance, 5);
        assert_eq!(plan.rest, Some(PlotCoord { x: 2, y: 1 }));
    }

    #[test]
    fn budget_cut_during_landing_rests_at_terminus() {
        let estate = Estate::new(1, 2);
        let trees = vec![tree_at(&estate, 1, 1, 5)];

        // ascend 6, forward, then only 3 of the 6 landing units remain.
        let plan = plan_flight(&estate, &trees, Some(10));
        assert_eq!(plan.total_distance, 10);
        assert_eq!(plan.rest, Some(PlotCoord { x: 2, y: 1 }));
    }

    #[test]
    fn budget_covering_the_whole_flight_reports_no_rest() {
        let estate = Estate::new(3, 4);
        let unbounded = plan_flight(&estate, &[], None);

        let exact = plan_flight(&estate, &[], Some(unbounded.total_distance));
        assert_eq!(exact.total_distance, unbounded.total_distance);
        assert_eq!(exact.rest, None);

        let generous = plan_flight(&estate, &[], Some(unbounded.total_distance + 100));
        assert_eq!(generous.total_distance, unbounded.total_distance);
        assert_eq!(generous.rest, None);
    }

    #[test]
    fn serpentine_rows_alternate_direction_in_flight() {
        // 2x2 with a tree in the far corner of row two; the drone reaches
        // (2,2) directly after (2,1) and climbs before crossing.
        let estate = Estate::new(2, 2);
        let trees = vec![tree_at(&estate, 2, 2, 4)];

        // ascend 1, forward onto (2,1), ascend 4 + forward onto (2,2),
        // forward + land from 5 at (1,2).
        let plan = plan_flight(&estate, &trees, None);
        assert_eq!(plan.total_distance, 1 + 1 + 4 + 1 + 1 + 5);
        assert_eq!(plan.rest, None);
    }
}
