//! Application state: SQLite persistence plus a DashMap estate cache.

use anyhow::Result;
use dashmap::DashMap;
use grove_core::{Estate, PlantError, Tree};
use tracing::info;

use crate::config::Config;
use crate::persistence::{estates, trees, Database};

/// Outcome of a planting request, for the API layer to map onto a response.
pub enum PlantOutcome {
    Planted { estate: Estate, tree: Tree },
    EstateNotFound,
    Rejected(PlantError),
}

/// Thread-safe store. Estate aggregates are cached write-through; trees are
/// always read from the database.
pub struct AppState {
    config: Config,
    db: Database,
    estates: DashMap<String, Estate>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            config,
            db,
            estates: DashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Warm the estate cache from the database at boot.
    pub async fn load_from_database(&self) -> Result<()> {
        let loaded = estates::load_all_estates(self.db.pool()).await?;
        let count = loaded.len();
        for estate in loaded {
            self.estates.insert(estate.id.clone(), estate);
        }
        info!("Loaded {} estates from database", count);
        Ok(())
    }

    /// Create and persist a new estate.
    pub async fn create_estate(&self, width: u32, length: u32) -> Result<Estate> {
        let estate = Estate::new(width, length);
        estates::insert_estate(self.db.pool(), &estate).await?;
        self.estates.insert(estate.id.clone(), estate.clone());
        Ok(estate)
    }

    /// Look up an estate, filling the cache on a miss.
    pub async fn get_estate(&self, id: &str) -> Result<Option<Estate>> {
        if let Some(found) = self.estates.get(id) {
            return Ok(Some(found.value().clone()));
        }

        let loaded = estates::get_estate(self.db.pool(), id).await?;
        if let Some(estate) = &loaded {
            self.estates.insert(estate.id.clone(), estate.clone());
        }
        Ok(loaded)
    }

    /// Every tree planted in one estate.
    pub async fn list_trees(&self, estate_id: &str) -> Result<Vec<Tree>> {
        trees::list_trees_by_estate(self.db.pool(), estate_id).await
    }

    /// Validate a planting, persist the tree and the updated aggregates in
    /// one transaction, and refresh the cache.
    pub async fn plant_tree(
        &self,
        estate_id: &str,
        x: u32,
        y: u32,
        height: u8,
    ) -> Result<PlantOutcome> {
        let Some(estate) = self.get_estate(estate_id).await? else {
            return Ok(PlantOutcome::EstateNotFound);
        };

        // Coordinate lookup ahead of the full-set scan in the core.
        if trees::get_tree_at(self.db.pool(), estate_id, x, y)
            .await?
            .is_some()
        {
            return Ok(PlantOutcome::Rejected(PlantError::PlotOccupied { x, y }));
        }

        let existing = trees::list_trees_by_estate(self.db.pool(), estate_id).await?;
        let (updated, tree) = match grove_core::place_tree(&estate, x, y, height, &existing) {
            Ok(result) => result,
            Err(err) => return Ok(PlantOutcome::Rejected(err)),
        };

        let mut tx = self.db.pool().begin().await?;
        if let Err(err) = trees::insert_tree_tx(&mut tx, &tree).await {
            // A concurrent planting of the same plot loses here.
            if is_unique_violation(&err) {
                return Ok(PlantOutcome::Rejected(PlantError::PlotOccupied { x, y }));
            }
            return Err(err);
        }
        estates::update_estate_stats_tx(&mut tx, &updated).await?;
        tx.commit().await?;

        self.estates.insert(updated.id.clone(), updated.clone());
        Ok(PlantOutcome::Planted {
            estate: updated,
            tree,
        })
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
