//! Persistence layer for the grove server.
//!
//! Provides SQLite-backed storage for estates and their trees. Estate
//! aggregates are cached in memory by the state store; trees are always
//! read from the database.

pub mod db;
pub mod estates;
pub mod trees;

pub use db::{init_database, Database};
