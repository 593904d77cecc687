//! Grove CLI - operator tools for the estate survey backend.
//!
//! This crate provides the CLI binaries:
//! - seed_estate: create an estate and plant random trees
//! - survey: request a drone survey plan for an estate

pub mod client;

pub use client::GroveClient;
