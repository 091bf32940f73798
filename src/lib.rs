//! rami-cli library
//!
//! This crate provides the core functionality for the `rami-cli` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of
//! querying Israeli Land Authority (רמ״י) public tender data:
//!
//! - [`client`] - Rate-limited HTTP client, search payload builder, and client-side pagination
//! - [`tools`] - Typed operations returning uniform `{success, ...}` JSON envelopes
//! - [`resolver`] - Hebrew settlement-name to Kod Yeshuv code resolution
//! - [`reference`] - Static catalogs of tender types, regions, statuses, and settlements
//! - [`resources`] - Read-only JSON exports of the reference catalogs
//! - [`cli`] - Command-line interface over the tool operations
//! - [`models`] - Search criteria, date ranges, and tender record types
//! - [`config`] - Client configuration with TOML loading
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use rami_cli::{client::LandClient, errors::AppResult, models::SearchCriteria};
//!
//! # async fn example() -> AppResult<()> {
//! let client = LandClient::new()?;
//! let criteria = SearchCriteria {
//!     active_only: true,
//!     ..SearchCriteria::default()
//! };
//! let results = client.search_tenders(&criteria).await?;
//! println!("{} active tenders", results.records.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod reference;
pub mod resolver;
pub mod resources;
pub mod tools;
