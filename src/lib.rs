//! Staff rota balancing.
//!
//! A draft rota is seeded from staff shift preferences over a fixed horizon of
//! dates, then repaired by the autobalancer so that every day has 3-5 staff,
//! every staff member works 3-5 shifts in each rolling 7-day window, and nobody
//! works more than 3 days in a row. The repair is greedy and bounded: three
//! ordered passes, a budget of 50 adds/removes and at most 10 daily iterations.
//!
//! - **`schedule`**: domain types, constraint checks, candidate selection, the
//!   repair engine, fairness scoring and reports
//! - **`config`**: TOML configuration
//! - **`parser`** / **`export`**: CSV and JSON input, CSV output
//! - **`display`**: terminal and text rendering
//! - **`demo`**: seeded sample data
//! - **`web`**: HTTP surface

pub mod config;
pub mod demo;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{Result, RotaError};
