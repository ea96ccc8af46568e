//! # Name Advisor Library
//!
//! Configuration core of the Baby Name Advisor service: layered environment
//! loading, startup validation, the typed configuration, and the data
//! contracts of the name-recommendation domain.

pub mod config;
pub mod models;
pub mod telemetry;
pub mod utils;
