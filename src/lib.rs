//! PhotoBatcher
//!
//! Batch product photo preparation for online marketplaces.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
