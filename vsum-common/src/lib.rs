//! # VSUM Common Library
//!
//! Shared code for the VSUM services:
//! - Error types
//! - Bootstrap configuration loading (TOML + resolution order)
//! - Tracing initialization
//! - API response types

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
