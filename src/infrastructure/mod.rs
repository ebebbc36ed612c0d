//! Infrastructure layer
//!
//! Adapters behind the domain ports: Postgres repositories, import readers,
//! the HTML renderer, PDF generation and image fetching, plus configuration.

pub mod assets;
pub mod config;
pub mod import;
pub mod pdf;
pub mod persistence;
pub mod rendering;
