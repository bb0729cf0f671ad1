/// Discussion Service Library
///
/// A small discussion-board backend: authenticated users create posts that
/// are either free text or a numeric chain seeded with a start number, and
/// other users append threaded comments or arithmetic nodes extending a
/// chain.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Post, comment, and numeric-node documents
/// - `services`: Creation and mutation rules
/// - `db`: Post document store (Postgres JSONB)
/// - `middleware`: Bearer-token authentication extractor
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
