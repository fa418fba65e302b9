//! Snaplink - a small URL shortener service
//!
//! Maps long URLs to short, collision-free codes, redirects visitors, and
//! records click analytics without blocking the redirect response.
//!
//! # Architecture
//! - `storage`: durable record store (SeaORM; SQLite/MySQL/PostgreSQL)
//! - `cache`: lookup cache for the redirect hot path (redis or in-process)
//! - `services`: shortening, redirect resolution, analytics, catalog
//! - `analytics`: fire-and-forget click bookkeeping
//! - `api`: actix-web handlers and routes
//! - `config`: TOML file + environment configuration

pub mod analytics;
pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod logging;
pub mod services;
pub mod storage;
pub mod utils;
