//! CI/CD Dashboard Server library.
//!
//! This library provides the core functionality for the dashboard server,
//! including database operations, domain models, and API services.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
