//! Clinic Scheduling Server
//!
//! Turns weekly work templates, date overrides and existing appointments
//! into bookable and occupied time slots, for the clinic as a whole or for
//! one doctor, and exposes them over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
