//! Web front end: prediction form, result page, and PDF report download.

pub mod config;
mod error;
mod page;
mod routes;

pub use config::Config;
pub use error::AppError;
pub use routes::{AppState, router};
