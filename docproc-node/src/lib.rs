pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;
