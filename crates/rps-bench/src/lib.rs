pub mod analytics;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod runner;
pub mod score;
