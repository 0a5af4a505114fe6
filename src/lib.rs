// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod output;
pub mod results_grid;

#[cfg(test)]
mod test_utils;
