pub mod body;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod scenario;
pub mod simulation;
pub mod state;
pub mod trail;
pub mod units;
pub mod utils;

pub mod app;
