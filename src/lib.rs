pub mod cli;
pub mod config;
pub mod languages;
pub mod logging;
pub mod services;
pub mod session;
