//! Core translation engine module

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod prompt;
pub mod transport;
