// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod progress;
pub mod registry;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod store;

pub use error::{Error, Result};
