pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::ShotlistError;
