pub mod config;
pub mod lyrics;
