pub mod anticheat;
pub mod config;
pub mod library;
pub mod rating;
