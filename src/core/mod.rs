//! Core language operations

pub mod config;
pub mod detector;
pub mod errors;
pub mod languages;
pub mod models;
pub mod translator;
