//! tempcast library
//!
//! Fetches current and 15-minutely forecasts from Open-Meteo with a local
//! response cache and retry, and renders them as a table.

pub mod cache;
pub mod cli;
pub mod data;
pub mod report;
pub mod retry;
pub mod table;
