//! Look up the current weather for a city by name, remembering recent
//! searches and a light/dark theme between runs

pub mod config;
pub mod display;
pub mod geocode;
pub mod palette;
pub mod search;
pub mod state;
pub mod storage;
pub mod weather;

#[cfg(test)]
mod mock_display;
