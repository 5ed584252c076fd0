//! Deterministic simulation core for a side-scrolling arcade shooter.

pub mod clock;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod systems;
