//! Centralized error types for the simulation.
//!
//! Gameplay operations never fail; rejected actions (such as activating the ultimate
//! without a full energy bar) are reported through return values. Errors only arise
//! when the host hands the simulation an unusable configuration.

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while validating a [`SimConfig`](crate::config::SimConfig) or a viewport change.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },
}

/// Result type for simulation setup operations.
pub type GameResult<T> = Result<T, GameError>;
