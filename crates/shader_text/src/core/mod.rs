//! # Core Module
//!
//! Shared configuration types used by the renderer, the performance counter
//! and applications embedding them.

pub mod config;

pub use config::{
    Config,
    ConfigError,
    HudConfig,
    PerformanceCounterConfig,
    ShaderTextConfig,
};
