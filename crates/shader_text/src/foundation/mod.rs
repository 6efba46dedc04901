//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types for quad geometry
//! - Time management for frame statistics
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
