//! HUD widgets built on the shader text renderer

pub mod performance_counter;

pub use performance_counter::PerformanceCounter;
