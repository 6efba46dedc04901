//! Frame rate and frame time label
//!
//! Samples frames over a fixed interval and rewrites a label such as
//! `FPS:120 8.3MS` without allocating.

use crate::core::PerformanceCounterConfig;
use crate::render::api::DeviceBuffer;
use crate::render::text::ShaderTextRenderer;

/// Slot count the counter label needs
pub const COUNTER_CAPACITY: usize = 16;

/// Lowest rate used when converting to frame time
const MIN_FPS: f32 = 0.001;

/// Smallest accepted sampling interval in seconds
const MIN_UPDATE_INTERVAL: f32 = 0.001;

/// FPS and frame-time counter writing into a [`ShaderTextRenderer`]
#[derive(Debug, Clone)]
pub struct PerformanceCounter {
    update_interval: f32,
    decimals: u32,
    elapsed: f32,
    frame_count: u32,
    last_fps: f32,
}

impl PerformanceCounter {
    /// Create a counter from its configuration
    pub fn new(config: &PerformanceCounterConfig) -> Self {
        let update_interval = if config.update_interval >= MIN_UPDATE_INTERVAL {
            config.update_interval
        } else {
            log::warn!(
                "update_interval {} clamped to {}",
                config.update_interval,
                MIN_UPDATE_INTERVAL
            );
            MIN_UPDATE_INTERVAL
        };

        Self {
            update_interval,
            decimals: config.decimals,
            elapsed: 0.0,
            frame_count: 0,
            last_fps: 0.0,
        }
    }

    /// Prepare `renderer` for the counter label
    pub fn attach<B: DeviceBuffer>(&self, renderer: &mut ShaderTextRenderer<B>) {
        renderer.set_capacity(COUNTER_CAPACITY);
    }

    /// Record one frame lasting `delta_seconds` of unscaled time
    ///
    /// Once the sampling interval has elapsed the label is rewritten and
    /// uploaded. Returns whether that happened this frame.
    pub fn update<B: DeviceBuffer>(&mut self, delta_seconds: f32, renderer: &mut ShaderTextRenderer<B>) -> bool {
        self.frame_count += 1;
        self.elapsed += delta_seconds;

        if self.elapsed < self.update_interval {
            return false;
        }

        self.last_fps = self.frame_count as f32 / self.elapsed;
        self.frame_count = 0;
        self.elapsed = 0.0;

        self.write_label(renderer);
        true
    }

    /// Write the current sample into `renderer` and upload it
    pub fn write_label<B: DeviceBuffer>(&self, renderer: &mut ShaderTextRenderer<B>) {
        renderer
            .formatter()
            .string("FPS:")
            .int(self.last_fps as i32)
            .char(' ')
            .float(self.frame_time_ms(), self.decimals)
            .string("MS")
            .clear_rest();
        renderer.apply_pending_writes();
    }

    /// Frames per second of the last completed sample
    pub fn fps(&self) -> f32 {
        self.last_fps
    }

    /// Milliseconds per frame of the last completed sample
    pub fn frame_time_ms(&self) -> f32 {
        1000.0 / self.last_fps.max(MIN_FPS)
    }

    /// Sampling interval in seconds
    pub fn update_interval(&self) -> f32 {
        self.update_interval
    }
}

impl Default for PerformanceCounter {
    fn default() -> Self {
        Self::new(&PerformanceCounterConfig::default())
    }
}
