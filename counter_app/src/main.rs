//! Performance counter demo
//!
//! Drives a shader text label with the FPS counter over simulated frames and
//! logs what would be uploaded to the GPU each time the label changes.
//!
//! Usage: `counter_demo [config.toml|config.ron]`

use std::time::Duration;

use shader_text::foundation::logging;
use shader_text::prelude::*;
use thiserror::Error;

/// Demo application errors
#[derive(Debug, Error)]
enum AppError {
    #[error("Failed to load configuration from {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

struct CounterApp {
    config: HudConfig,
    label: ShaderTextRenderer<HostBuffer>,
    counter: PerformanceCounter,
    mesh: QuadMesh,
    timer: Timer,
}

impl CounterApp {
    fn new(config: HudConfig) -> Self {
        let mut label = ShaderTextRenderer::new(&config.renderer);
        let counter = PerformanceCounter::new(&config.counter);
        counter.attach(&mut label);

        log::info!(
            "Label ready: {} slots, {}x{} glyphs, anchored {:?}",
            label.capacity(),
            label.character_width(),
            label.character_height(),
            label.alignment()
        );

        Self {
            config,
            label,
            counter,
            mesh: QuadMesh::new(),
            timer: Timer::new(),
        }
    }

    fn run(&mut self) {
        let quads = self.label.populate_mesh(self.config.rect, &mut self.mesh);
        log::info!(
            "Mesh built once: {} quads, {} vertex bytes, {} index bytes",
            quads,
            self.mesh.vertex_bytes().len(),
            self.mesh.index_bytes().len()
        );
        if quads < self.label.capacity() {
            log::warn!(
                "Only {}/{} slots fit in a {}-wide rect",
                quads,
                self.label.capacity(),
                self.config.rect.width
            );
        }

        for frame in 0..self.config.frames {
            self.timer.advance(simulated_frame_time(self.config.frame_time_ms, frame));

            if self.counter.update(self.timer.delta_time(), &mut self.label) {
                let uploads = self.label.device().map_or(0, HostBuffer::write_count);
                log::info!(
                    "[{:6.2}s] \"{}\" (upload #{})",
                    self.timer.total_time(),
                    self.label.slots(),
                    uploads
                );
                log::debug!("Glyph indices: {:?}", self.label.slots().slots());
            }
        }

        log::info!(
            "Simulated {} frames over {:.2}s, average {:.1} FPS",
            self.timer.frame_count(),
            self.timer.total_time(),
            self.timer.average_fps()
        );
    }
}

/// Frame time with a periodic hitch every 90th frame
fn simulated_frame_time(base_ms: f32, frame: u32) -> Duration {
    let ms = if frame % 90 == 89 { base_ms * 4.0 } else { base_ms };
    Duration::from_secs_f32(ms.max(0.0).min(60_000.0) / 1000.0)
}

fn load_config() -> Result<HudConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => HudConfig::load_from_file(&path).map_err(|source| AppError::Config { path, source }),
        None => Ok(HudConfig::default()),
    }
}

fn main() -> Result<(), AppError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);

    log::info!("Starting shader text counter demo");
    let mut app = CounterApp::new(config);
    app.run();
    log::info!("Counter demo finished");
    Ok(())
}
