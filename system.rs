//! system - The particle field: batch lifecycle, render frame, connections

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::color::ColorSpec;
use crate::config::{Configuration, Mode, ModeTable, Settings};
use crate::error::Result;
use crate::particle::Particle;
use crate::surface::{Stroke, Surface, Viewport};

/// Default batch capacity; the largest stock configuration asks for 100.
pub const DEFAULT_CAPACITY: usize = 100;

/// Opacity of a connection line between two particles `distance` apart, or
/// `None` when they are too far apart to be connected.
pub fn connection_alpha(distance: f32, max_distance: f32) -> Option<f32> {
    if distance < max_distance {
        Some(1.0 - distance / max_distance)
    } else {
        None
    }
}

/// Owns the live particle batch for the current mode.
///
/// The batch is stored inline with room for `N` particles; every configuration
/// in the mode table is checked against `N` when the system is built.
pub struct ParticleSystem<const N: usize = DEFAULT_CAPACITY> {
    particles: Vec<Particle, N>,
    mode: Mode,
    viewport: Viewport,
    table: ModeTable,
    settings: Settings,
    rng: SmallRng,
    // Bumped on every rebuild so callers can tell batches apart.
    generation: u32,
}

impl<const N: usize> ParticleSystem<N> {
    /// Builds the system in hero mode and spawns the first batch.
    pub fn new(settings: Settings, table: ModeTable, viewport: Viewport) -> Result<Self> {
        table.validate(N)?;

        let mut system = Self {
            particles: Vec::new(),
            mode: Mode::Hero,
            viewport,
            table,
            settings,
            rng: SmallRng::seed_from_u64(settings.rng_seed),
            generation: 0,
        };
        system.init();
        Ok(system)
    }

    pub fn with_defaults(viewport: Viewport) -> Result<Self> {
        Self::new(Settings::default(), ModeTable::default(), viewport)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn configuration(&self) -> &Configuration {
        self.table.get(self.mode)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Takes on new viewport dimensions. Existing particles are not moved;
    /// the wrap rule folds stragglers back in on their next update.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "resize {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    /// Number of particles a batch gets under the active configuration.
    pub fn target_count(&self) -> usize {
        let count = self.configuration().particle_count;
        let count = if self.viewport.width < self.settings.narrow_viewport_width {
            libm::floorf(count as f32 * self.settings.narrow_count_factor) as usize
        } else {
            count
        };
        count.min(N)
    }

    /// Discards the current batch and spawns a fresh one.
    pub fn init(&mut self) {
        let count = self.target_count();
        let config = *self.table.get(self.mode);

        self.particles.clear();
        for _ in 0..count {
            let particle = Particle::spawn(&config, self.viewport, &mut self.rng);
            // PERF: capacity is validated up front, a full batch just stops spawning
            if self.particles.push(particle).is_err() {
                break;
            }
        }
        self.generation = self.generation.wrapping_add(1);

        log::debug!(
            "spawned {} particles for {} (generation {})",
            self.particles.len(),
            self.mode,
            self.generation
        );
    }

    /// Hard cut to `mode`. Returns `false` when already in that mode.
    pub fn switch_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("switching particle mode to: {}", mode);
        self.mode = mode;
        self.init();
        true
    }

    /// One render frame: clear, update and draw every particle, then connect.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.viewport);

        let config = *self.table.get(self.mode);
        let viewport = self.viewport;
        let grid_size = self.settings.grid_size;

        for particle in self.particles.iter_mut() {
            particle.update(config.behavior, viewport, grid_size, &mut self.rng);
            particle.draw(surface);
        }

        if config.connection_distance > 0.0 {
            self.draw_connections(surface, config.connection_distance, config.colors);
        }
    }

    /// Strokes a line between every pair closer than `max_distance`, fading
    /// linearly from opaque at contact to transparent at the threshold.
    pub fn draw_connections<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        max_distance: f32,
        colors: ColorSpec,
    ) {
        let Some(color) = colors.primary() else {
            return;
        };

        // PERF: O(N^2), bounded by the batch capacity
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position().distance(b.position());
                if let Some(alpha) = connection_alpha(distance, max_distance) {
                    surface.stroke_line(
                        a.position(),
                        b.position(),
                        Stroke {
                            color,
                            alpha,
                            width: self.settings.connection_line_width,
                        },
                    );
                }
            }
        }
    }
}
