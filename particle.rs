//! particle - A single particle: spawn, per-frame update, draw

use rand::Rng;

use crate::color::Color;
use crate::config::Configuration;
use crate::motion::MotionModel;
use crate::surface::{Position, Surface, Viewport};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Speed of the configuration the particle was spawned under.
    pub base_speed: f32,
    pub color: Color,
    pub radius: f32,
    // Behavior-local state
    pub angle: f32,
    pub grid_target: Option<(f32, f32)>,
}

impl Particle {
    /// Random placement inside the viewport with a velocity of at most
    /// half the base speed per axis and a radius in [1, 4).
    pub fn spawn<R: Rng + ?Sized>(config: &Configuration, viewport: Viewport, rng: &mut R) -> Self {
        let x = wrap(rng.random::<f32>() * viewport.width, viewport.width);
        let y = wrap(rng.random::<f32>() * viewport.height, viewport.height);
        let vx = (rng.random::<f32>() - 0.5) * config.base_speed;
        let vy = (rng.random::<f32>() - 0.5) * config.base_speed;
        let color = config.colors.pick(rng);
        let radius = rng.random::<f32>() * 3.0 + 1.0;

        Self {
            x,
            y,
            vx,
            vy,
            base_speed: config.base_speed,
            color,
            radius,
            angle: 0.0,
            grid_target: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        model: MotionModel,
        viewport: Viewport,
        grid_size: f32,
        rng: &mut R,
    ) {
        model.step(self, grid_size, rng);

        // Toroidal boundary
        self.x = wrap(self.x, viewport.width);
        self.y = wrap(self.y, viewport.height);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.position(), self.radius, self.color);
    }
}

/// Folds `value` into [0, extent). A non-positive extent pins it to 0.
pub fn wrap(value: f32, extent: f32) -> f32 {
    if !(extent > 0.0) {
        return 0.0;
    }
    let mut wrapped = libm::fmodf(value, extent);
    if wrapped < 0.0 {
        wrapped += extent;
    }
    // `-tiny + extent` can round up to exactly `extent`
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
