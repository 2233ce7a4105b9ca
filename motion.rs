//! motion - Per-mode update rules
//!
//! Each rule only moves the particle; wrapping into the viewport happens
//! afterwards in `Particle::update`.

use rand::Rng;

use crate::particle::Particle;

/// Chance per frame that a circuit particle makes a right-angle turn.
pub const CIRCUIT_TURN_CHANCE: f32 = 0.05;
/// Angle advanced per frame by confetti particles.
pub const CONFETTI_SPIN: f32 = 0.1;
pub const CONFETTI_SWIRL_RADIUS: f32 = 2.0;
/// Fraction of the remaining distance to its grid point a particle covers per frame.
pub const GRID_PULL: f32 = 0.05;
pub const GRID_ARRIVAL: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionModel {
    /// Linear drift at constant velocity.
    Float,
    /// Straight runs broken by random axis-aligned turns.
    Circuit,
    /// Swirl around a slowly drifting center.
    Confetti,
    /// Drift toward and hop between points of a square grid.
    GridSnap,
}

impl MotionModel {
    pub fn step<R: Rng + ?Sized>(self, p: &mut Particle, grid_size: f32, rng: &mut R) {
        match self {
            MotionModel::Float => {
                p.x += p.vx;
                p.y += p.vy;
            }
            MotionModel::Circuit => {
                if rng.random::<f32>() < CIRCUIT_TURN_CHANCE {
                    let vertical = rng.random::<f32>() < 0.5;
                    let speed = (rng.random::<f32>() - 0.5) * p.base_speed * 2.0;
                    if vertical {
                        p.vx = 0.0;
                        p.vy = speed;
                    } else {
                        p.vy = 0.0;
                        p.vx = speed;
                    }
                }
                p.x += p.vx;
                p.y += p.vy;
            }
            MotionModel::Confetti => {
                // Kept within one turn so the f32 step never rounds away.
                p.angle = libm::fmodf(p.angle + CONFETTI_SPIN, core::f32::consts::TAU);
                p.x += libm::cosf(p.angle) * CONFETTI_SWIRL_RADIUS + p.vx;
                p.y += libm::sinf(p.angle) * CONFETTI_SWIRL_RADIUS + p.vy;
            }
            MotionModel::GridSnap => {
                let snap = |v: f32| libm::roundf(v / grid_size) * grid_size;
                let (mut tx, mut ty) = match p.grid_target {
                    Some(target) => target,
                    None => (snap(p.x), snap(p.y)),
                };

                // Arrived on the previous frame: hop to a neighbouring grid point.
                if libm::fabsf(p.x - tx) < GRID_ARRIVAL && libm::fabsf(p.y - ty) < GRID_ARRIVAL {
                    let step = if rng.random::<f32>() < 0.5 { grid_size } else { -grid_size };
                    if rng.random::<f32>() < 0.5 {
                        tx += step;
                    } else {
                        ty += step;
                    }
                }
                p.grid_target = Some((tx, ty));

                p.x += (tx - p.x) * GRID_PULL + (rng.random::<f32>() - 0.5);
                p.y += (ty - p.y) * GRID_PULL + (rng.random::<f32>() - 0.5);
            }
        }
    }
}
