//! section-particles - Mode-driven animated particle field
//!
//! The field switches behavior as page sections scroll into view: a calm
//! drift for the hero section, circuit-board traces for education, confetti
//! for events and a snapping grid for management. No heap allocation; the
//! library is `no_std` and hands drawing off to a caller-supplied `Surface`.

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod config;
pub mod error;
pub mod motion;
pub mod observer;
pub mod particle;
pub mod scheduler;
pub mod surface;
pub mod system;

pub use color::{Color, ColorSpec};
pub use config::{Configuration, Mode, ModeTable, Settings};
pub use error::{Error, Result};
pub use motion::MotionModel;
pub use observer::{Intersection, Landmark, PageLayout, SectionModeObserver};
pub use particle::Particle;
pub use scheduler::{FrameClock, Scheduler};
pub use surface::{Position, Stroke, Surface, Viewport};
pub use system::{connection_alpha, ParticleSystem, DEFAULT_CAPACITY};

#[cfg(feature = "embedded-graphics")]
pub use surface::DisplaySurface;
