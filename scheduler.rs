//! scheduler - Frame driver for the particle system
//!
//! The host owns the clock; the scheduler only runs a frame when the clock
//! says one is due. Frames never overlap: each `tick` runs to completion.

use crate::surface::Surface;
use crate::system::ParticleSystem;

/// Display-refresh source driving the render loop.
pub trait FrameClock {
    /// Blocks (or yields) until the next frame is due. Returns `false` once
    /// the host is tearing down and no further frames will come.
    fn wait_for_frame(&mut self) -> bool;
}

pub struct Scheduler<'a, const N: usize> {
    system: &'a mut ParticleSystem<N>,
    frames: u64,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    pub fn new(system: &'a mut ParticleSystem<N>) -> Self {
        Self { system, frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn system(&self) -> &ParticleSystem<N> {
        self.system
    }

    /// Between frames, resize and mode-switch requests go through here.
    pub fn system_mut(&mut self) -> &mut ParticleSystem<N> {
        self.system
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.system.frame(surface);
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::trace!("{} frames rendered", self.frames);
        }
    }

    /// Waits on `clock` and renders one frame. Returns `false` without
    /// rendering when the clock has stopped.
    pub fn pump<C, S>(&mut self, clock: &mut C, surface: &mut S) -> bool
    where
        C: FrameClock + ?Sized,
        S: Surface + ?Sized,
    {
        if !clock.wait_for_frame() {
            return false;
        }
        self.tick(surface);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::surface::testing::{Op, RecordingSurface};
    use crate::surface::Viewport;

    /// Delivers a fixed number of frames, then reports teardown.
    struct FixedFrames(u32);

    impl FrameClock for FixedFrames {
        fn wait_for_frame(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    #[test]
    fn test_pump_runs_until_clock_stops() {
        let mut system: ParticleSystem =
            ParticleSystem::with_defaults(Viewport::new(800.0, 600.0)).unwrap();
        let mut scheduler = Scheduler::new(&mut system);
        let mut clock = FixedFrames(3);
        let mut surface = RecordingSurface::default();

        while scheduler.pump(&mut clock, &mut surface) {}

        assert_eq!(scheduler.frames(), 3);
        let clears = surface.ops.iter().filter(|op| matches!(op, Op::Clear(_))).count();
        assert_eq!(clears, 3);
        assert_eq!(surface.circles(), 300);
    }

    #[test]
    fn test_mode_switch_between_frames() {
        let mut system: ParticleSystem =
            ParticleSystem::with_defaults(Viewport::new(800.0, 600.0)).unwrap();
        let mut scheduler = Scheduler::new(&mut system);
        let mut surface = RecordingSurface::default();

        scheduler.tick(&mut surface);
        scheduler.system_mut().switch_mode(Mode::Events);
        surface.ops.clear();
        scheduler.tick(&mut surface);

        assert_eq!(scheduler.system().mode(), Mode::Events);
        assert_eq!(surface.circles(), 60);
        assert!(surface.lines().is_empty());
    }
}
