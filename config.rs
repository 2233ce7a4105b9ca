//! config - Modes, per-mode configurations, and system settings

use core::fmt;
use core::str::FromStr;

use crate::color::{Color, ColorSpec};
use crate::error::{Error, Result};
use crate::motion::MotionModel;

/// Visual state of the particle field, one per page section.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Hero,
    Education,
    Events,
    Management,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Hero, Mode::Education, Mode::Events, Mode::Management];

    /// Landmark id of the section bound to this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Hero => "hero",
            Mode::Education => "education",
            Mode::Events => "events",
            Mode::Management => "management",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Mode::Hero => 0,
            Mode::Education => 1,
            Mode::Events => 2,
            Mode::Management => 3,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or(Error::UnknownMode)
    }
}

/// Parameter bundle bound to a mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Configuration {
    pub particle_count: usize,
    pub base_speed: f32,
    pub colors: ColorSpec,
    /// Zero disables connection lines.
    pub connection_distance: f32,
    pub behavior: MotionModel,
}

impl Configuration {
    fn validate(&self, mode: Mode, capacity: usize) -> Result<()> {
        if self.particle_count > capacity {
            return Err(Error::CapacityExceeded {
                mode,
                requested: self.particle_count,
                capacity,
            });
        }
        if matches!(self.colors, ColorSpec::Palette(colors) if colors.is_empty()) {
            return Err(Error::EmptyPalette { mode });
        }
        if !self.base_speed.is_finite()
            || !self.connection_distance.is_finite()
            || self.connection_distance < 0.0
        {
            return Err(Error::InvalidConfiguration { mode });
        }
        Ok(())
    }
}

const CONFETTI_PALETTE: [Color; 3] = [
    Color::hex(0x6a1b9a), // purple
    Color::hex(0xff9800), // orange
    Color::hex(0x00e5ff), // cyan
];

/// Mode → configuration lookup, indexed by the `Mode` enum.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModeTable {
    entries: [Configuration; 4],
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            entries: [
                Configuration {
                    particle_count: 100,
                    base_speed: 0.5,
                    colors: ColorSpec::Solid(Color::rgba(255, 255, 255, 0.5)),
                    connection_distance: 150.0,
                    behavior: MotionModel::Float,
                },
                Configuration {
                    particle_count: 80,
                    base_speed: 2.0,
                    colors: ColorSpec::Solid(Color::rgba(255, 215, 0, 0.6)),
                    connection_distance: 100.0,
                    behavior: MotionModel::Circuit,
                },
                Configuration {
                    particle_count: 60,
                    base_speed: 3.0,
                    colors: ColorSpec::Palette(&CONFETTI_PALETTE),
                    connection_distance: 0.0,
                    behavior: MotionModel::Confetti,
                },
                Configuration {
                    particle_count: 100,
                    base_speed: 1.0,
                    colors: ColorSpec::Solid(Color::rgba(176, 190, 197, 0.4)),
                    connection_distance: 100.0,
                    behavior: MotionModel::GridSnap,
                },
            ],
        }
    }
}

impl ModeTable {
    pub fn get(&self, mode: Mode) -> &Configuration {
        &self.entries[mode.index()]
    }

    pub fn set(&mut self, mode: Mode, configuration: Configuration) {
        self.entries[mode.index()] = configuration;
    }

    /// Checks every entry against the batch capacity.
    pub fn validate(&self, capacity: usize) -> Result<()> {
        Mode::ALL
            .into_iter()
            .try_for_each(|mode| self.get(mode).validate(mode, capacity))
    }
}

/// System-wide tunables shared by every mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    // Responsive guard
    pub narrow_viewport_width: f32,
    pub narrow_count_factor: f32,

    // Rendering
    pub connection_line_width: f32,

    // Section observation
    pub visibility_threshold: f32,

    // Grid-snap behavior
    pub grid_size: f32,

    // RNG seed
    pub rng_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            narrow_viewport_width: 768.0,
            narrow_count_factor: 0.3,
            connection_line_width: 0.5,
            visibility_threshold: 0.3,
            grid_size: 100.0,
            rng_seed: 0x1234_5678,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>(), Ok(mode));
        }
        assert_eq!("contact".parse::<Mode>(), Err(Error::UnknownMode));
        assert_eq!("Hero".parse::<Mode>(), Err(Error::UnknownMode));
    }

    #[test]
    fn test_default_table_matches_sections() {
        let table = ModeTable::default();
        assert_eq!(table.get(Mode::Hero).particle_count, 100);
        assert_eq!(table.get(Mode::Education).particle_count, 80);
        assert_eq!(table.get(Mode::Events).connection_distance, 0.0);
        assert_eq!(table.get(Mode::Management).behavior, MotionModel::GridSnap);
        assert!(table.validate(100).is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_batch() {
        let table = ModeTable::default();
        assert_eq!(
            table.validate(64),
            Err(Error::CapacityExceeded {
                mode: Mode::Hero,
                requested: 100,
                capacity: 64,
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_palette_and_bad_distance() {
        let mut table = ModeTable::default();
        let mut events = *table.get(Mode::Events);
        events.colors = ColorSpec::Palette(&[]);
        table.set(Mode::Events, events);
        assert_eq!(table.validate(100), Err(Error::EmptyPalette { mode: Mode::Events }));

        let mut table = ModeTable::default();
        let mut hero = *table.get(Mode::Hero);
        hero.connection_distance = -1.0;
        table.set(Mode::Hero, hero);
        assert_eq!(
            table.validate(100),
            Err(Error::InvalidConfiguration { mode: Mode::Hero })
        );
    }
}
