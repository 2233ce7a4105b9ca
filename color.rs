//! color - Particle and connection colors

use rand::Rng;

/// 8-bit RGB with a straight (non-premultiplied) alpha in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 1.0,
        }
    }

    /// Scales every channel by `alpha` (combined with the color's own alpha),
    /// which is how translucency is blended over a black background.
    pub fn shaded(self, alpha: f32) -> (u8, u8, u8) {
        let a = (self.a * alpha).clamp(0.0, 1.0);
        let scale = |channel: u8| libm::roundf(channel as f32 * a) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Either one color for every particle or a palette each particle draws from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorSpec {
    Solid(Color),
    Palette(&'static [Color]),
}

impl ColorSpec {
    /// Resolves the color a freshly spawned particle keeps for its lifetime.
    /// An empty palette falls back to transparent black; `ParticleSystem::new`
    /// rejects empty palettes before this can happen.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        match self {
            ColorSpec::Solid(color) => *color,
            ColorSpec::Palette(colors) if colors.is_empty() => Color::rgba(0, 0, 0, 0.0),
            ColorSpec::Palette(colors) => {
                let index = libm::floorf(rng.random::<f32>() * colors.len() as f32) as usize;
                colors[index.min(colors.len() - 1)]
            }
        }
    }

    /// Stroke color for connection lines: the solid color, or the first palette entry.
    pub fn primary(&self) -> Option<Color> {
        match self {
            ColorSpec::Solid(color) => Some(*color),
            ColorSpec::Palette(colors) => colors.first().copied(),
        }
    }
}
