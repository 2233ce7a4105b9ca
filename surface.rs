//! surface - Render target abstraction and geometry shared with the host

use crate::color::Color;

/// Logical viewport size in device-independent units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// Line styling for connection strokes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Global alpha applied on top of the color's own alpha.
    pub alpha: f32,
    pub width: f32,
}

/// The 2D drawing context the particle field renders into.
///
/// Borrowed mutably for the duration of one frame; the system never keeps it.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    fn fill_circle(&mut self, center: Position, radius: f32, color: Color);
    fn stroke_line(&mut self, from: Position, to: Position, stroke: Stroke);
}

#[cfg(feature = "embedded-graphics")]
pub use display::DisplaySurface;

#[cfg(feature = "embedded-graphics")]
mod display {
    use core::convert::Infallible;

    use embedded_graphics::{
        pixelcolor::{Rgb565, Rgb888},
        prelude::*,
        primitives::{Circle, Line, PrimitiveStyle},
    };

    use super::{Position, Stroke, Surface, Viewport};
    use crate::color::Color;
    use crate::error::{Error, Result};

    /// `Surface` over any infallible RGB565 embedded-graphics target.
    ///
    /// Translucency is blended against the black background by scaling channels.
    pub struct DisplaySurface<D> {
        target: D,
        background: Rgb565,
    }

    impl<D> DisplaySurface<D>
    where
        D: DrawTarget<Color = Rgb565, Error = Infallible>,
    {
        pub fn new(target: D) -> Result<Self> {
            let size = target.bounding_box().size;
            if size.width == 0 || size.height == 0 {
                return Err(Error::MissingSurface);
            }
            Ok(Self {
                target,
                background: Rgb565::BLACK,
            })
        }

        pub fn target(&self) -> &D {
            &self.target
        }

        pub fn into_inner(self) -> D {
            self.target
        }

        fn to_point(position: Position) -> Point {
            Point::new(
                libm::roundf(position.x) as i32,
                libm::roundf(position.y) as i32,
            )
        }

        fn to_rgb565(color: Color, alpha: f32) -> Rgb565 {
            let (r, g, b) = color.shaded(alpha);
            Rgb888::new(r, g, b).into()
        }
    }

    impl<D> Surface for DisplaySurface<D>
    where
        D: DrawTarget<Color = Rgb565, Error = Infallible>,
    {
        fn clear(&mut self, _viewport: Viewport) {
            // Whole target, so particles left outside a shrunken viewport vanish too.
            self.target
                .clear(self.background)
                .unwrap_or_else(|never| match never {});
        }

        fn fill_circle(&mut self, center: Position, radius: f32, color: Color) {
            let diameter = (libm::roundf(radius * 2.0) as u32).max(1);
            Circle::with_center(Self::to_point(center), diameter)
                .into_styled(PrimitiveStyle::with_fill(Self::to_rgb565(color, 1.0)))
                .draw(&mut self.target)
                .unwrap_or_else(|never| match never {});
        }

        fn stroke_line(&mut self, from: Position, to: Position, stroke: Stroke) {
            // Sub-pixel widths still cover one pixel.
            let width = (libm::roundf(stroke.width) as u32).max(1);
            Line::new(Self::to_point(from), Self::to_point(to))
                .into_styled(PrimitiveStyle::with_stroke(
                    Self::to_rgb565(stroke.color, stroke.alpha),
                    width,
                ))
                .draw(&mut self.target)
                .unwrap_or_else(|never| match never {});
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(a.distance(a), 0.0);
    }

    #[cfg(all(feature = "embedded-graphics", feature = "embedded-graphics-simulator"))]
    #[test]
    fn test_display_surface_draws_and_rejects_empty_target() {
        use embedded_graphics::{mock_display::MockDisplay, pixelcolor::Rgb565, prelude::Size};
        use embedded_graphics_simulator::SimulatorDisplay;

        let empty: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(0, 0));
        assert!(matches!(
            DisplaySurface::new(empty),
            Err(crate::error::Error::MissingSurface)
        ));

        let mut mock: MockDisplay<Rgb565> = MockDisplay::new();
        mock.set_allow_overdraw(true);
        let mut surface = DisplaySurface::new(mock).unwrap();
        surface.fill_circle(Position::new(10.0, 10.0), 2.0, Color::hex(0xffffff));
        let display = surface.into_inner();
        assert!(display.affected_area().size.width > 0);
    }
}
