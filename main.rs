//! main.rs - Desktop simulator for the section-driven particle field
//! Handles window, page scrolling, and frame pacing

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};

use section_particles::{
    DisplaySurface, FrameClock, Mode, PageLayout, ParticleSystem, Scheduler,
    SectionModeObserver, Settings, ModeTable, Viewport,
};

/// Width used when the narrow-viewport toggle is on.
const NARROW_WIDTH: f32 = 400.0;
const SCROLL_STEP: f32 = 40.0;
const PAGE_SECTIONS: [&str; 5] = ["hero", "education", "events", "management", "contact"];

#[derive(Parser, Debug)]
#[command(name = "section-particles", version, about = "Section-driven particle field simulator")]
struct Cli {
    /// Viewport width in logical pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Viewport height in logical pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Window pixel scale
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for particle placement and motion
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Sleeps out the remainder of each frame; stops once the window closes.
struct PacedClock {
    frame: Duration,
    last: Instant,
    running: bool,
}

impl PacedClock {
    fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f32(1.0 / fps.max(1) as f32),
            last: Instant::now(),
            running: true,
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

impl FrameClock for PacedClock {
    fn wait_for_frame(&mut self) -> bool {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.last = Instant::now();
        self.running
    }
}

/// Scroll position over the virtual page.
struct Page {
    layout: PageLayout,
    scroll_top: f32,
}

impl Page {
    fn scroll_to(&mut self, offset: f32, viewport: Viewport) {
        self.scroll_top = offset.clamp(0.0, self.layout.max_scroll(viewport.height));
    }

    fn scroll_by(&mut self, delta: f32, viewport: Viewport) {
        self.scroll_to(self.scroll_top + delta, viewport);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }

    let mut settings = Settings::default();
    if let Some(seed) = cli.seed {
        settings.rng_seed = seed;
    }

    let full = Viewport::new(cli.width as f32, cli.height as f32);
    let mut viewport = full;

    let display = SimulatorDisplay::<Rgb565>::new(Size::new(cli.width, cli.height));
    let mut surface = DisplaySurface::new(display).context("cannot bind the particle canvas")?;
    let output_settings = OutputSettingsBuilder::new().scale(cli.scale.max(1)).build();
    let mut window = Window::new("Section Particles", &output_settings);

    let mut system: ParticleSystem = ParticleSystem::new(settings, ModeTable::default(), viewport)
        .context("invalid particle configuration")?;

    let mut page = Page {
        layout: PageLayout::stacked(&PAGE_SECTIONS, full.height),
        scroll_top: 0.0,
    };
    for landmark in page.layout.landmarks() {
        log::debug!("section {} at {}..{}", landmark.id, landmark.top, landmark.top + landmark.height);
    }

    // Initial visibility callback, before the first frame.
    let mut observer = SectionModeObserver::new(settings.visibility_threshold);
    observer.notify(&page.layout.intersections(page.scroll_top, viewport.height), &mut system);

    let mut scheduler = Scheduler::new(&mut system);
    let mut clock = PacedClock::new(cli.fps);

    log::info!("Up/Down: scroll | PgUp/PgDn: page | 1-4: jump to section | N: narrow viewport | Q: quit");

    while scheduler.pump(&mut clock, &mut surface) {
        window.update(surface.target());

        let mut scrolled = false;
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => clock.stop(),
                SimulatorEvent::KeyDown { keycode, .. } => {
                    let key = format!("{:?}", keycode).to_lowercase();
                    match key.as_str() {
                        "up" => {
                            page.scroll_by(-SCROLL_STEP, viewport);
                            scrolled = true;
                        }
                        "down" => {
                            page.scroll_by(SCROLL_STEP, viewport);
                            scrolled = true;
                        }
                        "pageup" => {
                            page.scroll_by(-viewport.height, viewport);
                            scrolled = true;
                        }
                        "pagedown" => {
                            page.scroll_by(viewport.height, viewport);
                            scrolled = true;
                        }
                        "num1" | "num2" | "num3" | "num4" => {
                            let index = key.as_bytes()[3] - b'1';
                            let mode = Mode::ALL[index as usize];
                            if let Some(top) = page.layout.anchor(mode.as_str()) {
                                page.scroll_to(top, viewport);
                                scrolled = true;
                            }
                        }
                        "n" => {
                            viewport = if viewport.width < full.width {
                                full
                            } else {
                                Viewport::new(NARROW_WIDTH.min(full.width), full.height)
                            };
                            scheduler.system_mut().resize(viewport);
                        }
                        "q" => clock.stop(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if scrolled {
            let entries = page.layout.intersections(page.scroll_top, viewport.height);
            observer.notify(&entries, scheduler.system_mut());
        }
    }

    log::info!(
        "rendered {} frames, last mode {}",
        scheduler.frames(),
        scheduler.system().mode()
    );
    Ok(())
}
