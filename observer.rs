//! observer - Section visibility tracking that drives mode switches

use heapless::Vec;

use crate::config::Mode;
use crate::system::ParticleSystem;

/// Most landmarks a page layout can hold.
pub const MAX_LANDMARKS: usize = 8;

/// Visibility report for one landmark: the fraction of its area inside the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection<'a> {
    pub id: &'a str,
    pub ratio: f32,
}

/// A page section, laid out vertically in page coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Landmark {
    pub id: &'static str,
    pub top: f32,
    pub height: f32,
}

/// Vertical stack of page sections.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    landmarks: Vec<Landmark, MAX_LANDMARKS>,
}

impl PageLayout {
    /// Sections of equal height stacked top to bottom. Ids beyond
    /// `MAX_LANDMARKS` are dropped.
    pub fn stacked(ids: &[&'static str], section_height: f32) -> Self {
        let mut layout = Self::default();
        for (i, &id) in ids.iter().take(MAX_LANDMARKS).enumerate() {
            let _ = layout.landmarks.push(Landmark {
                id,
                top: i as f32 * section_height,
                height: section_height,
            });
        }
        layout
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn height(&self) -> f32 {
        self.landmarks
            .iter()
            .map(|l| l.top + l.height)
            .fold(0.0, f32::max)
    }

    /// Largest scroll offset that still keeps the viewport on the page.
    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.height() - viewport_height).max(0.0)
    }

    /// Scroll offset that brings the top of section `id` to the top of the viewport.
    pub fn anchor(&self, id: &str) -> Option<f32> {
        self.landmarks.iter().find(|l| l.id == id).map(|l| l.top)
    }

    /// Visible fraction of every landmark for a viewport scrolled to `scroll_top`.
    pub fn intersections(
        &self,
        scroll_top: f32,
        viewport_height: f32,
    ) -> Vec<Intersection<'static>, MAX_LANDMARKS> {
        let bottom = scroll_top + viewport_height;
        self.landmarks
            .iter()
            .map(|l| {
                let overlap = (bottom.min(l.top + l.height) - scroll_top.max(l.top)).max(0.0);
                let ratio = if l.height > 0.0 { overlap / l.height } else { 0.0 };
                Intersection { id: l.id, ratio }
            })
            .collect()
    }
}

/// Watches the four mode landmarks and requests a switch when one of them
/// crosses into view.
///
/// Only crossings count: a landmark that stays visible does not fire again
/// until it has dropped below the threshold. When several landmarks cross in
/// one notification, the most visible wins and equal ratios go to the later
/// entry. Landmarks that lost stay tracked as visible; once the active
/// landmark drops out, the most visible of them takes over.
#[derive(Clone, Debug)]
pub struct SectionModeObserver {
    threshold: f32,
    visible: [bool; 4],
    ratios: [f32; 4],
    active: Option<Mode>,
}

impl SectionModeObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            visible: [false; 4],
            ratios: [0.0; 4],
            active: None,
        }
    }

    /// Folds a batch of visibility reports into the tracked state and returns
    /// the mode to switch to, if any.
    pub fn observe(&mut self, entries: &[Intersection<'_>]) -> Option<Mode> {
        let mut chosen: Option<(Mode, f32)> = None;

        for entry in entries {
            let Ok(mode) = entry.id.parse::<Mode>() else {
                continue;
            };
            let now = entry.ratio >= self.threshold;
            let was = core::mem::replace(&mut self.visible[mode.index()], now);
            self.ratios[mode.index()] = entry.ratio;
            if !now || was {
                continue;
            }

            log::trace!("landmark {} crossed in at {:.2}", entry.id, entry.ratio);
            match chosen {
                Some((previous, best)) if entry.ratio < best => {
                    log::trace!("{} outranks {}", previous, mode);
                }
                Some((previous, best)) if entry.ratio == best => {
                    log::debug!("{} and {} tied at {:.2}, taking {}", previous, mode, best, mode);
                    chosen = Some((mode, entry.ratio));
                }
                _ => chosen = Some((mode, entry.ratio)),
            }
        }

        let next = match chosen {
            Some((mode, _)) => Some(mode),
            None => self.fallback(),
        };
        if next.is_some() {
            self.active = next;
        }
        next
    }

    /// Most visible landmark still in view, once the active one has left.
    fn fallback(&self) -> Option<Mode> {
        let active = self.active?;
        if self.visible[active.index()] {
            return None;
        }
        let mut best: Option<(Mode, f32)> = None;
        for mode in Mode::ALL {
            let ratio = self.ratios[mode.index()];
            if self.visible[mode.index()] && best.map_or(true, |(_, b)| ratio >= b) {
                best = Some((mode, ratio));
            }
        }
        if let Some((mode, _)) = best {
            log::trace!("{} left view, falling back to {}", active, mode);
        }
        best.map(|(mode, _)| mode)
    }

    /// `observe`, then forward the chosen mode to the particle system.
    /// Returns whether the system actually changed mode.
    pub fn notify<const N: usize>(
        &mut self,
        entries: &[Intersection<'_>],
        system: &mut ParticleSystem<N>,
    ) -> bool {
        match self.observe(entries) {
            Some(mode) => system.switch_mode(mode),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Viewport;

    const PAGE: [&str; 5] = ["hero", "education", "events", "management", "contact"];

    fn entry(id: &str, ratio: f32) -> Intersection<'_> {
        Intersection { id, ratio }
    }

    #[test]
    fn test_layout_ratios() {
        let layout = PageLayout::stacked(&PAGE, 800.0);
        assert_eq!(layout.height(), 4000.0);
        assert_eq!(layout.max_scroll(800.0), 3200.0);
        assert_eq!(layout.anchor("events"), Some(1600.0));
        assert_eq!(layout.anchor("missing"), None);

        let ratios = layout.intersections(400.0, 800.0);
        assert_eq!(ratios[0], entry("hero", 0.5));
        assert_eq!(ratios[1], entry("education", 0.5));
        assert_eq!(ratios[2], entry("events", 0.0));
    }

    #[test]
    fn test_threshold_and_unknown_ids() {
        let mut observer = SectionModeObserver::new(0.3);
        assert_eq!(observer.observe(&[entry("education", 0.29)]), None);
        assert_eq!(observer.observe(&[entry("contact", 1.0)]), None);
        assert_eq!(observer.observe(&[entry("education", 0.3)]), Some(Mode::Education));
    }

    #[test]
    fn test_only_crossings_fire() {
        let mut observer = SectionModeObserver::new(0.3);
        assert_eq!(observer.observe(&[entry("hero", 1.0)]), Some(Mode::Hero));
        assert_eq!(observer.observe(&[entry("hero", 0.9)]), None);
        assert_eq!(observer.observe(&[entry("hero", 0.1)]), None);
        assert_eq!(observer.observe(&[entry("hero", 0.5)]), Some(Mode::Hero));
    }

    #[test]
    fn test_simultaneous_crossings_prefer_most_visible() {
        let mut observer = SectionModeObserver::new(0.3);
        let chosen = observer.observe(&[entry("education", 0.7), entry("events", 0.4)]);
        assert_eq!(chosen, Some(Mode::Education));

        let mut observer = SectionModeObserver::new(0.3);
        let chosen = observer.observe(&[entry("events", 0.5), entry("management", 0.5)]);
        assert_eq!(chosen, Some(Mode::Management));
    }

    #[test]
    fn test_losing_landmark_takes_over_when_winner_leaves() {
        let layout = PageLayout::stacked(&PAGE, 800.0);
        let mut observer = SectionModeObserver::new(0.3);

        assert_eq!(observer.observe(&layout.intersections(0.0, 800.0)), Some(Mode::Hero));
        // Education 0.7 and events 0.3 cross together; education wins.
        assert_eq!(observer.observe(&layout.intersections(1040.0, 800.0)), Some(Mode::Education));
        // Education scrolls away while events stays in view.
        assert_eq!(observer.observe(&layout.intersections(1600.0, 800.0)), Some(Mode::Events));
        // Nothing new while events stays put.
        assert_eq!(observer.observe(&layout.intersections(1610.0, 800.0)), None);
    }

    #[test]
    fn test_notify_switches_system() {
        let layout = PageLayout::stacked(&PAGE, 800.0);
        let mut system: ParticleSystem =
            ParticleSystem::with_defaults(Viewport::new(1200.0, 800.0)).unwrap();
        let mut observer = SectionModeObserver::new(0.3);

        // Initial callback: hero already current, nothing to rebuild.
        assert!(!observer.notify(&layout.intersections(0.0, 800.0), &mut system));
        assert_eq!(system.mode(), Mode::Hero);

        // Education three quarters visible, events only a quarter.
        assert!(observer.notify(&layout.intersections(1000.0, 800.0), &mut system));
        assert_eq!(system.mode(), Mode::Education);
        assert_eq!(system.particles().len(), 80);

        // Jump to the management anchor.
        let top = layout.anchor("management").unwrap();
        assert!(observer.notify(&layout.intersections(top, 800.0), &mut system));
        assert_eq!(system.mode(), Mode::Management);
    }
}
