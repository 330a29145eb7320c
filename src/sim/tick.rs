//! Frame driver
//!
//! One call to [`Simulation::tick`] runs one discrete step, in this order:
//! 1. backdrop (trail fade or solid clear)
//! 2. spawn policy
//! 3. proximity links, drawn beneath the entities
//! 4. per entity, in population order: advance, then render
//! 5. eviction

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lifecycle::{Eviction, Population, SpawnPolicy};
use super::link::{LinkStyle, draw_links, find_links};
use super::motion::{Motion, TickContext};
use super::rng::SketchRng;
use crate::Bounds;
use crate::renderer::{Canvas, Rgba};

/// Background painted at the start of every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Backdrop {
    /// Translucent clear over the previous frame, leaving trails
    Fade(Rgba),
    /// Opaque clear
    Solid(Rgba),
}

impl Backdrop {
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        match self {
            Backdrop::Fade(color) => canvas.clear_background(*color),
            Backdrop::Solid(color) => canvas.clear_background(color.with_alpha(255.0)),
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub spawned: usize,
    pub links: usize,
    pub evicted: usize,
    /// Live entities after eviction
    pub population: usize,
}

/// Position and opacity of one live entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub position: Vec2,
    pub alpha: f32,
}

/// Object-safe face of a running sketch
pub trait Simulation: Send {
    fn name(&self) -> &str;
    /// Run one tick, drawing onto `canvas`
    fn tick(&mut self, canvas: &mut dyn Canvas) -> TickReport;
    fn population(&self) -> usize;
    /// Ticks run so far
    fn ticks(&self) -> u64;
    fn snapshot(&self) -> Vec<EntityView>;
}

/// One simulation instance: a population, its motion model and its clock
#[derive(Debug, Clone)]
pub struct Sketch<M: Motion> {
    name: String,
    params: M::Params,
    shared: M::Shared,
    population: Population<M>,
    backdrop: Backdrop,
    links: Option<LinkStyle>,
    bounds: Bounds,
    rng: SketchRng,
    tick: u64,
}

impl<M: Motion> Sketch<M> {
    /// Create a sketch and its initial population
    pub fn new(
        name: impl Into<String>,
        params: M::Params,
        spawn: SpawnPolicy,
        eviction: Eviction,
        bounds: Bounds,
        mut rng: SketchRng,
    ) -> Self {
        let population = Population::new(spawn, eviction, &params, bounds, &mut rng);
        Self::from_population(name, params, population, bounds, rng)
    }

    pub fn from_population(
        name: impl Into<String>,
        params: M::Params,
        population: Population<M>,
        bounds: Bounds,
        rng: SketchRng,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            shared: M::Shared::default(),
            population,
            backdrop: Backdrop::Solid(Rgba::WHITE),
            links: None,
            bounds,
            rng,
            tick: 0,
        }
    }

    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn with_links(mut self, links: Option<LinkStyle>) -> Self {
        self.links = links;
        self
    }

    pub fn params(&self) -> &M::Params {
        &self.params
    }

    pub fn shared(&self) -> &M::Shared {
        &self.shared
    }

    pub fn entities(&self) -> &[M] {
        self.population.entities()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Run one tick
    pub fn step(&mut self, canvas: &mut dyn Canvas) -> TickReport {
        self.backdrop.paint(canvas);

        self.tick += 1;
        let spawned = self
            .population
            .spawn(self.tick, &self.params, self.bounds, &mut self.rng);

        let links = match &self.links {
            Some(style) => {
                let positions: Vec<Vec2> = self
                    .population
                    .entities()
                    .iter()
                    .map(|e| e.position())
                    .collect();
                let links = find_links(&positions, style.threshold);
                draw_links(canvas, &positions, &links, style);
                links.len()
            }
            None => 0,
        };

        let ctx = TickContext {
            tick: self.tick,
            bounds: self.bounds,
            population: self.population.len(),
        };
        M::prepare(&self.params, &mut self.shared, &ctx);
        for entity in self.population.entities_mut() {
            *entity = entity.advance(&self.params, &self.shared, &ctx, &mut self.rng);
            entity.render(&self.params, canvas, self.bounds);
        }

        let evicted = self.population.evict(self.bounds);
        if spawned > 0 || evicted > 0 {
            log::trace!(
                "{} tick {}: +{} -{} = {}",
                self.name,
                self.tick,
                spawned,
                evicted,
                self.population.len()
            );
        }

        TickReport {
            tick: self.tick,
            spawned,
            links,
            evicted,
            population: self.population.len(),
        }
    }
}

impl<M> Simulation for Sketch<M>
where
    M: Motion + Send,
    M::Params: Send,
    M::Shared: Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, canvas: &mut dyn Canvas) -> TickReport {
        self.step(canvas)
    }

    fn population(&self) -> usize {
        self.population.len()
    }

    fn ticks(&self) -> u64 {
        self.tick
    }

    fn snapshot(&self) -> Vec<EntityView> {
        self.population
            .entities()
            .iter()
            .map(|e| EntityView {
                position: e.position(),
                alpha: e.alpha(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingCanvas};
    use crate::sim::bloom::{Bloom, BloomParams, ShapeKind};
    use crate::sim::fall::{FallParams, Faller};
    use crate::sim::jitter::{Jitter, JitterParams};
    use crate::sim::ripple::{Ripple, RippleParams};
    use crate::sim::seek::{SeekParams, Seeker};
    use proptest::prelude::*;

    #[test]
    fn test_bloom_evicted_on_the_tick_it_peaks() {
        let bloom = Bloom {
            pos: Vec2::new(200.0, 200.0),
            size: 0.0,
            max_size: 200.0,
            expansion_rate: 2.0,
            alpha: 255.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            shape: ShapeKind::Square,
        };
        let population =
            Population::from_entities(vec![bloom], SpawnPolicy::fixed(0), Eviction::Expired);
        let mut sketch = Sketch::from_population(
            "bloom",
            BloomParams::default(),
            population,
            Bounds::default(),
            SketchRng::seeded(1),
        );
        let mut canvas = RecordingCanvas::new();
        for _ in 0..99 {
            let report = sketch.step(&mut canvas);
            assert_eq!(report.population, 1);
        }
        assert_eq!(sketch.entities()[0].size, 198.0);

        canvas.clear();
        let report = sketch.step(&mut canvas);
        assert_eq!(report.tick, 100);
        assert_eq!(report.evicted, 1);
        assert_eq!(report.population, 0);
        // Rendered once more at zero alpha before leaving
        let rect_alpha = canvas.commands.iter().find_map(|c| match c {
            DrawCommand::Rect { stroke: Some(s), .. } => Some(s.a),
            _ => None,
        });
        assert_eq!(rect_alpha, Some(0.0));
    }

    #[test]
    fn test_faller_off_canvas_evicted_same_tick() {
        let bounds = Bounds::default();
        let faller = Faller {
            pos: Vec2::new(100.0, bounds.height + 1.0),
            size: Vec2::new(30.0, 30.0),
            speed: 1.0,
            acceleration: 0.02,
            alpha: 255.0,
            fade: 1.0,
            wind: 0.5,
            drift: 0.0,
        };
        let population =
            Population::from_entities(vec![faller], SpawnPolicy::fixed(0), Eviction::Expired);
        let mut sketch = Sketch::from_population(
            "rain",
            FallParams::default(),
            population,
            bounds,
            SketchRng::seeded(2),
        );
        let report = sketch.step(&mut RecordingCanvas::new());
        assert_eq!(report.evicted, 1);
        assert_eq!(report.population, 0);
    }

    #[test]
    fn test_links_drawn_after_background_before_entities() {
        let seekers = vec![
            Seeker::at(Vec2::new(10.0, 10.0)),
            Seeker::at(Vec2::new(30.0, 10.0)),
            Seeker::at(Vec2::new(300.0, 300.0)),
        ];
        let population =
            Population::from_entities(seekers, SpawnPolicy::fixed(0), Eviction::Immortal);
        let mut sketch = Sketch::from_population(
            "constellation",
            SeekParams::default(),
            population,
            Bounds::default(),
            SketchRng::seeded(3),
        )
        .with_backdrop(Backdrop::Fade(Rgba::new(0.0, 0.0, 0.0, 20.0)))
        .with_links(Some(LinkStyle::default()));

        let mut canvas = RecordingCanvas::new();
        let report = sketch.step(&mut canvas);
        assert_eq!(report.links, 1);

        let kinds: Vec<&str> = canvas
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Background { .. } => "bg",
                DrawCommand::Line { .. } => "line",
                DrawCommand::Ellipse { .. } => "ellipse",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["bg", "line", "ellipse", "ellipse", "ellipse"]);
    }

    #[test]
    fn test_tick_counter_drives_periodic_spawn() {
        let mut sketch: Sketch<Ripple> = Sketch::new(
            "ripples",
            RippleParams::default(),
            SpawnPolicy::every(7),
            Eviction::Expired,
            Bounds::default(),
            SketchRng::seeded(4),
        );
        let mut canvas = RecordingCanvas::new();
        let spawned: Vec<u64> = (0..28)
            .map(|_| sketch.step(&mut canvas))
            .filter(|r| r.spawned > 0)
            .map(|r| r.tick)
            .collect();
        assert_eq!(spawned, vec![7, 14, 21, 28]);
        assert_eq!(sketch.ticks(), 28);
    }

    #[test]
    fn test_frenzy_respects_capacity_and_franticness() {
        let params = JitterParams {
            capacity: 20,
            ..Default::default()
        };
        let mut sketch: Sketch<Jitter> = Sketch::new(
            "frenzy",
            params,
            SpawnPolicy::every(1).with_capacity(20),
            Eviction::Expired,
            Bounds::default(),
            SketchRng::seeded(5),
        );
        let mut canvas = RecordingCanvas::new();
        let mut capped = false;
        for _ in 0..200 {
            canvas.clear();
            let report = sketch.step(&mut canvas);
            assert!(report.population <= 20);
            let now = sketch.shared().0;
            if capped {
                assert_eq!(now, 10.0);
            }
            capped |= now >= 10.0;
        }
        assert!(capped);
    }

    #[test]
    fn test_frenzy_overcrowded_never_exceeds_cap() {
        let params = JitterParams {
            capacity: 50,
            ..Default::default()
        };
        let mut sketch: Sketch<Jitter> = Sketch::new(
            "frenzy",
            params,
            SpawnPolicy::every(1).with_initial(120).with_capacity(200),
            Eviction::Expired,
            Bounds::default(),
            SketchRng::seeded(6),
        );
        assert_eq!(sketch.bounds(), Bounds::default());
        let cap = sketch.params().frantic_cap;
        let mut canvas = RecordingCanvas::new();
        for _ in 0..30 {
            canvas.clear();
            let report = sketch.step(&mut canvas);
            assert!(report.population > sketch.params().capacity);
            let now = sketch.shared().0;
            assert!(now <= cap, "franticness {now} above cap {cap}");
        }
        assert_eq!(sketch.shared().0, cap);
    }

    fn run_and_check<M: Motion + Send>(mut sketch: Sketch<M>, ticks: usize)
    where
        M::Params: Send,
        M::Shared: Send,
    {
        let mut canvas = RecordingCanvas::new();
        for _ in 0..ticks {
            canvas.clear();
            sketch.step(&mut canvas);
            for cmd in &canvas.commands {
                for c in cmd.colors() {
                    assert!((0.0..=255.0).contains(&c.a));
                }
            }
            for e in sketch.snapshot() {
                assert!((0.0..=255.0).contains(&e.alpha));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn alpha_stays_in_range(seed in any::<u64>()) {
            let bounds = Bounds::default();
            run_and_check(
                Sketch::<Seeker>::new(
                    "pursuit",
                    SeekParams { alpha_from_speed: true, ..Default::default() },
                    SpawnPolicy::fixed(25),
                    Eviction::Immortal,
                    bounds,
                    SketchRng::seeded(seed),
                ),
                120,
            );
            run_and_check(
                Sketch::<Bloom>::new(
                    "blooms",
                    BloomParams::default(),
                    SpawnPolicy::every(15),
                    Eviction::Expired,
                    bounds,
                    SketchRng::seeded(seed),
                ),
                240,
            );
            run_and_check(
                Sketch::<Faller>::new(
                    "rain",
                    FallParams::default(),
                    SpawnPolicy::chance(0.05).with_initial(10),
                    Eviction::Expired,
                    bounds,
                    SketchRng::seeded(seed),
                ),
                240,
            );
        }

        #[test]
        fn decay_alpha_never_rises(seed in any::<u64>()) {
            let bounds = Bounds::default();
            let ctx = TickContext { tick: 1, bounds, population: 1 };
            let mut rng = SketchRng::seeded(seed);

            let mut bloom = Bloom::spawn(&BloomParams::default(), bounds, &mut rng);
            while !bloom.is_expired(bounds) {
                let next = bloom.advance(&BloomParams::default(), &(), &ctx, &mut rng);
                prop_assert!(next.alpha <= bloom.alpha);
                bloom = next;
            }

            let mut faller = Faller::spawn(&FallParams::default(), bounds, &mut rng);
            while !faller.is_expired(bounds) {
                let next = faller.advance(&FallParams::default(), &(), &ctx, &mut rng);
                prop_assert!(next.alpha <= faller.alpha);
                faller = next;
            }

            let mut ripple = Ripple::spawn(&RippleParams::default(), bounds, &mut rng);
            while !ripple.is_expired(bounds) {
                let next = ripple.advance(&RippleParams::default(), &(), &ctx, &mut rng);
                prop_assert!(next.alpha <= ripple.alpha);
                ripple = next;
            }
        }
    }
}
