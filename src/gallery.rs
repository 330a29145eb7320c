//! The six reference sketches
//!
//! | Kind | Motion | Spawn | Eviction |
//! |------|--------|-------|----------|
//! | Pursuit | seek, speed-driven alpha, edge trails | 25 up front | immortal |
//! | Ripples | growth + linear fade | every 7 ticks | alpha ≤ 0 |
//! | Blooms | bounded expansion + rotation | every 15 ticks | alpha ≤ 0 |
//! | Frenzy | population-scaled jitter | every tick, cap 500 | off canvas |
//! | Rain | ballistic fall under wind | 10 up front + 5% per tick | alpha ≤ 0 or off canvas |
//! | Constellation | seek + proximity links | 25 up front | immortal |

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::settings::{Settings, SketchConfig};
use crate::sim::{Bloom, Faller, Jitter, Motion, Ripple, Seeker, Simulation, Sketch, SketchRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SketchKind {
    Pursuit,
    Ripples,
    Blooms,
    Frenzy,
    Rain,
    Constellation,
}

impl SketchKind {
    pub const ALL: [SketchKind; 6] = [
        SketchKind::Pursuit,
        SketchKind::Ripples,
        SketchKind::Blooms,
        SketchKind::Frenzy,
        SketchKind::Rain,
        SketchKind::Constellation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SketchKind::Pursuit => "pursuit",
            SketchKind::Ripples => "ripples",
            SketchKind::Blooms => "blooms",
            SketchKind::Frenzy => "frenzy",
            SketchKind::Rain => "rain",
            SketchKind::Constellation => "constellation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    fn index(&self) -> u64 {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0) as u64
    }

    /// Build a running instance of this sketch
    pub fn build(&self, settings: &Settings) -> Box<dyn Simulation> {
        let rng = match settings.seed {
            Some(seed) => SketchRng::seeded(seed.wrapping_add(self.index())),
            None => SketchRng::from_entropy(),
        };
        let bounds = settings.canvas;
        let name = self.as_str();
        match self {
            SketchKind::Pursuit => assemble::<Seeker>(name, &settings.pursuit, bounds, rng),
            SketchKind::Ripples => assemble::<Ripple>(name, &settings.ripples, bounds, rng),
            SketchKind::Blooms => assemble::<Bloom>(name, &settings.blooms, bounds, rng),
            SketchKind::Frenzy => assemble::<Jitter>(name, &settings.frenzy, bounds, rng),
            SketchKind::Rain => assemble::<Faller>(name, &settings.rain, bounds, rng),
            SketchKind::Constellation => {
                assemble::<Seeker>(name, &settings.constellation, bounds, rng)
            }
        }
    }
}

fn assemble<M>(
    name: &str,
    config: &SketchConfig<M::Params>,
    bounds: Bounds,
    rng: SketchRng,
) -> Box<dyn Simulation>
where
    M: Motion + Send + 'static,
    M::Params: Send + 'static,
    M::Shared: Send + 'static,
{
    let sketch = Sketch::<M>::new(
        name,
        config.params.clone(),
        config.spawn,
        config.eviction,
        bounds,
        rng,
    )
    .with_backdrop(config.backdrop)
    .with_links(config.links);
    log::debug!("{} ready with {} entities", name, sketch.entities().len());
    Box::new(sketch)
}
