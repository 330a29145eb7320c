//! Population ownership: spawning and eviction
//!
//! `Population` is the only owner of entity lifetime. Entities are born
//! through a [`SpawnPolicy`] and die through an [`Eviction`] rule applied as
//! a separate, stable pass after every entity has been advanced.

use serde::{Deserialize, Serialize};

use super::motion::Motion;
use super::rng::SketchRng;
use crate::Bounds;

/// Per-tick birth rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnTrigger {
    /// No births after the initial batch
    Never,
    /// One entity whenever `tick % period == 0`
    Every(u64),
    /// One entity with probability `p` per tick
    Chance(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Entities created once at construction
    pub initial: usize,
    pub trigger: SpawnTrigger,
    /// Births are suppressed at this population size
    pub capacity: Option<usize>,
}

impl SpawnPolicy {
    pub fn fixed(initial: usize) -> Self {
        Self {
            initial,
            trigger: SpawnTrigger::Never,
            capacity: None,
        }
    }

    pub fn every(period: u64) -> Self {
        Self {
            initial: 0,
            trigger: SpawnTrigger::Every(period),
            capacity: None,
        }
    }

    pub fn chance(p: f32) -> Self {
        Self {
            initial: 0,
            trigger: SpawnTrigger::Chance(p),
            capacity: None,
        }
    }

    pub fn with_initial(mut self, initial: usize) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    fn has_room(&self, len: usize) -> bool {
        self.capacity.is_none_or(|max| len < max)
    }

    /// Whether the trigger fires this tick (ignores capacity)
    pub fn fires(&self, tick: u64, rng: &mut SketchRng) -> bool {
        match self.trigger {
            SpawnTrigger::Never => false,
            SpawnTrigger::Every(period) => period > 0 && tick % period == 0,
            SpawnTrigger::Chance(p) => rng.chance(p),
        }
    }
}

/// Death rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eviction {
    /// Never removed
    Immortal,
    /// Removed once the entity reports itself expired
    Expired,
}

/// The live entities of one simulation instance
#[derive(Debug, Clone)]
pub struct Population<M> {
    entities: Vec<M>,
    policy: SpawnPolicy,
    eviction: Eviction,
}

impl<M: Motion> Population<M> {
    /// Create the population and its initial batch
    pub fn new(
        policy: SpawnPolicy,
        eviction: Eviction,
        params: &M::Params,
        bounds: Bounds,
        rng: &mut SketchRng,
    ) -> Self {
        let initial = policy
            .capacity
            .map_or(policy.initial, |max| policy.initial.min(max));
        let entities = (0..initial).map(|_| M::spawn(params, bounds, rng)).collect();
        Self {
            entities,
            policy,
            eviction,
        }
    }

    /// Population from explicit entities (no initial batch)
    pub fn from_entities(entities: Vec<M>, policy: SpawnPolicy, eviction: Eviction) -> Self {
        Self {
            entities,
            policy,
            eviction,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn policy(&self) -> &SpawnPolicy {
        &self.policy
    }

    pub fn entities(&self) -> &[M] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [M] {
        &mut self.entities
    }

    /// Apply the spawn policy for `tick`; returns how many were born
    pub fn spawn(
        &mut self,
        tick: u64,
        params: &M::Params,
        bounds: Bounds,
        rng: &mut SketchRng,
    ) -> usize {
        if !self.policy.has_room(self.entities.len()) || !self.policy.fires(tick, rng) {
            return 0;
        }
        self.entities.push(M::spawn(params, bounds, rng));
        1
    }

    /// Apply the eviction rule; returns how many were removed
    pub fn evict(&mut self, bounds: Bounds) -> usize {
        match self.eviction {
            Eviction::Immortal => 0,
            Eviction::Expired => {
                let before = self.entities.len();
                self.entities.retain(|e| !e.is_expired(bounds));
                before - self.entities.len()
            }
        }
    }
}
