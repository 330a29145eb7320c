//! Motion model interface
//!
//! A motion model is one entity type plus its transition rule. The rule is
//! pure: it reads the current state and returns the next one.

use glam::Vec2;

use super::rng::SketchRng;
use crate::Bounds;
use crate::renderer::Canvas;

/// What a motion model may observe about the tick being run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Tick number, starting at 1
    pub tick: u64,
    pub bounds: Bounds,
    /// Live entities at the start of the motion pass
    pub population: usize,
}

pub trait Motion: Clone + std::fmt::Debug + Sized {
    /// Per-simulation constants
    type Params: Clone + std::fmt::Debug;
    /// State shared by every entity of one population
    type Shared: Default + Clone + std::fmt::Debug;

    fn spawn(params: &Self::Params, bounds: Bounds, rng: &mut SketchRng) -> Self;

    /// Refresh shared state once per tick, before any entity advances
    fn prepare(_params: &Self::Params, _shared: &mut Self::Shared, _ctx: &TickContext) {}

    fn advance(
        &self,
        params: &Self::Params,
        shared: &Self::Shared,
        ctx: &TickContext,
        rng: &mut SketchRng,
    ) -> Self;

    fn render(&self, params: &Self::Params, canvas: &mut dyn Canvas, bounds: Bounds);

    fn position(&self) -> Vec2;

    /// Current opacity, always within `[0, 255]`
    fn alpha(&self) -> f32;

    /// Faded out or left the canvas
    fn is_expired(&self, bounds: Bounds) -> bool;
}
