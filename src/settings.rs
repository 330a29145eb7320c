//! Sketch settings
//!
//! Every sketch is configured by a [`SketchConfig`]: its motion parameters,
//! spawn and eviction policies, backdrop and optional proximity links.
//! Settings load from JSON; missing top-level sections keep their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::Bounds;
use crate::renderer::Rgba;
use crate::sim::{
    Backdrop, BloomParams, Eviction, FallParams, JitterParams, LinkStyle, RippleParams,
    SeekParams, SpawnPolicy, SpawnTrigger, TrailStyle,
};

/// Errors that can occur while loading settings.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read the settings file.
    Io(std::io::Error),
    /// The file is not valid settings JSON.
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range.
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "Invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Configuration of one sketch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchConfig<P> {
    #[serde(default)]
    pub params: P,
    pub spawn: SpawnPolicy,
    pub eviction: Eviction,
    pub backdrop: Backdrop,
    #[serde(default)]
    pub links: Option<LinkStyle>,
}

impl<P> SketchConfig<P> {
    fn validate(&self, name: &str) -> Result<(), SettingsError> {
        match self.spawn.trigger {
            SpawnTrigger::Every(0) => {
                return Err(SettingsError::Invalid(format!("{name}: spawn period must be > 0")));
            }
            SpawnTrigger::Chance(p) if !(0.0..=1.0).contains(&p) => {
                return Err(SettingsError::Invalid(format!(
                    "{name}: spawn chance {p} outside [0, 1]"
                )));
            }
            _ => {}
        }
        if self.spawn.capacity == Some(0) {
            return Err(SettingsError::Invalid(format!("{name}: capacity must be > 0")));
        }
        if let Some(links) = &self.links {
            if links.threshold <= 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "{name}: link threshold must be > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for the whole gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas: Bounds,
    /// Seed for every sketch's RNG; entropy when absent
    pub seed: Option<u64>,
    pub pursuit: SketchConfig<SeekParams>,
    pub ripples: SketchConfig<RippleParams>,
    pub blooms: SketchConfig<BloomParams>,
    pub frenzy: SketchConfig<JitterParams>,
    pub rain: SketchConfig<FallParams>,
    pub constellation: SketchConfig<SeekParams>,
}

impl Default for Settings {
    fn default() -> Self {
        let dusk = Backdrop::Fade(Rgba::new(0.0, 0.0, 0.0, 20.0));
        let frenzy = JitterParams::default();
        let capacity = frenzy.capacity;

        Self {
            canvas: Bounds::default(),
            seed: None,
            pursuit: SketchConfig {
                params: SeekParams {
                    alpha_from_speed: true,
                    trail: Some(TrailStyle::default()),
                    body: Rgba::new(255.0, 255.0, 255.0, 0.0),
                    ..Default::default()
                },
                spawn: SpawnPolicy::fixed(25),
                eviction: Eviction::Immortal,
                backdrop: dusk,
                links: None,
            },
            ripples: SketchConfig {
                params: RippleParams::default(),
                spawn: SpawnPolicy::every(7),
                eviction: Eviction::Expired,
                backdrop: Backdrop::Fade(Rgba::new(255.0, 255.0, 255.0, 20.0)),
                links: None,
            },
            blooms: SketchConfig {
                params: BloomParams::default(),
                spawn: SpawnPolicy::every(15),
                eviction: Eviction::Expired,
                backdrop: Backdrop::Fade(Rgba::new(255.0, 255.0, 0.0, 25.0)),
                links: None,
            },
            frenzy: SketchConfig {
                params: frenzy,
                spawn: SpawnPolicy::every(1).with_capacity(capacity),
                eviction: Eviction::Expired,
                backdrop: Backdrop::Solid(Rgba::WHITE),
                links: None,
            },
            rain: SketchConfig {
                params: FallParams::default(),
                spawn: SpawnPolicy::chance(0.05).with_initial(10),
                eviction: Eviction::Expired,
                backdrop: Backdrop::Solid(Rgba::opaque(255.0, 190.0, 200.0)),
                links: None,
            },
            constellation: SketchConfig {
                params: SeekParams::default(),
                spawn: SpawnPolicy::fixed(25),
                eviction: Eviction::Immortal,
                backdrop: dusk,
                links: Some(LinkStyle::default()),
            },
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "canvas must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        let frenzy = &self.frenzy.params;
        if frenzy.capacity == 0 {
            return Err(SettingsError::Invalid("frenzy: capacity must be > 0".into()));
        }
        if let Some(spawn_cap) = self.frenzy.spawn.capacity
            && spawn_cap != frenzy.capacity
        {
            return Err(SettingsError::Invalid(format!(
                "frenzy: spawn capacity {spawn_cap} differs from params capacity {}",
                frenzy.capacity
            )));
        }
        let (lo, hi) = self.blooms.params.max_size_factor;
        if !(lo > 0.0 && hi >= lo) {
            return Err(SettingsError::Invalid(format!(
                "blooms: max_size_factor must satisfy 0 < min <= max, got ({lo}, {hi})"
            )));
        }
        self.pursuit.validate("pursuit")?;
        self.ripples.validate("ripples")?;
        self.blooms.validate("blooms")?;
        self.frenzy.validate("frenzy")?;
        self.rain.validate("rain")?;
        self.constellation.validate("constellation")?;
        Ok(())
    }
}
