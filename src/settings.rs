//! Simulation tuning
//!
//! Every gameplay constant that is not a fixed collision radius lives here.
//! Loaded from an optional JSON file; any missing field falls back to its
//! default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SettingsError};

/// How firing is rate-limited
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
pub enum FirePolicy {
    /// Every fire command spawns a bullet
    #[default]
    Unthrottled,
    /// At most one bullet in flight unless rapid fire is active
    OneInFlight,
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Spawning ===
    /// Asteroids placed at session start
    pub initial_asteroids: usize,
    /// Per-tick chance an inactive saucer appears
    pub saucer_spawn_chance: f64,
    /// Per-tick chance a power-up appears
    pub power_up_spawn_chance: f64,

    // === Ship ===
    pub starting_lives: u32,
    /// Degrees per rotate command
    pub rotate_step: f32,
    /// Velocity added per thrust command
    pub thrust_force: f32,
    /// Chance a hyperspace jump destroys the ship
    pub hyperspace_failure_chance: f64,
    pub bullet_speed: f32,
    pub fire_policy: FirePolicy,

    // === Power-ups ===
    /// Multiplier applied to ship velocity by SpeedBoost
    pub speed_boost_factor: f32,
    /// Timer value set when RapidFire or Shield is collected
    pub effect_duration: f32,
    /// Amount removed from each running effect timer per tick
    pub effect_decay: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            initial_asteroids: 5,
            saucer_spawn_chance: 0.005,
            power_up_spawn_chance: 0.002,

            starting_lives: STARTING_LIVES,
            rotate_step: 5.0,
            thrust_force: 0.2,
            hyperspace_failure_chance: 0.2,
            bullet_speed: 5.0,
            fire_policy: FirePolicy::Unthrottled,

            speed_boost_factor: 1.5,
            effect_duration: 10.0,
            effect_decay: 0.1,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        probability("saucer_spawn_chance", self.saucer_spawn_chance)?;
        probability("power_up_spawn_chance", self.power_up_spawn_chance)?;
        probability("hyperspace_failure_chance", self.hyperspace_failure_chance)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("speed_boost_factor", self.speed_boost_factor)?;
        positive("effect_duration", self.effect_duration)?;
        positive("effect_decay", self.effect_decay)?;
        if !self.rotate_step.is_finite() || !self.thrust_force.is_finite() {
            return Err(SettingsError::Invalid {
                field: "rotate_step/thrust_force",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

fn probability(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("expected a probability in [0, 1], got {value}"),
        })
    }
}
