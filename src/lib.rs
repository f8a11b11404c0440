//! Torus Rocks - an asteroid field on a wrapped plane
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, wrap, spawning, collisions, power-ups)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Errors raised at the crate's fallible edges

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{FirePolicy, Settings};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Collision radii per entity pair
    pub const SHIP_ASTEROID_RADIUS: f32 = 20.0;
    pub const BULLET_ASTEROID_RADIUS: f32 = 10.0;
    pub const SHIP_SAUCER_RADIUS: f32 = 15.0;
    pub const BULLET_SAUCER_RADIUS: f32 = 10.0;
    pub const SHIP_POWER_UP_RADIUS: f32 = 10.0;

    /// Asteroid tier for freshly spawned rocks
    pub const ASTEROID_START_SIZE: u8 = 3;
    /// Points per asteroid tier on a bullet kill
    pub const ASTEROID_POINTS_PER_SIZE: u64 = 10;
    pub const SAUCER_LARGE_POINTS: u64 = 100;
    pub const SAUCER_SMALL_POINTS: u64 = 200;

    pub const STARTING_LIVES: u32 = 3;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing along a heading given in degrees
#[inline]
pub fn heading(angle_degrees: f32) -> Vec2 {
    Vec2::from_angle(angle_degrees.to_radians())
}

/// Build the simulation RNG from a seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Seed derived from the wall clock, for non-reproducible sessions
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
