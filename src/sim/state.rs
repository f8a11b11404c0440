//! Game state and core simulation types
//!
//! Every entity kind embeds a [`Body`], the shared moving-object record.
//! The whole session lives in one [`GameState`] value owned by the driver.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawn;
use super::wrap::wrap;
use crate::consts::*;
use crate::error::Result;
use crate::settings::Settings;
use crate::{heading, normalize_degrees};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Ship was lost; further ticks are no-ops
    GameOver,
}

/// Position, velocity and liveness shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Inactive bodies are skipped by collision and rendering
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            active: true,
        }
    }

    /// Advance one tick along the current velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Fold the position back onto the playfield
    #[inline]
    pub fn wrap(&mut self, width: f32, height: f32) {
        self.pos = wrap(self.pos, width, height);
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Heading in degrees, [0, 360)
    pub angle: f32,
}

impl Ship {
    /// Fresh ship at rest in the middle of the screen, pointing right
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            body: Body::new(Vec2::new(width / 2.0, height / 2.0), Vec2::ZERO),
            angle: 0.0,
        }
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle = normalize_degrees(self.angle + delta);
    }

    /// Accelerate along the current heading
    pub fn thrust(&mut self, force: f32) {
        self.body.vel += heading(self.angle) * force;
    }

    /// Jump to a random point. Returns false if the jump destroyed the ship.
    pub fn hyperspace<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        width: f32,
        height: f32,
        failure_chance: f64,
    ) -> bool {
        self.body.pos = spawn::random_position(rng, width, height);
        if rng.random_bool(failure_chance) {
            self.body.active = false;
            return false;
        }
        true
    }
}

/// An asteroid; `size` is its tier (3 = large, 1 = smallest)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: u8,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: u8) -> Self {
        Self {
            body: Body::new(pos, vel),
            size,
        }
    }

    /// Score awarded when a bullet destroys this asteroid
    pub fn points(&self) -> u64 {
        u64::from(self.size) * ASTEROID_POINTS_PER_SIZE
    }
}

/// The enemy saucer (at most one per session)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Saucer {
    pub body: Body,
    pub small: bool,
}

impl Saucer {
    pub fn points(&self) -> u64 {
        if self.small {
            SAUCER_SMALL_POINTS
        } else {
            SAUCER_LARGE_POINTS
        }
    }
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    RapidFire,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
    ];
}

/// A stationary power-up waiting to be collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
}

/// Timed power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub rapid_fire_active: bool,
    pub rapid_fire_timer: f32,
    pub shield_active: bool,
    pub shield_timer: f32,
}

/// Something notable that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AsteroidDestroyed { size: u8, by_bullet: bool },
    /// An asteroid of `size` broke into two of `size - 1`
    AsteroidSplit { size: u8 },
    SaucerSpawned { small: bool },
    SaucerDestroyed { small: bool, by_bullet: bool },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    ShipDestroyed,
    HyperspaceFailed,
}

/// Complete game state (deterministic given the injected RNG, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub ship: Ship,
    /// Asteroids in spawn order (collision scans use this order)
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub saucer: Saucer,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub lives: u32,
    pub effects: ActiveEffects,
    /// Completed ticks
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session: ship centred, initial asteroid field, saucer parked.
    /// Fails if `settings` do not validate.
    pub fn new<R: Rng + ?Sized>(settings: Settings, rng: &mut R) -> Result<Self> {
        settings.validate()?;
        let asteroids = spawn::initial_asteroids(&settings, rng);
        Ok(Self::with_asteroids(settings, asteroids))
    }

    /// Start a session with a hand-placed asteroid field.
    ///
    /// `settings` must already be validated; spawn rolls panic on a
    /// probability outside [0, 1].
    pub fn with_asteroids(settings: Settings, asteroids: Vec<Asteroid>) -> Self {
        debug_assert!(settings.validate().is_ok(), "unvalidated settings");
        Self {
            ship: Ship::new(settings.screen_width, settings.screen_height),
            asteroids,
            bullets: Vec::new(),
            saucer: Saucer::default(),
            power_ups: Vec::new(),
            score: 0,
            lives: settings.starting_lives,
            effects: ActiveEffects::default(),
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
            settings,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ship loses a life and is taken out of play
    pub(crate) fn destroy_ship(&mut self) {
        self.ship.body.active = false;
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::ShipDestroyed);
    }

    /// Drop inactive entities; order of the survivors is preserved
    pub fn prune_inactive(&mut self) {
        self.asteroids.retain(|a| a.body.active);
        self.bullets.retain(|b| b.body.active);
        self.power_ups.retain(|p| p.body.active);
    }
}
