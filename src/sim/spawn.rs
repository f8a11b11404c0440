//! Spawn policies for asteroids, the saucer and power-ups
//!
//! Positions are drawn on the integer pixel grid and asteroid velocities
//! from {-1, 0, 1} per axis.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, Body, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::ASTEROID_START_SIZE;
use crate::settings::Settings;

/// Uniform random point on the integer grid of the playfield
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    let x = rng.random_range(0..(width as u32).max(1));
    let y = rng.random_range(0..(height as u32).max(1));
    Vec2::new(x as f32, y as f32)
}

/// Random drift with each axis in {-1, 0, 1}
pub fn random_drift<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let vx = rng.random_range(-1..=1);
    let vy = rng.random_range(-1..=1);
    Vec2::new(vx as f32, vy as f32)
}

/// The opening asteroid field
pub fn initial_asteroids<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Vec<Asteroid> {
    (0..settings.initial_asteroids)
        .map(|_| {
            let pos = random_position(rng, settings.screen_width, settings.screen_height);
            let vel = random_drift(rng);
            Asteroid::new(pos, vel, ASTEROID_START_SIZE)
        })
        .collect()
}

/// Two children one tier smaller at the parent's position, or none for the
/// smallest tier
pub fn fragments<R: Rng + ?Sized>(parent: &Asteroid, rng: &mut R) -> Vec<Asteroid> {
    if parent.size <= 1 {
        return Vec::new();
    }
    (0..2)
        .map(|_| Asteroid::new(parent.body.pos, random_drift(rng), parent.size - 1))
        .collect()
}

/// Roll for a saucer if none is flying. It enters on the left edge heading right.
pub fn maybe_spawn_saucer<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.saucer.body.active || !rng.random_bool(state.settings.saucer_spawn_chance) {
        return;
    }

    let y = rng.random_range(0..(state.settings.screen_height as u32).max(1)) as f32;
    let small = rng.random_bool(0.5);
    state.saucer.body = Body::new(Vec2::new(0.0, y), Vec2::new(1.0, 0.0));
    state.saucer.small = small;
    state.events.push(GameEvent::SaucerSpawned { small });
    log::debug!("Saucer spawned at y={y} (small: {small})");
}

/// Roll for a new power-up of a random kind somewhere on screen
pub fn maybe_spawn_power_up<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if !rng.random_bool(state.settings.power_up_spawn_chance) {
        return;
    }

    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = random_position(rng, state.settings.screen_width, state.settings.screen_height);
    state.power_ups.push(PowerUp {
        body: Body::new(pos, Vec2::ZERO),
        kind,
    });
    state.events.push(GameEvent::PowerUpSpawned(kind));
}
