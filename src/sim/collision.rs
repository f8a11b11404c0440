//! Collision detection and combat resolution
//!
//! Every pair of entity kinds has its own fixed contact radius. Tests compare
//! squared distances, so no square roots are taken.

use glam::Vec2;
use rand::Rng;

use super::spawn::fragments;
use super::state::{Asteroid, GameEvent, GameState};
use crate::consts::*;

/// True if `a` and `b` are within `radius` of each other
#[inline]
pub fn collides(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}

/// Resolve every contact for this tick.
///
/// Groups run in a fixed order: ship vs asteroids, bullets vs asteroids,
/// ship vs saucer, bullets vs saucer. Within a group, entities are scanned
/// in collection order.
pub fn resolve_collisions<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    ship_vs_asteroids(state);
    bullets_vs_asteroids(state, rng);
    ship_vs_saucer(state);
    bullets_vs_saucer(state);
}

fn ship_vs_asteroids(state: &mut GameState) {
    for i in 0..state.asteroids.len() {
        if !state.ship.body.active {
            return;
        }
        let asteroid = &mut state.asteroids[i];
        if !asteroid.body.active
            || !collides(state.ship.body.pos, asteroid.body.pos, SHIP_ASTEROID_RADIUS)
        {
            continue;
        }

        if state.effects.shield_active {
            // Shield kills do not split the rock and score nothing
            asteroid.body.active = false;
            let size = asteroid.size;
            state.events.push(GameEvent::AsteroidDestroyed {
                size,
                by_bullet: false,
            });
        } else {
            state.destroy_ship();
        }
    }
}

fn bullets_vs_asteroids<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    // Fragments join the field after the scan so they can't be hit this tick
    let mut spawned: Vec<Asteroid> = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| b.body.active) {
        let Some(asteroid) = state.asteroids.iter_mut().find(|a| {
            a.body.active && collides(bullet.body.pos, a.body.pos, BULLET_ASTEROID_RADIUS)
        }) else {
            continue;
        };

        bullet.body.active = false;
        asteroid.body.active = false;
        state.score += asteroid.points();
        state.events.push(GameEvent::AsteroidDestroyed {
            size: asteroid.size,
            by_bullet: true,
        });

        let kids = fragments(asteroid, rng);
        if !kids.is_empty() {
            state.events.push(GameEvent::AsteroidSplit {
                size: asteroid.size,
            });
        }
        spawned.extend(kids);
    }

    state.asteroids.extend(spawned);
}

fn ship_vs_saucer(state: &mut GameState) {
    if !state.ship.body.active
        || !state.saucer.body.active
        || !collides(state.ship.body.pos, state.saucer.body.pos, SHIP_SAUCER_RADIUS)
    {
        return;
    }

    if state.effects.shield_active {
        state.saucer.body.active = false;
        state.events.push(GameEvent::SaucerDestroyed {
            small: state.saucer.small,
            by_bullet: false,
        });
    } else {
        state.destroy_ship();
    }
}

fn bullets_vs_saucer(state: &mut GameState) {
    for bullet in state.bullets.iter_mut() {
        if !state.saucer.body.active {
            return;
        }
        if !bullet.body.active
            || !collides(bullet.body.pos, state.saucer.body.pos, BULLET_SAUCER_RADIUS)
        {
            continue;
        }

        bullet.body.active = false;
        state.saucer.body.active = false;
        state.score += state.saucer.points();
        state.events.push(GameEvent::SaucerDestroyed {
            small: state.saucer.small,
            by_bullet: true,
        });
    }
}
