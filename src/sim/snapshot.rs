//! Read-only view of the simulation for renderers
//!
//! Only active entities appear. Order: ship, asteroids, bullets, saucer,
//! power-ups.

use std::fmt;

use glam::Vec2;
use serde::Serialize;

use super::state::{GameState, PowerUpKind};

/// Closed set of entity kinds, for code that walks every entity at once
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EntityKind {
    Ship,
    Asteroid { size: u8 },
    Bullet,
    Saucer { small: bool },
    PowerUp(PowerUpKind),
}

impl EntityKind {
    /// Label used by the text renderer
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Ship => "Player",
            EntityKind::Asteroid { .. } => "Asteroid",
            EntityKind::Bullet => "Bullet",
            EntityKind::Saucer { .. } => "Saucer",
            EntityKind::PowerUp(_) => "PowerUp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u32,
    pub tick: u64,
    pub entities: Vec<EntityView>,
}

impl GameState {
    /// Capture everything a renderer needs for the current tick
    pub fn snapshot(&self) -> Snapshot {
        let mut entities = Vec::with_capacity(
            1 + self.asteroids.len() + self.bullets.len() + 1 + self.power_ups.len(),
        );

        if self.ship.body.active {
            entities.push(EntityView {
                kind: EntityKind::Ship,
                pos: self.ship.body.pos,
            });
        }
        entities.extend(
            self.asteroids
                .iter()
                .filter(|a| a.body.active)
                .map(|a| EntityView {
                    kind: EntityKind::Asteroid { size: a.size },
                    pos: a.body.pos,
                }),
        );
        entities.extend(
            self.bullets
                .iter()
                .filter(|b| b.body.active)
                .map(|b| EntityView {
                    kind: EntityKind::Bullet,
                    pos: b.body.pos,
                }),
        );
        if self.saucer.body.active {
            entities.push(EntityView {
                kind: EntityKind::Saucer {
                    small: self.saucer.small,
                },
                pos: self.saucer.body.pos,
            });
        }
        entities.extend(
            self.power_ups
                .iter()
                .filter(|p| p.body.active)
                .map(|p| EntityView {
                    kind: EntityKind::PowerUp(p.kind),
                    pos: p.body.pos,
                }),
        );

        Snapshot {
            score: self.score,
            lives: self.lives,
            tick: self.time_ticks,
            entities,
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {} | Lives: {}", self.score, self.lives)?;
        for entity in &self.entities {
            writeln!(
                f,
                "{} at ({}, {})",
                entity.kind.label(),
                entity.pos.x,
                entity.pos.y
            )?;
        }
        Ok(())
    }
}
