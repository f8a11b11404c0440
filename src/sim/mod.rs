//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per driver call, no clocks
//! - Injected RNG only
//! - Stable iteration order (collection index order)
//! - No rendering or terminal dependencies

pub mod collision;
pub mod effects;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod wrap;

pub use collision::{collides, resolve_collisions};
pub use effects::update_power_ups;
pub use snapshot::{EntityKind, EntityView, Snapshot};
pub use state::{
    ActiveEffects, Asteroid, Body, Bullet, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind,
    Saucer, Ship,
};
pub use tick::{Command, TickOutcome, fire, tick};
pub use wrap::wrap;
