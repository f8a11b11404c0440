//! Power-up collection and timed effects

use super::collision::collides;
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::consts::SHIP_POWER_UP_RADIUS;

/// Collect any power-ups touching the ship, then run effect timers down
pub fn update_power_ups(state: &mut GameState) {
    let mut collected: Vec<PowerUpKind> = Vec::new();
    if state.ship.body.active {
        let ship_pos = state.ship.body.pos;
        for power_up in state.power_ups.iter_mut().filter(|p| p.body.active) {
            if collides(ship_pos, power_up.body.pos, SHIP_POWER_UP_RADIUS) {
                power_up.body.active = false;
                collected.push(power_up.kind);
            }
        }
    }

    for kind in collected {
        activate(state, kind);
        state.events.push(GameEvent::PowerUpCollected(kind));
    }

    decay_effects(state);
}

/// Apply a power-up. Timed effects restart their timer rather than stacking.
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    let duration = state.settings.effect_duration;
    match kind {
        PowerUpKind::SpeedBoost => {
            state.ship.body.vel *= state.settings.speed_boost_factor;
        }
        PowerUpKind::RapidFire => {
            state.effects.rapid_fire_active = true;
            state.effects.rapid_fire_timer = duration;
        }
        PowerUpKind::Shield => {
            state.effects.shield_active = true;
            state.effects.shield_timer = duration;
        }
    }
    log::debug!("Power-up {kind:?} activated");
}

fn decay_effects(state: &mut GameState) {
    let decay = state.settings.effect_decay;
    let effects = &mut state.effects;

    if effects.rapid_fire_active {
        effects.rapid_fire_timer -= decay;
        if effects.rapid_fire_timer <= 0.0 {
            effects.rapid_fire_active = false;
            state.events.push(GameEvent::EffectExpired(PowerUpKind::RapidFire));
        }
    }

    if effects.shield_active {
        effects.shield_timer -= decay;
        if effects.shield_timer <= 0.0 {
            effects.shield_active = false;
            state.events.push(GameEvent::EffectExpired(PowerUpKind::Shield));
        }
    }
}
