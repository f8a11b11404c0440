//! Per-tick simulation step
//!
//! One command in, one full update, one outcome out. The caller owns the loop.

use rand::Rng;

use super::collision::resolve_collisions;
use super::effects::update_power_ups;
use super::spawn::{maybe_spawn_power_up, maybe_spawn_saucer};
use super::state::{Body, Bullet, GameEvent, GamePhase, GameState};
use crate::heading;
use crate::settings::FirePolicy;

/// Player command for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    RotateLeft,
    RotateRight,
    Thrust,
    Hyperspace,
    Fire,
    Quit,
    #[default]
    NoOp,
}

impl Command {
    /// Map a keypress to a command. Unknown keys do nothing.
    pub fn from_key(key: char) -> Self {
        match key {
            'a' | 'A' => Command::RotateLeft,
            'd' | 'D' => Command::RotateRight,
            'w' | 'W' => Command::Thrust,
            's' | 'S' => Command::Hyperspace,
            ' ' | 'f' | 'F' => Command::Fire,
            'q' | 'Q' => Command::Quit,
            _ => Command::NoOp,
        }
    }
}

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Player asked to stop; state was not advanced
    Quit,
    /// Ship is gone; the session is over
    GameOver,
}

/// Spawn a bullet from the ship's nose, subject to the fire policy.
/// Returns true if a bullet was created.
pub fn fire(state: &mut GameState) -> bool {
    if !state.ship.body.active {
        return false;
    }

    let allowed = match state.settings.fire_policy {
        FirePolicy::Unthrottled => true,
        FirePolicy::OneInFlight => {
            state.effects.rapid_fire_active || !state.bullets.iter().any(|b| b.body.active)
        }
    };
    if !allowed {
        return false;
    }

    let vel = heading(state.ship.angle) * state.settings.bullet_speed;
    state.bullets.push(Bullet {
        body: Body::new(state.ship.body.pos, vel),
    });
    true
}

fn apply_command<R: Rng + ?Sized>(state: &mut GameState, command: Command, rng: &mut R) {
    let settings = &state.settings;
    match command {
        Command::RotateLeft => state.ship.rotate(-settings.rotate_step),
        Command::RotateRight => state.ship.rotate(settings.rotate_step),
        Command::Thrust => state.ship.thrust(settings.thrust_force),
        Command::Hyperspace => {
            let survived = state.ship.hyperspace(
                rng,
                settings.screen_width,
                settings.screen_height,
                settings.hyperspace_failure_chance,
            );
            if !survived {
                state.events.push(GameEvent::HyperspaceFailed);
            }
        }
        Command::Fire => {
            fire(state);
        }
        Command::Quit | Command::NoOp => {}
    }
}

/// Move every active body along its velocity and wrap it onto the screen
fn integrate(state: &mut GameState) {
    let (w, h) = (state.settings.screen_width, state.settings.screen_height);

    let bodies = std::iter::once(&mut state.ship.body)
        .chain(state.bullets.iter_mut().map(|b| &mut b.body))
        .chain(state.asteroids.iter_mut().map(|a| &mut a.body))
        .chain(std::iter::once(&mut state.saucer.body));

    for body in bodies.filter(|b| b.active) {
        body.integrate();
        body.wrap(w, h);
    }
}

fn end_game(state: &mut GameState) -> TickOutcome {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over after {} ticks, final score {}",
        state.time_ticks,
        state.score
    );
    TickOutcome::GameOver
}

/// Advance the game by one tick.
///
/// Order: command, motion, wrap, saucer spawn, power-up spawn, power-up
/// collection and timers, collisions, prune. A ship lost while applying the
/// command ends the session before anything moves.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, command: Command, rng: &mut R) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::GameOver;
    }
    state.events.clear();

    if command == Command::Quit {
        return TickOutcome::Quit;
    }

    apply_command(state, command, rng);
    if !state.ship.body.active {
        return end_game(state);
    }

    integrate(state);
    maybe_spawn_saucer(state, rng);
    maybe_spawn_power_up(state, rng);
    update_power_ups(state);
    resolve_collisions(state, rng);

    state.prune_inactive();
    state.time_ticks += 1;

    if !state.ship.body.active {
        return end_game(state);
    }
    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;
    use crate::settings::Settings;
    use crate::sim::state::{Asteroid, PowerUp, PowerUpKind};
    use glam::Vec2;

    /// Settings with all randomness that matters switched off
    fn quiet() -> Settings {
        Settings {
            saucer_spawn_chance: 0.0,
            power_up_spawn_chance: 0.0,
            hyperspace_failure_chance: 0.0,
            ..Default::default()
        }
    }

    fn quiet_state(asteroids: Vec<Asteroid>) -> GameState {
        GameState::with_asteroids(quiet(), asteroids)
    }

    #[test]
    fn test_fire_from_centre() {
        let mut state = quiet_state(Vec::new());
        assert!(fire(&mut state));
        let bullet = &state.bullets[0];
        assert_eq!(bullet.body.pos, Vec2::new(400.0, 300.0));
        assert!((bullet.body.vel.x - 5.0).abs() < 1e-5);
        assert!(bullet.body.vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_unthrottled_fire_always_spawns() {
        let mut state = quiet_state(Vec::new());
        for _ in 0..3 {
            assert!(fire(&mut state));
        }
        assert_eq!(state.bullets.len(), 3);
    }

    #[test]
    fn test_one_in_flight_policy() {
        let mut state = quiet_state(Vec::new());
        state.settings.fire_policy = FirePolicy::OneInFlight;
        assert!(fire(&mut state));
        assert!(!fire(&mut state));

        state.effects.rapid_fire_active = true;
        assert!(fire(&mut state));
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_asteroid_wraps_right_edge() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(
            Vec2::new(799.0, 300.0),
            Vec2::new(2.0, 0.0),
            3,
        )]);
        // Keep the ship clear of the rock's path
        state.ship.body.pos = Vec2::new(100.0, 100.0);

        assert_eq!(tick(&mut state, Command::NoOp, &mut rng), TickOutcome::Continue);
        assert_eq!(state.asteroids[0].body.pos, Vec2::new(1.0, 300.0));
    }

    #[test]
    fn test_crash_ends_game() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(Vec2::new(410.0, 300.0), Vec2::ZERO, 3)]);

        assert_eq!(tick(&mut state, Command::NoOp, &mut rng), TickOutcome::GameOver);
        assert_eq!(state.lives, 2);
        assert!(!state.ship.body.active);
        assert!(state.is_over());
    }

    #[test]
    fn test_game_over_is_sticky() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 3)]);
        tick(&mut state, Command::NoOp, &mut rng);
        let ticks = state.time_ticks;

        assert_eq!(tick(&mut state, Command::Fire, &mut rng), TickOutcome::GameOver);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_quit_does_not_advance() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(Vec2::new(10.0, 10.0), Vec2::ONE, 3)]);
        assert_eq!(tick(&mut state, Command::Quit, &mut rng), TickOutcome::Quit);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.asteroids[0].body.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_failed_hyperspace_ends_game_without_moving() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(Vec2::new(10.0, 10.0), Vec2::ONE, 3)]);
        state.settings.hyperspace_failure_chance = 1.0;

        assert_eq!(tick(&mut state, Command::Hyperspace, &mut rng), TickOutcome::GameOver);
        assert_eq!(state.lives, 3);
        assert_eq!(state.asteroids[0].body.pos, Vec2::new(10.0, 10.0));
        assert!(state.events.contains(&GameEvent::HyperspaceFailed));
    }

    #[test]
    fn test_rotation_and_thrust_commands() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(Vec::new());
        tick(&mut state, Command::RotateLeft, &mut rng);
        assert!((state.ship.angle - 355.0).abs() < 1e-4);
        tick(&mut state, Command::RotateRight, &mut rng);
        tick(&mut state, Command::RotateRight, &mut rng);
        assert!((state.ship.angle - 5.0).abs() < 1e-4);

        let before = state.ship.body.pos;
        tick(&mut state, Command::Thrust, &mut rng);
        assert!(state.ship.body.vel.length() > 0.19);
        assert!(state.ship.body.pos.x > before.x);
    }

    #[test]
    fn test_bullet_moves_and_scores() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(Vec2::new(450.0, 300.0), Vec2::ZERO, 1)]);

        tick(&mut state, Command::Fire, &mut rng);
        let mut score_before = state.score;
        let mut outcome = TickOutcome::Continue;
        for _ in 0..20 {
            outcome = tick(&mut state, Command::NoOp, &mut rng);
            assert!(state.score >= score_before);
            score_before = state.score;
        }
        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(state.score, 10);
        assert!(state.asteroids.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_power_up_collected_during_tick() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(Vec::new());
        state.power_ups.push(PowerUp {
            body: Body::new(Vec2::new(402.0, 300.0), Vec2::ZERO),
            kind: PowerUpKind::Shield,
        });

        tick(&mut state, Command::NoOp, &mut rng);
        assert!(state.effects.shield_active);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_shield_survives_ram() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(vec![Asteroid::new(Vec2::new(410.0, 300.0), Vec2::ZERO, 3)]);
        state.effects.shield_active = true;
        state.effects.shield_timer = 10.0;

        assert_eq!(tick(&mut state, Command::NoOp, &mut rng), TickOutcome::Continue);
        assert_eq!(state.lives, 3);
        assert!(state.ship.body.active);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_saucer_flies_right() {
        let mut rng = seeded_rng(1);
        let mut state = quiet_state(Vec::new());
        state.settings.saucer_spawn_chance = 1.0;

        tick(&mut state, Command::NoOp, &mut rng);
        assert!(state.saucer.body.active);
        assert_eq!(state.saucer.body.pos.x, 0.0);

        tick(&mut state, Command::NoOp, &mut rng);
        assert_eq!(state.saucer.body.pos.x, 1.0);
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs give identical sessions
        let run = |seed: u64| {
            let settings = Settings {
                saucer_spawn_chance: 0.2,
                power_up_spawn_chance: 0.2,
                ..Default::default()
            };
            let mut rng = seeded_rng(seed);
            let mut state = GameState::new(settings, &mut rng).unwrap();
            let script = [Command::Fire, Command::RotateLeft, Command::Thrust, Command::NoOp];
            for command in script.iter().cycle().take(200) {
                if tick(&mut state, *command, &mut rng) != TickOutcome::Continue {
                    break;
                }
            }
            state.snapshot()
        };

        assert_eq!(run(99999), run(99999));
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Command::from_key('a'), Command::RotateLeft);
        assert_eq!(Command::from_key('D'), Command::RotateRight);
        assert_eq!(Command::from_key('w'), Command::Thrust);
        assert_eq!(Command::from_key('S'), Command::Hyperspace);
        assert_eq!(Command::from_key(' '), Command::Fire);
        assert_eq!(Command::from_key('q'), Command::Quit);
        assert_eq!(Command::from_key('x'), Command::NoOp);
    }
}
