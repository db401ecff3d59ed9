//! Spin-up gate: the armed window between "use this hammer" and the commit.
//!
//! Arming tightens the orbit (minimum speed multiplied, minimum radius
//! divided) so the hammer whips into a fast, close spin, then polls until the
//! orbit angle sweeps into the commit window.  Inside the window the gate
//! resolves exactly once — into the projectile branch or the enemy-seek
//! branch — and restores the orbit bounds.
//!
//! Hammers armed passively for redistribution (`preparing == false`) take the
//! disarm path on their first poll after the check delay, which is what gives
//! the redistribution its brief tightened hop.

use crate::ability::signals::HammerLaunched;
use crate::actor::{forward_of, Npc, PlayerCharacter};
use crate::config::AbilityConfig;
use bevy::prelude::*;

use super::state::{
    BoundEnemy, Hammer, HammerIndex, HammerState, OrbitMotion, OwningPlayer, SeekMotion,
};
use super::deactivate_hammer;

/// Arm a hammer's spin-up gate.
///
/// `preparing == true` commits the hammer (fire or control depending on
/// `control_mode`); `preparing == false` is a passive redistribution arm that
/// only applies the `angle_boost` and the brief tightened spin.  The orbit
/// bound multipliers are applied at most once per spinning phase, however
/// often the gate is re-armed before it stops.
pub fn start_spin_mode(
    orbit: &mut OrbitMotion,
    state: &mut HammerState,
    preparing: bool,
    control_mode: bool,
    angle_boost: f32,
    config: &AbilityConfig,
) {
    state.preparing = preparing;
    state.control_mode = control_mode;
    orbit.angle += angle_boost;

    if !state.spinning {
        state.spinning = true;
        orbit.min_speed *= config.spin_min_speed_factor;
        orbit.min_radius /= config.spin_min_radius_divisor;
    }
    state.spin_check_delay = config.spin_check_delay;
}

/// Stop the spin-up gate and restore the orbit bounds.  Safe to call when the
/// gate is not running.
pub fn stop_spin_mode(orbit: &mut OrbitMotion, state: &mut HammerState, config: &AbilityConfig) {
    if state.spinning {
        state.spinning = false;
        orbit.min_speed /= config.spin_min_speed_factor;
        orbit.min_radius *= config.spin_min_radius_divisor;
    }
}

/// Whether `angle` (degrees) lies inside the commit window.
#[inline]
pub(crate) fn in_commit_window(angle: f32, config: &AbilityConfig) -> bool {
    (angle.abs() - config.commit_angle).abs() <= config.commit_tolerance
}

/// Poll every spinning hammer and dispatch the ones that reach the commit
/// window.
///
/// Runs after the orbit update so it sees this tick's angle.  A control-mode
/// hammer whose bound enemy is missing or stale keeps polling instead of
/// resolving; a disarmed hammer (passive redistribution, or externally
/// disarmed) restores its bounds and stops.
pub fn spin_up_check_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<AbilityConfig>,
    mut launched: MessageWriter<HammerLaunched>,
    players: Query<&Transform, (With<PlayerCharacter>, Without<Hammer>)>,
    enemies: Query<(), (With<Npc>, Without<Hammer>)>,
    mut hammers: Query<
        (
            Entity,
            &HammerIndex,
            &OwningPlayer,
            &Transform,
            &BoundEnemy,
            &mut HammerState,
            &mut OrbitMotion,
        ),
        With<Hammer>,
    >,
) {
    let dt = time.delta_secs();
    for (entity, index, owner, transform, bound, mut state, mut orbit) in hammers.iter_mut() {
        if !state.spinning {
            continue;
        }

        // Initial arming delay before the gate starts polling.
        if state.spin_check_delay > 0.0 {
            state.spin_check_delay -= dt;
            if state.spin_check_delay > 0.0 {
                continue;
            }
        }

        if !state.preparing {
            // Externally disarmed or a passive redistribution arm: restore
            // bounds and return to the plain orbit.
            stop_spin_mode(&mut orbit, &mut state, &config);
            continue;
        }

        if !in_commit_window(orbit.angle, &config) {
            continue;
        }

        if state.control_mode {
            // Control branch needs a live bound enemy; otherwise the gate
            // stays armed and keeps polling.
            let Some(enemy) = bound.0 else {
                continue;
            };
            if enemies.get(enemy).is_err() {
                continue;
            }

            state.active = false;
            state.used = true;
            commands.entity(entity).insert(SeekMotion {
                elapsed: 0.0,
                window: config.seek_window,
            });
            info!("hammer {} committed to enemy seek", index.0);
        } else {
            state.used = true;
            deactivate_hammer(&mut commands.entity(entity), &mut state);

            let direction = players
                .get(owner.0)
                .map(|tf| forward_of(tf))
                .unwrap_or(Vec2::Y);
            launched.write(HammerLaunched {
                hammer: entity,
                origin: transform.translation.truncate(),
                direction,
            });
            info!("hammer {} launched as a projectile", index.0);
        }

        state.preparing = false;
        stop_spin_mode(&mut orbit, &mut state, &config);
    }
}
