//! Per-tick orbital motion.
//!
//! Each frame a hammer sweeps around its owning player at the current
//! speed/radius, expanding when the player holds a new heading and
//! contracting while the heading is settled or the hammer is armed.  The
//! heuristic compares the *previous* tick's player forward vector against the
//! current right vector: a near-zero dot product means the player has not
//! meaningfully turned since the last sample.

use crate::actor::{forward_of, right_of, PlayerCharacter};
use crate::config::AbilityConfig;
use bevy::prelude::*;

use super::state::{Hammer, HammerState, OrbitMotion, OwningPlayer};

/// Min-dominant clamp: values below `min` snap to `min` even when `min`
/// exceeds `max`.  Armed hammers deliberately raise
/// their minimum speed above the maximum, which jams the speed at the raised
/// minimum for the duration of the spin-up.
#[inline]
pub(crate) fn spin_clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value < max {
        value
    } else {
        max
    }
}

/// World position on the orbit circle for a given angle (degrees).
#[inline]
pub(crate) fn orbit_position(center: Vec2, angle_deg: f32, radius: f32) -> Vec2 {
    center + Vec2::from_angle(angle_deg.to_radians()) * radius
}

/// Advance one hammer's orbit record by one tick.
///
/// `player_forward` / `player_right` are the player's current pose vectors;
/// `spinning` forces the contract branch while the spin-up gate is armed.
pub(crate) fn step_orbit(
    orbit: &mut OrbitMotion,
    spinning: bool,
    player_forward: Vec2,
    player_right: Vec2,
    dt: f32,
    config: &AbilityConfig,
) {
    let dot = orbit.last_forward.dot(player_right);
    orbit.last_dot = dot;

    // Near-zero variance: the stale forward is still (nearly) perpendicular
    // to the current right, so the player is holding a heading.
    let near_variance = dot.abs() <= config.variance_tolerance;

    if near_variance || spinning {
        // Contract.  Direction is left untouched.
        orbit.speed = spin_clamp(
            orbit.speed - config.contract_speed_step,
            orbit.min_speed,
            orbit.max_speed,
        );
        orbit.radius = spin_clamp(
            orbit.radius - config.radius_step,
            orbit.min_radius,
            orbit.max_radius,
        );
    } else {
        // Expand, and re-pick the sweep direction from the turn sign.
        orbit.speed = spin_clamp(
            orbit.speed + config.expand_speed_step,
            orbit.min_speed,
            orbit.max_speed,
        );
        orbit.radius = spin_clamp(
            orbit.radius + config.radius_step,
            orbit.min_radius,
            orbit.max_radius,
        );
        orbit.direction = if dot > 0.0 { -1.0 } else { 1.0 };
    }

    // Sample the forward vector before advancing the angle so the comparison
    // always lags by exactly one tick.
    orbit.last_forward = player_forward;

    orbit.angle += orbit.speed * dt * orbit.direction;
    if orbit.angle >= 360.0 || orbit.angle <= -360.0 {
        orbit.angle = 0.0;
    }
}

/// Orbit update for every active hammer.
///
/// A hammer whose owning player cannot be resolved skips the tick entirely
/// and retries next frame instead of computing motion from a stale pose.
pub fn hammer_orbit_system(
    time: Res<Time>,
    config: Res<AbilityConfig>,
    players: Query<&Transform, (With<PlayerCharacter>, Without<Hammer>)>,
    mut hammers: Query<
        (&OwningPlayer, &HammerState, &mut OrbitMotion, &mut Transform),
        With<Hammer>,
    >,
) {
    let dt = time.delta_secs();
    for (owner, state, mut orbit, mut transform) in hammers.iter_mut() {
        if !state.active || state.used {
            continue;
        }
        let Ok(player_tf) = players.get(owner.0) else {
            continue;
        };

        step_orbit(
            &mut orbit,
            state.spinning,
            forward_of(player_tf),
            right_of(player_tf),
            dt,
            &config,
        );

        let center = player_tf.translation.truncate();
        let new_pos = orbit_position(center, orbit.angle, orbit.radius);
        transform.translation = new_pos.extend(transform.translation.z);
    }
}
