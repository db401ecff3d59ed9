//! Hammer components.
//!
//! All ECS state describing one orbiting hammer lives here.  Systems that
//! mutate this state are in the sibling modules:
//! - [`super::orbit`] — per-tick orbital motion
//! - [`super::spin_up`] — armed-gate polling and commit dispatch
//! - [`super::seek`] — enemy approach, attachment, follow

use crate::config::AbilityConfig;
use bevy::prelude::*;

// ── Markers / identity ────────────────────────────────────────────────────────

/// Marker component for a transcendence hammer entity.
#[derive(Component)]
pub struct Hammer;

/// Slot this hammer occupies in the session's spawn-order array.
#[derive(Component, Debug, Clone, Copy)]
pub struct HammerIndex(pub usize);

/// Handle to the player character this hammer orbits.
///
/// Every dereference goes through `Query::get`, so a despawned player simply
/// stalls the orbit (the tick is skipped and resolution retried next frame).
#[derive(Component, Debug, Clone, Copy)]
pub struct OwningPlayer(pub Entity);

// ── Orbit record ──────────────────────────────────────────────────────────────

/// Orbital motion state for one hammer.
///
/// The min/max bounds are stored per hammer because arming a hammer tightens
/// them (min speed × factor, min radius ÷ divisor) and the gate restores them
/// when it resolves or disarms.
#[derive(Component, Debug, Clone)]
pub struct OrbitMotion {
    /// Current angle around the player, degrees.  Reset to 0 when it reaches
    /// ±360, so it always stays inside (-360, 360).
    pub angle: f32,
    /// Sweep direction: -1 (clockwise) or +1 (counter-clockwise).
    pub direction: f32,
    /// Current sweep speed, degrees per second.
    pub speed: f32,
    /// Current orbit radius, world units.
    pub radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Player forward vector sampled on the previous orbit tick.  The
    /// facing-variance heuristic always compares one tick behind.
    pub last_forward: Vec2,
    /// Dot product computed on the last variance check; its sign picks the
    /// sweep direction when the orbit expands.
    pub last_dot: f32,
}

impl OrbitMotion {
    pub fn new(config: &AbilityConfig, initial_angle: f32, player_forward: Vec2) -> Self {
        Self {
            angle: initial_angle,
            direction: -1.0,
            speed: config.min_rotation_speed,
            radius: config.min_rotation_radius,
            min_speed: config.min_rotation_speed,
            max_speed: config.max_rotation_speed,
            min_radius: config.min_rotation_radius,
            max_radius: config.max_rotation_radius,
            last_forward: player_forward,
            last_dot: 0.0,
        }
    }
}

// ── Lifecycle flags ───────────────────────────────────────────────────────────

/// Lifecycle and mode flags for one hammer.
#[derive(Component, Debug, Clone)]
pub struct HammerState {
    /// Orbit loop is running.
    pub active: bool,
    /// One-shot: once true the hammer never returns to orbit.
    pub used: bool,
    /// Armed for a real commit (as opposed to a passive redistribution arm).
    pub preparing: bool,
    /// Spin-up gate is running (tightened orbit, commit-angle polling).
    pub spinning: bool,
    /// Commit branch: true = seek-enemy (control), false = projectile.
    pub control_mode: bool,
    /// Remaining delay before the armed gate starts polling, seconds.
    pub spin_check_delay: f32,
}

impl Default for HammerState {
    fn default() -> Self {
        Self {
            active: false,
            used: false,
            preparing: false,
            spinning: false,
            control_mode: false,
            spin_check_delay: 0.0,
        }
    }
}

// ── Commit-phase state ────────────────────────────────────────────────────────

/// Enemy bound for the control branch.  Only meaningful while
/// [`HammerState::control_mode`] is set.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BoundEnemy(pub Option<Entity>);

/// Active seek interpolation toward the bound enemy.
///
/// Inserted when the gate resolves into the control branch; removed when the
/// hammer attaches or the target goes stale.
#[derive(Component, Debug, Clone, Copy)]
pub struct SeekMotion {
    /// Accumulated time since the seek started, seconds.
    pub elapsed: f32,
    /// Smoothing window the elapsed time is normalised against.
    pub window: f32,
}

/// Rigid attachment to a converted enemy: position/rotation snap each frame,
/// scale untouched, plus a local seat offset.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttachedTo {
    pub target: Entity,
    pub local_offset: Vec2,
}
