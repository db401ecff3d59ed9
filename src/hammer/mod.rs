//! Hammer module: per-hammer state, orbital motion, spin-up gate, and the
//! enemy-seek controller.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Hammer`, `OrbitMotion`, `HammerState`, `BoundEnemy`, `SeekMotion`, `AttachedTo`) |
//! | [`orbit`] | Per-tick orbit update: expand/contract, facing-variance heuristic, angle sweep |
//! | [`spin_up`] | Armed gate: tightened spin, commit-angle polling, projectile/seek dispatch |
//! | [`seek`] | Interpolated approach to a bound enemy, attachment, follow |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::hammer::*` imports.

pub mod orbit;
pub mod seek;
pub mod spin_up;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use orbit::hammer_orbit_system;
pub use seek::{attached_follow_system, hammer_seek_system};
pub use spin_up::{spin_up_check_system, start_spin_mode, stop_spin_mode};
pub use state::{
    AttachedTo, BoundEnemy, Hammer, HammerIndex, HammerState, OrbitMotion, OwningPlayer,
    SeekMotion,
};

use crate::actor::forward_of;
use crate::config::AbilityConfig;
use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Spawn / deactivate ────────────────────────────────────────────────────────

/// Spawn `count` hammers around `player` with evenly spaced initial angles
/// (`slot * 360 / count`) and return their handles in slot order.
///
/// Spawning goes through `Commands`, so the entities materialise at the next
/// command flush — the deferred-init/finish-spawning contract.
pub fn spawn_hammers(
    commands: &mut Commands,
    config: &AbilityConfig,
    player: Entity,
    player_tf: &Transform,
    count: usize,
) -> Vec<Entity> {
    let spacing = 360 / count.max(1);
    let forward = forward_of(player_tf);

    (0..count)
        .map(|slot| {
            commands
                .spawn((
                    Hammer,
                    HammerIndex(slot),
                    OwningPlayer(player),
                    OrbitMotion::new(config, (slot * spacing) as f32, forward),
                    HammerState {
                        active: true,
                        ..Default::default()
                    },
                    BoundEnemy::default(),
                    Collider::ball(config.hammer_collider_radius),
                    Sensor,
                    Transform::from_translation(player_tf.translation),
                    Visibility::default(),
                ))
                .id()
        })
        .collect()
}

/// Deactivate a hammer: hide it, disable its collider, clear any in-flight
/// seek, and stop the orbit loop.
///
/// Idempotent — safe to call repeatedly or from racing paths (a natural
/// seek-completion and an external destroyed-notification may both land
/// here in the same frame).
pub fn deactivate_hammer(entity: &mut EntityCommands, state: &mut HammerState) {
    entity.insert(Visibility::Hidden);
    entity.insert(ColliderDisabled);
    entity.remove::<SeekMotion>();
    state.active = false;
}
