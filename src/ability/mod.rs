//! Transcendence ability coordinator.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`signals`] | Message types in and out of the coordinator |
//! | [`session`] | The per-activation session resource and its counters |
//! | [`lifecycle`] | Activation transaction, end triggers, teardown |
//! | [`sequence`] | Signal dispatch, the hand action, commit and redistribution |
//!
//! [`TranscendencePlugin`] wires everything into a single chained `Update`
//! run: intents resolve before motion, motion before the gate, and the end
//! triggers immediately before teardown, so a depleted mana pool tears the
//! session down within the same update it is observed.

pub mod lifecycle;
pub mod sequence;
pub mod session;
pub mod signals;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use lifecycle::{
    activation_system, effect_removed_watch_system, end_ability_system, mana_watch_system,
};
pub use sequence::{action_commit_system, hand_action_system, signal_dispatch_system};
pub use session::{HandAction, HandActionKind, TranscendenceSession};
pub use signals::{
    AbilityHook, AbilitySignal, ActionCommit, ActivateAbility, EndAbility, EndReason,
    HammerLaunched,
};

use crate::actor::mana_drain_system;
use crate::config::AbilityConfig;
use crate::hammer::{
    attached_follow_system, hammer_orbit_system, hammer_seek_system, spin_up_check_system,
};
use crate::projectile;
use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

/// Everything the ability needs, in one plugin.
///
/// Registers the message types, the default [`AbilityConfig`], and the
/// gameplay systems in a fixed chain.  The chain order is load-bearing:
/// the gate polls the angle the orbit wrote this tick, and the mana watch
/// runs right before teardown.
pub struct TranscendencePlugin;

impl Plugin for TranscendencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AbilityConfig>()
            .add_message::<ActivateAbility>()
            .add_message::<AbilitySignal>()
            .add_message::<ActionCommit>()
            .add_message::<EndAbility>()
            .add_message::<AbilityHook>()
            .add_message::<HammerLaunched>()
            // Registered by the rapier plugin in the demo; headless tests get
            // it from here.  `add_message` is a no-op when already present.
            .add_message::<CollisionEvent>()
            .add_systems(
                Update,
                (
                    activation_system,
                    signal_dispatch_system,
                    hand_action_system,
                    action_commit_system,
                    hammer_orbit_system,
                    spin_up_check_system,
                    hammer_seek_system,
                    attached_follow_system,
                    projectile::spawn_hammer_projectiles,
                    projectile::despawn_stale_projectiles,
                    projectile::handle_projectile_hits,
                    mana_drain_system,
                    mana_watch_system,
                    effect_removed_watch_system,
                    end_ability_system,
                )
                    .chain(),
            );
    }
}
