//! Typed signals in and out of the coordinator.
//!
//! Everything crosses the boundary as Bevy messages, delivered synchronously
//! within the frame's chained update: external intents come in as
//! [`AbilitySignal`], the hand animation reports its commit point as
//! [`ActionCommit`], and the coordinator publishes [`AbilityHook`] /
//! [`HammerLaunched`] for collaborators (VFX, projectile spawning) it
//! deliberately does not implement.

use bevy::prelude::*;

/// Request to activate the transcendence ability.
///
/// Fails closed (logged, no partial state) when a session is already active,
/// the player cannot be resolved, or the mana commit is denied.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ActivateAbility;

/// External gameplay intents routed to an active session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilitySignal {
    /// Cancel the whole session.
    Cancel,
    /// Use the next hammer as a projectile.
    Fire,
    /// Use the next hammer to control a nearby enemy.
    Control,
}

/// Commit-point notification from the in-progress hand action.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCommit {
    Fire,
    Control,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// External cancel signal.
    Cancelled,
    /// The mana attribute reached zero.
    ManaDepleted,
    /// The transcendence status effect was removed externally.
    EffectRemoved,
}

/// Request to tear the active session down.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndAbility(pub EndReason);

/// Hook points the coordinator invokes but does not implement.
///
/// Collaborators (animation blending, VFX, UI) subscribe to these; the core
/// carries no visual behaviour of its own.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityHook {
    /// A hammer was selected and the hand action started.
    PrepareToUse { is_fire: bool },
    /// A hammer was committed (fire or control) and the rest redistributed.
    HammerUsed,
    /// The session ended; all hammers are gone and enemies reverted.
    Ended,
}

/// Projectile hand-off: an armed hammer resolved into the fire branch.
///
/// The default consumer lives in [`crate::projectile`]; games can replace it
/// with their own projectile class.
#[derive(Message, Debug, Clone, Copy)]
pub struct HammerLaunched {
    pub hammer: Entity,
    /// World position the hammer left the orbit from.
    pub origin: Vec2,
    /// Unit launch direction (the player's forward at launch).
    pub direction: Vec2,
}
