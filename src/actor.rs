//! Actor-layer components shared by the ability core and the demo world.
//!
//! These model the contract surfaces the coordinator needs from its external
//! collaborators: a pose provider (player transform + forward/right vectors),
//! an allegiance tag that can be read and rewritten, a numeric mana attribute
//! with a drain effect, and the transcendence status-effect marker whose
//! removal the coordinator watches.

use bevy::prelude::*;

// ── Markers ───────────────────────────────────────────────────────────────────

/// Marker component for the player character that owns the hammers.
#[derive(Component)]
pub struct PlayerCharacter;

/// Marker for non-player characters eligible for control.
#[derive(Component)]
pub struct Npc;

// ── Allegiance tag ────────────────────────────────────────────────────────────

/// Which side an actor fights for.
///
/// This is the tag the control path rewrites: converting an enemy flips its
/// allegiance to `Player`; ending the ability reverts every converted enemy
/// back to `Enemy`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    Player,
    Enemy,
}

// ── Mana attribute ────────────────────────────────────────────────────────────

/// Numeric mana attribute for the player character.
#[derive(Component, Debug, Clone, Copy)]
pub struct Mana {
    pub current: f32,
    pub max: f32,
}

impl Mana {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Spend `amount` if available.  Returns `false` (and leaves the value
    /// untouched) when there is not enough mana.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Continuous mana drain applied for the lifetime of the transcendence
/// effect.  Removed together with the effect when the ability ends.
#[derive(Component, Debug, Clone, Copy)]
pub struct ManaDrain {
    pub per_sec: f32,
}

/// Drains mana on every actor carrying a [`ManaDrain`] effect, clamped at
/// zero.  The coordinator's mana watch reacts to the value reaching zero.
pub fn mana_drain_system(time: Res<Time>, mut query: Query<(&mut Mana, &ManaDrain)>) {
    let dt = time.delta_secs();
    for (mut mana, drain) in query.iter_mut() {
        if mana.current > 0.0 {
            mana.current = (mana.current - drain.per_sec * dt).max(0.0);
        }
    }
}

// ── Status effect ─────────────────────────────────────────────────────────────

/// Status-effect marker applied to the player while transcendence is active.
///
/// External systems may remove this component to cancel the ability (duration
/// effects, dispels); the coordinator observes the removal and tears the
/// session down.
#[derive(Component)]
pub struct TranscendenceEffect;

// ── NPC health (demo / projectile hand-off) ───────────────────────────────────

/// Hit points for demo NPCs struck by launched hammers.
#[derive(Component, Debug, Clone, Copy)]
pub struct NpcHealth {
    pub hp: f32,
    pub max_hp: f32,
}

impl NpcHealth {
    pub fn full(max_hp: f32) -> Self {
        Self { hp: max_hp, max_hp }
    }
}

// ── Pose helpers ──────────────────────────────────────────────────────────────

/// Unit forward vector of an actor (local +Y in the top-down plane).
#[inline]
pub fn forward_of(transform: &Transform) -> Vec2 {
    transform.rotation.mul_vec3(Vec3::Y).truncate()
}

/// Unit right vector of an actor (local +X in the top-down plane).
#[inline]
pub fn right_of(transform: &Transform) -> Vec2 {
    transform.rotation.mul_vec3(Vec3::X).truncate()
}
