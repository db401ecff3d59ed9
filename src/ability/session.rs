//! Active-session bookkeeping.
//!
//! The session resource exists exactly while the ability is active: inserted
//! on activation, removed on teardown.  All slot counters live here; per-hammer
//! motion state lives on the hammer entities themselves.

use bevy::prelude::*;

/// Which hand action is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandActionKind {
    Fire,
    Control,
}

/// A scheduled hand action: commits partway through, finishes later.
///
/// Stand-in for an animation-driven commit; timing is configurable so tests
/// can tick through it deterministically.
#[derive(Debug, Clone, Copy)]
pub struct HandAction {
    pub kind: HandActionKind,
    pub elapsed: f32,
    pub committed: bool,
}

/// Coordinator state for one activation of the ability.
///
/// `hammers` is slot-ordered and never shrinks; destroyed hammers keep their
/// slot so the counters stay meaningful.  `current_slot` is the slot most
/// recently armed, `next_slot` the one the next use will arm.
#[derive(Resource, Debug)]
pub struct TranscendenceSession {
    /// Owning player.
    pub player: Entity,
    /// Hammer entities in slot order.
    pub hammers: Vec<Entity>,
    /// Hammers not yet committed.
    pub remaining_count: usize,
    /// Slot the next use will arm.
    pub next_slot: usize,
    /// Slot most recently armed.
    pub current_slot: usize,
    /// Latched fire intent, cleared on commit or on a rejected selection.
    pub pending_fire: bool,
    /// Enemies claimed by a control use, including ones whose hammer is still
    /// in flight.  Reverted on teardown.
    pub controlled_enemies: Vec<Entity>,
    /// Hand action in flight, if any.
    pub hand_action: Option<HandAction>,
}

impl TranscendenceSession {
    pub fn new(player: Entity, hammers: Vec<Entity>) -> Self {
        let remaining_count = hammers.len();
        Self {
            player,
            hammers,
            remaining_count,
            next_slot: 0,
            current_slot: 0,
            pending_fire: false,
            controlled_enemies: Vec::new(),
            hand_action: None,
        }
    }

    /// Total hammer count for this activation (used slots included).
    pub fn hammer_count(&self) -> usize {
        self.hammers.len()
    }

    pub fn is_controlled(&self, enemy: Entity) -> bool {
        self.controlled_enemies.contains(&enemy)
    }
}
