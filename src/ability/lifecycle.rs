//! Session lifecycle: activation and teardown.
//!
//! Activation is transactional — every precondition is checked before any
//! state is created, and the mana spend is the commit point.  Teardown runs
//! from a single system regardless of why the session ends, so cancel, mana
//! depletion, and external effect removal all leave the world in the same
//! clean state within one update.

use bevy::prelude::*;

use crate::actor::{Allegiance, Mana, ManaDrain, Npc, PlayerCharacter, TranscendenceEffect};
use crate::config::AbilityConfig;
use crate::error::{AbilityError, AbilityResult};
use crate::hammer::{spawn_hammers, Hammer};

use super::session::TranscendenceSession;
use super::signals::{AbilityHook, ActivateAbility, EndAbility, EndReason};

// ── Activation ────────────────────────────────────────────────────────────────

/// Consume activation requests; at most one session can result.
pub fn activation_system(
    mut commands: Commands,
    mut requests: MessageReader<ActivateAbility>,
    config: Res<AbilityConfig>,
    session: Option<Res<TranscendenceSession>>,
    mut players: Query<(Entity, &Transform, &mut Mana), With<PlayerCharacter>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    match try_activate(&mut commands, &config, session.is_some(), &mut players) {
        Ok(()) => info!("transcendence activated"),
        Err(err) => warn!("transcendence activation rejected: {err}"),
    }
}

/// Run the activation transaction.
///
/// Order matters: the session check and player resolution are side-effect
/// free, and the mana spend is the last gate — once it succeeds the effect,
/// the drain, the hammers, and the session resource are all created.
fn try_activate(
    commands: &mut Commands,
    config: &AbilityConfig,
    already_active: bool,
    players: &mut Query<(Entity, &Transform, &mut Mana), With<PlayerCharacter>>,
) -> AbilityResult<()> {
    if already_active {
        return Err(AbilityError::AlreadyActive);
    }

    let (player, transform, mut mana) = players
        .single_mut()
        .map_err(|_| AbilityError::MissingPlayer)?;

    if !mana.try_spend(config.activation_mana_cost) {
        return Err(AbilityError::ResourceDenied {
            required: config.activation_mana_cost,
            available: mana.current,
        });
    }

    commands.entity(player).insert((
        TranscendenceEffect,
        ManaDrain {
            per_sec: config.mana_drain_per_sec,
        },
    ));
    let hammers = spawn_hammers(commands, config, player, transform, config.hammer_count);
    commands.insert_resource(TranscendenceSession::new(player, hammers));
    Ok(())
}

// ── End triggers ──────────────────────────────────────────────────────────────

/// Request teardown when the player's mana reaches zero.
///
/// Runs just before the teardown system in the chained update, so depletion
/// tears the session down within the same update it is observed.
pub fn mana_watch_system(
    session: Option<Res<TranscendenceSession>>,
    manas: Query<&Mana>,
    mut ends: MessageWriter<EndAbility>,
) {
    let Some(session) = session else {
        return;
    };
    if let Ok(mana) = manas.get(session.player) {
        if mana.is_depleted() {
            ends.write(EndAbility(EndReason::ManaDepleted));
        }
    }
}

/// Request teardown when the transcendence effect is removed externally
/// (dispel, duration expiry handled by an outer effect system).
///
/// Teardown itself also removes the effect, and that notification arrives one
/// frame later — possibly after a fresh activation has already re-applied the
/// effect.  A removal for an entity that carries the effect again is that
/// leftover, not an external dispel, and must not kill the new session.
pub fn effect_removed_watch_system(
    mut removed: RemovedComponents<TranscendenceEffect>,
    session: Option<Res<TranscendenceSession>>,
    effects: Query<(), With<TranscendenceEffect>>,
    mut ends: MessageWriter<EndAbility>,
) {
    let Some(session) = session else {
        removed.clear();
        return;
    };
    for entity in removed.read() {
        if entity == session.player && effects.get(entity).is_err() {
            ends.write(EndAbility(EndReason::EffectRemoved));
        }
    }
}

// ── Teardown ──────────────────────────────────────────────────────────────────

/// Tear the session down.
///
/// All end paths converge here: the hand action dies with the session
/// resource, the effect and drain come off the player, every still-controlled
/// enemy reverts to the enemy side, and every surviving hammer is destroyed.
/// Multiple end requests in one frame collapse into a single teardown; the
/// reader is fully drained so none of them survives to fire into a session
/// activated later.
pub fn end_ability_system(
    mut commands: Commands,
    mut ends: MessageReader<EndAbility>,
    mut hooks: MessageWriter<AbilityHook>,
    session: Option<Res<TranscendenceSession>>,
    players: Query<(), With<PlayerCharacter>>,
    mut enemies: Query<&mut Allegiance, (With<Npc>, Without<Hammer>)>,
    hammers: Query<(), With<Hammer>>,
) {
    let Some(EndAbility(reason)) = ends.read().last().copied() else {
        return;
    };
    let Some(session) = session else {
        return;
    };

    if players.get(session.player).is_ok() {
        commands
            .entity(session.player)
            .remove::<(TranscendenceEffect, ManaDrain)>();
    }

    for &enemy in &session.controlled_enemies {
        if let Ok(mut allegiance) = enemies.get_mut(enemy) {
            *allegiance = Allegiance::Enemy;
        }
    }

    for &hammer in &session.hammers {
        if hammers.get(hammer).is_ok() {
            commands.entity(hammer).despawn();
        }
    }

    commands.remove_resource::<TranscendenceSession>();
    hooks.write(AbilityHook::Ended);
    info!("transcendence ended: {reason:?}");
}
