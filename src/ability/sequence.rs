//! Use sequencing: signal dispatch, the hand action, and hammer commitment.
//!
//! A use is a two-step exchange.  An [`AbilitySignal`] first runs the
//! selection through [`prepare_to_use`]; if the selection is valid, a hand
//! action starts and, at its commit point, [`use_hammer`] arms the selected
//! hammer and redistributes the orbit angles of every unused one.  Rejected
//! selections are silent apart from a log line; nothing about the session
//! changes except the fire latch.

use bevy::prelude::*;

use crate::actor::{Allegiance, Npc, PlayerCharacter};
use crate::config::AbilityConfig;
use crate::error::{AbilityError, AbilityResult};
use crate::hammer::{start_spin_mode, BoundEnemy, Hammer, HammerState, OrbitMotion};

use super::session::{HandAction, HandActionKind, TranscendenceSession};
use super::signals::{AbilityHook, AbilitySignal, ActionCommit, EndAbility, EndReason};

// ── Signal dispatch ───────────────────────────────────────────────────────────

/// Route external intents to the active session.
///
/// Fire latches `pending_fire` before validating, so the latch is visible to
/// the commit even when the commit lands frames later.  A rejected selection
/// clears the latch; a stale hammer reference keeps it.
pub fn signal_dispatch_system(
    mut signals: MessageReader<AbilitySignal>,
    mut ends: MessageWriter<EndAbility>,
    mut hooks: MessageWriter<AbilityHook>,
    session: Option<ResMut<TranscendenceSession>>,
    hammers: Query<&HammerState, With<Hammer>>,
) {
    let Some(mut session) = session else {
        signals.clear();
        return;
    };

    for signal in signals.read() {
        match signal {
            AbilitySignal::Cancel => {
                ends.write(EndAbility(EndReason::Cancelled));
            }
            AbilitySignal::Fire => {
                session.pending_fire = true;
                start_prepare(&mut session, &hammers, &mut hooks);
            }
            AbilitySignal::Control => {
                start_prepare(&mut session, &hammers, &mut hooks);
            }
        }
    }
}

fn start_prepare(
    session: &mut TranscendenceSession,
    hammers: &Query<&HammerState, With<Hammer>>,
    hooks: &mut MessageWriter<AbilityHook>,
) {
    match prepare_to_use(session, hammers) {
        Ok(is_fire) => {
            hooks.write(AbilityHook::PrepareToUse { is_fire });
        }
        Err(err @ AbilityError::StaleReference { .. }) => {
            // Latch untouched: the reference may resolve on a later request.
            warn!("hammer prepare aborted: {err}");
        }
        Err(err) => {
            session.pending_fire = false;
            info!("hammer prepare rejected: {err}");
        }
    }
}

/// Validate the current selection and start the hand action.
///
/// Rejection cases, in order: the current slot's hammer entity is gone
/// (stale), another hand action is in flight, the hammer is already
/// mid-preparation, or the reserve rule (`current_slot + 1 >= hammer_count`)
/// holds the last slot back.  Returns whether the started action is a fire.
pub fn prepare_to_use(
    session: &mut TranscendenceSession,
    hammers: &Query<&HammerState, With<Hammer>>,
) -> AbilityResult<bool> {
    let slot = session.current_slot;
    let hammer = *session
        .hammers
        .get(slot)
        .ok_or(AbilityError::InvalidSelection { slot })?;
    let state = hammers
        .get(hammer)
        .map_err(|_| AbilityError::StaleReference {
            context: "prepare_to_use",
        })?;

    if session.hand_action.is_some()
        || state.preparing
        || slot + 1 >= session.hammer_count()
    {
        return Err(AbilityError::InvalidSelection { slot });
    }

    let is_fire = session.pending_fire;
    session.hand_action = Some(HandAction {
        kind: if is_fire {
            HandActionKind::Fire
        } else {
            HandActionKind::Control
        },
        elapsed: 0.0,
        committed: false,
    });
    Ok(is_fire)
}

// ── Hand action ───────────────────────────────────────────────────────────────

/// Tick the in-flight hand action.
///
/// Emits exactly one [`ActionCommit`] when the commit point is crossed and
/// clears the action when its total duration elapses, re-opening the
/// selection gate for the next use.
pub fn hand_action_system(
    time: Res<Time>,
    config: Res<AbilityConfig>,
    session: Option<ResMut<TranscendenceSession>>,
    mut commits: MessageWriter<ActionCommit>,
) {
    let Some(mut session) = session else {
        return;
    };
    let Some(action) = session.hand_action.as_mut() else {
        return;
    };

    action.elapsed += time.delta_secs();

    if !action.committed && action.elapsed >= config.hand_action_commit_secs {
        action.committed = true;
        commits.write(match action.kind {
            HandActionKind::Fire => ActionCommit::Fire,
            HandActionKind::Control => ActionCommit::Control,
        });
    }

    if action.elapsed >= config.hand_action_total_secs {
        session.hand_action = None;
    }
}

// ── Commit ────────────────────────────────────────────────────────────────────

/// Resolve hand-action commits into hammer uses.
pub fn action_commit_system(
    config: Res<AbilityConfig>,
    mut commits: MessageReader<ActionCommit>,
    mut hooks: MessageWriter<AbilityHook>,
    session: Option<ResMut<TranscendenceSession>>,
    players: Query<&Transform, (With<PlayerCharacter>, Without<Hammer>)>,
    enemies: Query<(Entity, &Transform, &Allegiance), (With<Npc>, Without<Hammer>)>,
    mut hammers: Query<(&mut HammerState, &mut OrbitMotion, &mut BoundEnemy), With<Hammer>>,
) {
    let Some(mut session) = session else {
        commits.clear();
        return;
    };

    for commit in commits.read() {
        match commit {
            ActionCommit::Fire => {
                use_hammer(&mut session, &mut hammers, &mut hooks, &config, false, None);
                session.pending_fire = false;
            }
            ActionCommit::Control => {
                send_hammer_to_control(
                    &mut session,
                    &players,
                    &enemies,
                    &mut hammers,
                    &mut hooks,
                    &config,
                );
            }
        }
    }
}

/// Angle boost (degrees) for the `aux`-th unused hammer after a use leaves
/// `remaining` hammers in orbit.
///
/// Integer division throughout: the gap each survivor closes is the integral
/// difference between the new and old even spacings, scaled by its position
/// in the walk order.  A positive sweep direction
/// subtracts a full revolution so the boost lands as a backward shift.
pub(crate) fn redistribution_boost(remaining: usize, aux: usize, direction: f32) -> f32 {
    let remaining = remaining.max(1);
    let gap = (360 / remaining) as i64 - (360 / (remaining + 1)) as i64;
    let mut boost = (gap * aux as i64) as f32;
    if direction > 0.0 {
        boost -= 360.0;
    }
    boost
}

/// Commit a hammer use: arm the next slot, redistribute the rest.
///
/// The armed hammer gets the bound enemy (control only) and a zero boost; each
/// surviving unused hammer gets a passive redistribution arm whose boost
/// re-spreads the remaining hammers toward even spacing.  Used hammers are
/// never touched again.
pub fn use_hammer(
    session: &mut TranscendenceSession,
    hammers: &mut Query<(&mut HammerState, &mut OrbitMotion, &mut BoundEnemy), With<Hammer>>,
    hooks: &mut MessageWriter<AbilityHook>,
    config: &AbilityConfig,
    control: bool,
    enemy: Option<Entity>,
) {
    if control && enemy.is_none() {
        return;
    }

    session.remaining_count = session.remaining_count.saturating_sub(1);

    let mut aux = 1usize;
    for (slot, &hammer) in session.hammers.iter().enumerate() {
        let Ok((mut state, mut orbit, mut bound)) = hammers.get_mut(hammer) else {
            continue;
        };

        if slot == session.next_slot {
            bound.0 = enemy;
            start_spin_mode(&mut orbit, &mut state, true, control, 0.0, config);
            session.current_slot = slot;
        } else if !state.used {
            let boost = redistribution_boost(session.remaining_count, aux, orbit.direction);
            start_spin_mode(&mut orbit, &mut state, false, false, boost, config);
            aux += 1;
        }
    }

    session.next_slot += 1;
    hooks.write(AbilityHook::HammerUsed);
    info!(
        "hammer used (control: {control}), {} remaining",
        session.remaining_count
    );
}

/// Control commit: claim the nearest-found controllable enemy and use a
/// hammer against it.
///
/// Eligible enemies are NPCs on the enemy side, inside the control radius,
/// and not already claimed by an earlier control use (claimed covers in-flight
/// hammers whose allegiance flip has not landed yet).  With no eligible enemy
/// the commit is a no-op and no hammer is consumed.
pub fn send_hammer_to_control(
    session: &mut TranscendenceSession,
    players: &Query<&Transform, (With<PlayerCharacter>, Without<Hammer>)>,
    enemies: &Query<(Entity, &Transform, &Allegiance), (With<Npc>, Without<Hammer>)>,
    hammers: &mut Query<(&mut HammerState, &mut OrbitMotion, &mut BoundEnemy), With<Hammer>>,
    hooks: &mut MessageWriter<AbilityHook>,
    config: &AbilityConfig,
) {
    let Ok(player_tf) = players.get(session.player) else {
        warn!("control commit aborted: player pose unavailable");
        return;
    };
    let origin = player_tf.translation.truncate();

    let target = enemies.iter().find(|(entity, transform, allegiance)| {
        **allegiance == Allegiance::Enemy
            && !session.is_controlled(*entity)
            && transform.translation.truncate().distance(origin) <= config.control_radius
    });

    let Some((enemy, _, _)) = target else {
        info!("control commit found no eligible enemy in range");
        return;
    };

    session.controlled_enemies.push(enemy);
    use_hammer(session, hammers, hooks, config, true, Some(enemy));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redistribution_gap_uses_integer_spacing_difference() {
        // 5 survivors: 360/5 - 360/6 = 72 - 60 = 12 per step.
        assert_eq!(redistribution_boost(5, 1, -1.0), 12.0);
        assert_eq!(redistribution_boost(5, 2, -1.0), 24.0);
        // 2 survivors: 360/2 - 360/3 = 180 - 120 = 60 per step.
        assert_eq!(redistribution_boost(2, 1, -1.0), 60.0);
        assert_eq!(redistribution_boost(2, 2, -1.0), 120.0);
    }

    #[test]
    fn positive_direction_shifts_by_a_negative_revolution() {
        assert_eq!(redistribution_boost(2, 1, 1.0), 60.0 - 360.0);
    }

    #[test]
    fn boosts_even_out_the_survivors() {
        // Hammers at slot * 60 for 6 slots; slot 0 is used.  Survivors start
        // at 60..300 and each gets gap * aux; resulting spacing must be the
        // new even spacing (mod 360).
        let remaining = 5usize;
        let old_spacing = 60.0;
        let mut angles: Vec<f32> = (1..6)
            .map(|slot| slot as f32 * old_spacing + redistribution_boost(remaining, slot, -1.0))
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in angles.windows(2) {
            assert_eq!(pair[1] - pair[0], (360 / remaining) as f32);
        }
    }
}
