//! Headless integration tests for the transcendence ability.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no physics
//! stepping — and drive time manually through `TimeUpdateStrategy`, so every
//! scenario is deterministic.  Rapier components (colliders, sensors) are
//! inserted but inert without the physics plugin; collision-driven behaviour
//! is covered by writing `CollisionEvent` messages directly.
//!
//! Covered scenarios:
//! 1. Activation spawns evenly spaced hammers and commits the mana cost.
//! 2. Activation fails closed on insufficient mana and on double activation.
//! 3. A fire use decrements the counters and redistributes the survivors.
//! 4. The armed gate resolves exactly once, into a projectile launch.
//! 5. A control use converts the enemy and attaches the hammer.
//! 6. Cancel reverts controlled enemies and destroys every hammer.
//! 7. Mana depletion tears the session down within one update.
//! 8. The reserve rule and the preparing-hammer gate reject selections.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use transcendence::ability::{
    AbilitySignal, ActivateAbility, TranscendencePlugin, TranscendenceSession,
};
use transcendence::actor::{
    Allegiance, Mana, ManaDrain, Npc, NpcHealth, PlayerCharacter, TranscendenceEffect,
};
use transcendence::config::AbilityConfig;
use transcendence::hammer::{AttachedTo, BoundEnemy, HammerState, OrbitMotion, SeekMotion};
use transcendence::projectile::HammerProjectile;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headless app with three hammers and an instantaneous hand action, so a
/// signal commits within the frame it is dispatched.
fn test_app(hammer_count: usize) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(TranscendencePlugin);
    app.insert_resource(AbilityConfig {
        hammer_count,
        hand_action_commit_secs: 0.0,
        hand_action_total_secs: 0.0,
        ..Default::default()
    });
    // Zero-length ticks by default; tests that need motion switch to a real
    // step with `tick`.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.update(); // settle Time
    app
}

fn spawn_player(app: &mut App, mana: f32) -> Entity {
    app.world_mut()
        .spawn((
            PlayerCharacter,
            Allegiance::Player,
            Mana {
                current: mana,
                max: mana,
            },
            Transform::default(),
            Visibility::default(),
        ))
        .id()
}

fn spawn_enemy(app: &mut App, pos: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Npc,
            Allegiance::Enemy,
            NpcHealth::full(120.0),
            Transform::from_translation(pos.extend(0.0)),
            Visibility::default(),
        ))
        .id()
}

fn activate(app: &mut App) {
    app.world_mut().write_message(ActivateAbility);
    app.update();
}

fn signal(app: &mut App, s: AbilitySignal) {
    app.world_mut().write_message(s);
    app.update();
}

/// Advance `n` frames of `millis` each.
fn tick(app: &mut App, millis: u64, n: usize) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        millis,
    )));
    for _ in 0..n {
        app.update();
    }
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
}

fn session_hammers(app: &App) -> Vec<Entity> {
    app.world()
        .resource::<TranscendenceSession>()
        .hammers
        .clone()
}

fn player_mana(app: &App, player: Entity) -> f32 {
    app.world().get::<Mana>(player).map(|m| m.current).unwrap()
}

// ── Activation ────────────────────────────────────────────────────────────────

#[test]
fn activation_spawns_evenly_spaced_hammers_and_spends_mana() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 100.0);

    activate(&mut app);

    let config = app.world().resource::<AbilityConfig>().clone();
    assert_eq!(player_mana(&app, player), 100.0 - config.activation_mana_cost);
    assert!(app.world().get::<TranscendenceEffect>(player).is_some());
    assert!(app.world().get::<ManaDrain>(player).is_some());

    let hammers = session_hammers(&app);
    assert_eq!(hammers.len(), 3);
    for (slot, &hammer) in hammers.iter().enumerate() {
        let orbit = app.world().get::<OrbitMotion>(hammer).unwrap();
        assert_eq!(orbit.angle, slot as f32 * 120.0, "slot {slot}");
        let state = app.world().get::<HammerState>(hammer).unwrap();
        assert!(state.active && !state.used && !state.spinning);
    }

    let session = app.world().resource::<TranscendenceSession>();
    assert_eq!(session.remaining_count, 3);
    assert_eq!(session.next_slot, 0);
    assert_eq!(session.current_slot, 0);
}

#[test]
fn activation_fails_closed_on_insufficient_mana() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 5.0);

    activate(&mut app);

    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_none());
    assert_eq!(player_mana(&app, player), 5.0);
    assert!(app.world().get::<TranscendenceEffect>(player).is_none());
}

#[test]
fn double_activation_is_rejected_and_spends_nothing() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 100.0);

    activate(&mut app);
    let after_first = player_mana(&app, player);
    let hammers = session_hammers(&app);

    activate(&mut app);

    assert_eq!(player_mana(&app, player), after_first);
    assert_eq!(session_hammers(&app), hammers);
}

// ── Fire path ─────────────────────────────────────────────────────────────────

#[test]
fn fire_use_decrements_counters_and_redistributes_survivors() {
    let mut app = test_app(3);
    spawn_player(&mut app, 100.0);
    activate(&mut app);
    let hammers = session_hammers(&app);

    signal(&mut app, AbilitySignal::Fire);

    let session = app.world().resource::<TranscendenceSession>();
    assert_eq!(session.remaining_count, 2);
    assert_eq!(session.current_slot, 0);
    assert_eq!(session.next_slot, 1);
    assert!(!session.pending_fire);

    // Slot 0 is armed for the projectile branch.
    let armed = app.world().get::<HammerState>(hammers[0]).unwrap();
    assert!(armed.spinning && armed.preparing && !armed.control_mode);
    assert!(app.world().get::<BoundEnemy>(hammers[0]).unwrap().0.is_none());

    // Survivors get the redistribution arm: spinning, not preparing, and a
    // boost of (360/2 - 360/3) * aux on top of their initial angles (the
    // orbit's 360-degree wrap pulls 240 + 120 back to zero).
    let one = app.world().get::<OrbitMotion>(hammers[1]).unwrap();
    assert_eq!(one.angle, 120.0 + 60.0);
    let two = app.world().get::<OrbitMotion>(hammers[2]).unwrap();
    assert_eq!(two.angle, 0.0);
    for &survivor in &hammers[1..] {
        let state = app.world().get::<HammerState>(survivor).unwrap();
        assert!(state.spinning && !state.preparing && !state.used);
    }
}

#[test]
fn armed_gate_resolves_once_into_a_projectile_launch() {
    let mut app = test_app(3);
    spawn_player(&mut app, 100.0);
    activate(&mut app);
    let hammers = session_hammers(&app);

    signal(&mut app, AbilitySignal::Fire);

    // Small steps so the jammed armed speed (min * factor) cannot skip the
    // commit window between polls.
    let mut resolved_at = None;
    for i in 0..400 {
        tick(&mut app, 5, 1);
        let state = app.world().get::<HammerState>(hammers[0]).unwrap();
        if state.used {
            resolved_at = Some(i);
            break;
        }
    }
    assert!(resolved_at.is_some(), "gate never resolved");

    let state = app.world().get::<HammerState>(hammers[0]).unwrap();
    assert!(state.used && !state.active && !state.spinning && !state.preparing);

    let mut projectiles = app
        .world_mut()
        .query::<&HammerProjectile>();
    assert_eq!(projectiles.iter(app.world()).count(), 1);

    // A used hammer is frozen: further frames leave its orbit untouched.
    let angle_before = app.world().get::<OrbitMotion>(hammers[0]).unwrap().angle;
    tick(&mut app, 5, 20);
    let angle_after = app.world().get::<OrbitMotion>(hammers[0]).unwrap().angle;
    assert_eq!(angle_before, angle_after);
}

#[test]
fn second_use_is_blocked_while_the_first_is_still_preparing() {
    let mut app = test_app(3);
    spawn_player(&mut app, 100.0);
    activate(&mut app);

    signal(&mut app, AbilitySignal::Fire);
    assert_eq!(
        app.world().resource::<TranscendenceSession>().remaining_count,
        2
    );

    // The gate has not had time to resolve; slot 0 is still preparing, so the
    // selection is rejected and the fire latch cleared.
    signal(&mut app, AbilitySignal::Fire);
    let session = app.world().resource::<TranscendenceSession>();
    assert_eq!(session.remaining_count, 2);
    assert_eq!(session.next_slot, 1);
    assert!(!session.pending_fire);
}

// ── Control path ──────────────────────────────────────────────────────────────

#[test]
fn control_use_converts_the_enemy_and_attaches_the_hammer() {
    let mut app = test_app(3);
    spawn_player(&mut app, 100.0);
    let enemy = spawn_enemy(&mut app, Vec2::new(300.0, 0.0));
    activate(&mut app);
    let hammers = session_hammers(&app);

    signal(&mut app, AbilitySignal::Control);

    let session = app.world().resource::<TranscendenceSession>();
    assert!(session.is_controlled(enemy));
    let armed = app.world().get::<HammerState>(hammers[0]).unwrap();
    assert!(armed.spinning && armed.preparing && armed.control_mode);
    assert_eq!(app.world().get::<BoundEnemy>(hammers[0]).unwrap().0, Some(enemy));

    // Gate resolve, then the seek flight up to attachment.
    let mut attached = false;
    for _ in 0..600 {
        tick(&mut app, 5, 1);
        if app.world().get::<AttachedTo>(hammers[0]).is_some() {
            attached = true;
            break;
        }
    }
    assert!(attached, "hammer never attached");

    assert_eq!(
        *app.world().get::<Allegiance>(enemy).unwrap(),
        Allegiance::Player
    );
    assert!(app.world().get::<SeekMotion>(hammers[0]).is_none());
    let state = app.world().get::<HammerState>(hammers[0]).unwrap();
    assert!(state.used && !state.active);

    // Attached hammer follows the target's pose with the seat offset.
    let config = app.world().resource::<AbilityConfig>().clone();
    let hammer_pos = app
        .world()
        .get::<Transform>(hammers[0])
        .unwrap()
        .translation
        .truncate();
    assert!((hammer_pos - Vec2::new(300.0, config.attach_seat_offset)).length() < 1e-3);
}

#[test]
fn control_commit_with_no_enemy_in_range_consumes_nothing() {
    let mut app = test_app(3);
    spawn_player(&mut app, 100.0);
    // Far outside the control radius.
    spawn_enemy(&mut app, Vec2::new(50_000.0, 0.0));
    activate(&mut app);

    signal(&mut app, AbilitySignal::Control);

    let session = app.world().resource::<TranscendenceSession>();
    assert_eq!(session.remaining_count, 3);
    assert_eq!(session.next_slot, 0);
    assert!(session.controlled_enemies.is_empty());
}

// ── Teardown ──────────────────────────────────────────────────────────────────

#[test]
fn cancel_reverts_controlled_enemies_and_destroys_hammers() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 100.0);
    let enemy = spawn_enemy(&mut app, Vec2::new(300.0, 0.0));
    activate(&mut app);
    let hammers = session_hammers(&app);

    signal(&mut app, AbilitySignal::Control);
    for _ in 0..600 {
        tick(&mut app, 5, 1);
        if app.world().get::<AttachedTo>(hammers[0]).is_some() {
            break;
        }
    }
    assert_eq!(
        *app.world().get::<Allegiance>(enemy).unwrap(),
        Allegiance::Player
    );

    signal(&mut app, AbilitySignal::Cancel);

    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_none());
    assert_eq!(
        *app.world().get::<Allegiance>(enemy).unwrap(),
        Allegiance::Enemy
    );
    for &hammer in &hammers {
        assert!(app.world().get_entity(hammer).is_err());
    }
    assert!(app.world().get::<TranscendenceEffect>(player).is_none());
    assert!(app.world().get::<ManaDrain>(player).is_none());
}

#[test]
fn mana_depletion_tears_the_session_down_within_one_update() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 20.5);
    activate(&mut app);
    assert!(player_mana(&app, player) < 1.0);

    // One full-second frame drains the remainder; the watch and the teardown
    // run later in the same chained update.
    tick(&mut app, 1000, 1);

    assert_eq!(player_mana(&app, player), 0.0);
    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_none());
    assert!(app.world().get::<TranscendenceEffect>(player).is_none());
}

#[test]
fn reactivation_right_after_an_end_survives_stale_signals() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 100.0);
    activate(&mut app);

    // Cancel and mana depletion land in the same update, so two end requests
    // are queued while only one teardown runs.
    app.world_mut().get_mut::<Mana>(player).unwrap().current = 0.5;
    app.world_mut().write_message(AbilitySignal::Cancel);
    tick(&mut app, 1000, 1);
    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_none());

    // Refill and re-activate on the very next update.  Neither the unread
    // second end request nor the teardown's own effect-removal notification
    // may tear the fresh session down.
    app.world_mut().get_mut::<Mana>(player).unwrap().current = 100.0;
    activate(&mut app);
    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_some());

    app.update();
    app.update();
    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_some());
    assert!(app.world().get::<TranscendenceEffect>(player).is_some());
}

#[test]
fn external_effect_removal_ends_the_session() {
    let mut app = test_app(3);
    let player = spawn_player(&mut app, 100.0);
    activate(&mut app);

    app.world_mut()
        .entity_mut(player)
        .remove::<TranscendenceEffect>();
    app.update();

    assert!(app
        .world()
        .get_resource::<TranscendenceSession>()
        .is_none());
}

// ── Reserve rule ──────────────────────────────────────────────────────────────

#[test]
fn reserve_rule_holds_the_last_hammer_back() {
    // With a single hammer, current_slot + 1 >= count from the start: no use
    // can ever begin.
    let mut app = test_app(1);
    spawn_player(&mut app, 100.0);
    activate(&mut app);

    signal(&mut app, AbilitySignal::Fire);

    let session = app.world().resource::<TranscendenceSession>();
    assert_eq!(session.remaining_count, 1);
    assert_eq!(session.next_slot, 0);
    assert!(session.hand_action.is_none());
    assert!(!session.pending_fire);
}
