//! Enemy seek and attachment.
//!
//! Once the spin-up gate resolves into the control branch, the hammer flies
//! from its current position toward the bound enemy with a time-normalised
//! lerp.  Attachment happens at `alpha >= attach_fraction / window` — well
//! before full convergence, so the hammer visibly snaps onto the target from
//! mid-flight.  Attaching flips the enemy's allegiance to the player's side.

use crate::actor::{Allegiance, Npc};
use crate::config::AbilityConfig;
use bevy::prelude::*;

use super::deactivate_hammer;
use super::state::{AttachedTo, BoundEnemy, Hammer, HammerState, SeekMotion};

/// Advance every seeking hammer toward its bound enemy.
///
/// A stale or missing enemy aborts the seek immediately and deactivates only
/// the affected hammer; the rest of the session is untouched.
pub fn hammer_seek_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<AbilityConfig>,
    mut enemies: Query<(&Transform, &mut Allegiance), (With<Npc>, Without<Hammer>)>,
    mut hammers: Query<
        (
            Entity,
            &BoundEnemy,
            &mut SeekMotion,
            &mut HammerState,
            &mut Transform,
        ),
        With<Hammer>,
    >,
) {
    let dt = time.delta_secs();
    for (entity, bound, mut seek, mut state, mut transform) in hammers.iter_mut() {
        let mut target = None;
        if let Some(enemy) = bound.0 {
            if let Ok(found) = enemies.get_mut(enemy) {
                target = Some((enemy, found));
            }
        }
        let Some((enemy, (enemy_tf, mut allegiance))) = target else {
            deactivate_hammer(&mut commands.entity(entity), &mut state);
            commands.entity(entity).remove::<SeekMotion>();
            continue;
        };

        seek.elapsed += dt;
        let alpha = (seek.elapsed / seek.window).clamp(0.0, 1.0);

        let current = transform.translation.truncate();
        let enemy_pos = enemy_tf.translation.truncate();
        let new_pos = current.lerp(enemy_pos, alpha);
        transform.translation = new_pos.extend(transform.translation.z);

        // "Close enough" threshold — intentionally far below alpha == 1.
        if alpha >= config.seek_attach_fraction / seek.window {
            *allegiance = Allegiance::Player;

            // Snap to the target pose (scale untouched) and seat the hammer
            // with a local offset; the follow system keeps it pinned.
            let offset = Vec2::new(0.0, config.attach_seat_offset);
            let world_offset = enemy_tf.rotation.mul_vec3(offset.extend(0.0)).truncate();
            transform.translation = (enemy_pos + world_offset).extend(transform.translation.z);
            transform.rotation = enemy_tf.rotation;

            commands
                .entity(entity)
                .remove::<SeekMotion>()
                .insert(AttachedTo {
                    target: enemy,
                    local_offset: offset,
                });
        }
    }
}

/// Keep attached hammers rigidly pinned to their converted target.
///
/// If the target is destroyed the hammer deactivates — the same path an
/// external destroyed-notification would take, and safe to hit repeatedly.
pub fn attached_follow_system(
    mut commands: Commands,
    targets: Query<&Transform, (With<Npc>, Without<Hammer>)>,
    mut hammers: Query<(Entity, &AttachedTo, &mut HammerState, &mut Transform), With<Hammer>>,
) {
    for (entity, attached, mut state, mut transform) in hammers.iter_mut() {
        let Ok(target_tf) = targets.get(attached.target) else {
            deactivate_hammer(&mut commands.entity(entity), &mut state);
            commands.entity(entity).remove::<AttachedTo>();
            continue;
        };

        let world_offset = target_tf
            .rotation
            .mul_vec3(attached.local_offset.extend(0.0))
            .truncate();
        transform.translation =
            (target_tf.translation.truncate() + world_offset).extend(transform.translation.z);
        transform.rotation = target_tf.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Bare app with manually advanced time; no plugins, so the clock keeps
    /// exactly what each step sets.
    fn seek_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<AbilityConfig>();
        app.add_systems(Update, hammer_seek_system);
        app
    }

    fn step(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    fn spawn_seeking_hammer(app: &mut App, enemy: Entity, window: f32) -> Entity {
        app.world_mut()
            .spawn((
                Hammer,
                HammerState {
                    used: true,
                    ..Default::default()
                },
                BoundEnemy(Some(enemy)),
                SeekMotion {
                    elapsed: 0.0,
                    window,
                },
                Transform::default(),
            ))
            .id()
    }

    #[test]
    fn attachment_lands_at_the_close_enough_threshold_not_full_convergence() {
        let mut app = seek_app();
        let enemy = app
            .world_mut()
            .spawn((
                Npc,
                Allegiance::Enemy,
                Transform::from_translation(Vec3::new(400.0, 0.0, 0.0)),
            ))
            .id();
        let hammer = spawn_seeking_hammer(&mut app, enemy, 2.0);

        // Threshold is alpha >= 0.3 / window = 0.15, reached at elapsed 0.3 s
        // for the default window — far short of alpha == 1.
        let mut elapsed = 0.0_f32;
        for _ in 0..400 {
            step(&mut app, 10);
            elapsed += 0.01;
            if app.world().get::<AttachedTo>(hammer).is_some() {
                break;
            }
        }
        assert!(
            (elapsed - 0.3).abs() < 0.02,
            "attached at elapsed {elapsed}, expected the 0.3 s threshold"
        );

        assert_eq!(
            *app.world().get::<Allegiance>(enemy).unwrap(),
            Allegiance::Player
        );
        assert!(app.world().get::<SeekMotion>(hammer).is_none());

        // Snap seats the hammer on the target with the local offset rather
        // than leaving it at the partially converged lerp position.
        let config = app.world().resource::<AbilityConfig>().clone();
        let pos = app
            .world()
            .get::<Transform>(hammer)
            .unwrap()
            .translation
            .truncate();
        assert!((pos - Vec2::new(400.0, config.attach_seat_offset)).length() < 1e-3);
    }

    #[test]
    fn stale_enemy_aborts_the_seek_without_attaching() {
        let mut app = seek_app();
        let enemy = app
            .world_mut()
            .spawn((
                Npc,
                Allegiance::Enemy,
                Transform::from_translation(Vec3::new(400.0, 0.0, 0.0)),
            ))
            .id();
        let hammer = spawn_seeking_hammer(&mut app, enemy, 2.0);

        step(&mut app, 10);
        app.world_mut().despawn(enemy);
        step(&mut app, 10);

        assert!(app.world().get::<AttachedTo>(hammer).is_none());
        assert!(app.world().get::<SeekMotion>(hammer).is_none());
        let state = app.world().get::<HammerState>(hammer).unwrap();
        assert!(!state.active);
    }
}
