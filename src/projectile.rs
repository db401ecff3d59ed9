//! Default consumer of the projectile hand-off.
//!
//! A launched hammer becomes a straight-flying sensor body that damages the
//! first NPC it touches.  Games wanting their own projectile class can skip
//! these systems and read [`HammerLaunched`](crate::ability::HammerLaunched)
//! themselves.

use crate::ability::HammerLaunched;
use crate::actor::{Npc, NpcHealth};
use crate::config::AbilityConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

#[derive(Component, Debug, Clone, Copy)]
pub struct HammerProjectile {
    pub age: f32,
    pub damage: f32,
}

/// Spawn a projectile body for every hammer launch this frame.
pub fn spawn_hammer_projectiles(
    mut commands: Commands,
    config: Res<AbilityConfig>,
    mut launched: MessageReader<HammerLaunched>,
) {
    for launch in launched.read() {
        let dir = launch.direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }

        let angle = dir.y.atan2(dir.x) - std::f32::consts::FRAC_PI_2;
        commands.spawn((
            HammerProjectile {
                age: 0.0,
                damage: config.projectile_damage,
            },
            Transform::from_translation(launch.origin.extend(0.2))
                .with_rotation(Quat::from_rotation_z(angle)),
            Visibility::default(),
            RigidBody::KinematicVelocityBased,
            Velocity {
                linvel: dir * config.projectile_speed,
                angvel: 0.0,
            },
            Collider::ball(config.projectile_collider_radius),
            Sensor,
            Ccd { enabled: true },
            ActiveCollisionTypes::DYNAMIC_KINEMATIC,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Age projectiles and despawn the expired ones.
pub fn despawn_stale_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<AbilityConfig>,
    mut projectiles: Query<(Entity, &mut HammerProjectile)>,
) {
    let dt = time.delta_secs();
    for (entity, mut projectile) in projectiles.iter_mut() {
        projectile.age += dt;
        if projectile.age >= config.projectile_lifetime {
            commands.entity(entity).despawn();
        }
    }
}

/// Resolve projectile collisions: damage the struck NPC, consume the
/// projectile, and despawn NPCs whose health reaches zero.
pub fn handle_projectile_hits(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    projectiles: Query<&HammerProjectile>,
    mut npcs: Query<(Entity, &mut NpcHealth), With<Npc>>,
) {
    let mut consumed: std::collections::HashSet<Entity> = Default::default();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        let projectile_entity = if projectiles.contains(e1) {
            e1
        } else if projectiles.contains(e2) {
            e2
        } else {
            continue;
        };

        if consumed.contains(&projectile_entity) {
            continue;
        }

        let other = if projectile_entity == e1 { e2 } else { e1 };
        let Ok((npc_entity, mut health)) = npcs.get_mut(other) else {
            continue;
        };

        let Ok(projectile) = projectiles.get(projectile_entity) else {
            continue;
        };

        consumed.insert(projectile_entity);
        commands.entity(projectile_entity).despawn();

        health.hp -= projectile.damage;
        if health.hp <= 0.0 {
            commands.entity(npc_entity).despawn();
        }
    }
}
