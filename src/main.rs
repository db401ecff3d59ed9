use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use transcendence::ability::{AbilitySignal, ActivateAbility, TranscendencePlugin};
use transcendence::actor::{Allegiance, Mana, Npc, NpcHealth, PlayerCharacter};
use transcendence::config::{load_ability_config, AbilityConfig};

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Configure Rapier physics: disable gravity for the top-down world.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn spawn_player(mut commands: Commands, config: Res<AbilityConfig>) {
    commands.spawn((
        PlayerCharacter,
        Allegiance::Player,
        Mana::full(config.mana_max),
        Transform::default(),
        Visibility::default(),
        RigidBody::KinematicVelocityBased,
        Velocity::zero(),
        Collider::ball(config.player_collider_radius),
    ));
}

/// Scatter NPCs on a ring around the origin with a little radial jitter.
fn spawn_npc_ring(mut commands: Commands, config: Res<AbilityConfig>) {
    let mut rng = rand::thread_rng();
    let count = config.demo_npc_count.max(1);

    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let radius = config.demo_npc_ring_radius * rng.gen_range(0.8..1.2);
        let pos = Vec2::from_angle(angle) * radius;

        commands.spawn((
            Npc,
            Allegiance::Enemy,
            NpcHealth::full(config.npc_max_hp),
            Transform::from_translation(pos.extend(0.0)),
            Visibility::default(),
            RigidBody::Dynamic,
            Velocity::zero(),
            Collider::ball(config.player_collider_radius),
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Map demo keys onto ability messages: T activates, F fires, C controls,
/// X cancels.
fn ability_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut activations: MessageWriter<ActivateAbility>,
    mut signals: MessageWriter<AbilitySignal>,
) {
    if keys.just_pressed(KeyCode::KeyT) {
        activations.write(ActivateAbility);
    }
    if keys.just_pressed(KeyCode::KeyF) {
        signals.write(AbilitySignal::Fire);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        signals.write(AbilitySignal::Control);
    }
    if keys.just_pressed(KeyCode::KeyX) {
        signals.write(AbilitySignal::Cancel);
    }
}

/// W thrusts along the player's facing; A/D turn.  The orbit's
/// expand/contract heuristic reacts to the heading changes this produces.
fn player_movement_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<AbilityConfig>,
    mut players: Query<(&mut Transform, &mut Velocity), With<PlayerCharacter>>,
) {
    let Ok((mut transform, mut velocity)) = players.single_mut() else {
        return;
    };

    let mut turn = 0.0;
    if keys.pressed(KeyCode::KeyA) {
        turn += 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        turn -= 1.0;
    }
    if turn != 0.0 {
        transform.rotate_z(turn * config.demo_turn_rate * time.delta_secs());
    }

    let forward = transform.rotation.mul_vec3(Vec3::Y).truncate();
    velocity.linvel = if keys.pressed(KeyCode::KeyW) {
        forward * config.demo_thrust_speed
    } else {
        Vec2::ZERO
    };
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Transcendence Hammer".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // pixels_per_meter(1.0) keeps world units identical to the tuning
        // constants, which are written in screen-space units.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(TranscendencePlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                load_ability_config,
                setup_camera.after(load_ability_config),
                spawn_player.after(load_ability_config),
                spawn_npc_ring.after(load_ability_config),
                setup_physics_config,
            ),
        )
        .add_systems(Update, (ability_input_system, player_movement_system))
        .run();
}
