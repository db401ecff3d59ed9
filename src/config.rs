//! Runtime ability configuration loaded from `assets/transcendence.toml`.
//!
//! [`AbilityConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_ability_config`] reads
//! `assets/transcendence.toml` and overwrites the defaults with any values
//! present in the file.  Missing keys fall back to the compile-time defaults,
//! so a minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<AbilityConfig>` to any system parameter list and read
//! values with `config.min_rotation_speed`, `config.commit_angle`, etc.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable ability and demo configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/transcendence.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    // ── Orbit Motion ─────────────────────────────────────────────────────────
    pub min_rotation_speed: f32,
    pub max_rotation_speed: f32,
    pub min_rotation_radius: f32,
    pub max_rotation_radius: f32,
    pub expand_speed_step: f32,
    pub contract_speed_step: f32,
    pub radius_step: f32,
    pub variance_tolerance: f32,

    // ── Spin-Up Gate ─────────────────────────────────────────────────────────
    pub spin_min_speed_factor: f32,
    pub spin_min_radius_divisor: f32,
    pub spin_check_delay: f32,
    pub commit_angle: f32,
    pub commit_tolerance: f32,

    // ── Enemy Seek ───────────────────────────────────────────────────────────
    pub seek_window: f32,
    pub seek_attach_fraction: f32,
    pub attach_seat_offset: f32,

    // ── Ability Coordination ─────────────────────────────────────────────────
    pub hammer_count: usize,
    pub control_radius: f32,
    pub activation_mana_cost: f32,
    pub mana_drain_per_sec: f32,
    pub mana_max: f32,
    pub hand_action_commit_secs: f32,
    pub hand_action_total_secs: f32,

    // ── Hammer Body / Projectile ─────────────────────────────────────────────
    pub hammer_collider_radius: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_collider_radius: f32,
    pub projectile_damage: f32,

    // ── Demo World ───────────────────────────────────────────────────────────
    pub npc_max_hp: f32,
    pub demo_npc_count: usize,
    pub demo_npc_ring_radius: f32,
    pub player_collider_radius: f32,
    pub demo_thrust_speed: f32,
    pub demo_turn_rate: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            // Orbit Motion
            min_rotation_speed: MIN_ROTATION_SPEED,
            max_rotation_speed: MAX_ROTATION_SPEED,
            min_rotation_radius: MIN_ROTATION_RADIUS,
            max_rotation_radius: MAX_ROTATION_RADIUS,
            expand_speed_step: EXPAND_SPEED_STEP,
            contract_speed_step: CONTRACT_SPEED_STEP,
            radius_step: RADIUS_STEP,
            variance_tolerance: VARIANCE_TOLERANCE,
            // Spin-Up Gate
            spin_min_speed_factor: SPIN_MIN_SPEED_FACTOR,
            spin_min_radius_divisor: SPIN_MIN_RADIUS_DIVISOR,
            spin_check_delay: SPIN_CHECK_DELAY,
            commit_angle: COMMIT_ANGLE,
            commit_tolerance: COMMIT_TOLERANCE,
            // Enemy Seek
            seek_window: SEEK_WINDOW,
            seek_attach_fraction: SEEK_ATTACH_FRACTION,
            attach_seat_offset: ATTACH_SEAT_OFFSET,
            // Ability Coordination
            hammer_count: HAMMER_COUNT,
            control_radius: CONTROL_RADIUS,
            activation_mana_cost: ACTIVATION_MANA_COST,
            mana_drain_per_sec: MANA_DRAIN_PER_SEC,
            mana_max: MANA_MAX,
            hand_action_commit_secs: HAND_ACTION_COMMIT_SECS,
            hand_action_total_secs: HAND_ACTION_TOTAL_SECS,
            // Hammer Body / Projectile
            hammer_collider_radius: HAMMER_COLLIDER_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME,
            projectile_collider_radius: PROJECTILE_COLLIDER_RADIUS,
            projectile_damage: PROJECTILE_DAMAGE,
            // Demo World
            npc_max_hp: NPC_MAX_HP,
            demo_npc_count: DEMO_NPC_COUNT,
            demo_npc_ring_radius: DEMO_NPC_RING_RADIUS,
            player_collider_radius: PLAYER_COLLIDER_RADIUS,
            demo_thrust_speed: DEMO_THRUST_SPEED,
            demo_turn_rate: DEMO_TURN_RATE,
        }
    }
}

/// Startup system: attempt to load `assets/transcendence.toml` and overwrite
/// the `AbilityConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the game.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_ability_config(mut config: ResMut<AbilityConfig>) {
    let path = "assets/transcendence.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<AbilityConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded ability config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}
