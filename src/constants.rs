//! Centralised gameplay constants for the transcendence ability.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::AbilityConfig`] mirrors every constant and lets
//! `assets/transcendence.toml` override any subset at startup.

// ── Orbit Motion ──────────────────────────────────────────────────────────────

/// Slowest orbital sweep speed (degrees per second).
///
/// Reached after sustained contraction (tight turns, spin-up). While a hammer
/// is armed this floor is multiplied by [`SPIN_MIN_SPEED_FACTOR`], which is
/// what produces the fast pre-commit spin.
pub const MIN_ROTATION_SPEED: f32 = 180.0;

/// Fastest orbital sweep speed (degrees per second) outside spin-up.
pub const MAX_ROTATION_SPEED: f32 = 350.0;

/// Tightest orbit radius (world units). Halved while a hammer is armed.
pub const MIN_ROTATION_RADIUS: f32 = 70.0;

/// Widest orbit radius (world units), reached during sustained expansion.
pub const MAX_ROTATION_RADIUS: f32 = 200.0;

/// Speed gained per orbit tick while expanding.
///
/// Expansion is three times faster than contraction, so hammers flare out
/// quickly when the player commits to a heading and settle back gradually.
pub const EXPAND_SPEED_STEP: f32 = 3.0;

/// Speed lost per orbit tick while contracting.
pub const CONTRACT_SPEED_STEP: f32 = 1.0;

/// Radius change per orbit tick, in both directions.
pub const RADIUS_STEP: f32 = 1.0;

/// Facing-change tolerance for the dot-variance heuristic.
///
/// Each tick the orbit compares the previous frame's player forward vector
/// against the current right vector.  A dot product within this distance of
/// zero means the stale forward is nearly perpendicular to the current right
/// — i.e. the player is holding a heading — and the orbit contracts.
pub const VARIANCE_TOLERANCE: f32 = 0.016;

// ── Spin-Up Gate ──────────────────────────────────────────────────────────────

/// Multiplier applied to the minimum rotation speed while a hammer is armed.
///
/// 180 × 6 = 1080 deg/s — far above [`MAX_ROTATION_SPEED`], so the
/// min-dominant clamp jams the armed hammer at this speed (≈3 rev/s).
pub const SPIN_MIN_SPEED_FACTOR: f32 = 6.0;

/// Divisor applied to the minimum orbit radius while a hammer is armed.
pub const SPIN_MIN_RADIUS_DIVISOR: f32 = 2.0;

/// Delay before the armed gate starts polling the commit angle (seconds).
pub const SPIN_CHECK_DELAY: f32 = 0.20;

/// Relative bearing (degrees, absolute value) at which an armed hammer
/// commits.  Forces the strike to leave from a consistent window in front of
/// the player regardless of orbit direction.
pub const COMMIT_ANGLE: f32 = 120.0;

/// Half-width of the commit window around [`COMMIT_ANGLE`] (degrees).
pub const COMMIT_TOLERANCE: f32 = 5.0;

// ── Enemy Seek ────────────────────────────────────────────────────────────────

/// Smoothing window for the seek interpolation (seconds).
///
/// `alpha = elapsed / SEEK_WINDOW`, clamped to \[0, 1\].
pub const SEEK_WINDOW: f32 = 2.0;

/// Seek terminates when `alpha >= SEEK_ATTACH_FRACTION / SEEK_WINDOW`.
///
/// Deliberately well below full convergence (0.15 for the default window):
/// the hammer snaps onto the enemy while still visibly in flight.
pub const SEEK_ATTACH_FRACTION: f32 = 0.3;

/// Local offset applied after attaching, seating the hammer on its target.
pub const ATTACH_SEAT_OFFSET: f32 = 80.0;

// ── Ability Coordination ──────────────────────────────────────────────────────

/// Number of hammers spawned per activation.
pub const HAMMER_COUNT: usize = 6;

/// Search radius around the player when looking for an enemy to control.
pub const CONTROL_RADIUS: f32 = 5000.0;

/// Mana committed up-front when the ability activates.
pub const ACTIVATION_MANA_COST: f32 = 20.0;

/// Mana drained per second while the transcendence effect is active.
/// The ability ends the moment mana reaches zero.
pub const MANA_DRAIN_PER_SEC: f32 = 8.0;

/// Default maximum mana for the player character.
pub const MANA_MAX: f32 = 100.0;

/// Seconds into the hand action at which the commit event fires.
///
/// Stand-in for the fire/control hand animation's notify window.
pub const HAND_ACTION_COMMIT_SECS: f32 = 0.45;

/// Total duration of the hand action (seconds).  Another hammer cannot be
/// prepared until the action finishes.
pub const HAND_ACTION_TOTAL_SECS: f32 = 0.90;

// ── Hammer Body ───────────────────────────────────────────────────────────────

/// Sensor collider radius of an orbiting hammer (world units).
pub const HAMMER_COLLIDER_RADIUS: f32 = 12.0;

// ── Projectile Hand-Off ───────────────────────────────────────────────────────

/// Launch speed of a hammer fired as a projectile (world units / s).
pub const PROJECTILE_SPEED: f32 = 900.0;

/// Seconds before an unspent projectile is despawned.
pub const PROJECTILE_LIFETIME: f32 = 1.5;

/// Sensor collider radius of a launched hammer projectile.
pub const PROJECTILE_COLLIDER_RADIUS: f32 = 12.0;

/// Damage dealt to an NPC struck by a launched hammer.
pub const PROJECTILE_DAMAGE: f32 = 40.0;

// ── Demo World ────────────────────────────────────────────────────────────────

/// Hit points for demo enemy NPCs.
pub const NPC_MAX_HP: f32 = 120.0;

/// Number of enemy NPCs placed in the demo world.
pub const DEMO_NPC_COUNT: usize = 8;

/// Radius of the ring demo NPCs are scattered across.
pub const DEMO_NPC_RING_RADIUS: f32 = 600.0;

/// Player collider radius in the demo world.
pub const PLAYER_COLLIDER_RADIUS: f32 = 16.0;

/// Forward thrust speed applied by the demo movement keys (units / s).
pub const DEMO_THRUST_SPEED: f32 = 260.0;

/// Turn rate applied by the demo rotation keys (radians / s).
pub const DEMO_TURN_RATE: f32 = 2.4;
