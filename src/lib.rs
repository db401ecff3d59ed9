//! Transcendence hammer ability
//!
//! An orbiting-weapon mechanic for a top-down action game: activating the
//! ability surrounds the player with a ring of hammers that orbit with
//! movement-reactive speed and radius, and each hammer can be committed
//! either as a projectile or to seize control of a nearby enemy.

pub mod ability;
pub mod actor;
pub mod config;
pub mod constants;
pub mod error;
pub mod hammer;
pub mod projectile;
