//! The two-phase collision pipeline.
//!
//! # Detection
//! [`detect_collision`] runs inside the force loop, once per candidate pair. Pairs
//! farther apart than [`CollisionParams::distance`] are rejected right away. Pairs that
//! are not bonded yet are recorded in the [`CollisionQueue`] together with their point
//! of collision. In [`CollisionModes::BOND`] mode, the pair is also bonded immediately,
//! which is what prevents it from ever being recorded again.
//!
//! # Resolution
//! [`resolve_collisions`] runs once force evaluation is complete. It reports collisions
//! as runtime errors ([`CollisionModes::EXCEPTION`]), creates virtual sites
//! ([`CollisionModes::VIRTUAL_SITE`], [`CollisionModes::GLUE_TO_SURFACE`]), empties the
//! queue and requests a resort.
//!
//! [`CollisionSystem`] bundles the parameters and the queue of one rank and exposes both
//! phases.

pub use self::collision_system::CollisionSystem;
pub use self::detector::detect_collision;
pub use self::error::{BondRole, ConfigError};
pub use self::params::{CollisionModes, CollisionParams};
pub use self::queue::{CollisionQueue, CollisionRecord};
pub use self::resolver::{resolve_collisions, ResolveSummary};

mod collision_system;
mod detector;
mod error;
mod params;
mod queue;
mod resolver;
