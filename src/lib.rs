/*!
tether
========

**tether** is the collision-driven bonding subsystem of a distributed
molecular-dynamics engine written with the rust programming language.

Pairs of particles closer than a threshold are detected during force
evaluation and queued. Once the forces are known, the queue is resolved:
bonds are committed, virtual sites are inserted at the point of collision,
or a runtime error is reported, depending on the active [`collision::CollisionModes`].

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // The resolver takes one argument per collaborator.
#![allow(clippy::module_inception)]
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod collision;
pub mod particles;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point3, Vector3};

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}

pub use crate::collision::{
    CollisionModes, CollisionParams, CollisionQueue, CollisionRecord, CollisionSystem,
    ConfigError, ResolveSummary,
};
pub use crate::particles::{BondTypeId, ParticleHandle, ParticleId, ParticleType};
