//! Particles, bonds, and the simulation services the collision subsystem relies on.
//!
//! The traits of this module are the seams between the collision pipeline and the
//! rest of the engine:
//!
//! * [`ParticleStore`] for the rank-local particle storage.
//! * [`BondTypes`] for the arity of bonded interactions.
//! * [`RigidRelations`] to attach virtual sites to their parent particle.
//! * [`ErrorChannel`], [`DomainDecomposition`] and [`Communicator`] for runtime
//!   errors, resorting, and parameter broadcast.
//!
//! Single-rank in-memory implementations are provided for each of them.

pub use self::bond_list::{Bond, BondIter, BondList};
pub use self::bond_types::{BondTypeTable, BondTypes};
pub use self::ids::{BondTypeId, ParticleHandle, ParticleId, ParticleType};
pub use self::local_particles::LocalParticles;
pub use self::particle::Particle;
pub use self::particle_store::ParticleStore;
pub use self::services::{
    Communicator, DomainDecomposition, ErrorChannel, ResortFlag, RuntimeErrors, SingleRank,
};
pub use self::virtual_sites::{
    RelationError, RelativeVirtualSites, RigidRelations, VirtualSiteRelation,
};

mod bond_list;
mod bond_types;
mod ids;
mod local_particles;
mod particle;
mod particle_store;
mod services;
mod virtual_sites;
