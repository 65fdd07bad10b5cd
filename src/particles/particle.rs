use crate::math::{Point, Real};
use crate::particles::{BondList, ParticleId, ParticleType, VirtualSiteRelation};

/// A copy of a particle held by a rank-local particle store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Particle {
    /// The global identity of this particle.
    pub id: ParticleId,
    /// The position of this particle.
    pub position: Point<Real>,
    /// The type tag of this particle.
    pub particle_type: ParticleType,
    /// Is this a ghost copy of a particle owned by another rank (or a periodic image)?
    ///
    /// Ghosts are read-only for topology purposes: bonds must never be stored on them.
    pub is_ghost: bool,
    /// Is this a virtual particle, i.e., one whose position is derived from another particle?
    pub is_virtual: bool,
    /// The kinematic relation of this particle if it is a virtual site.
    pub virtual_site: Option<VirtualSiteRelation>,
    /// The bonds stored on this particle.
    pub bonds: BondList,
}

impl Particle {
    /// A new real, non-virtual particle without any bond.
    pub fn new(id: ParticleId, position: Point<Real>, particle_type: ParticleType) -> Self {
        Self {
            id,
            position,
            particle_type,
            is_ghost: false,
            is_virtual: false,
            virtual_site: None,
            bonds: BondList::new(),
        }
    }

    /// A ghost copy of the particle `id` seen at `position`.
    pub fn ghost(id: ParticleId, position: Point<Real>, particle_type: ParticleType) -> Self {
        Self {
            is_ghost: true,
            ..Self::new(id, position, particle_type)
        }
    }
}
