use crate::collision::{BondRole, ConfigError};
use crate::math::Real;
use crate::particles::{BondTypeId, BondTypes, ParticleStore, ParticleType};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// The responses to a collision. An empty set disables collision detection.
pub struct CollisionModes(u8);

bitflags::bitflags! {
    impl CollisionModes: u8 {
        /// Bind the centers of colliding particles with a pair bond.
        ///
        /// This also marks the pair so that it is never reported again.
        const BOND = 1;
        /// Place one virtual site per colliding particle at the point of
        /// collision, and bind the two sites. Requires `BOND`.
        const VIRTUAL_SITE = 1 << 1;
        /// Report every collision as a runtime error.
        const EXCEPTION = 1 << 2;
        /// Glue a particle of one type to a particle of another type through a
        /// virtual site placed on the latter. Requires `BOND`.
        const GLUE_TO_SURFACE = 1 << 3;
    }
}

impl CollisionModes {
    /// Do these modes create virtual sites when resolving collisions?
    #[inline]
    pub fn creates_virtual_sites(self) -> bool {
        self.intersects(CollisionModes::VIRTUAL_SITE | CollisionModes::GLUE_TO_SURFACE)
    }
}

/// The parameters of collision detection.
///
/// These are set once per configuration change through
/// [`CollisionSystem::configure`](crate::collision::CollisionSystem::configure), which
/// replicates them on every rank. They never change during a step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionParams {
    /// The active responses.
    pub mode: CollisionModes,
    /// Particles whose centers are at most this far apart collide.
    pub distance: Real,
    /// The bond type binding the centers of colliding particles.
    pub bond_centers: BondTypeId,
    /// The bond type binding the virtual sites (or a glued particle to its virtual site).
    pub bond_vs: BondTypeId,
    /// The type given to created virtual sites.
    pub vs_particle_type: ParticleType,
    /// Distance between a glued particle and its virtual site.
    pub dist_glued_part_to_vs: Real,
    /// The type of particles that get glued.
    pub part_type_to_be_glued: ParticleType,
    /// The type of particles virtual sites are attached to when gluing.
    pub part_type_to_attach_vs_to: ParticleType,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            mode: CollisionModes::empty(),
            distance: 0.0,
            bond_centers: BondTypeId(0),
            bond_vs: BondTypeId(0),
            vs_particle_type: ParticleType::DEFAULT,
            dist_glued_part_to_vs: 0.0,
            part_type_to_be_glued: ParticleType::DEFAULT,
            part_type_to_attach_vs_to: ParticleType::DEFAULT,
        }
    }
}

impl CollisionParams {
    /// Parameters with the given modes and threshold distance.
    pub fn new(mode: CollisionModes, distance: Real) -> Self {
        Self {
            mode,
            distance,
            ..Default::default()
        }
    }

    /// Sets the bond type binding the centers of colliding particles.
    pub fn with_bond_centers(mut self, bond_type: BondTypeId) -> Self {
        self.bond_centers = bond_type;
        self
    }

    /// Sets the virtual-site bond type and the type of created virtual sites.
    pub fn with_virtual_sites(mut self, bond_type: BondTypeId, vs_type: ParticleType) -> Self {
        self.bond_vs = bond_type;
        self.vs_particle_type = vs_type;
        self
    }

    /// Sets the glue-to-surface parameters.
    pub fn with_glue(
        mut self,
        to_be_glued: ParticleType,
        attach_vs_to: ParticleType,
        dist_glued_part_to_vs: Real,
    ) -> Self {
        self.part_type_to_be_glued = to_be_glued;
        self.part_type_to_attach_vs_to = attach_vs_to;
        self.dist_glued_part_to_vs = dist_glued_part_to_vs;
        self
    }

    /// Is collision detection active with these parameters?
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.mode.is_empty()
    }

    /// Are particles of types `type1` and `type2` (in any order) eligible for gluing?
    #[inline]
    pub fn is_glue_pair(&self, type1: ParticleType, type2: ParticleType) -> bool {
        (type1 == self.part_type_to_be_glued && type2 == self.part_type_to_attach_vs_to)
            || (type2 == self.part_type_to_be_glued && type1 == self.part_type_to_attach_vs_to)
    }

    /// Checks these parameters against the simulation they are meant for.
    pub fn validate(
        &self,
        particles: &dyn ParticleStore,
        bond_types: &dyn BondTypes,
        n_ranks: usize,
    ) -> Result<(), ConfigError> {
        let mode = self.mode;

        // Turning collision detection off is always allowed.
        if mode.is_empty() {
            return Ok(());
        }

        if mode.creates_virtual_sites() && !mode.contains(CollisionModes::BOND) {
            return Err(ConfigError::ImpliedModeMissing(mode));
        }

        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(ConfigError::InvalidDistance {
                parameter: "distance",
                value: self.distance,
            });
        }

        if mode.contains(CollisionModes::GLUE_TO_SURFACE)
            && !(self.dist_glued_part_to_vs.is_finite() && self.dist_glued_part_to_vs >= 0.0)
        {
            return Err(ConfigError::InvalidDistance {
                parameter: "dist_glued_part_to_vs",
                value: self.dist_glued_part_to_vs,
            });
        }

        if mode.creates_virtual_sites() {
            if !particles.supports_virtual_sites() {
                return Err(ConfigError::VirtualSitesUnavailable(mode));
            }

            if n_ranks != 1 {
                return Err(ConfigError::MultiRankUnsupported {
                    modes: mode,
                    n_ranks,
                });
            }
        }

        if mode.contains(CollisionModes::BOND) {
            let arity = arity_of(bond_types, BondRole::Centers, self.bond_centers)?;
            if arity != 1 {
                return Err(ConfigError::InvalidCenterBondArity {
                    bond_type: self.bond_centers,
                    arity,
                });
            }
        }

        if mode.creates_virtual_sites() {
            let arity = arity_of(bond_types, BondRole::VirtualSites, self.bond_vs)?;
            // Virtual sites may be bound by a pair or a triple bond, a glued
            // particle only by a pair bond.
            let supported = if mode.contains(CollisionModes::GLUE_TO_SURFACE) {
                arity == 1
            } else {
                arity == 1 || arity == 2
            };

            if !supported {
                return Err(ConfigError::InvalidVirtualSiteBondArity {
                    bond_type: self.bond_vs,
                    arity,
                });
            }
        }

        Ok(())
    }
}

fn arity_of(
    bond_types: &dyn BondTypes,
    role: BondRole,
    bond_type: BondTypeId,
) -> Result<usize, ConfigError> {
    bond_types
        .arity(bond_type)
        .ok_or(ConfigError::UnknownBondType { role, bond_type })
}
