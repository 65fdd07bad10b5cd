use crate::math::{Real, Vector};
use crate::particles::{ParticleId, ParticleStore};

/// The kinematic link between a virtual site and the particle it follows.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VirtualSiteRelation {
    /// The particle this virtual site is attached to.
    pub parent: ParticleId,
    /// The position of the virtual site relative to its parent, at the time
    /// the relation was established.
    pub offset: Vector<Real>,
}

/// Errors that can occur while relating a virtual site to its parent.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelationError {
    /// The virtual site is not known to the local particle store.
    #[error("virtual site {0} is not a local particle")]
    UnknownChild(ParticleId),
    /// The parent is not known to the local particle store.
    #[error("particle {0} to relate a virtual site to is not a local particle")]
    UnknownParent(ParticleId),
    /// A particle cannot follow itself.
    #[error("particle {0} cannot be related to itself")]
    SelfRelation(ParticleId),
}

/// The service establishing rigid relations between virtual sites and their parents.
pub trait RigidRelations {
    /// Makes `child` follow the motion of `parent`.
    fn relate(
        &mut self,
        particles: &mut dyn ParticleStore,
        child: ParticleId,
        parent: ParticleId,
    ) -> Result<(), RelationError>;
}

/// Translation-only virtual sites: each site keeps a fixed offset to its parent.
#[derive(Clone, Debug, Default)]
pub struct RelativeVirtualSites {
    children: Vec<ParticleId>,
}

impl RelativeVirtualSites {
    /// A service without any related virtual site.
    pub fn new() -> Self {
        Self::default()
    }

    /// The virtual sites related so far, in creation order.
    pub fn children(&self) -> &[ParticleId] {
        &self.children
    }

    /// Moves every virtual site to its parent's position plus its offset, folded
    /// back into the simulation box.
    ///
    /// Sites whose parent is no longer local are left in place.
    pub fn update_positions(&self, particles: &mut dyn ParticleStore) {
        for child in &self.children {
            let Some(relation) = particles.local_particle(*child).and_then(|p| p.virtual_site)
            else {
                continue;
            };
            let Some(parent_pos) = particles.local_particle(relation.parent).map(|p| p.position)
            else {
                log::debug!(
                    "Parent {} of virtual site {} is not local.",
                    relation.parent,
                    child
                );
                continue;
            };

            let position = particles.periodic_box().fold(&(parent_pos + relation.offset));
            if let Some(site) = particles.local_particle_mut(*child) {
                site.position = position;
            }
        }
    }
}

impl RigidRelations for RelativeVirtualSites {
    fn relate(
        &mut self,
        particles: &mut dyn ParticleStore,
        child: ParticleId,
        parent: ParticleId,
    ) -> Result<(), RelationError> {
        if child == parent {
            return Err(RelationError::SelfRelation(child));
        }

        let parent_pos = particles
            .local_particle(parent)
            .ok_or(RelationError::UnknownParent(parent))?
            .position;
        let child_pos = particles
            .local_particle(child)
            .ok_or(RelationError::UnknownChild(child))?
            .position;
        let offset = particles.periodic_box().minimum_image(&child_pos, &parent_pos);

        let site = particles
            .local_particle_mut(child)
            .ok_or(RelationError::UnknownChild(child))?;
        site.virtual_site = Some(VirtualSiteRelation { parent, offset });
        self.children.push(child);

        log::trace!("Virtual site {} now follows particle {}.", child, parent);
        Ok(())
    }
}
