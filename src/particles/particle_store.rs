use crate::math::{Point, Real};
use crate::particles::{Particle, ParticleHandle, ParticleId, ParticleType};
use crate::utils::PeriodicBox;

/// The rank-local particle storage the collision subsystem operates on.
///
/// A store holds the particles owned by this rank together with ghost copies of
/// particles owned by neighboring ranks. Several copies of the same identity may
/// coexist; [`ParticleStore::resolve_local`] designates the canonical one.
pub trait ParticleStore {
    /// The handle of the canonical local copy of `id`.
    ///
    /// This is the real particle if this rank owns it, and a ghost copy otherwise.
    fn resolve_local(&self, id: ParticleId) -> Option<ParticleHandle>;

    /// The particle copy designated by `handle`.
    ///
    /// Panics if `handle` was not produced by this store.
    fn particle(&self, handle: ParticleHandle) -> &Particle;

    /// The particle copy designated by `handle`, mutably.
    ///
    /// Panics if `handle` was not produced by this store.
    fn particle_mut(&mut self, handle: ParticleHandle) -> &mut Particle;

    /// Creates a new real particle at `position` and returns its fresh identity.
    ///
    /// Identities must be globally unique: no other rank may hand out the same one.
    fn create_particle(&mut self, position: Point<Real>) -> ParticleId;

    /// Can this store hold virtual sites?
    fn supports_virtual_sites(&self) -> bool;

    /// The geometry of the simulation box.
    fn periodic_box(&self) -> &PeriodicBox;

    /// Makes sure interactions are defined for `particle_type`.
    fn ensure_particle_type(&mut self, particle_type: ParticleType);

    /// The canonical local copy of `id`.
    fn local_particle(&self, id: ParticleId) -> Option<&Particle> {
        let handle = self.resolve_local(id)?;
        Some(self.particle(handle))
    }

    /// The canonical local copy of `id`, mutably.
    fn local_particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        let handle = self.resolve_local(id)?;
        Some(self.particle_mut(handle))
    }
}
