use crate::math::{Point, Real};
use crate::particles::{Particle, ParticleHandle, ParticleId, ParticleStore, ParticleType};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::PeriodicBox;
use slab::Slab;

/// An in-memory particle store for a single rank.
///
/// Real particles and ghost copies live side by side in a slab. Each identity
/// maps to its canonical copy: the real particle when there is one, otherwise
/// the first ghost copy inserted.
#[derive(Clone, Debug)]
pub struct LocalParticles {
    particles: Slab<Particle>,
    local: HashMap<ParticleId, usize>,
    max_seen: Option<ParticleId>,
    n_particle_types: u32,
    periodic_box: PeriodicBox,
    virtual_sites: bool,
}

impl LocalParticles {
    /// An empty store supporting virtual sites.
    pub fn new(periodic_box: PeriodicBox) -> Self {
        Self {
            particles: Slab::new(),
            local: HashMap::default(),
            max_seen: None,
            n_particle_types: 0,
            periodic_box,
            virtual_sites: true,
        }
    }

    /// Enables or disables the support of virtual sites.
    pub fn with_virtual_sites(mut self, enabled: bool) -> Self {
        self.virtual_sites = enabled;
        self
    }

    /// Inserts a real particle owned by this rank.
    ///
    /// If a real particle with the same identity already exists, it is replaced.
    pub fn insert(
        &mut self,
        id: ParticleId,
        position: Point<Real>,
        particle_type: ParticleType,
    ) -> ParticleHandle {
        self.ensure_particle_type(particle_type);
        self.see(id);
        let particle = Particle::new(id, position, particle_type);

        match self.local.entry(id) {
            Entry::Occupied(mut entry) => {
                let key = *entry.get();
                if self.particles[key].is_ghost {
                    let new_key = self.particles.insert(particle);
                    let _ = entry.insert(new_key);
                    ParticleHandle(new_key)
                } else {
                    self.particles[key] = particle;
                    ParticleHandle(key)
                }
            }
            Entry::Vacant(entry) => {
                let key = self.particles.insert(particle);
                let _ = entry.insert(key);
                ParticleHandle(key)
            }
        }
    }

    /// Inserts a ghost copy of `id`, e.g., a particle owned by a neighboring rank
    /// or a periodic image of a local particle.
    pub fn insert_ghost(
        &mut self,
        id: ParticleId,
        position: Point<Real>,
        particle_type: ParticleType,
    ) -> ParticleHandle {
        self.ensure_particle_type(particle_type);
        self.see(id);
        let key = self
            .particles
            .insert(Particle::ghost(id, position, particle_type));
        let _ = self.local.entry(id).or_insert(key);
        ParticleHandle(key)
    }

    /// Removes every ghost copy, e.g., before ghosts are exchanged again.
    pub fn clear_ghosts(&mut self) {
        self.particles.retain(|_, p| !p.is_ghost);
        let particles = &self.particles;
        self.local.retain(|_, key| particles.contains(*key));
    }

    /// The number of particle copies (real and ghost) in this store.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Is this store empty?
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterates through all the particle copies of this store.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.particles.iter().map(|(key, p)| (ParticleHandle(key), p))
    }

    /// Iterates through the real particles of this store.
    pub fn real_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p).filter(|p| !p.is_ghost)
    }

    /// The largest identity seen by this store.
    pub fn max_seen_particle(&self) -> Option<ParticleId> {
        self.max_seen
    }

    /// The number of particle types with defined interactions.
    pub fn n_particle_types(&self) -> u32 {
        self.n_particle_types
    }

    fn see(&mut self, id: ParticleId) {
        if self.max_seen.map_or(true, |max| id > max) {
            self.max_seen = Some(id);
        }
    }
}

impl ParticleStore for LocalParticles {
    #[inline]
    fn resolve_local(&self, id: ParticleId) -> Option<ParticleHandle> {
        self.local.get(&id).copied().map(ParticleHandle)
    }

    #[inline]
    fn particle(&self, handle: ParticleHandle) -> &Particle {
        &self.particles[handle.0]
    }

    #[inline]
    fn particle_mut(&mut self, handle: ParticleHandle) -> &mut Particle {
        &mut self.particles[handle.0]
    }

    fn create_particle(&mut self, position: Point<Real>) -> ParticleId {
        let id = self.max_seen.map_or(ParticleId(0), |max| ParticleId(max.0 + 1));
        let _ = self.insert(id, position, ParticleType::DEFAULT);
        log::trace!("Created particle {} at {:?}.", id, position);
        id
    }

    fn supports_virtual_sites(&self) -> bool {
        self.virtual_sites
    }

    fn periodic_box(&self) -> &PeriodicBox {
        &self.periodic_box
    }

    fn ensure_particle_type(&mut self, particle_type: ParticleType) {
        self.n_particle_types = self.n_particle_types.max(particle_type.0 + 1);
    }
}
