use crate::collision::{
    detect_collision, resolve_collisions, CollisionParams, CollisionQueue, CollisionRecord,
    ConfigError, ResolveSummary,
};
use crate::particles::{
    BondTypes, Communicator, DomainDecomposition, ErrorChannel, ParticleHandle, ParticleStore,
    RigidRelations,
};

/// The collision subsystem of one rank.
///
/// Each step goes through the same cycle:
///
/// 1. [`CollisionSystem::reset_queue`] before the neighbor search.
/// 2. [`CollisionSystem::detect`] for every candidate pair, during force evaluation.
/// 3. [`CollisionSystem::resolve`] once force evaluation is complete.
///
/// Detection must not start again before the resolution and the subsequent resort
/// are complete. The simulation loop is responsible for this ordering.
#[derive(Clone, Debug, Default)]
pub struct CollisionSystem {
    params: CollisionParams,
    queue: CollisionQueue,
}

impl CollisionSystem {
    /// A collision system with collision detection turned off.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active collision parameters.
    pub fn params(&self) -> &CollisionParams {
        &self.params
    }

    /// The collisions queued during the current step.
    pub fn queue(&self) -> &CollisionQueue {
        &self.queue
    }

    /// Is collision detection turned on?
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.params.is_enabled()
    }

    /// Validates `params`, then makes them active and replicates them on every rank.
    ///
    /// On error, the previous parameters stay active and nothing is broadcast.
    pub fn configure(
        &mut self,
        params: CollisionParams,
        particles: &mut dyn ParticleStore,
        bond_types: &dyn BondTypes,
        comm: &mut dyn Communicator,
    ) -> Result<(), ConfigError> {
        params.validate(particles, bond_types, comm.n_ranks())?;

        particles.ensure_particle_type(params.vs_particle_type);
        comm.broadcast_collision_params(&params);
        self.params = params;

        log::info!(
            "Collision detection configured: modes {:?}, distance {}.",
            params.mode,
            params.distance
        );
        Ok(())
    }

    /// Makes `params` active as received from the rank that configured them.
    ///
    /// The parameters were validated by the sender.
    pub fn receive_params(&mut self, params: CollisionParams) {
        log::debug!("Received collision parameters {:?}.", params);
        self.params = params;
    }

    /// Empties the collision queue. Must be called at the start of every step.
    pub fn reset_queue(&mut self) {
        if !self.queue.is_empty() {
            log::warn!(
                "Discarding {} unresolved collisions at the start of a step.",
                self.queue.len()
            );
        }
        self.queue.clear();
    }

    /// Checks whether the particle copies `h1` and `h2` collide, and queues the collision.
    ///
    /// This is a no-op if collision detection is turned off. See [`detect_collision`]
    /// for details.
    #[inline]
    pub fn detect<P, B>(
        &mut self,
        particles: &mut P,
        bond_types: &B,
        h1: ParticleHandle,
        h2: ParticleHandle,
    ) -> Option<CollisionRecord>
    where
        P: ParticleStore + ?Sized,
        B: BondTypes + ?Sized,
    {
        if !self.is_enabled() {
            return None;
        }

        detect_collision(&self.params, &mut self.queue, particles, bond_types, h1, h2)
    }

    /// Resolves the collisions queued during this step and empties the queue.
    ///
    /// See [`resolve_collisions`] for details.
    pub fn resolve(
        &mut self,
        particles: &mut dyn ParticleStore,
        bond_types: &dyn BondTypes,
        relations: &mut dyn RigidRelations,
        errors: &mut dyn ErrorChannel,
        domain: &mut dyn DomainDecomposition,
    ) -> ResolveSummary {
        resolve_collisions(
            &self.params,
            &mut self.queue,
            particles,
            bond_types,
            relations,
            errors,
            domain,
        )
    }
}
