use crate::collision::{CollisionModes, CollisionParams, CollisionQueue, CollisionRecord};
use crate::particles::{
    BondTypeId, BondTypes, DomainDecomposition, ErrorChannel, ParticleId, ParticleStore,
    ParticleType, RigidRelations,
};
use crate::utils::SortedPair;
use arrayvec::ArrayVec;

/// What happened while resolving a collision queue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// The number of queued collisions processed.
    pub collisions: usize,
    /// The number of runtime errors reported.
    pub errors: usize,
    /// The number of bonds created while resolving.
    pub bonds_created: usize,
    /// The number of particles (virtual sites) created.
    pub particles_created: usize,
}

/// Resolves every collision of `queue`, in detection order, then clears it.
///
/// This must only be called once force evaluation is complete for the current step:
/// it creates particles and appends bonds. Runtime errors are reported through
/// `errors` without interrupting the resolution, so that every other collision of the
/// step is still handled. A resort is requested from `domain` in all cases.
pub fn resolve_collisions(
    params: &CollisionParams,
    queue: &mut CollisionQueue,
    particles: &mut dyn ParticleStore,
    bond_types: &dyn BondTypes,
    relations: &mut dyn RigidRelations,
    errors: &mut dyn ErrorChannel,
    domain: &mut dyn DomainDecomposition,
) -> ResolveSummary {
    let mut summary = ResolveSummary {
        collisions: queue.len(),
        ..Default::default()
    };

    for record in queue.iter() {
        if params.mode.contains(CollisionModes::EXCEPTION) {
            let pair = SortedPair::new(record.id1, record.id2);
            errors.report_runtime_error(format!("collision between particles {}", pair));
            summary.errors += 1;
        }

        if params.mode.creates_virtual_sites() {
            place_virtual_sites(
                params,
                record,
                particles,
                bond_types,
                relations,
                errors,
                &mut summary,
            );
        }
    }

    queue.clear();
    domain.request_resort();

    log::debug!("Resolved collisions: {:?}", summary);
    summary
}

fn place_virtual_sites(
    params: &CollisionParams,
    record: &CollisionRecord,
    particles: &mut dyn ParticleStore,
    bond_types: &dyn BondTypes,
    relations: &mut dyn RigidRelations,
    errors: &mut dyn ErrorChannel,
    summary: &mut ResolveSummary,
) {
    let two_sites = params.mode.contains(CollisionModes::VIRTUAL_SITE);
    let mut sites = ArrayVec::<ParticleId, 2>::new();

    // In the two-site mode, the first site follows the first particle. The site
    // following the second particle exists in every virtual-site mode.
    let parents = if two_sites {
        [Some(record.id1), Some(record.id2)]
    } else {
        [None, Some(record.id2)]
    };

    for parent in parents.into_iter().flatten() {
        sites.push(place_virtual_site(
            params, record, parent, particles, relations, errors, summary,
        ));
    }

    if two_sites {
        match bond_types.arity(params.bond_vs) {
            Some(1) => {
                // A pair bond between the two sites, stored on the second one.
                add_bond(particles, sites[1], params.bond_vs, &[sites[0]], summary);
            }
            Some(2) => {
                // A triple bond on each site, spanning both colliding particles.
                for site in &sites {
                    add_bond(
                        particles,
                        *site,
                        params.bond_vs,
                        &[record.id1, record.id2],
                        summary,
                    );
                }
            }
            arity => log::error!(
                "Virtual-site bond type {} has unsupported arity {:?}.",
                params.bond_vs,
                arity
            ),
        }
    }

    if params.mode.contains(CollisionModes::GLUE_TO_SURFACE) {
        let site = sites[sites.len() - 1];
        add_bond(particles, record.id1, params.bond_vs, &[site], summary);

        // The glued particle is consumed and must not be glued again.
        if let Some(glued) = particles.local_particle_mut(record.id1) {
            glued.particle_type = ParticleType::DEFAULT;
        }
    }
}

/// Creates a virtual site at the collision point, following `parent`.
fn place_virtual_site(
    params: &CollisionParams,
    record: &CollisionRecord,
    parent: ParticleId,
    particles: &mut dyn ParticleStore,
    relations: &mut dyn RigidRelations,
    errors: &mut dyn ErrorChannel,
    summary: &mut ResolveSummary,
) -> ParticleId {
    let site = particles.create_particle(record.point);
    summary.particles_created += 1;

    if let Err(err) = relations.relate(particles, site, parent) {
        errors.report_runtime_error(err.to_string());
        summary.errors += 1;
    }

    match particles.local_particle_mut(site) {
        Some(p) => {
            p.is_virtual = true;
            p.particle_type = params.vs_particle_type;
        }
        None => log::error!("Created virtual site {} is not a local particle.", site),
    }

    log::trace!(
        "Virtual site {} placed at {:?}, following {}.",
        site,
        record.point,
        parent
    );
    site
}

fn add_bond(
    particles: &mut dyn ParticleStore,
    on: ParticleId,
    bond_type: BondTypeId,
    partners: &[ParticleId],
    summary: &mut ResolveSummary,
) {
    match particles.local_particle_mut(on) {
        Some(p) => {
            p.bonds.push(bond_type, partners);
            summary.bonds_created += 1;
        }
        None => log::warn!("Cannot store a bond on {}: not a local particle.", on),
    }
}
