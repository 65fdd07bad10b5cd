use crate::collision::{CollisionModes, CollisionParams, CollisionQueue, CollisionRecord};
use crate::math::{Point, Real, Vector};
use crate::particles::{BondTypes, ParticleHandle, ParticleId, ParticleStore};
use num::Zero;

/// Checks whether the particle copies `h1` and `h2` collide, and queues the collision.
///
/// This is called by the force loop for every candidate pair within the interaction
/// range, including pairs involving ghost copies. Apart from the pair bond created
/// in [`CollisionModes::BOND`] mode, which is appended to the bond list of a particle
/// owned by this rank, the topology is left untouched until the queue is resolved.
///
/// Returns the queued record, if any.
#[inline]
pub fn detect_collision<P, B>(
    params: &CollisionParams,
    queue: &mut CollisionQueue,
    particles: &mut P,
    bond_types: &B,
    h1: ParticleHandle,
    h2: ParticleHandle,
) -> Option<CollisionRecord>
where
    P: ParticleStore + ?Sized,
    B: BondTypes + ?Sized,
{
    let (id1, id2, vec21, dist) = {
        let p1 = particles.particle(h1);
        let p2 = particles.particle(h2);
        let vec21 = particles
            .periodic_box()
            .minimum_image(&p1.position, &p2.position);
        let dist = vec21.norm();

        // A NaN separation comes from degenerate geometry and never collides.
        if dist.is_nan() || dist > params.distance {
            return None;
        }

        if params.mode.contains(CollisionModes::GLUE_TO_SURFACE)
            && !params.is_glue_pair(p1.particle_type, p2.particle_type)
        {
            return None;
        }

        (p1.id, p2.id, vec21, dist)
    };

    log::trace!(
        "Particles {} and {} within bonding distance {}.",
        id1,
        id2,
        dist
    );

    // The pair may involve ghosts, which cannot store bonds: switch to the
    // canonical local copies.
    let (Some(l1), Some(l2)) = (particles.resolve_local(id1), particles.resolve_local(id2))
    else {
        log::warn!(
            "Colliding particles {} and {} are not both known to this rank.",
            id1,
            id2
        );
        return None;
    };

    let p1 = particles.particle(l1);
    let p2 = particles.particle(l2);

    if params.mode.creates_virtual_sites() && (p1.is_virtual || p2.is_virtual) {
        return None;
    }

    if p1.bonds.contains(bond_types, params.bond_centers, id2)
        || p2.bonds.contains(bond_types, params.bond_centers, id1)
    {
        log::trace!("Particles {} and {} are already bonded.", id1, id2);
        return None;
    }

    let record = if params.mode.contains(CollisionModes::GLUE_TO_SURFACE) {
        let glued1 = p1.particle_type == params.part_type_to_be_glued
            && p2.particle_type == params.part_type_to_attach_vs_to;
        let glued2 = p2.particle_type == params.part_type_to_be_glued
            && p1.particle_type == params.part_type_to_attach_vs_to;

        if glued1 {
            glue_record(params, id1, &p1.position, id2, -vec21, dist)
        } else if glued2 {
            glue_record(params, id2, &p2.position, id1, vec21, dist)
        } else {
            log::warn!(
                "Particles {} and {} changed type during detection, ignoring their collision.",
                id1,
                id2
            );
            return None;
        }
    } else {
        CollisionRecord::new(id1, id2, p1.position - vec21 * 0.5)
    };

    if params.mode.contains(CollisionModes::BOND) {
        // Store the bond on the physical particle; at least one of them is.
        let (primary, secondary) = if p1.is_ghost { (l2, id1) } else { (l1, id2) };
        particles
            .particle_mut(primary)
            .bonds
            .push(params.bond_centers, &[secondary]);
    }

    queue.push(record);
    log::trace!(
        "Queued collision between {} and {} at {:?}.",
        record.id1,
        record.id2,
        record.point
    );

    Some(record)
}

/// The collision of `glued`, seen at `glued_pos`, with `target`.
///
/// `towards_target` points from the glued particle to the target and has norm `dist`.
fn glue_record(
    params: &CollisionParams,
    glued: ParticleId,
    glued_pos: &Point<Real>,
    target: ParticleId,
    towards_target: Vector<Real>,
    dist: Real,
) -> CollisionRecord {
    let dir = if dist.is_zero() {
        Vector::zeros()
    } else {
        towards_target / dist
    };

    CollisionRecord::new(
        glued,
        target,
        *glued_pos + dir * params.dist_glued_part_to_vs,
    )
}
