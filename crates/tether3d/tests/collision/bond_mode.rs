use crate::common::{Sim, PAIR_BOND};
use tether3d::collision::{CollisionModes, CollisionParams};
use tether3d::math::{Point, Real, Vector};
use tether3d::particles::{ParticleId, ParticleType};
use tether3d::utils::PeriodicBox;

fn bond_params(distance: Real) -> CollisionParams {
    CollisionParams::new(CollisionModes::BOND, distance).with_bond_centers(PAIR_BOND)
}

#[test]
fn two_particles_get_bonded() {
    let mut sim = Sim::open();
    sim.configure(bond_params(1.0)).unwrap();
    let h0 = sim.add(0, 0.0, 0);
    let h1 = sim.add(1, 0.5, 0);

    sim.system.reset_queue();
    assert!(sim.detect(h0, h1));
    assert_eq!(sim.system.queue().len(), 1);
    let summary = sim.resolve();

    assert_eq!(summary.collisions, 1);
    assert_eq!(summary.particles_created, 0);
    assert_eq!(sim.bonds_of(0), vec![(PAIR_BOND, vec![ParticleId(1)])]);
    assert!(sim.bonds_of(1).is_empty());
    assert!(sim.system.queue().is_empty());
    assert_eq!(sim.particles.len(), 2);
    assert!(sim.resort.take());
    assert!(!sim.resort.is_requested());
    assert!(!sim.errors.step_failed());
}

#[test]
fn bonded_pair_is_never_queued_again() {
    let mut sim = Sim::open();
    sim.configure(bond_params(1.0)).unwrap();
    let h0 = sim.add(0, 0.0, 0);
    let h1 = sim.add(1, 0.5, 0);

    sim.system.reset_queue();
    assert!(sim.detect(h0, h1));
    // Same step, same pair, any order: the marking bond already exists.
    assert!(!sim.detect(h0, h1));
    assert!(!sim.detect(h1, h0));
    assert_eq!(sim.resolve().collisions, 1);

    for _ in 0..3 {
        assert_eq!(sim.step().collisions, 0);
    }
    assert_eq!(sim.total_bonds(), 1);
}

#[test]
fn threshold_boundary_is_inclusive() {
    let mut sim = Sim::open();
    sim.configure(bond_params(0.75)).unwrap();
    let _ = sim.add(0, 0.0, 0);
    let _ = sim.add(1, 0.75, 0);
    let _ = sim.add(2, 10.0, 0);
    let _ = sim.add(3, 10.75 + 1.0e-9, 0);

    let summary = sim.step();

    assert_eq!(summary.collisions, 1);
    assert_eq!(sim.bonds_of(0), vec![(PAIR_BOND, vec![ParticleId(1)])]);
    assert!(sim.bonds_of(2).is_empty());
}

#[test]
fn bond_is_stored_on_the_real_particle() {
    let mut sim = Sim::open();
    sim.configure(bond_params(1.0)).unwrap();
    // Particle 0 is owned by another rank: only a ghost copy is known here.
    let ghost = sim.add_ghost(0, 0.0, 0);
    let real = sim.add(1, 0.5, 0);

    sim.system.reset_queue();
    assert!(sim.detect(ghost, real));
    let _ = sim.resolve();

    assert!(sim.bonds_of(0).is_empty());
    assert_eq!(sim.bonds_of(1), vec![(PAIR_BOND, vec![ParticleId(0)])]);
}

#[test]
fn periodic_image_does_not_duplicate_the_collision() {
    let mut sim = Sim::new(PeriodicBox::new(Vector::repeat(10.0)));
    sim.configure(bond_params(1.0)).unwrap();
    let h0 = sim
        .particles
        .insert(ParticleId(0), Point::new(0.2, 5.0, 5.0), ParticleType(0));
    let h1 = sim
        .particles
        .insert(ParticleId(1), Point::new(9.8, 5.0, 5.0), ParticleType(0));
    let image = sim
        .particles
        .insert_ghost(ParticleId(1), Point::new(-0.2, 5.0, 5.0), ParticleType(0));

    sim.system.reset_queue();
    assert!(sim.detect(h0, image));
    assert!(!sim.detect(h0, h1));
    let summary = sim.resolve();

    assert_eq!(summary.collisions, 1);
    // The ghost image resolves to the real particle 1, which holds nothing.
    assert_eq!(sim.bonds_of(0), vec![(PAIR_BOND, vec![ParticleId(1)])]);
    assert!(sim.bonds_of(1).is_empty());
}

#[test]
fn random_cloud_bonds_every_close_pair_once() {
    let mut rng = oorandom::Rand64::new(42);
    let mut sim = Sim::open();
    let distance = 1.0;
    sim.configure(bond_params(distance)).unwrap();

    let mut positions = Vec::new();
    for id in 0..60 {
        let p = Point::new(
            rng.rand_float() * 6.0,
            rng.rand_float() * 6.0,
            rng.rand_float() * 6.0,
        );
        let _ = sim.particles.insert(ParticleId(id), p, ParticleType(0));
        positions.push(p);
    }

    let mut expected = 0;
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            if (positions[i] - positions[j]).norm() <= distance {
                expected += 1;
            }
        }
    }

    let first = sim.step();
    assert_eq!(first.collisions, expected);
    assert_eq!(sim.total_bonds(), expected);
    assert_eq!(sim.step().collisions, 0);
    assert_eq!(sim.total_bonds(), expected);
}
