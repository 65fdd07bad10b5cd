use crate::common::{Sim, PAIR_BOND, TRIPLE_BOND};
use tether3d::collision::{CollisionModes, CollisionParams, ConfigError};
use tether3d::math::Point;
use tether3d::particles::{
    BondTypeId, LocalParticles, ParticleId, ParticleStore, ParticleType, RelationError,
    RigidRelations,
};
use tether3d::utils::PeriodicBox;

const VS_TYPE: ParticleType = ParticleType(9);

fn vs_params(bond_vs: BondTypeId) -> CollisionParams {
    CollisionParams::new(CollisionModes::BOND | CollisionModes::VIRTUAL_SITE, 1.0)
        .with_bond_centers(PAIR_BOND)
        .with_virtual_sites(bond_vs, VS_TYPE)
}

/// Three well-separated colliding pairs: (0, 1), (2, 3), (4, 5).
fn three_pairs(sim: &mut Sim) {
    for pair in 0..3u32 {
        let x = pair as f64 * 10.0;
        let _ = sim.add(2 * pair, x, 1);
        let _ = sim.add(2 * pair + 1, x + 0.6, 1);
    }
}

#[test]
fn two_sites_per_collision() {
    let mut sim = Sim::open();
    sim.configure(vs_params(PAIR_BOND)).unwrap();
    three_pairs(&mut sim);

    let summary = sim.step();

    assert_eq!(summary.collisions, 3);
    assert_eq!(summary.particles_created, 6);
    assert_eq!(sim.particles.len(), 12);
    assert!(sim.system.queue().is_empty());

    let sites: Vec<_> = sim
        .particles
        .real_particles()
        .filter(|p| p.is_virtual)
        .collect();
    assert_eq!(sites.len(), 6);
    for site in &sites {
        assert_eq!(site.particle_type, VS_TYPE);
        let parent = site.virtual_site.expect("site must be related").parent;
        assert!(parent.0 < 6);
    }

    // Each original particle is followed by exactly one site.
    let mut parents: Vec<_> = sites
        .iter()
        .map(|s| s.virtual_site.unwrap().parent)
        .collect();
    parents.sort();
    assert_eq!(parents, (0..6).map(ParticleId).collect::<Vec<_>>());
}

#[test]
fn sites_sit_at_the_collision_point_and_are_bonded() {
    let mut sim = Sim::open();
    sim.configure(vs_params(PAIR_BOND)).unwrap();
    let _ = sim.add(0, 1.0, 1);
    let _ = sim.add(1, 1.6, 1);

    let _ = sim.step();

    // Sites are created in order: the one following 0, then the one following 1.
    let site0 = sim.local(2);
    let site1 = sim.local(3);
    approx::assert_relative_eq!(site0.position, Point::new(1.3, 0.0, 0.0), epsilon = 1.0e-12);
    approx::assert_relative_eq!(site1.position, Point::new(1.3, 0.0, 0.0), epsilon = 1.0e-12);
    assert_eq!(site0.virtual_site.unwrap().parent, ParticleId(0));
    assert_eq!(site1.virtual_site.unwrap().parent, ParticleId(1));

    assert!(sim.bonds_of(2).is_empty());
    assert_eq!(sim.bonds_of(3), vec![(PAIR_BOND, vec![ParticleId(2)])]);
    assert_eq!(sim.bonds_of(0), vec![(PAIR_BOND, vec![ParticleId(1)])]);
    assert_eq!(sim.relations.children(), &[ParticleId(2), ParticleId(3)]);
}

#[test]
fn triple_bond_spans_both_colliding_particles() {
    let mut sim = Sim::open();
    sim.configure(vs_params(TRIPLE_BOND)).unwrap();
    let _ = sim.add(0, 0.0, 1);
    let _ = sim.add(1, 0.6, 1);

    let summary = sim.step();

    // The center bond is created on detection, the triple bonds on resolution.
    assert_eq!(summary.bonds_created, 2);
    let expected = vec![(TRIPLE_BOND, vec![ParticleId(0), ParticleId(1)])];
    assert_eq!(sim.bonds_of(2), expected);
    assert_eq!(sim.bonds_of(3), expected);
    assert_eq!(sim.total_bonds(), 3);
}

#[test]
fn virtual_sites_do_not_collide() {
    let mut sim = Sim::open();
    sim.configure(vs_params(PAIR_BOND)).unwrap();
    three_pairs(&mut sim);
    let _ = sim.step();

    // The sites overlap each other and their parents, but are ignored, and the
    // original pairs are already bonded.
    let summary = sim.step();
    assert_eq!(summary.collisions, 0);
    assert_eq!(sim.particles.len(), 12);
}

#[test]
fn sites_follow_their_parents() {
    let mut sim = Sim::open();
    sim.configure(vs_params(PAIR_BOND)).unwrap();
    let _ = sim.add(0, 0.0, 1);
    let _ = sim.add(1, 0.6, 1);
    let _ = sim.step();

    sim.particles
        .local_particle_mut(ParticleId(1))
        .unwrap()
        .position = Point::new(2.6, 1.0, 0.0);
    sim.relations.update_positions(&mut sim.particles);

    let (site0, site1) = (sim.local(2).position, sim.local(3).position);
    approx::assert_relative_eq!(site0, Point::new(0.3, 0.0, 0.0), epsilon = 1.0e-12);
    approx::assert_relative_eq!(site1, Point::new(2.3, 1.0, 0.0), epsilon = 1.0e-12);
}

/// Relations that refuse every virtual site.
struct NoRelations;

impl RigidRelations for NoRelations {
    fn relate(
        &mut self,
        _: &mut dyn ParticleStore,
        child: ParticleId,
        _: ParticleId,
    ) -> Result<(), RelationError> {
        Err(RelationError::UnknownChild(child))
    }
}

#[test]
fn failed_relation_is_reported_and_resolution_goes_on() {
    let mut sim = Sim::open();
    sim.configure(vs_params(PAIR_BOND)).unwrap();
    three_pairs(&mut sim);

    sim.system.reset_queue();
    sim.detect_all_pairs();
    let summary = sim.system.resolve(
        &mut sim.particles,
        &sim.bond_types,
        &mut NoRelations,
        &mut sim.errors,
        &mut sim.resort,
    );

    // Every site fails to relate, yet all three collisions are fully resolved.
    assert_eq!(summary.collisions, 3);
    assert_eq!(summary.errors, 6);
    assert_eq!(summary.particles_created, 6);
    assert_eq!(summary.bonds_created, 3);
    assert_eq!(sim.errors.messages().len(), 6);
    assert!(sim.system.queue().is_empty());

    let sites: Vec<_> = sim
        .particles
        .real_particles()
        .filter(|p| p.is_virtual)
        .collect();
    assert_eq!(sites.len(), 6);
    assert!(sites.iter().all(|s| s.virtual_site.is_none()));
    // The last collision still got its pair of bonded sites.
    assert_eq!(sim.bonds_of(11), vec![(PAIR_BOND, vec![ParticleId(10)])]);
}

#[test]
fn virtual_site_modes_need_virtual_site_support() {
    let mut sim = Sim::open();
    sim.particles = LocalParticles::new(PeriodicBox::open()).with_virtual_sites(false);

    let err = sim.configure(vs_params(PAIR_BOND)).unwrap_err();
    assert!(matches!(err, ConfigError::VirtualSitesUnavailable(_)));
    assert_eq!(err.code(), 1);
    assert!(!sim.system.is_enabled());
}
