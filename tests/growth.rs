use atomic_lab::{SimParams, Simulation, Species};

#[test]
fn test_grow_preserves_existing_particles_and_bonds() {
    let params = SimParams::new(150).with_box(4.0).with_seed(31);
    let mut sim = Simulation::new(params).unwrap();
    for _ in 0..20 {
        sim.advance_frame();
    }

    let n = sim.particle_count();
    let positions = sim.positions().to_vec();
    let velocities = sim.velocities().to_vec();
    let species = sim.species().to_vec();
    let bonds: Vec<(usize, usize)> = sim.bonds().iter().collect();
    println!("bonds before growth: {}", bonds.len());

    sim.grow(25, Species::Cl);

    assert_eq!(sim.particle_count(), n + 25);
    assert_eq!(&sim.positions()[..n], &positions[..]);
    assert_eq!(&sim.velocities()[..n], &velocities[..]);
    assert_eq!(&sim.species()[..n], &species[..]);
    assert!(sim.species()[n..].iter().all(|&s| s == Species::Cl));
    assert_eq!(sim.bond_count(), bonds.len());
    for &(i, j) in &bonds {
        assert!(sim.bonds().has(i, j));
    }
    assert_eq!(sim.bonds().num_particles(), n + 25);
    assert_eq!(sim.state().accelerations().len(), n + 25);
}

#[test]
fn test_spawned_particles_start_near_centre() {
    let params = SimParams::new(10).with_box(10.0).with_seed(4);
    let mut sim = Simulation::new(params).unwrap();
    sim.grow(100, Species::Na);

    let limit = params.box_half_extent * params.spawn_fraction;
    let v_limit = params.temperature.sqrt();
    for i in 10..110 {
        assert!(sim.positions()[i].abs().max_element() <= limit);
        assert!(sim.velocities()[i].abs().max_element() <= v_limit);
    }
}

#[test]
fn test_grow_zero_is_noop() {
    let mut sim = Simulation::new(SimParams::new(40).with_seed(8)).unwrap();
    let before = sim.state().clone();
    sim.grow(0, Species::O);
    assert_eq!(sim.state(), &before);
}

#[test]
fn test_grown_particles_take_part_in_dynamics() {
    // Springs only, so formed bonds are not torn apart by LJ repulsion
    let params = SimParams::new(0).with_box(3.0).with_seed(12).with_temperature(0.2).with_lj(false);
    let mut sim = Simulation::new(params).unwrap();
    assert_eq!(sim.particle_count(), 0);
    sim.advance_frame();

    sim.grow(40, Species::O);
    sim.grow(80, Species::H);
    for _ in 0..30 {
        sim.advance_frame();
    }
    assert_eq!(sim.particle_count(), 120);
    assert!(sim.positions().iter().all(|p| p.abs().max_element() <= 3.0));
    assert!(sim.bond_count() > 0, "dense O/H mix should bond");
}
