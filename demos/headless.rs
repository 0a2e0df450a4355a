use atomic_lab::{SimParams, Simulation, Species};

fn main() {
    // 1. Configure a small, dense box so bonds form quickly
    let params = SimParams::new(400)
        .with_box(6.0)
        .with_temperature(0.8)
        .with_seed(2024);

    // 2. Initialise (all hydrogen) and spawn some oxygen and carbon
    let mut sim = match Simulation::new(params) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("bad parameters: {}", e);
            return;
        }
    };
    sim.grow(120, Species::O);
    sim.grow(30, Species::C);

    println!("{:>6} | {:>8} | {:>6} | {:>6} | {:>6} | {:>12}", "Frame", "Bonds", "H2O", "CO2", "NaCl", "E total");
    println!("{:-<60}", "");

    // 3. Drive it like a render loop would
    for frame in 0..=300 {
        if frame == 150 {
            sim.grow(40, Species::Na);
            sim.grow(40, Species::Cl);
        }
        sim.advance_frame();

        if frame % 30 == 0 {
            let counts = sim.classify();
            println!(
                "{:>6} | {:>8} | {:>6} | {:>6} | {:>6} | {:>12.4}",
                frame,
                sim.bond_count(),
                counts.water,
                counts.carbon_dioxide,
                counts.salt,
                sim.energy().total
            );
        }
    }

    // 4. Export positions the way a renderer would
    let mut draw_buffer = Vec::new();
    sim.state().write_positions_f32(&mut draw_buffer);
    println!("\n{} atoms, {} floats in draw buffer", sim.particle_count(), draw_buffer.len());
}
