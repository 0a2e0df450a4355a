use atomic_lab::{SimParams, Simulation, Species};
use std::time::Instant;

fn create_simulation(n: usize) -> Simulation {
    // Keep density constant as the system grows
    let half = 0.5 * (n as f64 / 0.3).cbrt();
    let params = SimParams::new(n).with_box(half).with_seed(7).with_temperature(0.5);
    let mut sim = Simulation::new(params).expect("valid benchmark parameters");
    sim.grow(n / 10, Species::O);
    sim
}

fn measure_avg_time(sim: &mut Simulation, iters: usize, refresh_forces: bool) -> f64 {
    let start = Instant::now();
    for _ in 0..iters {
        sim.step_with(refresh_forces);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iters as f64
}

fn main() {
    let particle_counts = [500, 1000, 2000, 4000, 8000];

    println!("\nStep Throughput Benchmark");
    println!("{:>10} | {:>12} | {:>12} | {:>8} | {:>8}", "Atoms", "Full (ms)", "Kick (ms)", "Ratio", "Bonds");
    println!("{:-<62}", "");

    for &n in &particle_counts {
        let mut sim = create_simulation(n);

        // Warm up
        for _ in 0..5 {
            sim.step();
        }

        let t_full = measure_avg_time(&mut sim, 20, true);
        let t_kick = measure_avg_time(&mut sim, 20, false);

        println!(
            "{:>10} | {:>12.3} | {:>12.3} | {:>7.1}x | {:>8}",
            sim.particle_count(),
            t_full,
            t_kick,
            t_full / t_kick.max(1e-9),
            sim.bond_count()
        );
    }
    println!("{:-<62}", "");
}
