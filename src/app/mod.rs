use std::sync::atomic::Ordering;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use crate::config::{self, InitConfig, SimulationConfig};
use crate::diagnostics::SystemStats;
use crate::scenario;
use crate::simulation::Simulation;
use crate::state::{self, BodyView, SimCommand, PAUSED, SIM_COMMAND_SENDER};

pub mod command_loop;
pub mod spawn;

pub fn run() {
    let mut simulation = match InitConfig::load_default() {
        Ok(init) => {
            let defaults = SimulationConfig::default();
            let (g, max_sub_step_ms, speed) =
                init.simulation.as_ref().unwrap_or(&defaults).resolved();
            let mut simulation = Simulation::with_parameters(g, max_sub_step_ms, speed);
            *state::SPEED_FACTOR.lock() = simulation.speed();
            seed(&mut simulation, scenario::from_config(&init));
            simulation
        }
        Err(err) => {
            println!(
                "no {} ({}), starting two-body preset",
                config::INIT_CONFIG_PATH,
                err
            );
            let mut simulation = Simulation::new();
            seed(&mut simulation, scenario::two_body());
            simulation
        }
    };

    let (tx, rx) = channel();
    *SIM_COMMAND_SENDER.lock() = Some(tx);

    simulation.reset_clock();
    run_simulation_loop(rx, simulation);
}

fn seed(simulation: &mut Simulation, bodies: Vec<crate::body::Body>) {
    for body in bodies {
        if let Err(err) = simulation.add_body(body) {
            eprintln!("[ERROR] skipping initial body: {}", err);
        }
    }
}

pub fn run_simulation_loop(rx: Receiver<SimCommand>, mut simulation: Simulation) {
    let mut last_report = 0;
    loop {
        // Handle commands
        while let Ok(cmd) = rx.try_recv() {
            command_loop::handle_command(cmd, &mut simulation);
        }

        simulation.set_speed(*state::SPEED_FACTOR.lock());

        if PAUSED.load(Ordering::Relaxed) {
            // keep the baseline fresh so resuming does not integrate the gap
            simulation.reset_clock();
        } else if let Err(err) = simulation.update() {
            eprintln!("[ERROR] update aborted: {}", err);
        }

        publish(&mut simulation);

        if simulation.frame >= last_report + config::STATUS_REPORT_INTERVAL {
            last_report = simulation.frame;
            let stats = SystemStats::measure(&simulation.bodies);
            println!(
                "frame {:>8}  bodies {:>4}  ke {:.4e}  p ({:.4e}, {:.4e})",
                simulation.frame,
                stats.body_count,
                stats.kinetic_energy,
                stats.momentum.x,
                stats.momentum.y
            );
        }

        std::thread::sleep(Duration::from_millis(config::TICK_INTERVAL_MS));
    }
}

/// Publish snapshots for the driver and absorb externally created bodies.
/// This is the single insertion point per tick: spawned bodies only ever
/// join the collection between update passes, never during one.
pub fn publish(simulation: &mut Simulation) {
    for body in state::SPAWN.lock().drain(..) {
        if let Err(err) = simulation.add_body(body) {
            eprintln!("[ERROR] dropping spawned body: {}", err);
        }
    }
    let mut lock = state::BODIES.lock();
    lock.clear();
    lock.extend(simulation.bodies.iter().map(BodyView::of));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use ultraviolet::DVec2;

    // single test: SPAWN and BODIES are process-wide
    #[test]
    fn publish_drains_spawn_queue_and_snapshots() {
        let mut simulation = Simulation::new();
        simulation
            .add_body(Body::new(DVec2::zero(), 1.0, DVec2::zero()))
            .unwrap();
        {
            let mut spawn = state::SPAWN.lock();
            spawn.push(Body::new(DVec2::new(5.0, 5.0), 2.0, DVec2::zero()));
            // zero mass never reaches the collection
            spawn.push(Body::new(DVec2::zero(), 0.0, DVec2::zero()));
        }

        publish(&mut simulation);

        assert!(state::SPAWN.lock().is_empty());
        assert_eq!(simulation.bodies.len(), 2);
        assert_eq!(state::BODIES.lock().len(), 2);
    }
}
