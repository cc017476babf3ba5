use crate::config;
use crate::simulation::Simulation;
use crate::state::{self, SimCommand};

use super::spawn;

pub fn handle_command(cmd: SimCommand, simulation: &mut Simulation) {
    match cmd {
        SimCommand::AddBody { body } => match simulation.add_body(body) {
            Ok(id) => println!("added body {}", id),
            Err(err) => eprintln!("[ERROR] add body: {}", err),
        },

        SimCommand::AddOrbiting { x, y, mass, center_id } => {
            match spawn::orbiting_body(simulation, x, y, mass, center_id) {
                Ok(id) => println!("added body {} orbiting {}", id, center_id),
                Err(err) => eprintln!("[ERROR] add orbiting body: {}", err),
            }
        }

        SimCommand::ChangeMass { id, delta } => match simulation.change_mass(id, delta) {
            Ok(mass) => println!("body {} new mass: {:e}", id, mass),
            Err(err) => eprintln!("[ERROR] change mass: {}", err),
        },

        SimCommand::SetMass { id, mass } => {
            if let Err(err) = simulation.set_mass(id, mass) {
                eprintln!("[ERROR] set mass: {}", err);
            }
        }

        SimCommand::Remove { id } => match simulation.remove_body(id) {
            Ok(_) => println!("removed body {}", id),
            Err(err) => eprintln!("[ERROR] remove body: {}", err),
        },

        SimCommand::DeleteAll => {
            simulation.bodies.clear();
            println!("deleted all bodies");
        }

        SimCommand::SetSpeed { speed } => {
            *state::SPEED_FACTOR.lock() = speed.max(0.0);
        }

        SimCommand::ResetClock => simulation.reset_clock(),

        // one bounded sub-step, for frame-by-frame inspection while paused
        SimCommand::StepOnce => {
            if let Err(err) = simulation.advance(config::MAX_SUB_STEP_MS) {
                eprintln!("[ERROR] step once: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use ultraviolet::DVec2;

    #[test]
    fn change_mass_command_updates_body() {
        let mut sim = Simulation::new();
        let id = sim
            .add_body(Body::new(DVec2::zero(), 10.0, DVec2::zero()))
            .unwrap();
        handle_command(SimCommand::ChangeMass { id, delta: 4.0 }, &mut sim);
        assert_eq!(sim.body(id).unwrap().mass, 14.0);
    }

    #[test]
    fn delete_all_empties_the_collection() {
        let mut sim = Simulation::new();
        sim.add_body(Body::new(DVec2::zero(), 1.0, DVec2::zero()))
            .unwrap();
        sim.add_body(Body::new(DVec2::new(10.0, 0.0), 1.0, DVec2::zero()))
            .unwrap();
        handle_command(SimCommand::DeleteAll, &mut sim);
        assert!(sim.bodies.is_empty());
    }

    #[test]
    fn step_once_advances_one_sub_step() {
        let mut sim = Simulation::new();
        let id = sim
            .add_body(Body::new(DVec2::zero(), 1.0, DVec2::new(1.0, 0.0)))
            .unwrap();
        handle_command(SimCommand::StepOnce, &mut sim);
        let pos = sim.body(id).unwrap().pos;
        assert!((pos.x - 0.01).abs() < 1e-12, "pos.x = {}", pos.x);
    }
}
