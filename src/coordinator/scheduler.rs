/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::ElevatorFSM;
use crate::shared::{Behaviour, StateChange};
use log::{debug, info};

/***************************************/
/*             Public API              */
/***************************************/

/// Steps every car once, in id order, and reports the cars that changed.
///
/// Each car only reads its own state, so the order has no effect on the result.
pub fn advance(elevators: &mut [ElevatorFSM]) -> Vec<StateChange> {
    let mut changes = Vec::new();

    for elevator in elevators.iter_mut() {
        if elevator.is_emergency() {
            continue;
        }

        let old_behaviour = elevator.behaviour();
        let old_floor = elevator.floor();
        let old_direction = elevator.direction();

        let served_floor = elevator.step();

        let change = StateChange {
            id: elevator.id(),
            old_behaviour,
            new_behaviour: elevator.behaviour(),
            old_floor,
            new_floor: elevator.floor(),
            old_direction,
            new_direction: elevator.direction(),
            served_floor,
        };

        if is_change(&change) {
            log_change(&change, &elevator.targets().floors());
            changes.push(change);
        }
    }

    changes
}

fn is_change(change: &StateChange) -> bool {
    change.old_behaviour != change.new_behaviour
        || change.old_floor != change.new_floor
        || change.old_direction != change.new_direction
}

fn log_change(change: &StateChange, targets: &[u8]) {
    if change.old_behaviour != change.new_behaviour {
        info!(
            "STATE: E{} at F{} {} -> {} ({})",
            change.id, change.new_floor, change.old_behaviour, change.new_behaviour, change.new_direction
        );
        if change.new_behaviour == Behaviour::DoorOpening {
            info!("STOP: E{} at F{}, targets {:?}", change.id, change.new_floor, targets);
        }
    }
    if change.old_direction != change.new_direction {
        info!(
            "DIRECTION: E{} at F{} {} -> {}, targets {:?}",
            change.id, change.new_floor, change.old_direction, change.new_direction, targets
        );
    }
    if change.old_floor != change.new_floor {
        debug!(
            "MOVE: E{} {} F{} -> F{}, targets {:?}",
            change.id, change.new_direction, change.old_floor, change.new_floor, targets
        );
    }
    if let Some(floor) = change.served_floor {
        info!("COMPLETED: E{} F{}, remaining {:?}", change.id, floor, targets);
    }
}
