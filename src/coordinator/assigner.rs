/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::{ElevatorFSM, LOBBY};
use crate::shared::{Behaviour, Direction};
use log::debug;

/***************************************/
/*             Constants               */
/***************************************/
const DISTANCE_WEIGHT: i32 = 2;
const LOBBY_WAITING_SCORE: i32 = 5;
const LOBBY_ALREADY_TARGETED_PENALTY: i32 = 10;
const SAME_DIRECTION_BONUS: i32 = 10;
const IDLE_BONUS: i32 = 5;
const NEARBY_TARGET_BONUS: i32 = 3;
const NEARBY_TARGET_RANGE: u8 = 5;

/**
 * Scores cars for a floor and picks the cheapest one.
 *
 * Lower scores are better. A car is eligible when its zone covers the floor
 * (every car covers the lobby) and it is not in emergency.
 *
 * # Fields
 * - `busy_penalty`:    Score added per target already queued on a car.
 */
#[derive(Clone, Copy, Debug)]
pub struct HallRequestAssigner {
    busy_penalty: i32,
}

impl HallRequestAssigner {
    pub fn new(busy_penalty: i32) -> HallRequestAssigner {
        HallRequestAssigner { busy_penalty }
    }

    pub fn is_eligible(&self, elevator: &ElevatorFSM, floor: u8) -> bool {
        elevator.can_serve(floor) && !elevator.is_emergency()
    }

    pub fn score(&self, elevator: &ElevatorFSM, floor: u8, hint: Option<Direction>) -> i32 {
        let current = elevator.floor();
        let targets = elevator.targets();

        let mut score = current.abs_diff(floor) as i32 * DISTANCE_WEIGHT;
        score += targets.len() as i32 * self.busy_penalty;

        if floor == LOBBY {
            if current == LOBBY {
                if elevator.behaviour() == Behaviour::Idle {
                    score = 0;
                } else if elevator.behaviour() != Behaviour::Moving {
                    score = LOBBY_WAITING_SCORE;
                }
            } else if targets.contains(LOBBY) {
                score += LOBBY_ALREADY_TARGETED_PENALTY;
            }
            return score;
        }

        if let Some(direction) = hint {
            let on_the_way = match direction {
                Direction::Up => current < floor,
                Direction::Down => current > floor,
                Direction::Idle => false,
            };
            if elevator.direction() == direction && on_the_way {
                score -= SAME_DIRECTION_BONUS;
            }
        }

        if elevator.behaviour() == Behaviour::Idle {
            score -= IDLE_BONUS;
        }

        if matches!(targets.nearest_distance(floor), Some(d) if d <= NEARBY_TARGET_RANGE) {
            score -= NEARBY_TARGET_BONUS;
        }

        score
    }

    /// Index of the best eligible car, ties going to the lowest id.
    pub fn assign(&self, elevators: &[ElevatorFSM], floor: u8, hint: Option<Direction>) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;

        for (index, elevator) in elevators.iter().enumerate() {
            if !self.is_eligible(elevator, floor) {
                continue;
            }
            let score = self.score(elevator, floor, hint);
            debug!("E{} scores {} for F{}", elevator.id(), score, floor);

            match best {
                Some((_, best_score)) if best_score <= score => {}
                _ => best = Some((index, score)),
            }
        }

        best.map(|(index, _)| index)
    }
}
