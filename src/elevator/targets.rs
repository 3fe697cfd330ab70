/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Direction;

/***************************************/
/*       Public data structures        */
/***************************************/

/// A floor the car is committed to stop at, tagged with the direction of the
/// request that put it there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub floor: u8,
    pub direction: Direction,
}

/**
 * Ordered set of target floors.
 *
 * The queue is kept sorted for the car's direction of travel: ascending while
 * going up or idle, descending while going down. Every insertion re-sorts the
 * whole queue, which is fine for a few dozen floors.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetQueue {
    targets: Vec<Target>,
}

impl TargetQueue {
    pub fn new() -> TargetQueue {
        TargetQueue { targets: Vec::new() }
    }

    /// Returns false if the floor is already queued.
    pub fn insert(&mut self, target: Target, order: Direction) -> bool {
        if self.contains(target.floor) {
            return false;
        }
        self.targets.push(target);
        self.sort_for(order);
        true
    }

    pub fn sort_for(&mut self, direction: Direction) {
        match direction {
            Direction::Down => self.targets.sort_by(|a, b| b.floor.cmp(&a.floor)),
            Direction::Up | Direction::Idle => self.targets.sort_by_key(|t| t.floor),
        }
    }

    pub fn remove(&mut self, floor: u8) -> Option<Target> {
        let index = self.targets.iter().position(|t| t.floor == floor)?;
        Some(self.targets.remove(index))
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.targets.iter().any(|t| t.floor == floor)
    }

    pub fn front(&self) -> Option<Target> {
        self.targets.first().copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Floors in queue order.
    pub fn floors(&self) -> Vec<u8> {
        self.targets.iter().map(|t| t.floor).collect()
    }

    pub fn all_below(&self, floor: u8) -> bool {
        self.targets.iter().all(|t| t.floor < floor)
    }

    pub fn all_above(&self, floor: u8) -> bool {
        self.targets.iter().all(|t| t.floor > floor)
    }

    /// Distance from `floor` to the closest queued floor.
    pub fn nearest_distance(&self, floor: u8) -> Option<u8> {
        self.targets.iter().map(|t| t.floor.abs_diff(floor)).min()
    }
}
