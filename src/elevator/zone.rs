/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::shared::{ConfigError, Zone};

/// Floor every car can reach regardless of its zone.
pub const LOBBY: u8 = 1;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneRange {
    pub zone: Zone,
    pub min_floor: u8,
    pub max_floor: u8,
}

impl ZoneRange {
    pub fn new(zone: Zone, min_floor: u8, max_floor: u8) -> ZoneRange {
        ZoneRange { zone, min_floor, max_floor }
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.min_floor <= floor && floor <= self.max_floor
    }

    pub fn can_serve(&self, floor: u8) -> bool {
        floor == LOBBY || self.contains(floor)
    }

    pub fn bounds(&self) -> (u8, u8) {
        (self.min_floor, self.max_floor)
    }
}

/**
 * Static partition of the building into zones, each bound to a fixed set of cars.
 *
 * Elevator ids are handed out in table order starting at 1, so the zone of
 * elevator `id` is `assignments[id - 1]`.
 */
#[derive(Clone, Debug)]
pub struct ZoneTable {
    n_floors: u8,
    assignments: Vec<ZoneRange>,
}

impl ZoneTable {
    pub fn from_config(config: &Config) -> Result<ZoneTable, ConfigError> {
        config.validate()?;

        let assignments = config
            .zones
            .iter()
            .flat_map(|z| {
                let range = ZoneRange::new(z.zone, z.min_floor, z.max_floor);
                std::iter::repeat(range).take(z.elevators as usize)
            })
            .collect();

        Ok(ZoneTable {
            n_floors: config.system.n_floors,
            assignments,
        })
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Iterates `(elevator id, zone range)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, ZoneRange)> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, range)| ((i + 1) as u8, *range))
    }

    /// Zone owning a floor. The lobby belongs to no single zone.
    pub fn zone_for_floor(&self, floor: u8) -> Option<Zone> {
        if floor == LOBBY {
            return None;
        }
        self.assignments
            .iter()
            .find(|range| range.contains(floor))
            .map(|range| range.zone)
    }
}
