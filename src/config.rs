/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ConfigError, Zone};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub system: SystemConfig,
    pub doors: DoorConfig,
    pub dispatch: DispatchConfig,
    pub zones: Vec<ZoneConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SystemConfig {
    pub n_floors: u8,
    pub tick_interval_ms: u64,
    pub status_ttl_ms: u64,
}

/// Dwell lengths, in ticks, of the three door states.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DoorConfig {
    pub opening_ticks: u32,
    pub open_ticks: u32,
    pub closing_ticks: u32,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DispatchConfig {
    pub busy_penalty: i32,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ZoneConfig {
    pub zone: Zone,
    pub min_floor: u8,
    pub max_floor: u8,
    pub elevators: u8,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            system: SystemConfig {
                n_floors: 50,
                tick_interval_ms: 50,
                status_ttl_ms: 100,
            },
            doors: DoorConfig::default(),
            dispatch: DispatchConfig { busy_penalty: 5 },
            zones: vec![
                ZoneConfig { zone: Zone::LowRise, min_floor: 1, max_floor: 20, elevators: 2 },
                ZoneConfig { zone: Zone::MidRise, min_floor: 21, max_floor: 35, elevators: 2 },
                ZoneConfig { zone: Zone::HighRise, min_floor: 36, max_floor: 50, elevators: 2 },
            ],
        }
    }
}

impl Default for DoorConfig {
    fn default() -> DoorConfig {
        DoorConfig {
            opening_ticks: 2,
            open_ticks: 3,
            closing_ticks: 2,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system.n_floors == 0 {
            return Err(ConfigError::Invalid("building needs at least one floor".into()));
        }
        if self.system.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick interval must be positive".into()));
        }
        let doors = &self.doors;
        if doors.opening_ticks == 0 || doors.open_ticks == 0 || doors.closing_ticks == 0 {
            return Err(ConfigError::Invalid("door dwell times must be at least one tick".into()));
        }
        if self.zones.is_empty() {
            return Err(ConfigError::Invalid("at least one zone is required".into()));
        }

        for zone in &self.zones {
            if zone.min_floor == 0 || zone.min_floor > zone.max_floor {
                return Err(ConfigError::Invalid(format!(
                    "zone {} has an empty floor range {}-{}",
                    zone.zone, zone.min_floor, zone.max_floor
                )));
            }
            if zone.max_floor > self.system.n_floors {
                return Err(ConfigError::Invalid(format!(
                    "zone {} reaches floor {} but the building has {} floors",
                    zone.zone, zone.max_floor, self.system.n_floors
                )));
            }
            if zone.elevators == 0 {
                return Err(ConfigError::Invalid(format!("zone {} has no elevators", zone.zone)));
            }
        }

        let total: u32 = self.zones.iter().map(|z| z.elevators as u32).sum();
        if total > u8::MAX as u32 {
            return Err(ConfigError::Invalid(format!("{} elevators is more than supported", total)));
        }

        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_shipped_config_matches_default() {
        // Arrange
        let shipped = include_str!("../config.toml");

        // Act
        let config = parse_config(shipped).unwrap();

        // Assert
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zone_outside_building_is_rejected() {
        // Arrange
        let mut config = Config::default();
        config.system.n_floors = 30;

        // Act
        let result = config.validate();

        // Assert
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_floors_is_rejected() {
        let mut config = Config::default();
        config.system.n_floors = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_door_dwell_is_rejected() {
        // Arrange
        let mut opening = Config::default();
        opening.doors.opening_ticks = 0;
        let mut open = Config::default();
        open.doors.open_ticks = 0;
        let mut closing = Config::default();
        closing.doors.closing_ticks = 0;

        // Act & Assert
        assert!(matches!(opening.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(open.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(closing.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = parse_config("[system]\nn_floors = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
