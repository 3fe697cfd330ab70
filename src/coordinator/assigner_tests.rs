/*
 * Unit tests for the hall request assigner
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_score_idle_car
 *  - test_score_moving_towards_floor
 *  - test_score_lobby_cases
 *  - test_eligibility
 *  - test_assign_prefers_lowest_id_on_tie
 *  - test_assign_picks_closer_car
 *  - test_assign_none_when_no_eligible_car
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod assigner_tests {
    use crate::config::DoorConfig;
    use crate::coordinator::assigner::HallRequestAssigner;
    use crate::elevator::zone::ZoneRange;
    use crate::elevator::ElevatorFSM;
    use crate::shared::Behaviour;
    use crate::shared::Direction::{Down, Up};
    use crate::shared::Zone;

    fn low_rise(id: u8) -> ElevatorFSM {
        ElevatorFSM::new(id, ZoneRange::new(Zone::LowRise, 1, 20), DoorConfig::default())
    }

    fn idle_at(id: u8, floor: u8) -> ElevatorFSM {
        let mut car = low_rise(id);
        car.add_target(floor, Up);
        while car.step().is_none() {}
        car
    }

    #[test]
    fn test_score_idle_car() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let car = low_rise(1);

        // Act
        let score = assigner.score(&car, 10, Some(Up));

        // Assert: 9 floors away, idle bonus
        assert_eq!(score, 9 * 2 - 5);
    }

    #[test]
    fn test_score_moving_towards_floor() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let mut car = low_rise(1);
        car.add_target(15, Up);
        car.step();
        assert_eq!(car.behaviour(), Behaviour::Moving);

        // Act
        let with_direction = assigner.score(&car, 10, Some(Up));
        let against_direction = assigner.score(&car, 10, Some(Down));

        // Assert: distance 18, one target 5, nearby target -3, same direction -10
        assert_eq!(with_direction, 18 + 5 - 3 - 10);
        assert_eq!(against_direction, 18 + 5 - 3);
    }

    #[test]
    fn test_score_lobby_cases() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let idle_lobby = low_rise(1);

        let mut moving_lobby = low_rise(2);
        moving_lobby.add_target(15, Up);
        moving_lobby.step();

        let mut doors_lobby = low_rise(3);
        doors_lobby.add_target(1, Down);
        doors_lobby.step();
        doors_lobby.step();
        assert_eq!(doors_lobby.behaviour(), Behaviour::DoorOpening);

        let mut returning = idle_at(4, 3);
        returning.add_target(1, Down);

        // Act + Assert
        assert_eq!(assigner.score(&idle_lobby, 1, Some(Up)), 0);
        assert_eq!(assigner.score(&moving_lobby, 1, Some(Up)), 5);
        assert_eq!(assigner.score(&doors_lobby, 1, Some(Up)), 5);
        assert_eq!(assigner.score(&returning, 1, Some(Up)), 2 * 2 + 5 + 10);
    }

    #[test]
    fn test_eligibility() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let mid = ElevatorFSM::new(3, ZoneRange::new(Zone::MidRise, 21, 35), DoorConfig::default());
        let mut stopped = low_rise(1);
        stopped.emergency_stop();

        // Act + Assert
        assert!(assigner.is_eligible(&mid, 25));
        assert!(assigner.is_eligible(&mid, 1));
        assert!(!assigner.is_eligible(&mid, 10));
        assert!(!assigner.is_eligible(&stopped, 10));
    }

    #[test]
    fn test_assign_prefers_lowest_id_on_tie() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let cars = vec![low_rise(1), low_rise(2)];

        // Act
        let chosen = assigner.assign(&cars, 8, Some(Up));

        // Assert
        assert_eq!(chosen, Some(0));
    }

    #[test]
    fn test_assign_picks_closer_car() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let cars = vec![low_rise(1), idle_at(2, 12)];

        // Act
        let chosen = assigner.assign(&cars, 14, Some(Down));

        // Assert
        assert_eq!(chosen, Some(1));
    }

    #[test]
    fn test_assign_none_when_no_eligible_car() {
        // Arrange
        let assigner = HallRequestAssigner::new(5);
        let mut stopped = low_rise(2);
        stopped.emergency_stop();
        let cars = vec![low_rise(1), stopped];

        // Act + Assert
        assert_eq!(assigner.assign(&cars, 30, Some(Up)), None);
        assert_eq!(assigner.assign(&cars[1..], 5, Some(Up)), None);
    }
}
