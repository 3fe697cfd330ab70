/*
 * Unit tests for coordinator module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_coordinator_init
 *  - test_internal_request_trip
 *  - test_internal_request_rejections
 *  - test_external_request_boundaries
 *  - test_external_requests_stay_in_zone
 *  - test_lobby_admission
 *  - test_emergency_and_resume
 *  - test_tick_reports_changes
 *  - test_hall_calls_and_statistics
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod coordinator_tests {
    use crate::config::Config;
    use crate::coordinator::Coordinator;
    use crate::shared::Behaviour::{DoorClosing, DoorOpen, DoorOpening, Emergency, Idle, Moving};
    use crate::shared::CallDirection;
    use crate::shared::Direction;
    use crate::shared::{Assignment, DispatchError};

    fn setup_coordinator() -> Coordinator {
        // 50 floors, 2 low-rise, 2 mid-rise and 2 high-rise cars
        Coordinator::new(&Config::default()).unwrap()
    }

    fn run_until_idle(coordinator: &mut Coordinator, id: u8) -> usize {
        let mut ticks = 0;
        loop {
            coordinator.tick();
            ticks += 1;
            let state = coordinator.elevator_status(id).unwrap();
            if state.behaviour == Idle && state.pending_targets.is_empty() {
                return ticks;
            }
            assert!(ticks < 500, "E{} never settled", id);
        }
    }

    #[test]
    fn test_coordinator_init() {
        // Arrange + Act
        let coordinator = setup_coordinator();

        // Assert
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.len(), 6);
        for (i, state) in snapshot.iter().enumerate() {
            assert_eq!(state.id as usize, i + 1);
            assert_eq!(state.floor, 1);
            assert_eq!(state.behaviour, Idle);
            assert_eq!(state.direction, Direction::Idle);
            assert!(state.pending_targets.is_empty());
        }
        assert_eq!(snapshot[2].zone_range, (21, 35));
    }

    #[test]
    fn test_internal_request_trip() {
        // Purpose: Trace elevator 1 from the lobby to floor 5 and back to idle

        // Arrange
        let mut coordinator = setup_coordinator();

        // Act
        assert_eq!(coordinator.submit_internal_request(1, 5), Ok(()));

        // Assert
        coordinator.tick();
        let state = coordinator.elevator_status(1).unwrap();
        assert_eq!(state.behaviour, Moving);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.floor, 1);

        for _ in 0..4 {
            coordinator.tick();
        }
        assert_eq!(coordinator.elevator_status(1).unwrap().floor, 5);

        let mut trace = Vec::new();
        for _ in 0..8 {
            coordinator.tick();
            trace.push(coordinator.elevator_status(1).unwrap().behaviour);
        }
        assert_eq!(
            trace,
            vec![DoorOpening, DoorOpening, DoorOpen, DoorOpen, DoorOpen, DoorClosing, DoorClosing, Idle]
        );

        let state = coordinator.elevator_status(1).unwrap();
        assert!(state.pending_targets.is_empty());
        assert_eq!(state.direction, Direction::Idle);
        assert_eq!(coordinator.statistics().completed_stops, 1);
    }

    #[test]
    fn test_internal_request_rejections() {
        // Arrange
        let mut coordinator = setup_coordinator();

        // Act + Assert
        assert_eq!(
            coordinator.submit_internal_request(1, 40),
            Err(DispatchError::NoEligibleElevator(40))
        );
        assert!(coordinator.elevator_status(1).unwrap().pending_targets.is_empty());

        assert_eq!(coordinator.submit_internal_request(1, 51), Err(DispatchError::InvalidFloor(51)));
        assert_eq!(coordinator.submit_internal_request(1, 0), Err(DispatchError::InvalidFloor(0)));
        assert_eq!(coordinator.submit_internal_request(7, 5), Err(DispatchError::UnknownElevatorId(7)));
        assert_eq!(coordinator.submit_internal_request(0, 5), Err(DispatchError::UnknownElevatorId(0)));

        assert_eq!(coordinator.submit_internal_request(2, 8), Ok(()));
        assert_eq!(
            coordinator.submit_internal_request(2, 8),
            Err(DispatchError::ElevatorBusyOrConflict { elevator: 2, floor: 8 })
        );

        // Mid-rise cars still stop at the lobby
        assert_eq!(coordinator.submit_internal_request(3, 1), Ok(()));
    }

    #[test]
    fn test_external_request_boundaries() {
        // Arrange
        let mut coordinator = setup_coordinator();

        // Act + Assert
        assert_eq!(
            coordinator.submit_external_request(50, CallDirection::Up),
            Err(DispatchError::InvalidDirectionAtBoundary { floor: 50, direction: CallDirection::Up })
        );
        assert_eq!(
            coordinator.submit_external_request(1, CallDirection::Down),
            Err(DispatchError::InvalidDirectionAtBoundary { floor: 1, direction: CallDirection::Down })
        );
        assert_eq!(
            coordinator.submit_external_request(51, CallDirection::Up),
            Err(DispatchError::InvalidFloor(51))
        );
        assert!(coordinator.snapshot().iter().all(|s| s.pending_targets.is_empty()));
    }

    #[test]
    fn test_external_requests_stay_in_zone() {
        // Purpose: Calls at floor 25 only ever reach the mid-rise cars

        // Arrange
        let mut coordinator = setup_coordinator();

        // Act
        let up = coordinator.submit_external_request(25, CallDirection::Up).unwrap();
        let down = coordinator.submit_external_request(25, CallDirection::Down).unwrap();
        let low = coordinator.submit_external_request(5, CallDirection::Up).unwrap();
        let high = coordinator.submit_external_request(40, CallDirection::Down).unwrap();

        // Assert
        assert_eq!(up, Assignment::Assigned(3));
        assert_eq!(down, Assignment::Assigned(4));
        assert!([1, 2].contains(&low.elevator()));
        assert!([5, 6].contains(&high.elevator()));

        let snapshot = coordinator.snapshot();
        for state in snapshot.iter().filter(|s| s.pending_targets.contains(&25)) {
            assert!(state.id == 3 || state.id == 4);
        }
    }

    #[test]
    fn test_lobby_admission() {
        // Arrange
        let mut coordinator = setup_coordinator();

        // Act: every car waits at the lobby, the first one takes it
        let first = coordinator.submit_external_request(1, CallDirection::Up).unwrap();
        // Car 1 now has the lobby queued, so the next call is already answered
        let second = coordinator.submit_external_request(1, CallDirection::Up).unwrap();

        // Assert
        assert_eq!(first, Assignment::Assigned(1));
        assert_eq!(second, Assignment::AlreadyServed(1));
        let queued: usize = coordinator
            .snapshot()
            .iter()
            .filter(|s| s.pending_targets.contains(&1))
            .count();
        assert_eq!(queued, 1);
    }

    #[test]
    fn test_lobby_call_goes_to_scoring_when_nobody_is_near() {
        // Arrange
        let mut coordinator = setup_coordinator();
        for id in 1..=6 {
            let floor = match id {
                1 | 2 => 10,
                3 | 4 => 25,
                _ => 45,
            };
            coordinator.submit_internal_request(id, floor).unwrap();
        }
        for _ in 0..3 {
            coordinator.tick();
        }

        // Act
        let assignment = coordinator.submit_external_request(1, CallDirection::Up).unwrap();

        // Assert: everyone left the lobby, the scored winner gets the call
        assert!(matches!(assignment, Assignment::Assigned(_)));
        let chosen = coordinator.elevator_status(assignment.elevator()).unwrap();
        assert!(chosen.pending_targets.contains(&1));
    }

    #[test]
    fn test_emergency_and_resume() {
        // Arrange
        let mut coordinator = setup_coordinator();
        coordinator.submit_internal_request(1, 5).unwrap();
        coordinator.submit_external_request(30, CallDirection::Down).unwrap();
        coordinator.tick();
        coordinator.tick();

        // Act
        coordinator.emergency_stop_all();

        // Assert
        for state in coordinator.snapshot() {
            assert_eq!(state.behaviour, Emergency);
            assert_eq!(state.direction, Direction::Idle);
            assert!(state.pending_targets.is_empty());
        }
        assert_eq!(
            coordinator.submit_internal_request(1, 3),
            Err(DispatchError::NoEligibleElevator(3))
        );
        assert_eq!(
            coordinator.submit_external_request(12, CallDirection::Up),
            Err(DispatchError::NoEligibleElevator(12))
        );
        assert!(coordinator.tick().is_empty());

        let first = coordinator.resume_all();
        assert!(first.all_resumed());
        assert_eq!(first.resumed, vec![1, 2, 3, 4, 5, 6]);

        let second = coordinator.resume_all();
        assert!(second.resumed.is_empty());
        assert!(!second.all_resumed());

        assert!(coordinator.snapshot().iter().all(|s| s.behaviour == Idle));
        assert_eq!(coordinator.submit_internal_request(1, 3), Ok(()));
    }

    #[test]
    fn test_partial_resume() {
        // Arrange
        let mut coordinator = setup_coordinator();
        coordinator.emergency_stop_all();
        coordinator.resume_all();

        // Act: nobody is in emergency anymore
        let report = coordinator.resume_all();

        // Assert
        assert_eq!(report.not_in_emergency, vec![1, 2, 3, 4, 5, 6]);
        assert!(coordinator.snapshot().iter().all(|s| s.behaviour == Idle));
    }

    #[test]
    fn test_tick_reports_changes() {
        // Arrange
        let mut coordinator = setup_coordinator();
        coordinator.submit_internal_request(2, 3).unwrap();

        // Act
        let first = coordinator.tick();
        let second = coordinator.tick();

        // Assert
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, 2);
        assert_eq!(first[0].old_behaviour, Idle);
        assert_eq!(first[0].new_behaviour, Moving);
        assert_eq!(first[0].old_direction, Direction::Idle);
        assert_eq!(first[0].new_direction, Direction::Up);
        assert_eq!(second[0].old_floor, 1);
        assert_eq!(second[0].new_floor, 2);

        let ticks = run_until_idle(&mut coordinator, 2);
        assert!(ticks > 0);
        assert_eq!(coordinator.statistics().ticks, 2 + ticks as u64);
    }

    #[test]
    fn test_hall_calls_and_statistics() {
        // Arrange
        let mut coordinator = setup_coordinator();

        // Act
        coordinator.submit_external_request(4, CallDirection::Down).unwrap();
        coordinator.submit_internal_request(5, 44).unwrap();
        let status = coordinator.status();
        let stats = coordinator.statistics();

        // Assert
        assert_eq!(status.hall_calls[3], [false, true]);
        assert_eq!(stats.total_floors, 50);
        assert_eq!(stats.total_elevators, 6);
        assert_eq!(stats.active_requests, 2);

        // Serving floor 4 clears its latches
        run_until_idle(&mut coordinator, 1);
        assert_eq!(coordinator.status().hall_calls[3], [false, false]);
    }
}
