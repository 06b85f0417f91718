//! Stage controller. Owns the `Stage` state and every change to it.
//!
//! Scenes never touch `NextState<Stage>`; they send `StageRequest`s and
//! this module decides. `enter` reaches any stage from any stage, `back`
//! always lands on the hub, and the flythrough is the one stage that
//! ignores requests until its timer hands over to the hub.

mod door;
mod flight;

pub use door::*;
pub use flight::*;

use bevy::prelude::*;
use crate::shared::*;

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DoorState>()
            .add_event::<DoorAction>()
            .add_systems(OnEnter(Stage::Start), door::close_door)
            .add_systems(
                Update,
                door::handle_door_actions.run_if(in_state(Stage::Start)),
            )
            .add_systems(OnEnter(Stage::Flying), flight::start_flight)
            .add_systems(OnExit(Stage::Flying), flight::end_flight)
            .add_systems(
                Update,
                flight::advance_flight.run_if(in_state(Stage::Flying)),
            )
            .add_systems(
                Update,
                handle_stage_requests.after(door::handle_door_actions),
            );
    }
}

/// Where a request leads from `current`, or `None` if it changes nothing.
pub fn resolve_request(current: Stage, request: StageRequest) -> Option<Stage> {
    if current == Stage::Flying {
        return None;
    }
    match request {
        StageRequest::Enter(target) if target != current => Some(target),
        StageRequest::Enter(_) => None,
        StageRequest::Back if current.is_day() => Some(Stage::Hub),
        StageRequest::Back => None,
    }
}

/// Applies this frame's requests in order; the last effective one wins.
pub fn handle_stage_requests(
    mut requests: EventReader<StageRequest>,
    stage: Res<State<Stage>>,
    mut next_stage: ResMut<NextState<Stage>>,
) {
    let current = *stage.get();
    let mut target = current;

    for request in requests.read() {
        match resolve_request(target, *request) {
            Some(next) => target = next,
            None => debug!("[Stage] Ignored {:?} while in {:?}", request, target),
        }
    }

    if target != current {
        info!("[Stage] {:?} -> {:?}", current, target);
        next_stage.set(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_reaches_every_stage_from_every_stage() {
        for from in Stage::ALL {
            if from == Stage::Flying {
                continue;
            }
            for to in Stage::ALL {
                let expected = if from == to { None } else { Some(to) };
                assert_eq!(resolve_request(from, StageRequest::Enter(to)), expected);
            }
        }
    }

    #[test]
    fn test_back_from_any_day_goes_to_hub() {
        for day in Day::ALL {
            assert_eq!(
                resolve_request(day.stage(), StageRequest::Back),
                Some(Stage::Hub)
            );
        }
    }

    #[test]
    fn test_back_outside_days_is_ignored() {
        assert_eq!(resolve_request(Stage::Start, StageRequest::Back), None);
        assert_eq!(resolve_request(Stage::Hub, StageRequest::Back), None);
    }

    #[test]
    fn test_flight_ignores_all_requests() {
        assert_eq!(resolve_request(Stage::Flying, StageRequest::Back), None);
        for to in Stage::ALL {
            assert_eq!(resolve_request(Stage::Flying, StageRequest::Enter(to)), None);
        }
    }
}
