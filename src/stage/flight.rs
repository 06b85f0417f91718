use std::time::Duration;

use bevy::prelude::*;

use crate::shared::*;

/// One-shot timer for the flythrough. Owned by the flying stage: inserted
/// on enter, removed on exit, so it can never fire into another stage.
#[derive(Resource, Debug, Clone)]
pub struct FlightClock {
    timer: Timer,
    fired: bool,
}

impl FlightClock {
    pub fn new(delay: Duration) -> Self {
        Self {
            timer: Timer::new(delay, TimerMode::Once),
            fired: false,
        }
    }

    /// Returns true on exactly one tick: the one that crosses the delay.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn fraction(&self) -> f32 {
        self.timer.fraction()
    }
}

pub fn start_flight(mut commands: Commands, tuning: Res<Tuning>) {
    let delay = Duration::from_millis(tuning.flight.delay_ms);
    info!("[Stage] Flythrough started ({}ms)", tuning.flight.delay_ms);
    commands.insert_resource(FlightClock::new(delay));
}

pub fn advance_flight(
    time: Res<Time>,
    clock: Option<ResMut<FlightClock>>,
    mut next_stage: ResMut<NextState<Stage>>,
) {
    let Some(mut clock) = clock else {
        return;
    };
    if clock.tick(time.delta()) {
        info!("[Stage] Flying -> Hub");
        next_stage.set(Stage::Hub);
    }
}

pub fn end_flight(mut commands: Commands) {
    commands.remove_resource::<FlightClock>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_exactly_at_delay() {
        let mut clock = FlightClock::new(Duration::from_millis(2000));
        assert!(!clock.tick(Duration::from_millis(1999)));
        assert!(clock.tick(Duration::from_millis(1)));
        assert_eq!(clock.elapsed(), Duration::from_millis(2000));
    }

    #[test]
    fn test_fires_only_once() {
        let mut clock = FlightClock::new(Duration::from_millis(2000));
        let fired = (0..100)
            .filter(|_| clock.tick(Duration::from_millis(50)))
            .count();
        assert_eq!(fired, 1);
    }
}
