use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct HugPlugin;

impl Plugin for HugPlugin {
    fn build(&self, app: &mut App) {
        let hz = app
            .world()
            .get_resource::<Tuning>()
            .map_or(60.0, |t| t.charge.tick_hz);
        app.insert_resource(Time::<Fixed>::from_hz(hz))
            .add_systems(OnEnter(Stage::Hug), enter_hug)
            .add_systems(FixedUpdate, charge_hug.run_if(in_state(Stage::Hug)));
        register_scene::<HugMeter>(app);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HugPhase {
    #[default]
    Charging,
    Finished,
}

/// Hold to charge, let go and it drains.
///
/// Energy is kept in tenths so that 125 charges of 0.8 land exactly on 100.
#[derive(Resource, Debug, Clone)]
pub struct HugMeter {
    energy_tenths: u32,
    charge: u32,
    drain: u32,
    max: u32,
    phase: HugPhase,
}

fn tenths(value: f32) -> u32 {
    (value * 10.0).round().max(0.0) as u32
}

impl HugMeter {
    pub fn new(tuning: &ChargeTuning) -> Self {
        Self {
            energy_tenths: 0,
            charge: tenths(tuning.charge_per_tick),
            drain: tenths(tuning.drain_per_tick),
            max: tenths(tuning.max_energy).max(1),
            phase: HugPhase::Charging,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy_tenths as f32 / 10.0
    }

    /// Fill of the meter in [0, 1].
    pub fn fraction(&self) -> f32 {
        self.energy_tenths as f32 / self.max as f32
    }

    pub fn phase(&self) -> HugPhase {
        self.phase
    }

    /// One fixed tick. Returns true on the tick that finishes the hug.
    pub fn tick(&mut self, held: bool) -> bool {
        if self.phase == HugPhase::Finished {
            return false;
        }
        self.energy_tenths = if held {
            (self.energy_tenths + self.charge).min(self.max)
        } else {
            self.energy_tenths.saturating_sub(self.drain)
        };
        if self.energy_tenths >= self.max {
            self.phase = HugPhase::Finished;
            return true;
        }
        false
    }

    /// Where a hugger standing at `start_x` is drawn. They creep toward
    /// each other while charging and meet in the middle at the end.
    pub fn hugger_x(&self, start_x: f32, is_left: bool) -> f32 {
        let side = if is_left { -1.0 } else { 1.0 };
        match self.phase {
            HugPhase::Finished => 0.5 * side,
            HugPhase::Charging => start_x - self.energy() * 0.01 * side,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self.phase {
            HugPhase::Charging => "Hold Space / Touch Screen",
            HugPhase::Finished => "Happy Hug Day!",
        }
    }
}

impl DayScene for HugMeter {
    const DAY: Day = Day::Hug;

    fn is_complete(&self) -> bool {
        self.phase == HugPhase::Finished
    }
}

fn enter_hug(mut commands: Commands, tuning: Res<Tuning>) {
    commands.insert_resource(HugMeter::new(&tuning.charge));
}

pub fn charge_hug(input: Res<PlayerInput>, meter: Option<ResMut<HugMeter>>) {
    let Some(mut meter) = meter else {
        return;
    };
    if meter.phase() == HugPhase::Finished {
        return;
    }
    if meter.tick(input.hold) {
        info!("[Hug] Finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_125_held_ticks_fill_exactly() {
        let mut meter = HugMeter::new(&ChargeTuning::default());
        let mut last = 0.0;
        for i in 0..124 {
            assert!(!meter.tick(true), "finished early at tick {}", i);
            assert!(meter.energy() >= last);
            last = meter.energy();
        }
        assert!(meter.tick(true));
        assert_eq!(meter.energy(), 100.0);
        assert_eq!(meter.phase(), HugPhase::Finished);
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut meter = HugMeter::new(&ChargeTuning::default());
        for _ in 0..125 {
            meter.tick(true);
        }
        assert!(!meter.tick(false));
        assert!(!meter.tick(true));
        assert_eq!(meter.energy(), 100.0);
    }

    #[test]
    fn test_release_drains_faster_than_charge() {
        let mut meter = HugMeter::new(&ChargeTuning::default());
        for _ in 0..10 {
            meter.tick(true);
        }
        assert_eq!(meter.energy(), 8.0);
        meter.tick(false);
        assert_eq!(meter.energy(), 6.0);
        for _ in 0..10 {
            meter.tick(false);
        }
        assert_eq!(meter.energy(), 0.0);
    }

    #[test]
    fn test_huggers_meet_when_finished() {
        let mut meter = HugMeter::new(&ChargeTuning::default());
        assert_eq!(meter.hugger_x(-3.0, true), -3.0);
        for _ in 0..50 {
            meter.tick(true);
        }
        assert!(meter.hugger_x(-3.0, true) > -3.0);
        assert!(meter.hugger_x(3.0, false) < 3.0);
        for _ in 0..75 {
            meter.tick(true);
        }
        assert_eq!(meter.hugger_x(-3.0, true), -0.5);
        assert_eq!(meter.hugger_x(3.0, false), 0.5);
    }
}
