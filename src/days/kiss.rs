use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct KissPlugin;

impl Plugin for KissPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<KissLaunched>()
            .add_systems(OnEnter(Stage::Kiss), enter_kiss)
            .add_systems(
                Update,
                (launch_kisses, fly_kisses)
                    .chain()
                    .run_if(in_state(Stage::Kiss)),
            );
        register_scene::<KissVolley>(app);
    }
}

/// A tap on the sky; `x_ratio` is the tap's horizontal position in [-1, 1].
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct KissLaunched {
    pub x_ratio: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u64,
    pub start: Vec3,
    pub position: Vec3,
}

/// Kisses thrown at the heart. No win condition; hits just keep counting.
#[derive(Resource, Debug, Clone)]
pub struct KissVolley {
    hits: u32,
    last_hit_time: Option<f32>,
    live: Vec<Projectile>,
    next_id: u64,
    tuning: KissTuning,
}

impl KissVolley {
    pub fn new(tuning: &KissTuning) -> Self {
        Self {
            hits: 0,
            last_hit_time: None,
            live: Vec::new(),
            next_id: 0,
            tuning: tuning.clone(),
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn live(&self) -> &[Projectile] {
        &self.live
    }

    pub fn launch(&mut self, x_ratio: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let start = Vec3::new(
            x_ratio.clamp(-1.0, 1.0) * self.tuning.half_width,
            self.tuning.start_y,
            self.tuning.start_z,
        );
        self.live.push(Projectile {
            id,
            start,
            position: start,
        });
        id
    }

    /// Advances every projectile by `dt` seconds. Each one that crosses
    /// the hit plane counts once and is dropped. Returns the new hits.
    pub fn step(&mut self, dt: f32, now: f32) -> u32 {
        let KissTuning {
            speed,
            start_z,
            target_z,
            hit_z,
            ..
        } = self.tuning;
        let total = start_z - target_z;
        let before = self.live.len();
        self.live.retain_mut(|p| {
            p.position.z -= speed * dt;
            let progress = if total != 0.0 {
                1.0 - (p.position.z - target_z) / total
            } else {
                1.0
            };
            let t = progress * 1.1;
            p.position.x = p.start.x + (0.0 - p.start.x) * t;
            p.position.y = p.start.y + (0.0 - p.start.y) * t;
            p.position.z >= hit_z
        });
        let landed = (before - self.live.len()) as u32;
        if landed > 0 {
            self.hits += landed;
            self.last_hit_time = Some(now);
        }
        landed
    }

    fn since_hit(&self, now: f32) -> Option<f32> {
        self.last_hit_time.map(|t| (now - t).max(0.0))
    }

    /// Extra scale right after a hit, gone within 0.25 s.
    pub fn thump(&self, now: f32) -> f32 {
        self.since_hit(now).map_or(0.0, |dt| (0.5 - dt * 2.0).max(0.0))
    }

    /// Glow right after a hit, gone within 0.2 s.
    pub fn flash(&self, now: f32) -> f32 {
        self.since_hit(now).map_or(0.0, |dt| (1.0 - dt * 5.0).max(0.0))
    }

    /// The heart grows a little with every hit, up to double.
    pub fn heart_scale(&self, now: f32) -> f32 {
        1.5 + (self.hits as f32 * 0.05).min(1.5) + self.thump(now)
    }
}

impl DayScene for KissVolley {
    const DAY: Day = Day::Kiss;

    /// Never won; the back button always reads "Go Back".
    fn is_complete(&self) -> bool {
        false
    }
}

fn enter_kiss(mut commands: Commands, tuning: Res<Tuning>) {
    commands.insert_resource(KissVolley::new(&tuning.kiss));
}

pub fn launch_kisses(
    mut launches: EventReader<KissLaunched>,
    volley: Option<ResMut<KissVolley>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(mut volley) = volley else {
        return;
    };
    for launch in launches.read() {
        volley.launch(launch.x_ratio);
        sfx.send(PlaySfxEvent {
            sfx_id: "pop".to_string(),
        });
    }
}

pub fn fly_kisses(time: Res<Time>, volley: Option<ResMut<KissVolley>>) {
    let Some(mut volley) = volley else {
        return;
    };
    if volley.live().is_empty() {
        return;
    }
    volley.step(time.delta_secs(), time.elapsed_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_projectile_hits_once() {
        let mut volley = KissVolley::new(&KissTuning::default());
        volley.launch(-1.0);
        volley.launch(0.5);
        let mut total = 0;
        for frame in 0..120 {
            total += volley.step(1.0 / 60.0, frame as f32 / 60.0);
        }
        assert_eq!(total, 2);
        assert_eq!(volley.hits(), 2);
        assert!(volley.live().is_empty());
    }

    #[test]
    fn test_projectile_starts_from_tap_x() {
        let mut volley = KissVolley::new(&KissTuning::default());
        volley.launch(1.0);
        let p = &volley.live()[0];
        assert_eq!(p.start, Vec3::new(5.0, -3.0, 4.0));
    }

    #[test]
    fn test_projectile_homes_toward_center() {
        let mut volley = KissVolley::new(&KissTuning::default());
        volley.launch(1.0);
        volley.step(0.25, 0.25);
        let p = &volley.live()[0];
        assert!(p.position.x < 5.0 && p.position.x > 0.0);
        assert!(p.position.y > -3.0);
        assert_eq!(volley.hits(), 0);
    }

    #[test]
    fn test_thump_and_flash_decay() {
        let mut volley = KissVolley::new(&KissTuning::default());
        assert_eq!(volley.thump(1.0), 0.0);
        volley.launch(0.0);
        volley.step(1.0, 2.0);
        assert_eq!(volley.thump(2.0), 0.5);
        assert_eq!(volley.flash(2.0), 1.0);
        assert_eq!(volley.flash(2.5), 0.0);
        assert_eq!(volley.thump(2.5), 0.0);
        assert!((volley.heart_scale(3.0) - 1.55).abs() < 1e-5);
    }

    #[test]
    fn test_heart_growth_caps() {
        let mut volley = KissVolley::new(&KissTuning::default());
        for _ in 0..40 {
            volley.launch(0.0);
        }
        volley.step(1.0, 0.0);
        assert_eq!(volley.hits(), 40);
        assert_eq!(volley.heart_scale(10.0), 3.0);
    }
}
