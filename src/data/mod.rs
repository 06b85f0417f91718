//! Data layer: tuning and the asset warm cache.
//!
//! Tuning is parsed while the plugin is built, before the initial
//! `OnEnter(Stage::Start)` runs, so every scene can read it from its
//! first frame. The RON source is embedded at compile time; the browser
//! build has no filesystem to read it from.
//!
//! A broken tuning file never stops the experience: the parse error is
//! logged and the built-in defaults are used instead.

mod preload;

pub use preload::*;

use bevy::prelude::*;
use crate::shared::*;

const TUNING_RON: &str = include_str!("../../assets/config/tuning.ron");

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_tuning())
            .init_resource::<PreloadedAssets>()
            .add_systems(Startup, preload::preload_assets)
            .add_systems(Update, preload::track_preload);
    }
}

pub fn parse_tuning(source: &str) -> Result<Tuning, String> {
    ron::from_str(source).map_err(|e| format!("tuning.ron is invalid: {}", e))
}

/// Embedded tuning, or the defaults when it does not parse.
pub fn load_tuning() -> Tuning {
    match parse_tuning(TUNING_RON) {
        Ok(tuning) => {
            info!(
                "[Tuning] Loaded: flight {}ms, spawn every {}ms, win at {}",
                tuning.flight.delay_ms, tuning.catch.spawn_interval_ms, tuning.catch.win_score
            );
            tuning
        }
        Err(err) => {
            warn!("[Tuning] {}; falling back to defaults", err);
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tuning_matches_defaults() {
        let tuning = parse_tuning(TUNING_RON).expect("embedded tuning should parse");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_partial_tuning_fills_missing_fields() {
        let tuning = parse_tuning("(flight: (delay_ms: 500))").unwrap();
        assert_eq!(tuning.flight.delay_ms, 500);
        assert_eq!(tuning.catch.spawn_interval_ms, 800);
        assert_eq!(tuning.charge.drain_per_tick, 2.0);
    }

    #[test]
    fn test_invalid_tuning_is_an_error() {
        assert!(parse_tuning("(flight: oops").is_err());
    }
}
