use std::collections::{HashMap, HashSet};

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;

/// Textures every scene may reach for. Loaded once at startup.
pub const PRELOAD_IMAGES: &[&str] = &[
    "images/arch.png",
    "images/leftdoor.png",
    "images/rightdoor.png",
    "images/rose.png",
    "images/teddy.png",
    "images/paper.png",
    "images/boy.png",
    "images/girl.png",
    "images/heart.png",
    "images/kiss.png",
    "images/memories/1.png",
    "images/memories/2.png",
    "images/memories/3.png",
    "images/memories/4.png",
    "images/memories/5.png",
    "images/memories/7.png",
];

pub const PRELOAD_AUDIO: &[&str] = &[
    "audio/music/love.ogg",
    "audio/music/hub.ogg",
    "audio/sfx/pop.ogg",
    "audio/sfx/chime.ogg",
    "audio/sfx/fanfare.ogg",
    "audio/sfx/door.ogg",
];

/// Warm cache: path → strong handle, so later loads of the same path are
/// served from memory.
#[derive(Resource, Debug, Default)]
pub struct PreloadedAssets {
    pub handles: HashMap<String, UntypedHandle>,
    /// Paths whose final load state has already been logged.
    pub settled: HashSet<String>,
    pub failed: usize,
}

impl PreloadedAssets {
    pub fn get(&self, path: &str) -> Option<&UntypedHandle> {
        self.handles.get(path)
    }

    /// Records a handle under its path. A path already present keeps its
    /// first handle.
    pub fn insert(&mut self, path: &str, handle: UntypedHandle) -> bool {
        if self.handles.contains_key(path) {
            return false;
        }
        self.handles.insert(path.to_string(), handle);
        true
    }

    pub fn pending(&self) -> usize {
        self.handles.len() - self.settled.len()
    }
}

pub fn preload_assets(asset_server: Res<AssetServer>, mut cache: ResMut<PreloadedAssets>) {
    for path in PRELOAD_IMAGES {
        let handle: Handle<Image> = asset_server.load(*path);
        cache.insert(path, handle.untyped());
    }
    for path in PRELOAD_AUDIO {
        let handle: Handle<AudioSource> = asset_server.load(*path);
        cache.insert(path, handle.untyped());
    }
    info!("[Assets] Preloading {} assets", cache.handles.len());
}

/// Logs each asset once when it settles. A failed load leaves the scene
/// rendering without that texture or sound.
pub fn track_preload(asset_server: Res<AssetServer>, mut cache: ResMut<PreloadedAssets>) {
    if cache.pending() == 0 {
        return;
    }

    let mut newly_settled: Vec<(String, bool)> = Vec::new();
    for (path, handle) in cache.handles.iter() {
        if cache.settled.contains(path) {
            continue;
        }
        let id: UntypedAssetId = handle.id();
        match asset_server.get_load_state(id) {
            Some(LoadState::Loaded) => newly_settled.push((path.clone(), true)),
            Some(LoadState::Failed(err)) => {
                warn!("[Assets] Could not load '{}': {}", path, err);
                newly_settled.push((path.clone(), false));
            }
            _ => {}
        }
    }

    for (path, ok) in newly_settled {
        if !ok {
            cache.failed += 1;
        }
        cache.settled.insert(path);
    }

    if cache.pending() == 0 {
        info!(
            "[Assets] Preload finished: {} ready, {} missing",
            cache.handles.len() - cache.failed,
            cache.failed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_handle_per_path() {
        let mut cache = PreloadedAssets::default();
        let first: Handle<Image> = Handle::default();
        assert!(cache.insert("images/rose.png", first.clone().untyped()));
        assert!(!cache.insert("images/rose.png", Handle::<Image>::default().untyped()));
        assert_eq!(cache.handles.len(), 1);
        assert_eq!(cache.pending(), 1);
        assert!(cache.get("images/rose.png").is_some());
        assert!(cache.get("images/missing.png").is_none());
    }
}
