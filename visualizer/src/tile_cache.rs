use iced::widget::image;
use log::warn;
use lunarcore::map::tiles::visible_tiles;
use lunarcore::map::MapScene;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum TileState {
    Pending,
    Ready(image::Handle),
    Failed,
}

/// Downloaded tile images keyed by URL.
#[derive(Debug, Default)]
pub struct TileCache {
    tiles: HashMap<String, TileState>,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as pending and returns `true` if nobody asked for it yet.
    pub fn claim(&mut self, url: &str) -> bool {
        if self.tiles.contains_key(url) {
            return false;
        }
        self.tiles.insert(url.to_string(), TileState::Pending);
        true
    }

    pub fn resolve(&mut self, url: String, result: Result<Vec<u8>, String>) {
        let state = match result {
            Ok(bytes) => TileState::Ready(image::Handle::from_bytes(bytes)),
            Err(err) => {
                warn!("tile {url} failed: {err}");
                TileState::Failed
            }
        };
        self.tiles.insert(url, state);
    }

    pub fn get(&self, url: &str) -> Option<&TileState> {
        self.tiles.get(url)
    }

    pub fn ready_count(&self) -> usize {
        self.tiles
            .values()
            .filter(|state| matches!(state, TileState::Ready(_)))
            .count()
    }
}

/// URLs of every tile needed to cover a `width` x `height` area around the
/// scene center.
pub fn visible_urls(scene: &MapScene, width: f64, height: f64) -> Vec<String> {
    let Some(map_type) = scene.active_map_type() else {
        return Vec::new();
    };
    visible_tiles(scene.center, scene.zoom, width, height)
        .into_iter()
        .filter_map(|placed| map_type.tile_url(placed.coord, scene.zoom))
        .collect()
}

pub async fn download(client: reqwest::Client, url: String) -> Result<Vec<u8>, String> {
    let response = client.get(&url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("tile server responded with {}", response.status()));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunarcore::map::{MapRenderer, SceneProvider, TileSource};
    use lunarcore::Coords;

    fn rendered() -> MapRenderer<SceneProvider> {
        let mut renderer = MapRenderer::new(
            SceneProvider::new(),
            Coords::new(0.6814, 23.46055),
            6,
            TileSource::new("https://tiles.example/moon"),
        );
        renderer.render().unwrap();
        renderer
    }

    #[test]
    fn window_sized_request_covers_a_larger_canvas() {
        let renderer = rendered();
        let scene = renderer.provider().scene().unwrap();

        let configured = visible_urls(scene, 900.0, 700.0);
        let window = visible_urls(scene, 1600.0, 1000.0);
        let canvas = visible_urls(scene, 1200.0, 940.0);

        assert!(window.len() > configured.len());
        assert!(canvas.iter().all(|url| window.contains(url)));
        assert!(canvas.iter().any(|url| !configured.contains(url)));
    }

    #[test]
    fn claim_only_once_per_url() {
        let mut cache = TileCache::new();
        assert!(cache.claim("https://tiles.example/0/0/0.jpg"));
        assert!(!cache.claim("https://tiles.example/0/0/0.jpg"));
        assert!(matches!(
            cache.get("https://tiles.example/0/0/0.jpg"),
            Some(TileState::Pending)
        ));
    }

    #[test]
    fn failed_tiles_are_not_reclaimed() {
        let mut cache = TileCache::new();
        cache.claim("a");
        cache.resolve("a".into(), Err("404".into()));
        assert!(matches!(cache.get("a"), Some(TileState::Failed)));
        assert!(!cache.claim("a"));
        assert_eq!(cache.ready_count(), 0);
    }
}
