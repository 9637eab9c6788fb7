use crate::map::provider::{ImageMapType, MapId, MapOptions, MapProvider, MarkerId};
use crate::prelude::{Coords, LocatorError, LocatorResult};
use std::collections::BTreeMap;

/// Retained state of the single map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub id: MapId,
    pub center: Coords,
    pub zoom: u8,
    pub street_view_control: bool,
    pub map_type_ids: Vec<String>,
    pub map_types: BTreeMap<String, ImageMapType>,
    pub active_map_type: Option<String>,
}

impl MapScene {
    pub fn active_map_type(&self) -> Option<&ImageMapType> {
        self.active_map_type
            .as_ref()
            .and_then(|id| self.map_types.get(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerState {
    pub id: MarkerId,
    pub position: Coords,
    pub map: Option<MapId>,
}

/// In-memory provider: keeps the scene so a canvas can draw it.
#[derive(Debug, Default)]
pub struct SceneProvider {
    map: Option<MapScene>,
    markers: Vec<MarkerState>,
    next_id: u64,
    maps_created: usize,
}

impl SceneProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> Option<&MapScene> {
        self.map.as_ref()
    }

    /// Markers currently attached to the live map.
    pub fn visible_markers(&self) -> Vec<MarkerState> {
        let Some(map) = &self.map else {
            return Vec::new();
        };
        self.markers
            .iter()
            .filter(|marker| marker.map == Some(map.id))
            .copied()
            .collect()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn maps_created(&self) -> usize {
        self.maps_created
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn map_mut(&mut self, id: MapId) -> LocatorResult<&mut MapScene> {
        match self.map.as_mut() {
            Some(scene) if scene.id == id => Ok(scene),
            _ => Err(LocatorError::Provider(format!("unknown map {:?}", id))),
        }
    }
}

impl MapProvider for SceneProvider {
    fn create_map(&mut self, options: MapOptions) -> LocatorResult<MapId> {
        let id = MapId(self.next());
        // Markers belong to the widget they were attached to.
        for marker in &mut self.markers {
            marker.map = None;
        }
        self.map = Some(MapScene {
            id,
            center: options.center,
            zoom: options.zoom,
            street_view_control: options.street_view_control,
            map_type_ids: options.map_type_ids,
            map_types: BTreeMap::new(),
            active_map_type: None,
        });
        self.maps_created += 1;
        Ok(id)
    }

    fn register_map_type(&mut self, map: MapId, id: &str, map_type: ImageMapType) -> LocatorResult<()> {
        let scene = self.map_mut(map)?;
        scene.map_types.insert(id.to_string(), map_type);
        Ok(())
    }

    fn set_map_type(&mut self, map: MapId, id: &str) -> LocatorResult<()> {
        let scene = self.map_mut(map)?;
        let map_type = scene
            .map_types
            .get(id)
            .ok_or_else(|| LocatorError::Provider(format!("map type `{id}` not registered")))?;
        scene.zoom = map_type.clamp_zoom(scene.zoom);
        scene.active_map_type = Some(id.to_string());
        Ok(())
    }

    fn set_center(&mut self, map: MapId, center: Coords) -> LocatorResult<()> {
        self.map_mut(map)?.center = center;
        Ok(())
    }

    fn create_marker(&mut self, position: Coords, map: Option<MapId>) -> LocatorResult<MarkerId> {
        if let Some(map) = map {
            self.map_mut(map)?;
        }
        let id = MarkerId(self.next());
        self.markers.push(MarkerState { id, position, map });
        Ok(id)
    }

    fn set_marker_map(&mut self, marker: MarkerId, map: Option<MapId>) -> LocatorResult<()> {
        if let Some(map) = map {
            self.map_mut(map)?;
        }
        let state = self
            .markers
            .iter_mut()
            .find(|state| state.id == marker)
            .ok_or_else(|| LocatorError::Provider(format!("unknown marker {:?}", marker)))?;
        state.map = map;
        Ok(())
    }

    fn release_marker(&mut self, marker: MarkerId) {
        self.markers.retain(|state| state.id != marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tiles::TileSource;

    fn options() -> MapOptions {
        MapOptions {
            center: Coords::new(1.0, 2.0),
            zoom: 12,
            street_view_control: false,
            map_type_ids: Vec::new(),
        }
    }

    #[test]
    fn new_map_detaches_old_markers() {
        let mut provider = SceneProvider::new();
        let first = provider.create_map(options()).unwrap();
        provider.create_marker(Coords::new(1.0, 2.0), Some(first)).unwrap();
        assert_eq!(provider.visible_markers().len(), 1);

        provider.create_map(options()).unwrap();
        assert!(provider.visible_markers().is_empty());
        assert_eq!(provider.maps_created(), 2);
    }

    #[test]
    fn activating_a_map_type_clamps_zoom() {
        let mut provider = SceneProvider::new();
        let map = provider.create_map(options()).unwrap();
        provider
            .register_map_type(map, "moon", ImageMapType::moon(TileSource::default()))
            .unwrap();
        provider.set_map_type(map, "moon").unwrap();

        let scene = provider.scene().unwrap();
        assert_eq!(scene.zoom, 9);
        assert_eq!(scene.active_map_type().unwrap().name, "Moon");
    }

    #[test]
    fn stale_map_ids_are_rejected() {
        let mut provider = SceneProvider::new();
        let stale = provider.create_map(options()).unwrap();
        provider.create_map(options()).unwrap();
        assert!(provider.set_center(stale, Coords::default()).is_err());
        assert!(provider.set_map_type(stale, "moon").is_err());
    }

    #[test]
    fn release_forgets_the_marker() {
        let mut provider = SceneProvider::new();
        let map = provider.create_map(options()).unwrap();
        let marker = provider.create_marker(Coords::default(), Some(map)).unwrap();
        provider.release_marker(marker);
        assert_eq!(provider.marker_count(), 0);
        assert!(provider.set_marker_map(marker, None).is_err());
    }
}
