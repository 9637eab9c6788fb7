use crate::map::provider::{ImageMapType, MapId, MapOptions, MapProvider, MarkerId};
use crate::map::tiles::TileSource;
use crate::prelude::{Coords, LocatorError, LocatorResult};
use log::debug;

pub const MOON_MAP_TYPE: &str = "moon";
pub const DEFAULT_ZOOM: u8 = 6;

/// Owns the map widget and the markers currently on it.
pub struct MapRenderer<P: MapProvider> {
    provider: P,
    map: Option<MapId>,
    markers: Vec<MarkerId>,
    home: Coords,
    zoom: u8,
    tiles: TileSource,
}

impl<P: MapProvider> MapRenderer<P> {
    pub fn new(provider: P, home: Coords, zoom: u8, tiles: TileSource) -> Self {
        Self {
            provider,
            map: None,
            markers: Vec::new(),
            home,
            zoom,
            tiles,
        }
    }

    /// Rebuilds the widget centered on the command center, installs the moon
    /// tile layer and puts the initial marker on the command center.
    pub fn render(&mut self) -> LocatorResult<()> {
        let map = self.provider.create_map(MapOptions {
            center: self.home,
            zoom: self.zoom,
            street_view_control: false,
            map_type_ids: Vec::new(),
        })?;
        self.map = Some(map);
        self.provider
            .register_map_type(map, MOON_MAP_TYPE, ImageMapType::moon(self.tiles.clone()))?;
        self.provider.set_map_type(map, MOON_MAP_TYPE)?;
        debug!("map {:?} rendered at {:?}", map, self.home);

        self.add_marker(self.home)
    }

    /// Replaces every marker with a single one at `position` and recenters.
    pub fn add_marker(&mut self, position: Coords) -> LocatorResult<()> {
        let map = self
            .map
            .ok_or_else(|| LocatorError::Provider("map not rendered".into()))?;
        self.delete_markers()?;
        let marker = self.provider.create_marker(position, Some(map))?;
        self.provider.set_center(map, position)?;
        self.markers.push(marker);
        self.show_markers()
    }

    pub fn delete_markers(&mut self) -> LocatorResult<()> {
        self.clear_markers()?;
        for marker in self.markers.drain(..) {
            self.provider.release_marker(marker);
        }
        Ok(())
    }

    pub fn clear_markers(&mut self) -> LocatorResult<()> {
        self.set_map_on_all(None)
    }

    pub fn show_markers(&mut self) -> LocatorResult<()> {
        self.set_map_on_all(self.map)
    }

    fn set_map_on_all(&mut self, map: Option<MapId>) -> LocatorResult<()> {
        for marker in &self.markers {
            self.provider.set_marker_map(*marker, map)?;
        }
        Ok(())
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn tiles(&self) -> &TileSource {
        &self.tiles
    }
}
