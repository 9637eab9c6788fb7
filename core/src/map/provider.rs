use crate::map::tiles::{TileCoord, TileSource, MAX_ZOOM, MIN_ZOOM, MOON_RADIUS_M, TILE_SIZE};
use crate::prelude::{Coords, LocatorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Construction options for a map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: Coords,
    pub zoom: u8,
    pub street_view_control: bool,
    /// Map types offered in the type picker; empty hides the built-in ones.
    pub map_type_ids: Vec<String>,
}

/// Custom tile layer handed to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMapType {
    pub name: String,
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Body radius in meters, used by the provider's projection.
    pub radius: f64,
    pub source: TileSource,
}

impl ImageMapType {
    pub fn moon(source: TileSource) -> Self {
        Self {
            name: "Moon".into(),
            tile_size: TILE_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            radius: MOON_RADIUS_M,
            source,
        }
    }

    pub fn tile_url(&self, coord: TileCoord, zoom: u8) -> Option<String> {
        self.source.tile_url(coord, zoom)
    }

    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// Seam to whatever draws the map: map widget, tile layers and markers.
pub trait MapProvider {
    fn create_map(&mut self, options: MapOptions) -> LocatorResult<MapId>;
    fn register_map_type(&mut self, map: MapId, id: &str, map_type: ImageMapType) -> LocatorResult<()>;
    fn set_map_type(&mut self, map: MapId, id: &str) -> LocatorResult<()>;
    fn set_center(&mut self, map: MapId, center: Coords) -> LocatorResult<()>;
    fn create_marker(&mut self, position: Coords, map: Option<MapId>) -> LocatorResult<MarkerId>;
    /// Attaches the marker to `map`, or hides it with `None`.
    fn set_marker_map(&mut self, marker: MarkerId, map: Option<MapId>) -> LocatorResult<()>;
    fn release_marker(&mut self, marker: MarkerId);
}
