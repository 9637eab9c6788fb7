//! Lunar tile addressing and the Mercator helpers used to lay tiles out.

use crate::prelude::Coords;
use std::f64::consts::PI;

pub const TILE_SIZE: u32 = 256;
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 9;
/// Mean lunar radius in meters.
pub const MOON_RADIUS_M: f64 = 1_738_000.0;
pub const DEFAULT_TILE_BASE: &str = "https://mw1.google.com/mw-planetary/lunar/lunarmaps_v1/clem_bw";

/// Raw or normalized tile address at a given zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Number of tiles along one axis, or `None` when the zoom cannot be
/// represented.
pub fn tile_range(zoom: u8) -> Option<i64> {
    if zoom >= 63 {
        return None;
    }
    Some(1i64 << zoom)
}

/// Wraps x around the cylinder and rejects rows past either pole.
pub fn normalize(coord: TileCoord, zoom: u8) -> Option<TileCoord> {
    let range = tile_range(zoom)?;
    if coord.y < 0 || coord.y >= range {
        return None;
    }
    Some(TileCoord::new(coord.x.rem_euclid(range), coord.y))
}

/// URL generator for the "moon" image map type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    base: String,
}

impl TileSource {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `base/{zoom}/{x}/{2^zoom - y - 1}.jpg`; the source numbers rows from
    /// the bottom.
    pub fn tile_url(&self, coord: TileCoord, zoom: u8) -> Option<String> {
        let normalized = normalize(coord, zoom)?;
        let bound = tile_range(zoom)?;
        Some(format!(
            "{}/{}/{}/{}.jpg",
            self.base,
            zoom,
            normalized.x,
            bound - normalized.y - 1
        ))
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_BASE)
    }
}

/// Zoom-0 world coordinates (0..256 on both axes) of a lat/lng.
pub fn world_point(coords: Coords) -> (f64, f64) {
    let size = TILE_SIZE as f64;
    let sin_lat = (coords.lat * PI / 180.0).sin().clamp(-0.9999, 0.9999);
    let x = size * (0.5 + coords.lng / 360.0);
    let y = size * (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI));
    (x, y)
}

/// Pixel coordinates of `coords` at `zoom`.
pub fn pixel_point(coords: Coords, zoom: u8) -> (f64, f64) {
    let scale = 2f64.powi(zoom as i32);
    let (x, y) = world_point(coords);
    (x * scale, y * scale)
}

/// A tile positioned relative to the top-left corner of a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub coord: TileCoord,
    pub left: f64,
    pub top: f64,
}

/// Raw tile coordinates covering a `width`×`height` viewport centered on
/// `center`. Rows may fall outside the map; callers ask [`TileSource`] for
/// the URL, which filters them.
pub fn visible_tiles(center: Coords, zoom: u8, width: f64, height: f64) -> Vec<PlacedTile> {
    let size = TILE_SIZE as f64;
    let (center_x, center_y) = pixel_point(center, zoom);
    let origin_x = center_x - width / 2.0;
    let origin_y = center_y - height / 2.0;

    let first_x = (origin_x / size).floor() as i64;
    let last_x = ((origin_x + width) / size).floor() as i64;
    let first_y = (origin_y / size).floor() as i64;
    let last_y = ((origin_y + height) / size).floor() as i64;

    let mut tiles = Vec::new();
    for y in first_y..=last_y {
        for x in first_x..=last_x {
            tiles.push(PlacedTile {
                coord: TileCoord::new(x, y),
                left: x as f64 * size - origin_x,
                top: y as f64 * size - origin_y,
            });
        }
    }
    tiles
}

/// Offset of `target` from the viewport's top-left corner.
pub fn screen_offset(center: Coords, target: Coords, zoom: u8, width: f64, height: f64) -> (f64, f64) {
    let (center_x, center_y) = pixel_point(center, zoom);
    let (target_x, target_y) = pixel_point(target, zoom);
    (
        target_x - center_x + width / 2.0,
        target_y - center_y + height / 2.0,
    )
}
