pub mod provider;
pub mod renderer;
pub mod scene;
pub mod tiles;

pub use provider::{ImageMapType, MapId, MapOptions, MapProvider, MarkerId};
pub use renderer::MapRenderer;
pub use scene::{MapScene, MarkerState, SceneProvider};
pub use tiles::{TileCoord, TileSource};
