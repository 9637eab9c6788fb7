use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in the shape the map widget expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Settings the application context needs at startup.
#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub api_base: String,
    pub vehicles_path: String,
    pub tile_base: String,
    pub zoom: u8,
    pub command_center: CommandCenterSettings,
    pub item_template: String,
    pub detail_template: String,
    pub initial_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandCenterSettings {
    pub lat: f64,
    pub long: f64,
    pub name: String,
}

impl Default for CommandCenterSettings {
    fn default() -> Self {
        Self {
            lat: 0.681400,
            long: 23.460550,
            name: "Command Center".into(),
        }
    }
}

/// Common error type for fetching, templating and map plumbing.
#[derive(thiserror::Error, Debug)]
pub enum LocatorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("template error at byte {offset}: {reason}")]
    Template { offset: usize, reason: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("map provider failure: {0}")]
    Provider(String),
}

pub type LocatorResult<T> = Result<T, LocatorError>;
