//! Vehicle and command-center entities.
//!
//! Entities are plain structs with declared fields. Templates still see them
//! as a key/value bag through [`Entity::attributes`], which includes every
//! unknown key the remote payload carried.

pub mod command_center;
pub mod status;
pub mod vehicle;

use crate::prelude::Coords;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use command_center::CommandCenter;
pub use status::StatusColor;
pub use vehicle::{Vehicle, VehicleRecord};

/// JSON attribute view handed to templates.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Collection-local client id, stable for the lifetime of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cid(pub u64);

/// Addresses one entity owned by the application context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    CommandCenter,
    Vehicle(Cid),
}

/// Remote identity of a vehicle; the API sends either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleId {
    Number(i64),
    Text(String),
}

impl VehicleId {
    /// Compares against a raw path segment such as the `:id` of a route.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            VehicleId::Number(value) => raw.parse::<i64>().map_or(false, |id| id == *value),
            VehicleId::Text(value) => value == raw,
        }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleId::Number(value) => write!(f, "{value}"),
            VehicleId::Text(value) => f.write_str(value),
        }
    }
}

/// Anything the views can render and the map can point at.
pub trait Entity {
    fn key(&self) -> EntityKey;
    fn coords(&self) -> Coords;
    fn attributes(&self) -> Attributes;
}

pub(crate) fn to_attributes<T: Serialize>(value: &T) -> Attributes {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => Attributes::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_id_matches_numeric_and_text_segments() {
        assert!(VehicleId::Number(2).matches("2"));
        assert!(!VehicleId::Number(2).matches("02x"));
        assert!(VehicleId::Text("rover-7".into()).matches("rover-7"));
        assert!(!VehicleId::Text("rover-7".into()).matches("rover"));
    }

    #[test]
    fn vehicle_id_accepts_both_json_shapes() {
        let ids: Vec<VehicleId> = serde_json::from_str(r#"[1, "lrv-2"]"#).unwrap();
        assert_eq!(ids[0], VehicleId::Number(1));
        assert_eq!(ids[1].to_string(), "lrv-2");
    }
}
