use super::{to_attributes, Attributes, Entity, EntityKey};
use crate::prelude::{CommandCenterSettings, Coords};
use serde::Serialize;

/// Fixed reference point on the map; the initial detail panel subject.
#[derive(Debug, Clone, Serialize)]
pub struct CommandCenter {
    lat: f64,
    long: f64,
    name: String,
    model: String,
    power_level_percent: Option<f64>,
    color: String,
    coords: Coords,
}

impl CommandCenter {
    pub fn new(settings: &CommandCenterSettings) -> Self {
        Self {
            lat: settings.lat,
            long: settings.long,
            name: settings.name.clone(),
            model: String::new(),
            power_level_percent: None,
            color: String::new(),
            coords: Coords::new(settings.lat, settings.long),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for CommandCenter {
    fn default() -> Self {
        Self::new(&CommandCenterSettings::default())
    }
}

impl Entity for CommandCenter {
    fn key(&self) -> EntityKey {
        EntityKey::CommandCenter
    }

    fn coords(&self) -> Coords {
        self.coords
    }

    fn attributes(&self) -> Attributes {
        to_attributes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_sits_at_the_landing_site() {
        let center = CommandCenter::default();
        assert_eq!(center.coords(), Coords::new(0.681400, 23.460550));
        let attributes = center.attributes();
        assert_eq!(attributes["name"], json!("Command Center"));
        assert_eq!(attributes["power_level_percent"], json!(null));
        assert_eq!(attributes["color"], json!(""));
    }
}
