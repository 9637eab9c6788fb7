use super::{to_attributes, Attributes, Cid, Entity, EntityKey, StatusColor, VehicleId};
use crate::prelude::Coords;
use serde::{Deserialize, Serialize};

/// One element of the `/api/vehicles.json` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireRecord")]
pub struct VehicleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<VehicleId>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub lat: f64,
    pub long: f64,
    pub power_level_percent: Option<f64>,
    /// Keys the API sends that have no declared field.
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Payload shape as sent; longitude may arrive as `long`, `lng` or both.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(default)]
    id: Option<VehicleId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    model: Option<String>,
    lat: f64,
    #[serde(default)]
    long: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    power_level_percent: Option<f64>,
    #[serde(flatten)]
    extra: Attributes,
}

impl TryFrom<WireRecord> for VehicleRecord {
    type Error = String;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        let long = wire
            .long
            .or(wire.lng)
            .ok_or_else(|| "missing field `long`".to_string())?;
        Ok(Self {
            id: wire.id,
            name: wire.name,
            model: wire.model,
            lat: wire.lat,
            long,
            power_level_percent: wire.power_level_percent,
            extra: wire.extra,
        })
    }
}

impl VehicleRecord {
    pub fn new(id: i64, lat: f64, long: f64, power_level_percent: Option<f64>) -> Self {
        Self {
            id: Some(VehicleId::Number(id)),
            name: None,
            model: None,
            lat,
            long,
            power_level_percent,
            extra: Attributes::new(),
        }
    }
}

/// A vehicle with its derived status color and map coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    #[serde(skip)]
    cid: Cid,
    #[serde(flatten)]
    record: VehicleRecord,
    color: StatusColor,
    coords: Coords,
}

impl Vehicle {
    pub fn new(cid: Cid, mut record: VehicleRecord) -> Self {
        // Derived keys always win over anything the payload sent under the same name.
        record.extra.remove("color");
        record.extra.remove("coords");
        let color = StatusColor::from_power(record.power_level_percent);
        let coords = Coords::new(record.lat, record.long);
        Self {
            cid,
            record,
            color,
            coords,
        }
    }

    pub fn cid(&self) -> Cid {
        self.cid
    }

    pub fn id(&self) -> Option<&VehicleId> {
        self.record.id.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    pub fn power_level_percent(&self) -> Option<f64> {
        self.record.power_level_percent
    }

    pub fn color(&self) -> StatusColor {
        self.color
    }

    pub fn record(&self) -> &VehicleRecord {
        &self.record
    }

    pub fn set_position(&mut self, lat: f64, long: f64) {
        self.record.lat = lat;
        self.record.long = long;
        self.coords = Coords::new(lat, long);
    }

    pub fn set_power_level(&mut self, power_level_percent: Option<f64>) {
        self.record.power_level_percent = power_level_percent;
        self.color = StatusColor::from_power(power_level_percent);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.name = Some(name.into());
    }

    /// Replaces every attribute with `record`, re-deriving color and coords.
    /// Returns `false` when nothing changed.
    pub fn merge(&mut self, record: VehicleRecord) -> bool {
        let merged = Vehicle::new(self.cid, record);
        if merged.record == self.record {
            return false;
        }
        *self = merged;
        true
    }
}

impl Entity for Vehicle {
    fn key(&self) -> EntityKey {
        EntityKey::Vehicle(self.cid)
    }

    fn coords(&self) -> Coords {
        self.coords
    }

    fn attributes(&self) -> Attributes {
        to_attributes(self)
    }
}
