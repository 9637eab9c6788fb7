//! Ordered vehicle collection backed by the remote JSON resource.

pub mod http;

use crate::entity::{Cid, EntityKey, Vehicle, VehicleRecord};
use crate::observer::Notification;
use log::{debug, warn};

pub use http::HttpVehicleSource;

/// Sequence number handed out per fetch; only the newest one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub url: String,
    pub reset: bool,
}

/// Outcome of applying a fetch response.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied(Vec<Notification>),
    /// A newer request was issued after this one; the payload was ignored.
    Stale,
}

#[derive(Debug)]
pub struct VehicleCollection {
    url: String,
    vehicles: Vec<Vehicle>,
    next_cid: u64,
    latest_ticket: u64,
    fetched: bool,
}

impl VehicleCollection {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            vehicles: Vec::new(),
            next_cid: 1,
            latest_ticket: 0,
            fetched: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn begin_fetch(&mut self, reset: bool) -> FetchRequest {
        self.latest_ticket += 1;
        FetchRequest {
            ticket: FetchTicket(self.latest_ticket),
            url: self.url.clone(),
            reset,
        }
    }

    /// Applies a response for `request`. A reset replaces every vehicle and
    /// yields one `Reset`; a merge updates vehicles with a matching id and
    /// appends the rest. Merging never removes vehicles and skips records
    /// that carry no id.
    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        records: Vec<VehicleRecord>,
    ) -> FetchOutcome {
        if request.ticket.0 < self.latest_ticket {
            warn!(
                "dropping stale fetch #{} (latest #{})",
                request.ticket.0, self.latest_ticket
            );
            return FetchOutcome::Stale;
        }
        self.fetched = true;

        if request.reset {
            self.vehicles = records
                .into_iter()
                .map(|record| {
                    let cid = self.allocate_cid();
                    Vehicle::new(cid, record)
                })
                .collect();
            debug!("collection reset with {} vehicles", self.vehicles.len());
            return FetchOutcome::Applied(vec![Notification::Reset]);
        }

        let mut notifications = Vec::new();
        let mut anonymous = 0;
        for record in records {
            // Without an id a record cannot be matched across fetches.
            let Some(id) = record.id.as_ref() else {
                anonymous += 1;
                continue;
            };
            let existing = self
                .vehicles
                .iter()
                .position(|vehicle| vehicle.id() == Some(id));
            match existing {
                Some(index) => {
                    let vehicle = &mut self.vehicles[index];
                    if vehicle.merge(record) {
                        notifications.push(Notification::Change(EntityKey::Vehicle(vehicle.cid())));
                    }
                }
                None => {
                    let cid = self.allocate_cid();
                    self.vehicles.push(Vehicle::new(cid, record));
                    notifications.push(Notification::Add(cid));
                }
            }
        }
        if anonymous > 0 {
            warn!("merge skipped {anonymous} vehicles without an id");
        }
        FetchOutcome::Applied(notifications)
    }

    /// True once any fetch response has been applied.
    pub fn has_fetched(&self) -> bool {
        self.fetched
    }

    /// Looks a vehicle up by the remote id as it appears in a route.
    pub fn get(&self, raw_id: &str) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.id().map_or(false, |id| id.matches(raw_id)))
    }

    pub fn get_by_cid(&self, cid: Cid) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.cid() == cid)
    }

    /// Mutates one vehicle in place and reports the change.
    pub fn update<F>(&mut self, cid: Cid, mutate: F) -> Option<Notification>
    where
        F: FnOnce(&mut Vehicle),
    {
        let vehicle = self.vehicles.iter_mut().find(|vehicle| vehicle.cid() == cid)?;
        mutate(vehicle);
        Some(Notification::Change(EntityKey::Vehicle(cid)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    fn allocate_cid(&mut self) -> Cid {
        let cid = Cid(self.next_cid);
        self.next_cid += 1;
        cid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::StatusColor;

    fn fleet() -> Vec<VehicleRecord> {
        vec![
            VehicleRecord::new(1, 10.0, 20.0, Some(80.0)),
            VehicleRecord::new(2, -5.0, 100.0, Some(30.0)),
        ]
    }

    #[test]
    fn reset_replaces_in_payload_order() {
        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let request = collection.begin_fetch(true);
        let outcome = collection.complete_fetch(&request, fleet());

        assert_eq!(outcome, FetchOutcome::Applied(vec![Notification::Reset]));
        let colors: Vec<_> = collection.iter().map(Vehicle::color).collect();
        assert_eq!(colors, vec![StatusColor::Green, StatusColor::Orange]);
        assert!(collection.has_fetched());
    }

    #[test]
    fn merge_updates_matching_ids_and_appends_new_ones() {
        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let first = collection.begin_fetch(true);
        collection.complete_fetch(&first, fleet());
        let rover_two = collection.get("2").unwrap().cid();

        let second = collection.begin_fetch(false);
        let outcome = collection.complete_fetch(
            &second,
            vec![
                VehicleRecord::new(1, 10.0, 20.0, Some(80.0)),
                VehicleRecord::new(2, -5.0, 100.0, Some(12.0)),
                VehicleRecord::new(3, 0.0, 0.0, None),
            ],
        );

        let FetchOutcome::Applied(notifications) = outcome else {
            panic!("merge should apply");
        };
        assert_eq!(notifications.len(), 2);
        assert_eq!(
            notifications[0],
            Notification::Change(EntityKey::Vehicle(rover_two))
        );
        assert!(matches!(notifications[1], Notification::Add(_)));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get("2").unwrap().color(), StatusColor::Red);
    }

    #[test]
    fn merge_never_duplicates_vehicles_without_an_id() {
        let mut anonymous = VehicleRecord::new(0, 3.0, 4.0, Some(60.0));
        anonymous.id = None;
        let mut records = fleet();
        records.push(anonymous);

        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let first = collection.begin_fetch(true);
        collection.complete_fetch(&first, records.clone());
        assert_eq!(collection.len(), 3);

        for _ in 0..3 {
            let request = collection.begin_fetch(false);
            let outcome = collection.complete_fetch(&request, records.clone());
            assert_eq!(outcome, FetchOutcome::Applied(Vec::new()));
        }
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn older_ticket_is_dropped() {
        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let slow = collection.begin_fetch(true);
        let fast = collection.begin_fetch(true);

        collection.complete_fetch(&fast, fleet());
        let outcome = collection.complete_fetch(&slow, Vec::new());

        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn reset_assigns_fresh_cids() {
        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let first = collection.begin_fetch(true);
        collection.complete_fetch(&first, fleet());
        let before = collection.get("1").unwrap().cid();

        let second = collection.begin_fetch(true);
        collection.complete_fetch(&second, fleet());
        assert_ne!(collection.get("1").unwrap().cid(), before);
    }

    #[test]
    fn update_reports_change_for_known_cid_only() {
        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let request = collection.begin_fetch(true);
        collection.complete_fetch(&request, fleet());
        let cid = collection.get("1").unwrap().cid();

        let notification = collection.update(cid, |vehicle| vehicle.set_power_level(Some(5.0)));
        assert_eq!(
            notification,
            Some(Notification::Change(EntityKey::Vehicle(cid)))
        );
        assert_eq!(collection.get_by_cid(cid).unwrap().color(), StatusColor::Red);
        assert_eq!(collection.update(Cid(999), |_| {}), None);
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let collection = VehicleCollection::new("/api/vehicles.json");
        assert!(collection.get("42").is_none());
    }
}
