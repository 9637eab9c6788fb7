//! Application context: owns every model, view and the map, and routes
//! notifications between them.

use crate::collection::{FetchOutcome, FetchRequest, HttpVehicleSource, VehicleCollection};
use crate::entity::{Cid, CommandCenter, Entity, EntityKey, Vehicle, VehicleRecord};
use crate::map::{MapProvider, MapRenderer, TileSource};
use crate::observer::{Notification, SubscriberId, Subscriptions};
use crate::prelude::{LocatorResult, ShellSettings};
use crate::router::{History, Route, Router};
use crate::telemetry::{ActivityLog, FetchMetrics, MetricsRecorder};
use crate::template::Template;
use crate::views::{DetailSubject, DetailView, ListView, ModelSet, RenderContext, View};
use log::{debug, warn};

pub struct AppContext<P: MapProvider> {
    collection: VehicleCollection,
    command_center: CommandCenter,
    subscriptions: Subscriptions,
    list: ListView,
    detail: DetailView,
    map: MapRenderer<P>,
    history: History,
    pending_vehicle: Option<String>,
    show_detail: bool,
    activity: ActivityLog,
    metrics: MetricsRecorder,
}

macro_rules! render_context {
    ($app:ident) => {
        RenderContext {
            models: ModelSet {
                collection: &$app.collection,
                command_center: &$app.command_center,
            },
            subscriptions: &mut $app.subscriptions,
        }
    };
}

impl<P: MapProvider> AppContext<P> {
    /// Builds the whole application and returns the initial reset fetch.
    pub fn start(settings: &ShellSettings, provider: P) -> LocatorResult<(Self, FetchRequest)> {
        let item_template = Template::parse(&settings.item_template)?;
        let detail_template = Template::parse(&settings.detail_template)?;
        let url = HttpVehicleSource::resolve(&settings.api_base, &settings.vehicles_path)?;

        let history = History::start(&settings.initial_route);
        let mut subscriptions = Subscriptions::new();
        let collection = VehicleCollection::new(url);
        let list = ListView::new(item_template, &mut subscriptions);
        let command_center = CommandCenter::new(&settings.command_center);
        let detail = DetailView::new(EntityKey::CommandCenter, detail_template, &mut subscriptions);
        let map = MapRenderer::new(
            provider,
            command_center.coords(),
            settings.zoom,
            TileSource::new(settings.tile_base.clone()),
        );

        let mut app = Self {
            collection,
            command_center,
            subscriptions,
            list,
            detail,
            map,
            history,
            pending_vehicle: None,
            show_detail: false,
            activity: ActivityLog::new(),
            metrics: MetricsRecorder::new(),
        };

        {
            let mut ctx = render_context!(app);
            app.detail.render(&mut ctx);
        }
        app.map.render()?;

        let initial = app.history.current().to_string();
        app.follow(&initial);

        let request = app.collection.begin_fetch(true);
        app.activity
            .record(format!("Fetching vehicles from {}", request.url));
        Ok((app, request))
    }

    /// Issues another fetch; `reset` replaces, otherwise merges.
    pub fn refresh(&mut self, reset: bool) -> FetchRequest {
        let request = self.collection.begin_fetch(reset);
        debug!("fetch #{} issued (reset {})", request.ticket.0, reset);
        request
    }

    /// Applies the result of a fetch task and re-renders listeners.
    pub fn apply_fetch(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<VehicleRecord>, String>,
    ) -> Vec<Notification> {
        let records = match result {
            Ok(records) => records,
            Err(err) => {
                self.metrics.record_failed();
                self.activity.record(format!("Vehicle fetch failed: {err}"));
                return Vec::new();
            }
        };

        match self.collection.complete_fetch(request, records) {
            FetchOutcome::Stale => {
                self.metrics.record_stale();
                Vec::new()
            }
            FetchOutcome::Applied(notifications) => {
                self.metrics.record_applied();
                self.dispatch(&notifications);
                self.activity
                    .record(format!("Loaded {} vehicles", self.collection.len()));
                if let Some(id) = self.pending_vehicle.take() {
                    self.show_vehicle_route(id);
                }
                notifications
            }
        }
    }

    /// Delivers notifications to every subscribed view.
    pub fn dispatch(&mut self, notifications: &[Notification]) {
        for notification in notifications {
            for subscriber in self.subscriptions.subscribers(notification.topic()) {
                let mut ctx = render_context!(self);
                match subscriber {
                    SubscriberId::List => self.list.render(&mut ctx),
                    SubscriberId::Item(cid) => self.list.render_item(cid, &mut ctx),
                    SubscriberId::Detail => self.detail.render(&mut ctx),
                }
            }
        }
    }

    /// Row click: reveal the panel, activate the row, bind the detail view
    /// and focus the map on the vehicle.
    pub fn show_detail(&mut self, cid: Cid) -> LocatorResult<()> {
        let Some(coords) = self.collection.get_by_cid(cid).map(Entity::coords) else {
            warn!("show detail for unknown vehicle {:?}", cid);
            return Ok(());
        };

        self.show_detail = true;
        self.list.activate(cid);
        {
            let mut ctx = render_context!(self);
            self.detail
                .set_model(DetailSubject::Entity(EntityKey::Vehicle(cid)), &mut ctx);
        }
        self.map.render()?;
        self.map.add_marker(coords)?;

        let label = self
            .collection
            .get_by_cid(cid)
            .and_then(Vehicle::name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("vehicle {}", cid.0));
        self.activity.record(format!("Selected {label}"));
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
        self.list.deactivate_all();
    }

    /// Pushes `path` onto the history and follows it.
    pub fn navigate(&mut self, path: &str) {
        if self.history.push(path) {
            let current = self.history.current().to_string();
            self.follow(&current);
        }
    }

    pub fn back(&mut self) {
        if let Some(path) = self.history.back().map(str::to_string) {
            self.follow(&path);
        }
    }

    pub fn forward(&mut self) {
        if let Some(path) = self.history.forward().map(str::to_string) {
            self.follow(&path);
        }
    }

    /// Mutates one vehicle and re-renders whoever listens to it.
    pub fn update_vehicle<F>(&mut self, cid: Cid, mutate: F) -> bool
    where
        F: FnOnce(&mut Vehicle),
    {
        match self.collection.update(cid, mutate) {
            Some(notification) => {
                self.dispatch(&[notification]);
                true
            }
            None => false,
        }
    }

    fn follow(&mut self, path: &str) {
        match Router::recognize(path) {
            Some(Route::Index) => {
                debug!("index route");
                self.pending_vehicle = None;
            }
            Some(Route::ShowVehicle(id)) => {
                if self.collection.has_fetched() {
                    self.show_vehicle_route(id);
                } else {
                    debug!("deferring vehicle/{id} until the first fetch lands");
                    self.pending_vehicle = Some(id);
                }
            }
            None => {
                warn!("no route matches {path}");
                self.pending_vehicle = None;
            }
        }
    }

    fn show_vehicle_route(&mut self, id: String) {
        let subject = match self.collection.get(&id) {
            Some(vehicle) => {
                self.list.activate(vehicle.cid());
                DetailSubject::Entity(vehicle.key())
            }
            None => {
                self.list.deactivate_all();
                DetailSubject::Missing(id.clone())
            }
        };
        self.show_detail = true;
        let mut ctx = render_context!(self);
        self.detail.set_model(subject, &mut ctx);
        self.activity.record(format!("Routed to vehicle {id}"));
    }

    pub fn collection(&self) -> &VehicleCollection {
        &self.collection
    }

    pub fn command_center(&self) -> &CommandCenter {
        &self.command_center
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn map(&self) -> &MapRenderer<P> {
        &self.map
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn is_showing_detail(&self) -> bool {
        self.show_detail
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn metrics(&self) -> FetchMetrics {
        self.metrics.snapshot()
    }
}
