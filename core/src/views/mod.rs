//! Headless views: each one turns model state into rendered text and keeps
//! its own subscriptions in the shared registry.

pub mod detail;
pub mod item;
pub mod list;

use crate::collection::VehicleCollection;
use crate::entity::{Attributes, CommandCenter, Entity, EntityKey};
use crate::observer::{SubscriberId, Subscriptions};
use crate::prelude::Coords;

pub use detail::{DetailSubject, DetailView};
pub use item::ItemView;
pub use list::ListView;

/// Read access to every entity the views may bind to.
#[derive(Clone, Copy)]
pub struct ModelSet<'a> {
    pub collection: &'a VehicleCollection,
    pub command_center: &'a CommandCenter,
}

impl<'a> ModelSet<'a> {
    pub fn attributes(&self, key: EntityKey) -> Option<Attributes> {
        match key {
            EntityKey::CommandCenter => Some(self.command_center.attributes()),
            EntityKey::Vehicle(cid) => self.collection.get_by_cid(cid).map(Entity::attributes),
        }
    }

    pub fn coords(&self, key: EntityKey) -> Option<Coords> {
        match key {
            EntityKey::CommandCenter => Some(self.command_center.coords()),
            EntityKey::Vehicle(cid) => self.collection.get_by_cid(cid).map(Entity::coords),
        }
    }
}

pub struct RenderContext<'a> {
    pub models: ModelSet<'a>,
    pub subscriptions: &'a mut Subscriptions,
}

/// Rendering is a pure function of current model state; calling it twice
/// without a model change yields the same output.
pub trait View {
    fn subscriber(&self) -> SubscriberId;
    fn render(&mut self, ctx: &mut RenderContext<'_>);
}
