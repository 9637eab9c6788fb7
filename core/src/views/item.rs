use super::{RenderContext, View};
use crate::entity::{Cid, EntityKey, StatusColor};
use crate::observer::{SubscriberId, Subscriptions, Topic};
use crate::template::Template;

/// One row of the vehicle list.
#[derive(Debug, Clone)]
pub struct ItemView {
    cid: Cid,
    template: Template,
    content: String,
    color: StatusColor,
    active: bool,
    renders: usize,
}

impl ItemView {
    /// Creates the row and subscribes it to its vehicle's changes.
    pub fn new(cid: Cid, template: Template, subscriptions: &mut Subscriptions) -> Self {
        subscriptions.subscribe(
            Topic::Entity(EntityKey::Vehicle(cid)),
            SubscriberId::Item(cid),
        );
        Self {
            cid,
            template,
            content: String::new(),
            color: StatusColor::Red,
            active: false,
            renders: 0,
        }
    }

    pub fn cid(&self) -> Cid {
        self.cid
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn color(&self) -> StatusColor {
        self.color
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl View for ItemView {
    fn subscriber(&self) -> SubscriberId {
        SubscriberId::Item(self.cid)
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(vehicle) = ctx.models.collection.get_by_cid(self.cid) {
            self.color = vehicle.color();
        }
        let attributes = ctx
            .models
            .attributes(EntityKey::Vehicle(self.cid))
            .unwrap_or_default();
        self.content = self.template.render(&attributes);
        self.renders += 1;
    }
}
